use std::env;
use std::sync::OnceLock;

static CONFIG: OnceLock<Config> = OnceLock::new();

// --- CONFIG AGGREGATOR ---

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub cluster: ClusterConfig,
}

impl Config {
    pub fn global() -> &'static Config {
        CONFIG.get_or_init(Self::load)
    }

    fn load() -> Self {
        dotenv::dotenv().ok();
        Self {
            server: ServerConfig::load(),
            cluster: ClusterConfig::load(),
        }
    }
}

// --- MODULES ---

// SERVER
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl ServerConfig {
    fn load() -> Self {
        Self {
            host:      get_env("CONSOLE_HOST", "127.0.0.1"),
            port:      get_env("CONSOLE_PORT", "8080"),
            log_level: get_env("CONSOLE_LOG", "info"),
        }
    }
}

// CLUSTER
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    pub seed_brokers: Vec<String>,
    pub request_timeout_ms: u64,
}

impl ClusterConfig {
    fn load() -> Self {
        let seeds: String = get_env("CLUSTER_SEED_BROKERS", "localhost:9092");
        Self {
            seed_brokers:       seeds.split(',').map(|s| s.trim().to_string()).collect(),
            request_timeout_ms: get_env("CLUSTER_REQUEST_TIMEOUT_MS", "15000"),
        }
    }
}

// --- PRIVATE HELPER ---

fn get_env<T: std::str::FromStr>(key: &str, default: &str) -> T {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| format!("Config error: {} must be valid", key))
        .unwrap()
}
