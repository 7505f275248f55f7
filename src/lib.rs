pub mod cluster;
pub mod config;
pub mod console;
pub mod server;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::cluster::ClusterClient;
use crate::console::hooks::ConsoleHooks;
use crate::console::ConsoleService;

// ========================================
// ENGINE (The Singleton)
// ========================================

/// The per-process console engine, cheap to clone (everything behind Arcs).
/// Each HTTP request gets a child of the shutdown token, so in-flight
/// aggregations cancel cleanly when the process shuts down.
#[derive(Clone)]
pub struct ConsoleEngine {
    pub console: Arc<ConsoleService>,
    pub shutdown: CancellationToken,
    pub started_at: DateTime<Utc>,
}

impl ConsoleEngine {
    pub fn new(cluster: Arc<dyn ClusterClient>, hooks: Arc<dyn ConsoleHooks>) -> Self {
        Self {
            console: Arc::new(ConsoleService::new(cluster, hooks)),
            shutdown: CancellationToken::new(),
            started_at: Utc::now(),
        }
    }

    /// Cancellation token for one request's lifetime.
    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}
