//! Log-directory aggregation.
//!
//! Merges per-broker describe-log-dirs reports into one tree per broker
//! (broker -> directory -> topic -> partition) with additive byte and
//! count rollups. A failure at any level only empties that subtree; the
//! siblings still aggregate. A whole-broker failure therefore yields an
//! entry with the error set and all rollups at zero.

use std::collections::HashMap;

use serde::Serialize;

use crate::cluster::error_codes;
use crate::cluster::types::BrokerLogDirsResponse;
use crate::console::error::{ConsoleError, ConsoleResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerLogDirs {
    pub broker_id: i32,
    pub broker_host: String,
    pub error: Option<String>,
    pub log_dirs: Vec<LogDir>,
    pub total_size_bytes: i64,
    pub topic_count: usize,
    pub partition_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogDir {
    pub error: Option<String>,
    pub absolute_path: String,
    pub total_size_bytes: i64,
    pub topics: Vec<LogDirTopic>,
    pub partition_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogDirTopic {
    pub topic_name: String,
    pub total_size_bytes: i64,
    pub partitions: Vec<LogDirPartition>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogDirPartition {
    pub partition_id: i32,
    pub offset_lag: i64,
    pub size_bytes: i64,
}

/// Aggregates raw per-broker reports into a map keyed by broker id.
/// Duplicate broker ids mean the wire client broke its contract and fail
/// the whole call; everything below the broker level degrades per node.
pub fn aggregate_log_dirs(
    responses: Vec<BrokerLogDirsResponse>,
) -> ConsoleResult<HashMap<i32, BrokerLogDirs>> {
    let mut result = HashMap::with_capacity(responses.len());

    for response in responses {
        let broker_id = response.broker.node_id;
        let mut broker_dirs = BrokerLogDirs {
            broker_id,
            broker_host: response.broker.host.clone(),
            error: response.error.as_ref().map(|e| e.to_string()),
            log_dirs: Vec::new(),
            total_size_bytes: 0,
            topic_count: 0,
            partition_count: 0,
        };

        if broker_dirs.error.is_none() {
            broker_dirs.log_dirs = Vec::with_capacity(response.dirs.len());
            for dir in response.dirs {
                let mut log_dir = LogDir {
                    error: error_codes::message_for(dir.error_code),
                    absolute_path: dir.path,
                    total_size_bytes: 0,
                    topics: Vec::new(),
                    partition_count: 0,
                };
                if log_dir.error.is_some() {
                    broker_dirs.log_dirs.push(log_dir);
                    continue;
                }

                log_dir.topics = Vec::with_capacity(dir.topics.len());
                for topic in dir.topics {
                    let mut dir_topic = LogDirTopic {
                        topic_name: topic.name,
                        total_size_bytes: 0,
                        partitions: Vec::with_capacity(topic.partitions.len()),
                    };
                    for partition in topic.partitions {
                        dir_topic.total_size_bytes += partition.size_bytes;
                        dir_topic.partitions.push(LogDirPartition {
                            partition_id: partition.partition_id,
                            offset_lag: partition.offset_lag,
                            size_bytes: partition.size_bytes,
                        });
                    }
                    log_dir.total_size_bytes += dir_topic.total_size_bytes;
                    log_dir.partition_count += dir_topic.partitions.len();
                    log_dir.topics.push(dir_topic);
                }
                broker_dirs.total_size_bytes += log_dir.total_size_bytes;
                broker_dirs.topic_count += log_dir.topics.len();
                broker_dirs.partition_count += log_dir.partition_count;
                broker_dirs.log_dirs.push(log_dir);
            }
        }

        if result.insert(broker_id, broker_dirs).is_some() {
            return Err(ConsoleError::AdapterContract(format!(
                "broker id {} reported twice in describe-log-dirs response",
                broker_id
            )));
        }
    }

    Ok(result)
}

/// Sums the on-disk footprint per topic across all brokers and dirs.
/// Returns the sums plus whether any subtree failed; with a failed subtree
/// the sums are lower bounds and callers must report them as unknown
/// rather than as exact values.
pub fn topic_sizes(dirs_by_broker: &HashMap<i32, BrokerLogDirs>) -> (HashMap<String, i64>, bool) {
    let mut sizes: HashMap<String, i64> = HashMap::new();
    let mut incomplete = false;

    for broker in dirs_by_broker.values() {
        if broker.error.is_some() {
            incomplete = true;
            continue;
        }
        for dir in &broker.log_dirs {
            if dir.error.is_some() {
                incomplete = true;
                continue;
            }
            for topic in &dir.topics {
                *sizes.entry(topic.topic_name.clone()).or_insert(0) += topic.total_size_bytes;
            }
        }
    }

    (sizes, incomplete)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::types::*;

    fn report(broker_id: i32, sizes: &[i64]) -> BrokerLogDirsResponse {
        BrokerLogDirsResponse {
            broker: BrokerMetadata {
                node_id: broker_id,
                host: format!("broker-{}", broker_id),
                port: 9092,
                rack: None,
            },
            error: None,
            dirs: vec![RawLogDir {
                error_code: 0,
                path: "/data".to_string(),
                topics: vec![RawLogDirTopic {
                    name: "orders".to_string(),
                    partitions: sizes
                        .iter()
                        .enumerate()
                        .map(|(i, size)| RawLogDirPartition {
                            partition_id: i as i32,
                            size_bytes: *size,
                            offset_lag: 0,
                        })
                        .collect(),
                }],
            }],
        }
    }

    #[test]
    fn rollups_are_additive_bottom_up() {
        let result = aggregate_log_dirs(vec![report(1, &[100, 150, 50])]).unwrap();
        let broker = &result[&1];
        assert_eq!(broker.total_size_bytes, 300);
        assert_eq!(broker.log_dirs[0].total_size_bytes, 300);
        assert_eq!(broker.log_dirs[0].topics[0].total_size_bytes, 300);
        assert_eq!(broker.partition_count, 3);
        assert_eq!(broker.topic_count, 1);
    }

    #[test]
    fn duplicate_broker_id_is_a_contract_violation() {
        let err = aggregate_log_dirs(vec![report(1, &[10]), report(1, &[20])]).unwrap_err();
        assert!(matches!(err, ConsoleError::AdapterContract(_)));
    }

    #[test]
    fn dir_level_error_empties_only_that_dir() {
        let mut response = report(1, &[100]);
        response.dirs.push(RawLogDir {
            error_code: error_codes::LOG_DIR_NOT_FOUND,
            path: "/missing".to_string(),
            topics: vec![RawLogDirTopic { name: "ghost".to_string(), partitions: vec![] }],
        });

        let result = aggregate_log_dirs(vec![response]).unwrap();
        let broker = &result[&1];
        assert_eq!(broker.log_dirs.len(), 2);
        assert!(broker.log_dirs[1].error.is_some());
        assert!(broker.log_dirs[1].topics.is_empty());
        assert_eq!(broker.log_dirs[1].total_size_bytes, 0);
        // The healthy sibling still rolls up into the broker totals.
        assert_eq!(broker.total_size_bytes, 100);
        assert_eq!(broker.topic_count, 1);
    }

    #[test]
    fn topic_sizes_flag_incomplete_data() {
        let mut failed = report(2, &[]);
        failed.error = Some(ClientError::Connection("unreachable".to_string()));
        failed.dirs.clear();

        let aggregated = aggregate_log_dirs(vec![report(1, &[100, 150]), failed]).unwrap();
        let (sizes, incomplete) = topic_sizes(&aggregated);
        assert_eq!(sizes["orders"], 250);
        assert!(incomplete);
    }
}
