#![allow(dead_code)]

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use vantage::cluster::fixture::FixtureCluster;
use vantage::cluster::types::*;
use vantage::console::hooks::{Action, AllowAllHooks, ConsoleHooks, Resource};
use vantage::console::ConsoleService;

pub fn service(cluster: FixtureCluster) -> ConsoleService {
    ConsoleService::new(Arc::new(cluster), Arc::new(AllowAllHooks))
}

pub fn service_with_hooks(cluster: FixtureCluster, hooks: impl ConsoleHooks + 'static) -> ConsoleService {
    ConsoleService::new(Arc::new(cluster), Arc::new(hooks))
}

pub fn token() -> CancellationToken {
    CancellationToken::new()
}

pub fn broker(node_id: i32) -> BrokerMetadata {
    BrokerMetadata {
        node_id,
        host: format!("broker-{}", node_id),
        port: 9092,
        rack: None,
    }
}

/// A healthy report: one log dir with topic "orders" and the given
/// partition sizes.
pub fn healthy_report(broker_id: i32, sizes: &[i64]) -> BrokerLogDirsResponse {
    BrokerLogDirsResponse {
        broker: broker(broker_id),
        error: None,
        dirs: vec![RawLogDir {
            error_code: 0,
            path: "/var/lib/broker/data".to_string(),
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

pub fn failed_report(broker_id: i32) -> BrokerLogDirsResponse {
    BrokerLogDirsResponse {
        broker: broker(broker_id),
        error: Some(ClientError::Connection("dial tcp: connection refused".to_string())),
        dirs: Vec::new(),
    }
}

/// The three-broker cluster where broker 2 is unreachable and brokers 1
/// and 3 each report "orders" with partitions of 100 and 150 bytes.
pub fn three_broker_cluster() -> FixtureCluster {
    FixtureCluster::new()
        .with_log_dirs_response(healthy_report(1, &[100, 150]))
        .with_log_dirs_response(failed_report(2))
        .with_log_dirs_response(healthy_report(3, &[100, 150]))
}

pub fn topic_metadata(name: &str, partitions: Vec<RawPartitionMetadata>) -> RawTopicMetadata {
    RawTopicMetadata {
        name: name.to_string(),
        is_internal: false,
        partitions,
    }
}

pub fn partition_metadata(id: i32, high_water_mark: i64) -> RawPartitionMetadata {
    RawPartitionMetadata {
        partition_id: id,
        error_code: 0,
        leader: 1,
        replicas: vec![1, 2],
        in_sync_replicas: vec![1, 2],
        low_water_mark: 0,
        high_water_mark,
    }
}

pub fn group_with_offsets(id: &str, topic: &str, offsets: &[(i32, i64)]) -> RawGroupDescription {
    RawGroupDescription {
        group_id: id.to_string(),
        state: "Stable".to_string(),
        protocol_type: "consumer".to_string(),
        coordinator_id: 1,
        members: vec![RawGroupMember {
            member_id: format!("{}-member-1", id),
            client_id: id.to_string(),
            client_host: "10.0.0.1".to_string(),
            assigned_topics: vec![topic.to_string()],
        }],
        offsets: vec![RawGroupTopicOffsets {
            topic: topic.to_string(),
            partition_offsets: offsets
                .iter()
                .map(|(partition_id, committed_offset)| RawPartitionOffset {
                    partition_id: *partition_id,
                    committed_offset: *committed_offset,
                })
                .collect(),
        }],
    }
}

/// Policy that hides the named resources and refuses mutations; everything
/// else is allowed.
pub struct DenyListHooks {
    pub hidden_topics: Vec<String>,
    pub hidden_groups: Vec<String>,
    pub allow_patch: bool,
}

impl DenyListHooks {
    pub fn hiding_topic(name: &str) -> Self {
        Self {
            hidden_topics: vec![name.to_string()],
            hidden_groups: Vec::new(),
            allow_patch: true,
        }
    }

    pub fn hiding_group(name: &str) -> Self {
        Self {
            hidden_topics: Vec::new(),
            hidden_groups: vec![name.to_string()],
            allow_patch: true,
        }
    }

    pub fn read_only() -> Self {
        Self { hidden_topics: Vec::new(), hidden_groups: Vec::new(), allow_patch: false }
    }
}

impl ConsoleHooks for DenyListHooks {
    fn is_allowed(&self, resource: Resource<'_>, action: Action) -> bool {
        match resource {
            Resource::Topic(name) => !self.hidden_topics.iter().any(|t| t == name),
            Resource::ConsumerGroup(id) => !self.hidden_groups.iter().any(|g| g == id),
            Resource::Cluster => action != Action::PatchReassignments || self.allow_patch,
        }
    }

    fn allowed_actions(&self, _resource: Resource<'_>) -> Vec<String> {
        vec!["all".to_string()]
    }
}
