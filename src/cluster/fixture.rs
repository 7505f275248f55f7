//! In-memory [`ClusterClient`] serving canned responses.
//!
//! Backs the integration tests and the demo mode of the binary: responses
//! are fixed at build time, optionally behind an artificial delay, and a
//! configured outage makes every call fail at the transport level.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use super::types::*;
use super::ClusterClient;

#[derive(Default)]
pub struct FixtureCluster {
    log_dir_responses: Vec<BrokerLogDirsResponse>,
    topics: Vec<RawTopicMetadata>,
    groups: Vec<RawGroupDescription>,
    reassignments: ListReassignmentsResponse,
    alter_response: Option<AlterReassignmentsResponse>,
    configs: HashMap<String, RawTopicConfigs>,
    outage: Option<ClientError>,
    delay: Option<Duration>,
}

impl FixtureCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log_dirs_response(mut self, response: BrokerLogDirsResponse) -> Self {
        self.log_dir_responses.push(response);
        self
    }

    pub fn with_topic(mut self, topic: RawTopicMetadata) -> Self {
        self.topics.push(topic);
        self
    }

    pub fn with_group(mut self, group: RawGroupDescription) -> Self {
        self.groups.push(group);
        self
    }

    pub fn with_reassignments(mut self, response: ListReassignmentsResponse) -> Self {
        self.reassignments = response;
        self
    }

    pub fn with_alter_response(mut self, response: AlterReassignmentsResponse) -> Self {
        self.alter_response = Some(response);
        self
    }

    pub fn with_topic_configs(mut self, topic: &str, configs: RawTopicConfigs) -> Self {
        self.configs.insert(topic.to_string(), configs);
        self
    }

    /// Makes every call fail with the given transport error.
    pub fn with_outage(mut self, error: ClientError) -> Self {
        self.outage = Some(error);
        self
    }

    /// Adds latency before every response, for cancellation tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn answer(&self) -> Result<(), ClientError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.outage {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// A small three-broker cluster with one topic and one consumer group,
    /// enough to click through every endpoint.
    pub fn demo() -> Self {
        use super::error_codes;

        let broker = |node_id: i32| BrokerMetadata {
            node_id,
            host: format!("broker-{}.cluster.local", node_id),
            port: 9092,
            rack: None,
        };
        let dir = |sizes: &[(i32, i64)]| RawLogDir {
            error_code: error_codes::NONE,
            path: "/var/lib/broker/data".to_string(),
            topics: vec![RawLogDirTopic {
                name: "orders".to_string(),
                partitions: sizes
                    .iter()
                    .map(|(id, size)| RawLogDirPartition {
                        partition_id: *id,
                        size_bytes: *size,
                        offset_lag: 0,
                    })
                    .collect(),
            }],
        };

        let partition = |id: i32, leader: i32, high: i64| RawPartitionMetadata {
            partition_id: id,
            error_code: error_codes::NONE,
            leader,
            replicas: vec![1, 2, 3],
            in_sync_replicas: vec![1, 2, 3],
            low_water_mark: 0,
            high_water_mark: high,
        };

        Self::new()
            .with_log_dirs_response(BrokerLogDirsResponse {
                broker: broker(1),
                error: None,
                dirs: vec![dir(&[(0, 4096), (1, 8192)])],
            })
            .with_log_dirs_response(BrokerLogDirsResponse {
                broker: broker(2),
                error: None,
                dirs: vec![dir(&[(0, 4096), (1, 8192)])],
            })
            .with_log_dirs_response(BrokerLogDirsResponse {
                broker: broker(3),
                error: None,
                dirs: vec![dir(&[(0, 4096), (1, 8192)])],
            })
            .with_topic(RawTopicMetadata {
                name: "orders".to_string(),
                is_internal: false,
                partitions: vec![partition(0, 1, 1200), partition(1, 2, 900)],
            })
            .with_group(RawGroupDescription {
                group_id: "orders-billing".to_string(),
                state: "Stable".to_string(),
                protocol_type: "consumer".to_string(),
                coordinator_id: 2,
                members: vec![RawGroupMember {
                    member_id: "billing-1".to_string(),
                    client_id: "billing".to_string(),
                    client_host: "10.0.0.17".to_string(),
                    assigned_topics: vec!["orders".to_string()],
                }],
                offsets: vec![RawGroupTopicOffsets {
                    topic: "orders".to_string(),
                    partition_offsets: vec![
                        RawPartitionOffset { partition_id: 0, committed_offset: 1100 },
                        RawPartitionOffset { partition_id: 1, committed_offset: 900 },
                    ],
                }],
            })
            .with_topic_configs(
                "orders",
                RawTopicConfigs {
                    error_code: error_codes::NONE,
                    error_message: None,
                    entries: vec![
                        RawConfigEntry {
                            name: "cleanup.policy".to_string(),
                            value: Some("delete".to_string()),
                            is_default: true,
                        },
                        RawConfigEntry {
                            name: "retention.ms".to_string(),
                            value: Some("604800000".to_string()),
                            is_default: true,
                        },
                    ],
                },
            )
    }
}

#[async_trait]
impl ClusterClient for FixtureCluster {
    async fn describe_log_dirs(
        &self,
        brokers: Option<&[i32]>,
    ) -> Result<Vec<BrokerLogDirsResponse>, ClientError> {
        self.answer().await?;
        let responses = self
            .log_dir_responses
            .iter()
            .filter(|r| brokers.map_or(true, |ids| ids.contains(&r.broker.node_id)))
            .cloned()
            .collect();
        Ok(responses)
    }

    async fn list_partition_reassignments(
        &self,
    ) -> Result<ListReassignmentsResponse, ClientError> {
        self.answer().await?;
        Ok(self.reassignments.clone())
    }

    async fn alter_partition_assignments(
        &self,
        intents: &[ReassignmentIntent],
    ) -> Result<AlterReassignmentsResponse, ClientError> {
        self.answer().await?;
        if let Some(response) = &self.alter_response {
            return Ok(response.clone());
        }
        // Acknowledge every partition when no canned response is configured.
        Ok(AlterReassignmentsResponse {
            error_code: 0,
            error_message: None,
            topics: intents
                .iter()
                .map(|intent| RawAlterTopicResponse {
                    topic: intent.topic.clone(),
                    partitions: intent
                        .partitions
                        .iter()
                        .map(|p| RawAlterPartitionResponse {
                            partition_id: p.partition_id,
                            error_code: 0,
                            error_message: None,
                        })
                        .collect(),
                })
                .collect(),
        })
    }

    async fn describe_consumer_groups(
        &self,
        groups: Option<&[String]>,
    ) -> Result<Vec<RawGroupDescription>, ClientError> {
        self.answer().await?;
        let described = self
            .groups
            .iter()
            .filter(|g| groups.map_or(true, |ids| ids.contains(&g.group_id)))
            .cloned()
            .collect();
        Ok(described)
    }

    async fn describe_topics(
        &self,
        topics: Option<&[String]>,
    ) -> Result<Vec<RawTopicMetadata>, ClientError> {
        self.answer().await?;
        let described = self
            .topics
            .iter()
            .filter(|t| topics.map_or(true, |names| names.contains(&t.name)))
            .cloned()
            .collect();
        Ok(described)
    }

    async fn describe_topic_configs(
        &self,
        topic: &str,
        keys: Option<&[String]>,
    ) -> Result<RawTopicConfigs, ClientError> {
        self.answer().await?;
        let mut configs = self.configs.get(topic).cloned().unwrap_or(RawTopicConfigs {
            error_code: super::error_codes::UNKNOWN_TOPIC_OR_PARTITION,
            error_message: None,
            entries: Vec::new(),
        });
        if let Some(keys) = keys {
            configs.entries.retain(|e| keys.contains(&e.name));
        }
        Ok(configs)
    }
}
