//! Topic-facing summary shapes and their pure builders.

use std::collections::HashMap;

use serde::Serialize;

use crate::cluster::error_codes;
use crate::cluster::types::{RawGroupDescription, RawTopicConfigs, RawTopicMetadata};
use crate::console::consumer_groups::summed_topic_lag;
use crate::console::error::{ConsoleError, ConsoleResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    pub topic_name: String,
    pub is_internal: bool,
    pub partition_count: usize,
    pub replication_factor: usize,
    pub cleanup_policy: String,
    /// Summed on-disk size across all brokers; `None` while any broker's
    /// log-dir report is unavailable (unknown, not zero).
    pub log_dir_size: Option<i64>,
    pub allowed_actions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDetails {
    pub topic_name: String,
    pub partitions: Vec<TopicPartitionDetails>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicPartitionDetails {
    pub partition_id: i32,
    pub low_water_mark: i64,
    pub high_water_mark: i64,
    pub leader: i32,
    pub replicas: Vec<i32>,
    pub in_sync_replicas: Vec<i32>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicConfig {
    pub topic_name: String,
    pub config_entries: Vec<TopicConfigEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicConfigEntry {
    pub name: String,
    pub value: Option<String>,
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicConsumerGroup {
    pub group_id: String,
    pub summed_lag: Option<i64>,
}

pub fn build_topic_summary(
    metadata: &RawTopicMetadata,
    cleanup_policy: String,
    log_dir_size: Option<i64>,
) -> TopicSummary {
    TopicSummary {
        topic_name: metadata.name.clone(),
        is_internal: metadata.is_internal,
        partition_count: metadata.partitions.len(),
        replication_factor: metadata
            .partitions
            .first()
            .map(|p| p.replicas.len())
            .unwrap_or(0),
        cleanup_policy,
        log_dir_size,
        allowed_actions: Vec::new(),
    }
}

pub fn build_topic_details(metadata: RawTopicMetadata) -> TopicDetails {
    TopicDetails {
        topic_name: metadata.name,
        partitions: metadata
            .partitions
            .into_iter()
            .map(|partition| TopicPartitionDetails {
                partition_id: partition.partition_id,
                low_water_mark: partition.low_water_mark,
                high_water_mark: partition.high_water_mark,
                leader: partition.leader,
                replicas: partition.replicas,
                in_sync_replicas: partition.in_sync_replicas,
                error: error_codes::message_for(partition.error_code),
            })
            .collect(),
    }
}

pub fn build_topic_config(topic: &str, raw: RawTopicConfigs) -> ConsoleResult<TopicConfig> {
    if let Some(message) = error_codes::message_for(raw.error_code) {
        return Err(ConsoleError::NotFound(format!(
            "config for topic '{}' is unavailable: {}",
            topic,
            raw.error_message.unwrap_or(message)
        )));
    }
    Ok(TopicConfig {
        topic_name: topic.to_string(),
        config_entries: raw
            .entries
            .into_iter()
            .map(|entry| TopicConfigEntry {
                name: entry.name,
                value: entry.value,
                is_default: entry.is_default,
            })
            .collect(),
    })
}

/// All groups that track offsets for the given topic, with their summed
/// lag over it. Sorted by group id for stable display.
pub fn build_topic_consumers(
    topic: &str,
    groups: &[RawGroupDescription],
    watermarks: &HashMap<(String, i32), Option<i64>>,
) -> Vec<TopicConsumerGroup> {
    let mut consumers: Vec<TopicConsumerGroup> = groups
        .iter()
        .filter(|group| group.offsets.iter().any(|o| o.topic == topic))
        .map(|group| TopicConsumerGroup {
            group_id: group.group_id.clone(),
            summed_lag: summed_topic_lag(group, topic, watermarks),
        })
        .collect();
    consumers.sort_by(|a, b| a.group_id.cmp(&b.group_id));
    consumers
}
