//! Raw per-node response structures as the wire client hands them over.
//!
//! Every level that can fail independently carries its own error marker:
//! a call-level `ClientError` for whole-broker failures, a protocol error
//! code (`0` = none) for everything below. Translation into console-facing
//! shapes happens in `console::*`, never here.

use thiserror::Error;

/// Call-level failure for a single request (or a single broker within a
/// fanned-out request). Cloneable so a per-broker response can carry it.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("connection to broker failed: {0}")]
    Connection(String),

    #[error("request timed out after {0}ms")]
    Timeout(u64),
}

#[derive(Debug, Clone)]
pub struct BrokerMetadata {
    pub node_id: i32,
    pub host: String,
    pub port: u16,
    pub rack: Option<String>,
}

// ==========================================
// DESCRIBE LOG DIRS
// ==========================================

/// One broker's answer to a describe-log-dirs request. The call to each
/// broker fails independently, hence the per-response error.
#[derive(Debug, Clone)]
pub struct BrokerLogDirsResponse {
    pub broker: BrokerMetadata,
    pub error: Option<ClientError>,
    pub dirs: Vec<RawLogDir>,
}

#[derive(Debug, Clone)]
pub struct RawLogDir {
    pub error_code: i16,
    pub path: String,
    pub topics: Vec<RawLogDirTopic>,
}

#[derive(Debug, Clone)]
pub struct RawLogDirTopic {
    pub name: String,
    pub partitions: Vec<RawLogDirPartition>,
}

#[derive(Debug, Clone)]
pub struct RawLogDirPartition {
    pub partition_id: i32,
    pub size_bytes: i64,
    pub offset_lag: i64,
}

// ==========================================
// PARTITION REASSIGNMENTS
// ==========================================

#[derive(Debug, Clone, Default)]
pub struct ListReassignmentsResponse {
    pub error_code: i16,
    pub error_message: Option<String>,
    pub topics: Vec<RawTopicReassignments>,
}

#[derive(Debug, Clone)]
pub struct RawTopicReassignments {
    pub topic: String,
    pub partitions: Vec<RawPartitionReassignment>,
}

#[derive(Debug, Clone)]
pub struct RawPartitionReassignment {
    pub partition_id: i32,
    /// Full target replica set, not to be confused with the removing set.
    pub replicas: Vec<i32>,
    pub adding_replicas: Vec<i32>,
    pub removing_replicas: Vec<i32>,
}

/// Caller-supplied reassignment intent for one topic.
#[derive(Debug, Clone)]
pub struct ReassignmentIntent {
    pub topic: String,
    pub partitions: Vec<PartitionIntent>,
}

#[derive(Debug, Clone)]
pub struct PartitionIntent {
    pub partition_id: i32,
    /// `None` cancels an in-flight reassignment for this partition.
    pub target_replicas: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Default)]
pub struct AlterReassignmentsResponse {
    pub error_code: i16,
    pub error_message: Option<String>,
    pub topics: Vec<RawAlterTopicResponse>,
}

#[derive(Debug, Clone)]
pub struct RawAlterTopicResponse {
    pub topic: String,
    pub partitions: Vec<RawAlterPartitionResponse>,
}

#[derive(Debug, Clone)]
pub struct RawAlterPartitionResponse {
    pub partition_id: i32,
    pub error_code: i16,
    pub error_message: Option<String>,
}

// ==========================================
// CONSUMER GROUPS
// ==========================================

#[derive(Debug, Clone)]
pub struct RawGroupDescription {
    pub group_id: String,
    pub state: String,
    pub protocol_type: String,
    pub coordinator_id: i32,
    pub members: Vec<RawGroupMember>,
    pub offsets: Vec<RawGroupTopicOffsets>,
}

#[derive(Debug, Clone)]
pub struct RawGroupMember {
    pub member_id: String,
    pub client_id: String,
    pub client_host: String,
    pub assigned_topics: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RawGroupTopicOffsets {
    pub topic: String,
    pub partition_offsets: Vec<RawPartitionOffset>,
}

#[derive(Debug, Clone)]
pub struct RawPartitionOffset {
    pub partition_id: i32,
    pub committed_offset: i64,
}

// ==========================================
// TOPIC METADATA / CONFIGS
// ==========================================

#[derive(Debug, Clone)]
pub struct RawTopicMetadata {
    pub name: String,
    pub is_internal: bool,
    pub partitions: Vec<RawPartitionMetadata>,
}

#[derive(Debug, Clone)]
pub struct RawPartitionMetadata {
    pub partition_id: i32,
    /// Non-zero when the watermark query for this partition failed; leader
    /// and replica data may still be valid in that case.
    pub error_code: i16,
    pub leader: i32,
    pub replicas: Vec<i32>,
    pub in_sync_replicas: Vec<i32>,
    pub low_water_mark: i64,
    pub high_water_mark: i64,
}

#[derive(Debug, Clone, Default)]
pub struct RawTopicConfigs {
    pub error_code: i16,
    pub error_message: Option<String>,
    pub entries: Vec<RawConfigEntry>,
}

#[derive(Debug, Clone)]
pub struct RawConfigEntry {
    pub name: String,
    pub value: Option<String>,
    pub is_default: bool,
}
