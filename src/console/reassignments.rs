//! Partition reassignment listing and mutation translation.
//!
//! Format normalization only: a cluster-level error code fails the whole
//! call, otherwise the in-flight state is copied verbatim per topic. For
//! mutations, per-partition error codes are rendered into message strings
//! (empty = accepted) without hiding the other partitions' outcomes.

use serde::Serialize;

use crate::cluster::error_codes;
use crate::cluster::types::{AlterReassignmentsResponse, ListReassignmentsResponse};
use crate::console::error::{ConsoleError, ConsoleResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionReassignments {
    pub topic_name: String,
    pub partitions: Vec<PartitionReassignmentsPartition>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionReassignmentsPartition {
    pub partition_id: i32,
    pub adding_replicas: Vec<i32>,
    pub removing_replicas: Vec<i32>,
    /// The full target replica set. Distinct from `removing_replicas` even
    /// though both are plain id lists.
    pub replicas: Vec<i32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlterReassignmentResult {
    pub topic_name: String,
    pub partitions: Vec<AlterReassignmentPartitionResult>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlterReassignmentPartitionResult {
    pub partition_id: i32,
    /// Empty string when the mutation for this partition was accepted.
    pub error_code: String,
    pub error_message: Option<String>,
}

pub fn translate_listing(
    response: ListReassignmentsResponse,
) -> ConsoleResult<Vec<PartitionReassignments>> {
    ConsoleError::check_protocol(
        "list partition reassignments",
        response.error_code,
        response.error_message.as_deref(),
    )?;

    let reassignments = response
        .topics
        .into_iter()
        .map(|topic| PartitionReassignments {
            topic_name: topic.topic,
            partitions: topic
                .partitions
                .into_iter()
                .map(|partition| PartitionReassignmentsPartition {
                    partition_id: partition.partition_id,
                    adding_replicas: partition.adding_replicas,
                    removing_replicas: partition.removing_replicas,
                    replicas: partition.replicas,
                })
                .collect(),
        })
        .collect();

    Ok(reassignments)
}

pub fn translate_alter_response(
    response: AlterReassignmentsResponse,
) -> ConsoleResult<Vec<AlterReassignmentResult>> {
    ConsoleError::check_protocol(
        "alter partition assignments",
        response.error_code,
        response.error_message.as_deref(),
    )?;

    let results = response
        .topics
        .into_iter()
        .map(|topic| AlterReassignmentResult {
            topic_name: topic.topic,
            partitions: topic
                .partitions
                .into_iter()
                .map(|partition| AlterReassignmentPartitionResult {
                    partition_id: partition.partition_id,
                    error_code: error_codes::message_for(partition.error_code)
                        .unwrap_or_default(),
                    error_message: partition.error_message,
                })
                .collect(),
        })
        .collect();

    Ok(results)
}
