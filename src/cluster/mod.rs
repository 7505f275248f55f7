//! Boundary to the cluster wire client.
//!
//! The console never speaks the wire protocol itself; it consumes one
//! logical call per operation through [`ClusterClient`] and gets back raw
//! per-node structures in which every node/resource can have failed on its
//! own. Connection pooling and retries live behind this trait and must be
//! safe for concurrent use by many in-flight console calls.

pub mod error_codes;
pub mod fixture;
pub mod types;

use async_trait::async_trait;
use types::*;

#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Describes the log directories of all brokers (or the given subset).
    /// One entry per broker; a broker that could not be reached carries its
    /// error in the entry rather than failing the call.
    async fn describe_log_dirs(
        &self,
        brokers: Option<&[i32]>,
    ) -> Result<Vec<BrokerLogDirsResponse>, ClientError>;

    /// Lists all in-flight partition reassignments cluster-wide.
    async fn list_partition_reassignments(
        &self,
    ) -> Result<ListReassignmentsResponse, ClientError>;

    /// Requests the given reassignments; per-partition outcomes are reported
    /// in the response, a failed call means nothing was submitted.
    async fn alter_partition_assignments(
        &self,
        intents: &[ReassignmentIntent],
    ) -> Result<AlterReassignmentsResponse, ClientError>;

    /// Describes all consumer groups (or the given subset), including their
    /// committed offsets per topic partition.
    async fn describe_consumer_groups(
        &self,
        groups: Option<&[String]>,
    ) -> Result<Vec<RawGroupDescription>, ClientError>;

    /// Describes topic/partition metadata including watermarks.
    async fn describe_topics(
        &self,
        topics: Option<&[String]>,
    ) -> Result<Vec<RawTopicMetadata>, ClientError>;

    /// Fetches the configuration entries of one topic, optionally reduced
    /// to the given keys.
    async fn describe_topic_configs(
        &self,
        topic: &str,
        keys: Option<&[String]>,
    ) -> Result<RawTopicConfigs, ClientError>;
}
