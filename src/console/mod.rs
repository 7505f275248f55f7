//! Console domain layer.
//!
//! [`ConsoleService`] is the single entry point the HTTP layer talks to:
//! per query it pulls the minimum raw data through the cluster client,
//! runs the pure aggregation/translation step, applies the authorization
//! gate per resource and hands back the filtered result or a typed error.
//! The service holds no state between calls; any number of calls may run
//! concurrently.

pub mod consumer_groups;
pub mod error;
pub mod hooks;
pub mod log_dirs;
pub mod reassignments;
pub mod topics;

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures_util::future;
use tokio_util::sync::CancellationToken;

use crate::cluster::types::{ClientError, RawTopicMetadata, ReassignmentIntent};
use crate::cluster::ClusterClient;
use consumer_groups::{build_group_overviews, watermarks_by_partition, ConsumerGroupOverview};
use error::{ConsoleError, ConsoleResult};
use hooks::{Action, ConsoleHooks, Resource};
use log_dirs::{aggregate_log_dirs, topic_sizes, BrokerLogDirs};
use reassignments::{AlterReassignmentResult, PartitionReassignments};
use topics::{
    build_topic_config, build_topic_consumers, build_topic_details, build_topic_summary,
    TopicConfig, TopicConsumerGroup, TopicDetails, TopicSummary,
};

pub struct ConsoleService {
    cluster: Arc<dyn ClusterClient>,
    hooks: Arc<dyn ConsoleHooks>,
}

impl ConsoleService {
    pub fn new(cluster: Arc<dyn ClusterClient>, hooks: Arc<dyn ConsoleHooks>) -> Self {
        Self { cluster, hooks }
    }

    /// Runs one cluster call under the caller's cancellation token. A
    /// cancelled caller always gets `Cancelled` back, never a partial
    /// aggregate built from whatever had already arrived.
    async fn call<T>(
        &self,
        ctx: &CancellationToken,
        operation: &'static str,
        request: impl Future<Output = Result<T, ClientError>>,
    ) -> ConsoleResult<T> {
        tokio::select! {
            biased;
            _ = ctx.cancelled() => Err(ConsoleError::Cancelled),
            result = request => result.map_err(|e| ConsoleError::transport(operation, e)),
        }
    }

    pub async fn get_topics_overview(
        &self,
        ctx: &CancellationToken,
    ) -> ConsoleResult<Vec<TopicSummary>> {
        let (metadata, dir_reports) = self
            .call(
                ctx,
                "describe topics and log dirs",
                future::try_join(
                    self.cluster.describe_topics(None),
                    self.cluster.describe_log_dirs(None),
                ),
            )
            .await?;

        let (sizes, incomplete) = topic_sizes(&aggregate_log_dirs(dir_reports)?);

        let mut summaries = Vec::with_capacity(metadata.len());
        for topic in &metadata {
            if !self.hooks.is_allowed(Resource::Topic(&topic.name), Action::See) {
                continue;
            }

            let log_dir_size = if incomplete { None } else { sizes.get(&topic.name).copied() };
            let cleanup_policy = self.cleanup_policy(ctx, &topic.name).await?;
            let mut summary = build_topic_summary(topic, cleanup_policy, log_dir_size);
            summary.allowed_actions = self.hooks.allowed_actions(Resource::Topic(&topic.name));
            summaries.push(summary);
        }

        summaries.sort_by(|a, b| a.topic_name.cmp(&b.topic_name));
        Ok(summaries)
    }

    async fn cleanup_policy(
        &self,
        ctx: &CancellationToken,
        topic: &str,
    ) -> ConsoleResult<String> {
        let keys = ["cleanup.policy".to_string()];
        let configs = self
            .call(
                ctx,
                "describe topic configs",
                self.cluster.describe_topic_configs(topic, Some(&keys)),
            )
            .await?;

        // A failed config lookup degrades the overview cell, not the call.
        if configs.error_code != 0 {
            return Ok("N/A".to_string());
        }
        Ok(configs
            .entries
            .into_iter()
            .find(|e| e.name == "cleanup.policy")
            .and_then(|e| e.value)
            .unwrap_or_else(|| "N/A".to_string()))
    }

    pub async fn get_topic_details(
        &self,
        ctx: &CancellationToken,
        topic_names: &[String],
    ) -> ConsoleResult<Vec<TopicDetails>> {
        let metadata = self
            .call(ctx, "describe topics", self.cluster.describe_topics(Some(topic_names)))
            .await?;

        for requested in topic_names {
            if !metadata.iter().any(|t| &t.name == requested) {
                return Err(ConsoleError::NotFound(format!(
                    "topic '{}' was not found in the cluster metadata",
                    requested
                )));
            }
        }

        Ok(metadata.into_iter().map(build_topic_details).collect())
    }

    pub async fn get_topic_configs(
        &self,
        ctx: &CancellationToken,
        topic: &str,
        keys: Option<&[String]>,
    ) -> ConsoleResult<TopicConfig> {
        let raw = self
            .call(
                ctx,
                "describe topic configs",
                self.cluster.describe_topic_configs(topic, keys),
            )
            .await?;
        build_topic_config(topic, raw)
    }

    pub async fn list_topic_consumers(
        &self,
        ctx: &CancellationToken,
        topic: &str,
    ) -> ConsoleResult<Vec<TopicConsumerGroup>> {
        let (groups, metadata) = self.describe_groups_and_topics(ctx).await?;
        let watermarks = watermarks_by_partition(&metadata);

        let visible: Vec<_> = groups
            .into_iter()
            .filter(|g| self.hooks.is_allowed(Resource::ConsumerGroup(&g.group_id), Action::See))
            .collect();

        Ok(build_topic_consumers(topic, &visible, &watermarks))
    }

    pub async fn get_consumer_groups_overview(
        &self,
        ctx: &CancellationToken,
    ) -> ConsoleResult<Vec<ConsumerGroupOverview>> {
        let (groups, metadata) = self.describe_groups_and_topics(ctx).await?;

        let mut overviews = build_group_overviews(groups, &metadata);
        overviews.retain(|overview| {
            self.hooks.is_allowed(Resource::ConsumerGroup(&overview.group_id), Action::See)
        });
        for overview in &mut overviews {
            overview.allowed_actions =
                self.hooks.allowed_actions(Resource::ConsumerGroup(&overview.group_id));
        }
        Ok(overviews)
    }

    async fn describe_groups_and_topics(
        &self,
        ctx: &CancellationToken,
    ) -> ConsoleResult<(Vec<crate::cluster::types::RawGroupDescription>, Vec<RawTopicMetadata>)>
    {
        self.call(
            ctx,
            "describe consumer groups and topics",
            future::try_join(
                self.cluster.describe_consumer_groups(None),
                self.cluster.describe_topics(None),
            ),
        )
        .await
    }

    pub async fn list_partition_reassignments(
        &self,
        ctx: &CancellationToken,
    ) -> ConsoleResult<Vec<PartitionReassignments>> {
        let response = self
            .call(
                ctx,
                "list partition reassignments",
                self.cluster.list_partition_reassignments(),
            )
            .await?;
        reassignments::translate_listing(response)
    }

    pub async fn alter_partition_assignments(
        &self,
        ctx: &CancellationToken,
        intents: &[ReassignmentIntent],
    ) -> ConsoleResult<Vec<AlterReassignmentResult>> {
        if !self.hooks.is_allowed(Resource::Cluster, Action::PatchReassignments) {
            return Err(ConsoleError::PermissionDenied { action: "patch partition reassignments" });
        }

        let response = self
            .call(
                ctx,
                "alter partition assignments",
                self.cluster.alter_partition_assignments(intents),
            )
            .await?;
        reassignments::translate_alter_response(response)
    }

    pub async fn log_dirs_by_broker(
        &self,
        ctx: &CancellationToken,
    ) -> ConsoleResult<HashMap<i32, BrokerLogDirs>> {
        let responses = self
            .call(ctx, "describe log dirs", self.cluster.describe_log_dirs(None))
            .await?;
        aggregate_log_dirs(responses)
    }

    /// Route-level capability check for single-resource queries; read-path
    /// collection filtering happens inside the individual queries instead.
    pub fn is_allowed(&self, resource: Resource<'_>, action: Action) -> bool {
        self.hooks.is_allowed(resource, action)
    }
}
