//! HTTP surface of the console.
//!
//! Thin glue only: decode the request, run the route-level capability
//! check, call the console service and wrap the result in its JSON
//! envelope. Fatal console errors map to safe 5xx messages with the full
//! detail logged server-side; per-node partial errors ride inside 200
//! bodies.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tower_http::compression::CompressionLayer;

use crate::cluster::types::{PartitionIntent, ReassignmentIntent};
use crate::console::consumer_groups::ConsumerGroupOverview;
use crate::console::error::ConsoleError;
use crate::console::hooks::{Action, Resource};
use crate::console::log_dirs::BrokerLogDirs;
use crate::console::reassignments::{AlterReassignmentResult, PartitionReassignments};
use crate::console::topics::{TopicConfig, TopicConsumerGroup, TopicDetails, TopicSummary};
use crate::ConsoleEngine;

pub fn router(engine: ConsoleEngine) -> Router {
    Router::new()
        .route("/api/topics", get(get_topics))
        .route("/api/topics/{topicName}/partitions", get(get_topic_partitions))
        .route("/api/topics/{topicName}/configuration", get(get_topic_configuration))
        .route("/api/topics/{topicName}/consumers", get(get_topic_consumers))
        .route("/api/consumer-groups", get(get_consumer_groups))
        .route(
            "/api/operations/reassign-partitions",
            get(get_reassignments).patch(patch_reassignments),
        )
        .route("/api/brokers/log-dirs", get(get_broker_log_dirs))
        .route("/api/console/version", get(get_version))
        .layer(CompressionLayer::new())
        .with_state(engine)
}

#[derive(Debug, Error)]
enum ApiError {
    #[error(transparent)]
    Console(#[from] ConsoleError),

    #[error("missing permission to {0}")]
    Forbidden(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Forbidden(what) => {
                (StatusCode::FORBIDDEN, format!("You don't have permissions to {}", what))
            }
            ApiError::Console(ConsoleError::PermissionDenied { action }) => {
                (StatusCode::FORBIDDEN, format!("You don't have permissions to {}", action))
            }
            ApiError::Console(ConsoleError::NotFound(message)) => {
                (StatusCode::NOT_FOUND, message.clone())
            }
            ApiError::Console(ConsoleError::Cancelled) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "The request was cancelled".to_string())
            }
            ApiError::Console(err) => {
                // Full detail stays in the logs, the client gets a safe message.
                tracing::error!(error = %err, "console request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not fetch the requested data from the cluster".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message, "status": status.as_u16() }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

// ==========================================
// TOPICS
// ==========================================

#[derive(Serialize)]
struct TopicsResponse {
    topics: Vec<TopicSummary>,
}

async fn get_topics(State(engine): State<ConsoleEngine>) -> ApiResult<TopicsResponse> {
    let topics = engine.console.get_topics_overview(&engine.request_token()).await?;
    Ok(Json(TopicsResponse { topics }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PartitionsResponse {
    topic_name: String,
    partitions: Vec<crate::console::topics::TopicPartitionDetails>,
}

async fn get_topic_partitions(
    State(engine): State<ConsoleEngine>,
    Path(topic_name): Path<String>,
) -> ApiResult<PartitionsResponse> {
    if !engine.console.is_allowed(Resource::Topic(&topic_name), Action::ViewPartitions) {
        return Err(ApiError::Forbidden("view partitions for that topic"));
    }

    let mut details: Vec<TopicDetails> = engine
        .console
        .get_topic_details(&engine.request_token(), std::slice::from_ref(&topic_name))
        .await?;
    let detail = details
        .pop()
        .ok_or_else(|| ConsoleError::NotFound(format!("topic '{}' was not found", topic_name)))?;

    Ok(Json(PartitionsResponse { topic_name, partitions: detail.partitions }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TopicConfigResponse {
    topic_description: TopicConfig,
}

async fn get_topic_configuration(
    State(engine): State<ConsoleEngine>,
    Path(topic_name): Path<String>,
) -> ApiResult<TopicConfigResponse> {
    if !engine.console.is_allowed(Resource::Topic(&topic_name), Action::ViewConfig) {
        return Err(ApiError::Forbidden("view the config for that topic"));
    }

    let config =
        engine.console.get_topic_configs(&engine.request_token(), &topic_name, None).await?;
    Ok(Json(TopicConfigResponse { topic_description: config }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TopicConsumersResponse {
    topic_name: String,
    topic_consumers: Vec<TopicConsumerGroup>,
}

async fn get_topic_consumers(
    State(engine): State<ConsoleEngine>,
    Path(topic_name): Path<String>,
) -> ApiResult<TopicConsumersResponse> {
    if !engine.console.is_allowed(Resource::Topic(&topic_name), Action::ViewConsumers) {
        return Err(ApiError::Forbidden("view the consumers of that topic"));
    }

    let consumers =
        engine.console.list_topic_consumers(&engine.request_token(), &topic_name).await?;
    Ok(Json(TopicConsumersResponse { topic_name, topic_consumers: consumers }))
}

// ==========================================
// CONSUMER GROUPS
// ==========================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConsumerGroupsResponse {
    consumer_groups: Vec<ConsumerGroupOverview>,
}

async fn get_consumer_groups(
    State(engine): State<ConsoleEngine>,
) -> ApiResult<ConsumerGroupsResponse> {
    let groups = engine.console.get_consumer_groups_overview(&engine.request_token()).await?;
    Ok(Json(ConsumerGroupsResponse { consumer_groups: groups }))
}

// ==========================================
// REASSIGNMENTS
// ==========================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReassignmentsResponse {
    partition_reassignments: Vec<PartitionReassignments>,
}

async fn get_reassignments(
    State(engine): State<ConsoleEngine>,
) -> ApiResult<ReassignmentsResponse> {
    let reassignments =
        engine.console.list_partition_reassignments(&engine.request_token()).await?;
    Ok(Json(ReassignmentsResponse { partition_reassignments: reassignments }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatchReassignmentsRequest {
    topics: Vec<PatchReassignmentTopic>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatchReassignmentTopic {
    topic_name: String,
    partitions: Vec<PatchReassignmentPartition>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatchReassignmentPartition {
    partition_id: i32,
    /// `null` cancels the in-flight reassignment for this partition.
    replicas: Option<Vec<i32>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PatchReassignmentsResponse {
    reassign_partitions_responses: Vec<AlterReassignmentResult>,
}

async fn patch_reassignments(
    State(engine): State<ConsoleEngine>,
    Json(request): Json<PatchReassignmentsRequest>,
) -> ApiResult<PatchReassignmentsResponse> {
    let intents: Vec<ReassignmentIntent> = request
        .topics
        .into_iter()
        .map(|topic| ReassignmentIntent {
            topic: topic.topic_name,
            partitions: topic
                .partitions
                .into_iter()
                .map(|p| PartitionIntent {
                    partition_id: p.partition_id,
                    target_replicas: p.replicas,
                })
                .collect(),
        })
        .collect();

    let responses =
        engine.console.alter_partition_assignments(&engine.request_token(), &intents).await?;
    Ok(Json(PatchReassignmentsResponse { reassign_partitions_responses: responses }))
}

// ==========================================
// BROKERS / META
// ==========================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrokerLogDirsResponseBody {
    broker_log_dirs: std::collections::HashMap<i32, BrokerLogDirs>,
}

async fn get_broker_log_dirs(
    State(engine): State<ConsoleEngine>,
) -> ApiResult<BrokerLogDirsResponseBody> {
    let dirs = engine.console.log_dirs_by_broker(&engine.request_token()).await?;
    Ok(Json(BrokerLogDirsResponseBody { broker_log_dirs: dirs }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VersionResponse {
    version: &'static str,
    started_at: String,
}

async fn get_version(State(engine): State<ConsoleEngine>) -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
        started_at: engine.started_at.to_rfc3339(),
    })
}
