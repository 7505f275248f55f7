mod helpers;

use helpers::*;
use vantage::cluster::error_codes;
use vantage::cluster::fixture::FixtureCluster;
use vantage::cluster::types::*;
use vantage::console::error::ConsoleError;

fn in_flight_listing() -> ListReassignmentsResponse {
    ListReassignmentsResponse {
        error_code: 0,
        error_message: None,
        topics: vec![RawTopicReassignments {
            topic: "orders".to_string(),
            partitions: vec![RawPartitionReassignment {
                partition_id: 0,
                replicas: vec![1, 2, 3, 4],
                adding_replicas: vec![4],
                removing_replicas: vec![1],
            }],
        }],
    }
}

#[tokio::test]
async fn listing_keeps_full_replica_set_distinct_from_removing_set() {
    let console = service(FixtureCluster::new().with_reassignments(in_flight_listing()));

    let listing = console.list_partition_reassignments(&token()).await.unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].topic_name, "orders");

    let partition = &listing[0].partitions[0];
    assert_eq!(partition.adding_replicas, vec![4]);
    assert_eq!(partition.removing_replicas, vec![1]);
    // The full target set must come through untouched; copying the
    // removing set here loses the reassignment target entirely.
    assert_eq!(partition.replicas, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn cluster_level_error_fails_the_listing() {
    let console = service(FixtureCluster::new().with_reassignments(ListReassignmentsResponse {
        error_code: error_codes::NOT_CONTROLLER,
        error_message: None,
        topics: Vec::new(),
    }));

    let err = console.list_partition_reassignments(&token()).await.unwrap_err();
    match err {
        ConsoleError::Protocol { operation, .. } => {
            assert_eq!(operation, "list partition reassignments")
        }
        other => panic!("expected protocol error, got {:?}", other),
    }
}

fn sample_intents() -> Vec<ReassignmentIntent> {
    vec![ReassignmentIntent {
        topic: "orders".to_string(),
        partitions: vec![
            PartitionIntent { partition_id: 0, target_replicas: Some(vec![1, 2, 4]) },
            PartitionIntent { partition_id: 1, target_replicas: None },
        ],
    }]
}

#[tokio::test]
async fn alter_reports_per_partition_outcomes() {
    let console = service(FixtureCluster::new().with_alter_response(AlterReassignmentsResponse {
        error_code: 0,
        error_message: None,
        topics: vec![RawAlterTopicResponse {
            topic: "orders".to_string(),
            partitions: vec![
                RawAlterPartitionResponse { partition_id: 0, error_code: 0, error_message: None },
                RawAlterPartitionResponse {
                    partition_id: 1,
                    error_code: error_codes::NO_REASSIGNMENT_IN_PROGRESS,
                    error_message: Some("nothing to cancel".to_string()),
                },
            ],
        }],
    }));

    let results =
        console.alter_partition_assignments(&token(), &sample_intents()).await.unwrap();
    let partitions = &results[0].partitions;

    assert_eq!(partitions[0].error_code, "", "empty string marks an accepted mutation");
    assert!(!partitions[1].error_code.is_empty());
    assert_eq!(partitions[1].error_message.as_deref(), Some("nothing to cancel"));
}

#[tokio::test]
async fn alter_transport_failure_returns_no_partial_results() {
    let console = service(
        FixtureCluster::new().with_outage(ClientError::Timeout(15000)),
    );

    let err =
        console.alter_partition_assignments(&token(), &sample_intents()).await.unwrap_err();
    assert!(matches!(err, ConsoleError::Transport { .. }));
}

#[tokio::test]
async fn alter_requires_the_patch_capability() {
    let console = service_with_hooks(FixtureCluster::new(), DenyListHooks::read_only());

    let err =
        console.alter_partition_assignments(&token(), &sample_intents()).await.unwrap_err();
    assert!(matches!(err, ConsoleError::PermissionDenied { .. }));
}
