//! Consumer group overviews with lag.
//!
//! Joins group descriptions (membership, committed offsets) against the
//! latest topic watermarks. Lag for a partition whose watermark could not
//! be read is unknown, not zero; one unknown partition makes the topic's
//! summed lag unknown as well.

use std::collections::HashMap;

use serde::Serialize;

use crate::cluster::types::{RawGroupDescription, RawTopicMetadata};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumerGroupOverview {
    pub group_id: String,
    pub state: String,
    pub protocol_type: String,
    pub coordinator_id: i32,
    pub members: Vec<GroupMember>,
    pub topic_lags: Vec<GroupTopicLag>,
    /// Populated by the authorization gate after aggregation, never here.
    pub allowed_actions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub member_id: String,
    pub client_id: String,
    pub client_host: String,
    pub assigned_topics: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTopicLag {
    pub topic_name: String,
    /// `None` when at least one partition's lag is unknown.
    pub summed_lag: Option<i64>,
    pub partition_count: usize,
    pub partition_lags: Vec<PartitionLag>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionLag {
    pub partition_id: i32,
    /// `None` when the watermark for this partition was unavailable.
    pub lag: Option<i64>,
}

/// High watermark per (topic, partition); `None` where the partition-level
/// metadata carried an error, so stale data is never mistaken for lag 0.
pub fn watermarks_by_partition(
    topics: &[RawTopicMetadata],
) -> HashMap<(String, i32), Option<i64>> {
    let mut watermarks = HashMap::new();
    for topic in topics {
        for partition in &topic.partitions {
            let high = (partition.error_code == 0).then_some(partition.high_water_mark);
            watermarks.insert((topic.name.clone(), partition.partition_id), high);
        }
    }
    watermarks
}

pub fn build_group_overviews(
    groups: Vec<RawGroupDescription>,
    topics: &[RawTopicMetadata],
) -> Vec<ConsumerGroupOverview> {
    let watermarks = watermarks_by_partition(topics);

    let mut overviews: Vec<ConsumerGroupOverview> = groups
        .into_iter()
        .map(|group| {
            let topic_lags = group
                .offsets
                .iter()
                .map(|topic_offsets| {
                    let partition_lags: Vec<PartitionLag> = topic_offsets
                        .partition_offsets
                        .iter()
                        .map(|offset| PartitionLag {
                            partition_id: offset.partition_id,
                            lag: partition_lag(
                                &watermarks,
                                &topic_offsets.topic,
                                offset.partition_id,
                                offset.committed_offset,
                            ),
                        })
                        .collect();

                    GroupTopicLag {
                        topic_name: topic_offsets.topic.clone(),
                        summed_lag: sum_lags(&partition_lags),
                        partition_count: partition_lags.len(),
                        partition_lags,
                    }
                })
                .collect();

            ConsumerGroupOverview {
                group_id: group.group_id,
                state: group.state,
                protocol_type: group.protocol_type,
                coordinator_id: group.coordinator_id,
                members: group
                    .members
                    .into_iter()
                    .map(|m| GroupMember {
                        member_id: m.member_id,
                        client_id: m.client_id,
                        client_host: m.client_host,
                        assigned_topics: m.assigned_topics,
                    })
                    .collect(),
                topic_lags,
                allowed_actions: Vec::new(),
            }
        })
        .collect();

    // Stable display order across repeated calls.
    overviews.sort_by(|a, b| a.group_id.cmp(&b.group_id));
    overviews
}

/// Summed lag of one group over one topic, `None` if any partition is
/// unknown. Used both for group overviews and the per-topic consumer list.
pub fn summed_topic_lag(
    group: &RawGroupDescription,
    topic: &str,
    watermarks: &HashMap<(String, i32), Option<i64>>,
) -> Option<i64> {
    let offsets = group.offsets.iter().find(|o| o.topic == topic)?;
    let lags: Vec<PartitionLag> = offsets
        .partition_offsets
        .iter()
        .map(|offset| PartitionLag {
            partition_id: offset.partition_id,
            lag: partition_lag(watermarks, topic, offset.partition_id, offset.committed_offset),
        })
        .collect();
    sum_lags(&lags)
}

fn partition_lag(
    watermarks: &HashMap<(String, i32), Option<i64>>,
    topic: &str,
    partition_id: i32,
    committed: i64,
) -> Option<i64> {
    // A partition absent from the metadata is just as unknown as one whose
    // watermark query failed.
    let high = watermarks
        .get(&(topic.to_string(), partition_id))
        .copied()
        .flatten()?;
    Some((high - committed).max(0))
}

fn sum_lags(lags: &[PartitionLag]) -> Option<i64> {
    lags.iter().try_fold(0i64, |acc, p| p.lag.map(|lag| acc + lag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::types::*;

    fn topic(name: &str, partitions: Vec<(i32, i16, i64)>) -> RawTopicMetadata {
        RawTopicMetadata {
            name: name.to_string(),
            is_internal: false,
            partitions: partitions
                .into_iter()
                .map(|(id, error_code, high)| RawPartitionMetadata {
                    partition_id: id,
                    error_code,
                    leader: 1,
                    replicas: vec![1],
                    in_sync_replicas: vec![1],
                    low_water_mark: 0,
                    high_water_mark: high,
                })
                .collect(),
        }
    }

    fn group(id: &str, topic: &str, offsets: Vec<(i32, i64)>) -> RawGroupDescription {
        RawGroupDescription {
            group_id: id.to_string(),
            state: "Stable".to_string(),
            protocol_type: "consumer".to_string(),
            coordinator_id: 1,
            members: vec![],
            offsets: vec![RawGroupTopicOffsets {
                topic: topic.to_string(),
                partition_offsets: offsets
                    .into_iter()
                    .map(|(partition_id, committed_offset)| RawPartitionOffset {
                        partition_id,
                        committed_offset,
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn lag_is_watermark_minus_committed_clamped_at_zero() {
        let topics = vec![topic("orders", vec![(0, 0, 100), (1, 0, 50)])];
        let overviews =
            build_group_overviews(vec![group("g1", "orders", vec![(0, 80), (1, 60)])], &topics);

        let lags = &overviews[0].topic_lags[0];
        assert_eq!(lags.partition_lags[0].lag, Some(20));
        // Committed ahead of the watermark reads as 0, not negative.
        assert_eq!(lags.partition_lags[1].lag, Some(0));
        assert_eq!(lags.summed_lag, Some(20));
    }

    #[test]
    fn unknown_watermark_poisons_the_sum() {
        let topics = vec![topic("orders", vec![(0, 0, 100), (1, 7, 50)])];
        let overviews =
            build_group_overviews(vec![group("g1", "orders", vec![(0, 80), (1, 10)])], &topics);

        let lags = &overviews[0].topic_lags[0];
        assert_eq!(lags.partition_lags[0].lag, Some(20));
        assert_eq!(lags.partition_lags[1].lag, None);
        assert_eq!(lags.summed_lag, None, "unknown must not read as zero lag");
    }

    #[test]
    fn groups_come_back_sorted_by_id() {
        let topics = vec![topic("orders", vec![(0, 0, 10)])];
        let overviews = build_group_overviews(
            vec![group("zeta", "orders", vec![(0, 10)]), group("alpha", "orders", vec![(0, 10)])],
            &topics,
        );
        let ids: Vec<&str> = overviews.iter().map(|o| o.group_id.as_str()).collect();
        assert_eq!(ids, ["alpha", "zeta"]);
    }
}
