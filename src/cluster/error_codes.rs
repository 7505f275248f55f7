//! Protocol error codes and their readable messages.
//!
//! The wire client reports failures below the call level as numeric codes
//! (`0` = no error). The console layer only ever shows the mapped message.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const NONE: i16 = 0;
pub const UNKNOWN_SERVER_ERROR: i16 = -1;
pub const OFFSET_OUT_OF_RANGE: i16 = 1;
pub const UNKNOWN_TOPIC_OR_PARTITION: i16 = 3;
pub const LEADER_NOT_AVAILABLE: i16 = 5;
pub const NOT_LEADER_OR_FOLLOWER: i16 = 6;
pub const REQUEST_TIMED_OUT: i16 = 7;
pub const TOPIC_AUTHORIZATION_FAILED: i16 = 29;
pub const CLUSTER_AUTHORIZATION_FAILED: i16 = 31;
pub const INVALID_REQUEST: i16 = 42;
pub const NOT_CONTROLLER: i16 = 41;
pub const KAFKA_STORAGE_ERROR: i16 = 56;
pub const LOG_DIR_NOT_FOUND: i16 = 57;
pub const INVALID_REPLICA_ASSIGNMENT: i16 = 39;
pub const NO_REASSIGNMENT_IN_PROGRESS: i16 = 85;

static MESSAGES: Lazy<HashMap<i16, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (UNKNOWN_SERVER_ERROR, "the broker reported an unexpected server error"),
        (OFFSET_OUT_OF_RANGE, "the requested offset is outside the range kept by the broker"),
        (UNKNOWN_TOPIC_OR_PARTITION, "the broker does not know this topic or partition"),
        (LEADER_NOT_AVAILABLE, "the partition leader is not available"),
        (NOT_LEADER_OR_FOLLOWER, "the broker is not a leader or follower for this partition"),
        (REQUEST_TIMED_OUT, "the request timed out on the broker"),
        (TOPIC_AUTHORIZATION_FAILED, "topic authorization failed"),
        (CLUSTER_AUTHORIZATION_FAILED, "cluster authorization failed"),
        (INVALID_REPLICA_ASSIGNMENT, "the requested replica assignment is invalid"),
        (NOT_CONTROLLER, "this broker is not the controller for the cluster"),
        (INVALID_REQUEST, "the broker rejected the request as invalid"),
        (KAFKA_STORAGE_ERROR, "disk error while handling the request on the broker"),
        (LOG_DIR_NOT_FOUND, "the requested log directory was not found on the broker"),
        (NO_REASSIGNMENT_IN_PROGRESS, "no partition reassignment is in progress"),
    ])
});

/// Maps a protocol error code to its message. Returns `None` for code `0`
/// so callers can treat "no error" and "error with message" uniformly.
pub fn message_for(code: i16) -> Option<String> {
    if code == NONE {
        return None;
    }
    Some(match MESSAGES.get(&code) {
        Some(msg) => (*msg).to_string(),
        None => format!("unknown broker error (code {})", code),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_zero_means_no_error() {
        assert!(message_for(NONE).is_none());
    }

    #[test]
    fn unknown_codes_still_render() {
        let msg = message_for(12345).unwrap();
        assert!(msg.contains("12345"));
    }
}
