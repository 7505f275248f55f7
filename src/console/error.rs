//! Error taxonomy of the console layer.
//!
//! Only failures that should abort a whole operation become a
//! `ConsoleError`. Node-level and resource-level failures stay embedded in
//! the aggregate they belong to (see the `error` fields on the log-dir
//! tree) so sibling data survives.

use thiserror::Error;

use crate::cluster::error_codes;
use crate::cluster::types::ClientError;

pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The call to the cluster itself failed; nothing was aggregated.
    #[error("cluster request '{operation}' failed: {source}")]
    Transport {
        operation: &'static str,
        source: ClientError,
    },

    /// The cluster answered with a top-level protocol error code.
    #[error("cluster request '{operation}' was rejected: {message}")]
    Protocol {
        operation: &'static str,
        message: String,
    },

    /// The caller went away; no partial aggregate is ever returned.
    #[error("operation was cancelled")]
    Cancelled,

    /// The wire client broke its contract (duplicate or malformed
    /// identifiers). Never silently merged.
    #[error("cluster client contract violation: {0}")]
    AdapterContract(String),

    /// Mutation attempted without the required capability.
    #[error("not permitted to {action}")]
    PermissionDenied { action: &'static str },

    #[error("{0}")]
    NotFound(String),
}

impl ConsoleError {
    pub fn transport(operation: &'static str, source: ClientError) -> Self {
        Self::Transport { operation, source }
    }

    /// Checks a top-level protocol error code, preferring the node-supplied
    /// message over the code's generic one.
    pub fn check_protocol(
        operation: &'static str,
        error_code: i16,
        error_message: Option<&str>,
    ) -> ConsoleResult<()> {
        match error_codes::message_for(error_code) {
            None => Ok(()),
            Some(generic) => Err(Self::Protocol {
                operation,
                message: error_message.map(str::to_string).unwrap_or(generic),
            }),
        }
    }
}
