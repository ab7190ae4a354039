//! Error types and result types for collection client operations.
//!
//! Use [`StoreClientResult<T>`] as the return type for fallible operations.
//!
//! Three error policies coexist in this crate and are deliberately kept
//! distinct:
//!
//! - [`StoreClientError::Connection`] is raised once, at construction time,
//!   wrapping whatever the driver reported.
//! - [`StoreClientError::InvalidArgument`] is raised when a caller hands an
//!   operation structurally unusable input (an empty update document).
//! - [`StoreClientError::Operation`] is produced by backends for mid-call
//!   failures; the public client collapses it into a default value and only
//!   logging sees it.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors produced by a collection client or its backends.
#[derive(Error, Debug)]
pub enum StoreClientError {
    /// Connection or authentication failure during client construction.
    ///
    /// Carries the underlying driver error as its source; raw driver errors
    /// never escape construction unwrapped.
    #[error("connection setup failed: {message}")]
    Connection {
        /// Human-readable description of what failed.
        message: String,
        /// The underlying driver error, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
    /// A caller supplied structurally invalid input, such as an empty update document.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The store reported a failure while executing an operation.
    #[error("operation failed: {0}")]
    Operation(String),
    /// Serialization/deserialization error when converting documents (BSON, JSON).
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreClientError {
    /// Wraps an arbitrary error into the unified connection-setup variant.
    pub fn connection(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        StoreClientError::Connection {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// A specialized `Result` type for collection client operations.
pub type StoreClientResult<T> = Result<T, StoreClientError>;

impl From<BsonError> for StoreClientError {
    fn from(err: BsonError) -> Self {
        StoreClientError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for StoreClientError {
    fn from(err: SerdeJsonError) -> Self {
        StoreClientError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn connection_error_carries_source() {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = StoreClientError::connection("server unreachable", cause);

        assert_eq!(err.to_string(), "connection setup failed: server unreachable");
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_argument_display() {
        let err = StoreClientError::InvalidArgument("update document must not be empty".into());
        assert_eq!(
            err.to_string(),
            "invalid argument: update document must not be empty"
        );
    }
}
