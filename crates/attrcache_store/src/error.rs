//! Error types for store operations.

use crate::client::Primitive;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors reported by a store-primitive client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached or did not answer.
    #[error("store unavailable during {primitive}: {message}")]
    Unavailable {
        /// The primitive that was being executed.
        primitive: Primitive,
        /// Description of the failure.
        message: String,
    },

    /// The store refused the request.
    #[error("store rejected {primitive}: {message}")]
    Rejected {
        /// The primitive that was rejected.
        primitive: Primitive,
        /// Reason given by the store.
        message: String,
    },

    /// The client has been shut down.
    #[error("store client is shut down")]
    Closed,
}

impl StoreError {
    /// Creates an unavailable error.
    pub fn unavailable(primitive: Primitive, message: impl Into<String>) -> Self {
        Self::Unavailable {
            primitive,
            message: message.into(),
        }
    }

    /// Creates a rejected error.
    pub fn rejected(primitive: Primitive, message: impl Into<String>) -> Self {
        Self::Rejected {
            primitive,
            message: message.into(),
        }
    }
}
