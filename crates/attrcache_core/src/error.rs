//! Error types for attrcache core.

use attrcache_codec::CodecError;
use attrcache_store::StoreError;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in cache operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The item or attribute is absent or explicitly null.
    #[error("not found: {key}")]
    NotFound {
        /// The key that was looked up.
        key: String,
    },

    /// A key, attribute name, group name or configuration value is unusable.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of the problem.
        message: String,
    },

    /// Encoding or decoding a value failed.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// The store reported an error.
    #[error("backend error: {0}")]
    Backend(#[from] StoreError),

    /// The named key-set does not exist on this connection.
    #[error("key-set not found: {name}")]
    GroupNotFound {
        /// Name of the key-set.
        name: String,
    },

    /// A multi-step operation stopped part way. Steps listed in `committed`
    /// took effect and were not rolled back.
    #[error(
        "{operation} stopped at {failed} after {} committed step(s): {source}",
        .committed.len()
    )]
    PartialFailure {
        /// The operation that was running.
        operation: &'static str,
        /// Attributes or keys whose step committed, in order.
        committed: Vec<String>,
        /// The attribute or key whose step failed.
        failed: String,
        /// Why that step failed.
        #[source]
        source: Box<CoreError>,
    },
}

impl CoreError {
    /// Creates a not-found error.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a key-set not found error.
    pub fn group_not_found(name: impl Into<String>) -> Self {
        Self::GroupNotFound { name: name.into() }
    }

    /// Reports the failure of one step of a batch.
    ///
    /// With nothing committed yet the step's own error is returned as is;
    /// otherwise it is wrapped in [`CoreError::PartialFailure`].
    pub fn batch_step(
        operation: &'static str,
        committed: Vec<String>,
        failed: impl Into<String>,
        source: CoreError,
    ) -> Self {
        if committed.is_empty() {
            return source;
        }
        Self::PartialFailure {
            operation,
            committed,
            failed: failed.into(),
            source: Box::new(source),
        }
    }

    /// Returns `true` for [`CoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrcache_store::Primitive;

    #[test]
    fn batch_step_without_commits_is_the_step_error() {
        let err = CoreError::batch_step(
            "map_set",
            Vec::new(),
            "a",
            StoreError::Closed.into(),
        );
        assert!(matches!(err, CoreError::Backend(StoreError::Closed)));
    }

    #[test]
    fn batch_step_with_commits_is_partial() {
        let err = CoreError::batch_step(
            "map_remove",
            vec!["k1".into()],
            "k2",
            StoreError::unavailable(Primitive::DeleteItem, "down").into(),
        );
        match &err {
            CoreError::PartialFailure {
                committed, failed, ..
            } => {
                assert_eq!(committed, &["k1".to_string()]);
                assert_eq!(failed, "k2");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().starts_with("map_remove stopped at k2 after 1 committed step(s)"));
    }

    #[test]
    fn not_found_predicate() {
        assert!(CoreError::not_found("k").is_not_found());
        assert!(!CoreError::group_not_found("g").is_not_found());
    }
}
