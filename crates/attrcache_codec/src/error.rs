//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while converting values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A buffer for an encoded value or an assembled result could not be
    /// reserved.
    #[error("allocation failed while {context}")]
    Allocation {
        /// What was being built when the reservation failed.
        context: String,
    },

    /// A value expected to be an integer decoded as something else.
    #[error("value is not an integer: {found}")]
    NotAnInteger {
        /// The type tag that was found instead.
        found: &'static str,
    },
}

impl CodecError {
    /// Create an allocation error.
    pub fn allocation(context: impl Into<String>) -> Self {
        Self::Allocation {
            context: context.into(),
        }
    }
}
