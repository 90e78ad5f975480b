//! Error type shared by every codec in the crate.

use thiserror::Error;

/// Failures raised by encode and decode operations.
///
/// Every variant is deterministic for a given input: the same call with the
/// same arguments fails the same way, so none of these are retryable.
/// Callers should treat them as request errors, not system faults.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarshalError {
    /// Decode input is truncated or has the wrong length for its type.
    #[error("malformed {0} encoding: {1}")]
    MalformedEncoding(&'static str, String),

    /// Encode-time overflow for a fixed-width type.
    #[error("value {0} out of range for {1}")]
    ValueOutOfRange(i128, &'static str),

    /// Text is not representable in the declared charset.
    #[error("text is not valid {0}")]
    InvalidCharacterEncoding(&'static str),

    /// Timestamp encode input was neither a date nor a numeric epoch count.
    #[error("timestamp input must be a date or a numeric epoch count, got {0}")]
    UnsupportedTimestampInput(&'static str),

    /// A composite component's encoding exceeds the 2-byte length prefix.
    #[error("composite component of {0} bytes exceeds the 65535-byte frame limit")]
    ComponentTooLarge(usize),

    /// A value's tag does not match what the target type accepts.
    #[error("expected {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },
}

impl MarshalError {
    pub(crate) fn mismatch(expected: &'static str, found: impl Into<String>) -> Self {
        MarshalError::TypeMismatch {
            expected,
            found: found.into(),
        }
    }

    pub(crate) fn wrong_length(type_name: &'static str, expected: usize, actual: usize) -> Self {
        MarshalError::MalformedEncoding(
            type_name,
            format!("expected {expected} bytes, got {actual}"),
        )
    }
}
