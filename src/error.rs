//! Error types for ferro-variant
//!
//! All errors are local, synchronous and non-retryable: the model and the
//! slice codec never retry internally. Retry policy, if any, belongs to the
//! storage or transport layer driving this crate.

use thiserror::Error;

/// Main error type for ferro-variant operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VariantError {
    /// Malformed chromosome, negative coordinate, or malformed textual
    /// variant identifier
    #[error("Invalid argument: {msg}")]
    InvalidArgument { msg: String },

    /// Sample data keys that are not declared in the FORMAT field list
    #[error("Sample data fields not declared in FORMAT: {fields:?}")]
    FieldMismatch { fields: Vec<String> },

    /// Unknown sample or FORMAT field in a point mutation
    #[error("Unknown {kind} '{name}'")]
    IndexOutOfRange { kind: &'static str, name: String },

    /// A sample-position-dependent method was invoked before sample
    /// positions were set
    #[error("Sample positions must be set before calling {operation}")]
    PreconditionViolation { operation: &'static str },

    /// Slice encoding or decoding failure
    #[error("Slice codec error: {msg}")]
    Codec { msg: String },
}

impl VariantError {
    /// Create an `InvalidArgument` error
    pub fn invalid(msg: impl Into<String>) -> Self {
        VariantError::InvalidArgument { msg: msg.into() }
    }

    /// Create a `Codec` error
    pub fn codec(msg: impl Into<String>) -> Self {
        VariantError::Codec { msg: msg.into() }
    }

    /// Create an `IndexOutOfRange` error for an unknown sample
    pub fn unknown_sample(name: impl Into<String>) -> Self {
        VariantError::IndexOutOfRange {
            kind: "sample",
            name: name.into(),
        }
    }

    /// Create an `IndexOutOfRange` error for an unknown FORMAT field
    pub fn unknown_field(name: impl Into<String>) -> Self {
        VariantError::IndexOutOfRange {
            kind: "FORMAT field",
            name: name.into(),
        }
    }
}

impl From<bincode::error::EncodeError> for VariantError {
    fn from(err: bincode::error::EncodeError) -> Self {
        VariantError::Codec {
            msg: err.to_string(),
        }
    }
}

impl From<bincode::error::DecodeError> for VariantError {
    fn from(err: bincode::error::DecodeError) -> Self {
        VariantError::Codec {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for VariantError {
    fn from(err: serde_json::Error) -> Self {
        VariantError::Codec {
            msg: err.to_string(),
        }
    }
}
