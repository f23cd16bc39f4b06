//! Domain error types.

use thiserror::Error;

/// Errors raised while building a `TransactionEnvelope` from an inbound payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// The payload is not a JSON object.
    #[error("Transaction payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// A required field is absent.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A required field is present but has the wrong shape.
    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },
}
