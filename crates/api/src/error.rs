//! API error types with HTTP response mapping.

use std::panic::Location;
use std::path::Path;

use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{EnvelopeError, OrchestrationResult};
use orchestrator::OrchestratorError;

/// Prefix of every 500 message returned by this service.
pub const INTERNAL_ERROR_CONTEXT: &str = "washing_vendor_update internal error";

/// Prefix of every 400 message returned by this service.
pub const INVALID_INPUT_CONTEXT: &str = "Invalid JSON input";

/// API-level error type that maps to HTTP responses.
///
/// Both variants render as an `OrchestrationResult` body, so every response
/// carries a `code` field.
#[derive(Debug)]
pub enum ApiError {
    /// The request body is not a usable JSON transaction.
    BadRequest(String),

    /// The request body is larger than the configured limit.
    PayloadTooLarge(String),

    /// An orchestration run failed unexpectedly.
    Internal {
        message: String,
        kind: &'static str,
        location: &'static Location<'static>,
    },
}

impl ApiError {
    /// Rejects a request whose input could not be used.
    pub fn invalid_input(detail: impl std::fmt::Display) -> Self {
        ApiError::BadRequest(format!("{INVALID_INPUT_CONTEXT}: {detail}"))
    }

    /// Renders the error as the result returned to the caller.
    pub fn to_result(&self) -> OrchestrationResult {
        match self {
            ApiError::BadRequest(message) => OrchestrationResult::bad_request(message.clone()),
            ApiError::PayloadTooLarge(message) => {
                OrchestrationResult::payload_too_large(message.clone())
            }
            ApiError::Internal {
                message,
                kind,
                location,
            } => OrchestrationResult::internal_error(format!(
                "{INTERNAL_ERROR_CONTEXT}: {message} at {kind}: {}: line {}",
                file_name(location),
                location.line()
            )),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let result = self.to_result();
        let status = match &self {
            ApiError::BadRequest(message) => {
                tracing::warn!(reason = %message, "rejected request");
                StatusCode::BAD_REQUEST
            }
            ApiError::PayloadTooLarge(message) => {
                tracing::warn!(reason = %message, "rejected oversized request");
                StatusCode::PAYLOAD_TOO_LARGE
            }
            ApiError::Internal { kind, .. } => {
                tracing::error!(detail = ?result.message, "internal server error");
                metrics::counter!("api_internal_errors_total", "kind" => *kind).increment(1);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        metrics::counter!("api_error_responses_total", "status" => status.as_str().to_owned())
            .increment(1);

        (status, Json(result)).into_response()
    }
}

/// Basename of the source file, without its crate-relative directories.
fn file_name(location: &Location<'_>) -> String {
    Path::new(location.file())
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| location.file().to_string())
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::invalid_input(rejection.body_text())
        }
    }
}

impl From<EnvelopeError> for ApiError {
    fn from(err: EnvelopeError) -> Self {
        ApiError::invalid_input(err)
    }
}

impl From<OrchestratorError> for ApiError {
    #[track_caller]
    fn from(err: OrchestratorError) -> Self {
        ApiError::Internal {
            message: err.to_string(),
            kind: err.kind(),
            location: Location::caller(),
        }
    }
}
