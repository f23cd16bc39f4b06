//! Vendor return transaction endpoint.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderMap, StatusCode, header};
use domain::{OrchestrationResult, TransactionEnvelope};
use orchestrator::{EventPublisher, InventoryService, VendorReturnCoordinator};
use serde_json::Value;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<I, P>
where
    I: InventoryService,
    P: EventPublisher,
{
    pub coordinator: VendorReturnCoordinator<I, P>,
}

/// POST /washing_vendor_update: process one vendor return transaction.
///
/// Responds with the orchestration result, using its `code` as the HTTP status.
/// A body over the router's limit is answered with a 413 result.
#[tracing::instrument(skip_all)]
pub async fn update<I, P>(
    State(state): State<Arc<AppState<I, P>>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<OrchestrationResult>), ApiError>
where
    I: InventoryService + 'static,
    P: EventPublisher + 'static,
{
    let body = body?;
    if !is_json(&headers) {
        return Err(ApiError::invalid_input(String::from_utf8_lossy(&body)));
    }
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|_| ApiError::invalid_input(String::from_utf8_lossy(&body)))?;
    tracing::info!(%payload, "received a transaction");

    let envelope = TransactionEnvelope::from_value(payload)?;
    let result = state.coordinator.execute(&envelope).await?;

    let status = StatusCode::from_u16(result.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    Ok((status, Json(result)))
}

/// True for `application/json` and `application/*+json` content types.
fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
