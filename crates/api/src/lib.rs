//! HTTP receiver for vendor return transactions.
//!
//! Accepts a transaction on `POST /washing_vendor_update`, hands it to the
//! vendor return coordinator and answers with the orchestration result.
//! Structured logging (tracing) and Prometheus metrics come along.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use orchestrator::{EventPublisher, InventoryService, VendorReturnCoordinator};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::vendor_return::AppState;

/// Creates the Axum application router with all routes and shared state.
///
/// `body_limit` caps the size of an inbound transaction in bytes.
pub fn create_app<I, P>(
    state: Arc<AppState<I, P>>,
    metrics_handle: PrometheusHandle,
    body_limit: usize,
) -> Router
where
    I: InventoryService + 'static,
    P: EventPublisher + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::ops::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::ops::health))
        .route(
            "/washing_vendor_update",
            post(routes::vendor_return::update::<I, P>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state around long-lived service handles.
pub fn create_state<I, P>(inventory: I, publisher: P) -> Arc<AppState<I, P>>
where
    I: InventoryService,
    P: EventPublisher,
{
    Arc::new(AppState {
        coordinator: VendorReturnCoordinator::new(inventory, publisher),
    })
}
