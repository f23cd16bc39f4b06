//! API server entry point.

use api::config::Config;
use orchestrator::{AmqpEventPublisher, HttpInventoryService};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Connect downstream services
    let inventory = HttpInventoryService::new(&config.inventory_url, config.inventory_timeout)
        .expect("invalid inventory configuration");
    let publisher = AmqpEventPublisher::connect(&config.amqp_settings())
        .await
        .expect("failed to connect to AMQP broker");
    tracing::info!(
        inventory_url = %config.inventory_url,
        exchange = %config.amqp_exchange,
        "downstream services ready"
    );

    // 4. Build the application
    let state = api::create_state(inventory, publisher);
    let app = api::create_app(state.clone(), metrics_handle, config.max_body_bytes);

    // 5. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    if let Err(e) = state.coordinator.publisher().close().await {
        tracing::warn!(error = %e, "failed to close AMQP connection");
    }
    tracing::info!("server shut down gracefully");
}
