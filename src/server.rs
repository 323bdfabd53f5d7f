use anyhow::Result;
use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    config::Config,
    handlers::{self, AppState},
    metrics,
    pipeline::CostEstimationPipeline,
    signals::setup_signal_handlers,
};

/// Request bodies are a handful of short strings
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Start the fuel cost API server
///
/// This function:
/// 1. Initializes metrics when enabled
/// 2. Sets up signal handlers for graceful shutdown
/// 3. Wires the estimation pipeline and the Axum application
/// 4. Binds to the configured address
/// 5. Serves requests with graceful shutdown support
pub async fn start_server(config: Config) -> Result<()> {
    let metrics_handle = if config.metrics.enabled {
        info!("Initializing Prometheus metrics...");
        Some(Arc::new(metrics::init_metrics()?))
    } else {
        None
    };

    let (shutdown_tx, signal_handle) = setup_signal_handlers();
    let mut shutdown_rx = shutdown_tx.subscribe();

    let http_client = reqwest::Client::builder()
        .user_agent(concat!("fuel-cost-api/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let state = AppState {
        pipeline: Arc::new(CostEstimationPipeline::from_config(&config, http_client)),
    };

    let app = create_router(
        state,
        metrics_handle.map(|handle| (handle, config.metrics.endpoint.clone())),
    );

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting fuel cost API on {}", addr);
    info!(
        ors = %config.ors.base_url,
        prices = %config.fuel_prices.url,
        cache_ttl_seconds = config.fuel_prices.cache_ttl_seconds,
        "Upstream configuration"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
///
/// `metrics` carries the Prometheus handle and the path it is served on;
/// `None` leaves the exposition endpoint unmounted.
pub fn create_router(
    state: AppState,
    metrics: Option<(Arc<PrometheusHandle>, String)>,
) -> Router {
    let api_routes = Router::new()
        .route(
            "/calculate-route/",
            post(handlers::calculate_route::handle_calculate_route),
        )
        .route(
            "/calculate-route",
            post(handlers::calculate_route::handle_calculate_route),
        )
        .with_state(state);

    let mut app = Router::new()
        .route("/", get(handlers::health::welcome))
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .merge(api_routes);

    if let Some((handle, endpoint)) = metrics {
        app = app.merge(
            Router::new()
                .route(&endpoint, get(handlers::metrics_handler::render_metrics))
                .with_state(handle),
        );
    }

    app.layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
