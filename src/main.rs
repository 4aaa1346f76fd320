use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod clock;
mod config;
mod db;
mod error;
mod handlers;
mod metrics;
mod models;
mod service;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::metrics::MetricsStore;

/// Shared application state. Cheap to clone: the pool, registry and clock are all behind Arc.
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::SqlitePool,
    pub metrics: MetricsStore,
    pub clock: Arc<dyn Clock>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("info,sales_tracker=debug")
                }),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    info!(path = %config.database_path.display(), "Opening SQLite store...");
    let pool = db::connect(&config.database_path, config.db_max_connections).await?;

    let state = AppState {
        db: pool.clone(),
        metrics: MetricsStore::new()?,
        clock: Arc::new(SystemClock),
    };

    let app = build_router(state.clone());

    let addr = format!("{}:{}", config.host, config.port);
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!(
        requests_served = state.metrics.requests_total(),
        "Shut down cleanly."
    );

    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Health & metrics ────────────────────────────────────────────────
        .route("/healthz", get(handlers::health))
        .route("/metrics", get(handlers::metrics))

        // ── Products ────────────────────────────────────────────────────────
        .route(
            "/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )

        // ── Sales ───────────────────────────────────────────────────────────
        .route(
            "/sales",
            get(handlers::sales::list_sales).post(handlers::sales::create_sale),
        )

        // ── Reports ─────────────────────────────────────────────────────────
        .route("/reports/daily", get(handlers::reports::daily_report))

        .fallback(handlers::not_found)

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(middleware::from_fn_with_state(
            state.clone(),
            metrics::track_metrics,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections...");
}
