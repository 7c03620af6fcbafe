//! Router construction and serving
//!
//! Routes:
//! - `POST /api/trades/classify`
//! - `POST /api/trades/analyze`
//! - `POST /api/trades/analyze/queue`
//! - `GET /api/trades/analyze/{job_id}`
//! - `GET /health`

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use super::state::AppState;
use crate::common::errors::Result;

/// Create the application router
pub fn create_app(state: AppState) -> Router {
    let trades = Router::new()
        .route("/classify", post(handlers::classify))
        .route("/analyze", post(handlers::analyze))
        .route("/analyze/queue", post(handlers::analyze_queue))
        .route("/analyze/{job_id}", get(handlers::analyze_status));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/trades", trades)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until `shutdown` is cancelled, then finish in-flight requests
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
