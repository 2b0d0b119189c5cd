//! HTTP server for the dashboard.
//!
//! Provides endpoints for:
//! - `GET /` - Dashboard page
//! - `GET /api/storms/active` - Live feed outcome as JSON
//! - `GET /api/storms/historical` - Historical rollup outcome as JSON
//! - `GET /health` - Health check

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::dashboard::render_page;
use crate::monitor::CycloneMonitor;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

pub fn router(monitor: Arc<CycloneMonitor>) -> Router {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/api/storms/active", get(active_handler))
        .route("/api/storms/historical", get(historical_handler))
        .route("/health", get(health_handler))
        .with_state(monitor)
}

/// Binds `addr` and serves the dashboard until the process is stopped.
pub async fn serve(addr: SocketAddr, monitor: Arc<CycloneMonitor>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "Dashboard listening");
    axum::serve(listener, router(monitor))
        .await
        .context("server error")?;
    Ok(())
}

/// GET / - Render the dashboard
async fn dashboard_handler(State(monitor): State<Arc<CycloneMonitor>>) -> impl IntoResponse {
    let snapshot = monitor.snapshot().await;
    info!(
        live_records = snapshot.live.records().len(),
        live_failed = snapshot.live.is_failed(),
        historical_records = snapshot.historical.records().len(),
        historical_failed = snapshot.historical.is_failed(),
        "Rendering dashboard"
    );
    Html(render_page(&snapshot, monitor.config().historical_limit))
}

/// GET /api/storms/active
async fn active_handler(State(monitor): State<Arc<CycloneMonitor>>) -> impl IntoResponse {
    Json(monitor.live_storms().await)
}

/// GET /api/storms/historical
async fn historical_handler(State(monitor): State<Arc<CycloneMonitor>>) -> impl IntoResponse {
    Json(monitor.historical_storms().await)
}

/// GET /health
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
