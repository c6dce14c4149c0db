//! Axum router for the dashboard API and static assets.

use std::path::Path;
use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::dashboard::{DashboardResponse, DashboardService};

/// Shared state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The dashboard assembler.
    pub service: Arc<DashboardService>,
}

/// Create the Axum router with all endpoints.
///
/// Anything that is not an API route falls through to the static asset
/// directory, where the browser rendering layer lives.
#[must_use]
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/dashboard", get(get_dashboard))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

/// Assemble and return the dashboard document.
///
/// Always answers 200 with a well-formed document; upstream failure is
/// carried in the document's `error` field so the rendering layer can show
/// the message alongside the zeroed sections.
async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    tracing::info!("assembling dashboard");
    Json(state.service.assemble().await)
}
