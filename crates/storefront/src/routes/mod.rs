//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /              - Redirect to the catalog
//! GET  /catalog       - Product catalog (search, filters, sorting, pagination)
//! GET  /health        - Liveness check
//! GET  /health/ready  - Readiness check (probes the catalog backend)
//! ```

pub mod catalog;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
    response::Redirect,
    routing::get,
};

use crate::error::AppError;
use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the catalog backend is reachable before returning OK.
/// Returns 503 Service Unavailable if the backend is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.catalog().list_active_categories().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Fallback for unknown paths.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::permanent("/catalog") }))
        .route("/catalog", get(catalog::index))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .fallback(not_found)
}
