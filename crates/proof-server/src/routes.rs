//! API route definitions for claim proof generation.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::RwLock;

use crate::handlers;
use crate::AppState;

/// Create API routes
pub fn api_routes() -> Router<Arc<RwLock<AppState>>> {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/prove/premium-status",
            post(handlers::prove_premium_status),
        )
        .route("/api/prove/zakat-asset", post(handlers::prove_zakat_asset))
}
