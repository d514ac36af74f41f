//! HTTP route handlers.
//!
//! Both endpoints read the cached detection result and always answer 200;
//! detection failures only ever show up as a LOCAL provider.

pub mod health;
pub mod hello;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Creates the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/hello", get(hello::hello))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
