//! Greeting endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::provider::CloudProvider;
use crate::state::AppState;

/// API version reported by `GET /api/hello`.
pub const API_VERSION: &str = "1.0.0";

/// Region reported when detection found none.
const UNKNOWN_REGION: &str = "unknown";

/// JSON body of `GET /api/hello`.
#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub message: String,
    pub provider: CloudProvider,
    pub region: String,
    pub version: &'static str,
}

pub async fn hello(State(state): State<AppState>) -> Json<HelloResponse> {
    let info = state.cloud.get().await;
    Json(HelloResponse {
        message: format!("Hello from {}!", info.provider),
        provider: info.provider,
        region: info
            .region
            .clone()
            .unwrap_or_else(|| UNKNOWN_REGION.to_string()),
        version: API_VERSION,
    })
}
