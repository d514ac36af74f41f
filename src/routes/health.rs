//! Health endpoint with the detected cloud environment.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::provider::CloudProvider;
use crate::state::AppState;

/// Status reported while the process can serve requests.
pub const STATUS_UP: &str = "UP";

/// JSON body of `GET /api/health`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub cloud_provider: CloudProvider,
    pub region: Option<String>,
    pub instance_id: Option<String>,
}

/// Health check handler.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let info = state.cloud.get().await;
    Json(HealthResponse {
        status: STATUS_UP,
        timestamp: Utc::now(),
        cloud_provider: info.provider,
        region: info.region.clone(),
        instance_id: info.instance_id.clone(),
    })
}
