//! Health check endpoint handlers.
//!
//! Mounted outside the setup gate so probes work before setup.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::app::AppState;
use crate::middleware::setup_gate::check_setup_async;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub setup: SetupHealth,
    pub editor_loaded: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SetupHealth {
    pub complete: bool,
    pub reason: String,
}

/// Simple status response for liveness/readiness probes.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Full health check. Always 200; `status` is `setup_required` until the
/// private config is complete.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let setup = check_setup_async(state.private_config_path.as_ref().clone()).await;
    let complete = setup.is_complete();

    Json(HealthResponse {
        status: if complete { "healthy" } else { "setup_required" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        setup: SetupHealth {
            complete,
            reason: setup.reason().to_string(),
        },
        editor_loaded: state.editor.is_loaded(),
    })
}

/// Liveness probe. 200 while the process is running.
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "alive".to_string(),
    })
}

/// Readiness probe. 503 until setup is complete.
pub async fn ready(State(state): State<AppState>) -> Result<Json<StatusResponse>, StatusCode> {
    let setup = check_setup_async(state.private_config_path.as_ref().clone()).await;

    if setup.is_complete() {
        Ok(Json(StatusResponse {
            status: "ready".to_string(),
        }))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}
