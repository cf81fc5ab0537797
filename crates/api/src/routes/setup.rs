//! Setup wizard routes.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use domain::models::PrivateConfig;
use domain::services::setup_components::ComponentInfo;
use serde::Serialize;
use std::time::Instant;
use tracing::info;
use validator::Validate;

use crate::error::ApiError;
use crate::extractors::ThemePreference;
use crate::middleware::metrics::{record_bundle_load, record_setup_completed};
use crate::middleware::setup_gate::{check_setup_async, found};
use crate::services::cookies::add_clear_session_cookie;
use crate::services::{write_config, WizardPageData};
use crate::wizard_app::WizardState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupStatusResponse {
    pub needs_setup: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ComponentsResponse {
    pub components: Vec<ComponentInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSetupResponse {
    pub success: bool,
    pub message: String,
    pub redirect_url: String,
}

/// Wizard landing route.
///
/// Sends a configured system to the CMS login with the session untouched.
/// Otherwise clears any stale session and returns the page data for the
/// wizard UI.
pub async fn landing(State(state): State<WizardState>, theme: ThemePreference) -> Response {
    let config = &state.config;
    let status = check_setup_async(state.private_config_path.as_ref().clone()).await;

    if status.is_complete() {
        info!(
            login_url = %config.wizard.login_url,
            "Setup already complete, redirecting to login"
        );
        return found(&config.wizard.login_url);
    }

    let page = WizardPageData::new(
        theme.theme_or(&config.wizard.default_theme),
        theme.dark_mode_or_default(),
        &state.workspace,
    );

    let mut headers = HeaderMap::new();
    add_clear_session_cookie(&mut headers, &config.setup.session_cookie_name);
    (headers, Json(page)).into_response()
}

pub async fn setup_status(State(state): State<WizardState>) -> Json<SetupStatusResponse> {
    let status = check_setup_async(state.private_config_path.as_ref().clone()).await;
    Json(SetupStatusResponse {
        needs_setup: !status.is_complete(),
        message: status.to_string(),
    })
}

/// Assembles the wizard step components and reports their sizes.
pub async fn setup_components(
    State(state): State<WizardState>,
) -> Result<Json<ComponentsResponse>, ApiError> {
    let first_load = !state.components.is_loaded();
    let start = Instant::now();

    let components = state.components.load().await?;

    if first_load {
        record_bundle_load("setup_components", start.elapsed().as_secs_f64());
    }

    Ok(Json(ComponentsResponse {
        components: components.manifest(),
    }))
}

/// Validates and persists the configuration record.
///
/// A configured system answers 409 before the body is validated. Completions
/// run one at a time, so only the first of two concurrent requests writes.
/// Empty secrets are generated.
pub async fn complete_setup(
    State(state): State<WizardState>,
    Json(request): Json<PrivateConfig>,
) -> Result<(StatusCode, Json<CompleteSetupResponse>), ApiError> {
    let _guard = state.completion_lock.lock().await;

    let path = state.private_config_path.as_ref();
    if check_setup_async(path.clone()).await.is_complete() {
        return Err(ApiError::Conflict("Setup has already been completed".into()));
    }

    let record = request.with_generated_secrets();
    record.validate()?;

    write_config(path, &record)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    record_setup_completed();
    info!(
        path = %path.display(),
        db_type = %record.db_type,
        "Private configuration written, setup complete"
    );

    Ok((
        StatusCode::CREATED,
        Json(CompleteSetupResponse {
            success: true,
            message: "Setup complete".to_string(),
            redirect_url: state.config.wizard.login_url.clone(),
        }),
    ))
}
