//! Setup gate middleware.
//!
//! Runs before any authentication logic. When the private config file is
//! missing, unreadable or lacks required values, every request is sent to the
//! standalone setup wizard with a 302 and the session cookie is cleared.
//! Otherwise the request passes through unmodified.

use axum::{
    body::Body,
    extract::State,
    http::{header, Extensions, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::counter;
use shared::setup_check::{check_setup, SetupStatus};
use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::app::AppState;
use crate::services::cookies::add_clear_session_cookie;

/// Setup status memoized in request extensions.
#[derive(Debug, Clone)]
pub struct SetupCheck(pub SetupStatus);

/// Marker recording that this request already logged the setup diagnostic.
#[derive(Debug, Clone, Copy)]
pub struct SetupLogged;

/// Reads the setup status off the async executor.
pub async fn check_setup_async(path: PathBuf) -> SetupStatus {
    tokio::task::spawn_blocking(move || check_setup(&path))
        .await
        .unwrap_or_else(|err| SetupStatus::Unreadable {
            reason: err.to_string(),
        })
}

/// Marks the request as having logged the setup diagnostic. Returns `true`
/// only the first time for a given request.
pub fn mark_logged(extensions: &mut Extensions) -> bool {
    extensions.insert(SetupLogged).is_none()
}

/// Logs why the request is being redirected to setup.
pub fn log_setup_required(status: &SetupStatus, wizard_url: &str) {
    match status {
        SetupStatus::Complete => return,
        SetupStatus::Missing => {
            warn!("Config file missing. System requires initial setup.");
        }
        SetupStatus::Incomplete { missing_fields } => {
            warn!(
                missing_fields = ?missing_fields,
                "Config file exists but has empty values. System requires setup."
            );
        }
        SetupStatus::Unreadable { reason } => {
            error!(
                error = %reason,
                "Config file exists but could not be read. Treating system as not configured."
            );
        }
    }
    info!(wizard_url = %wizard_url, "Redirecting to standalone setup wizard");
}

/// Plain 302 to `location`. Cookies are left alone.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// 302 to `location`, clearing the session cookie.
pub fn setup_redirect(location: &str, session_cookie_name: &str) -> Response {
    let mut headers = HeaderMap::new();
    add_clear_session_cookie(&mut headers, session_cookie_name);
    (headers, found(location)).into_response()
}

pub async fn setup_gate(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let status = match req.extensions().get::<SetupCheck>() {
        Some(SetupCheck(status)) => status.clone(),
        None => {
            let status = check_setup_async(state.private_config_path.as_ref().clone()).await;
            req.extensions_mut().insert(SetupCheck(status.clone()));
            status
        }
    };

    if status.is_complete() {
        return next.run(req).await;
    }

    let setup = &state.config.setup;
    if mark_logged(req.extensions_mut()) {
        log_setup_required(&status, &setup.wizard_url);
    }

    counter!("setup_gate_redirects_total", "reason" => status.reason()).increment(1);

    setup_redirect(&setup.wizard_url, &setup.session_cookie_name)
}
