//! Setup wizard application.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use domain::services::SetupComponentLoader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::app::cors_layer;
use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, security_headers_middleware, trace_id, SecurityHeaders,
};
use crate::routes::{health, setup};
use crate::services::{FsModuleSource, WorkspaceSettings};

#[derive(Clone)]
pub struct WizardState {
    pub config: Arc<Config>,
    pub private_config_path: Arc<PathBuf>,
    pub workspace: Arc<WorkspaceSettings>,
    pub components: Arc<SetupComponentLoader>,
    /// Serializes completion so the conflict check and the write are atomic.
    pub completion_lock: Arc<Mutex<()>>,
}

impl WizardState {
    /// Reads the workspace settings once; they are fixed for the process.
    pub fn new(config: Config, workspace_root: &Path) -> Self {
        let components = FsModuleSource::new(config.components_dir(workspace_root));
        Self {
            private_config_path: Arc::new(config.private_config_path(workspace_root)),
            workspace: Arc::new(WorkspaceSettings::load(workspace_root)),
            components: Arc::new(SetupComponentLoader::new(Arc::new(components))),
            completion_lock: Arc::new(Mutex::new(())),
            config: Arc::new(config),
        }
    }
}

pub fn create_wizard_app(config: Config, workspace_root: &Path) -> Router {
    create_wizard_app_with_state(WizardState::new(config, workspace_root))
}

pub fn create_wizard_app_with_state(state: WizardState) -> Router {
    let config = state.config.clone();

    Router::new()
        .route("/", get(setup::landing))
        .route("/api/setup/status", get(setup::setup_status))
        .route("/api/setup/components", get(setup::setup_components))
        .route("/api/setup/complete", post(setup::complete_setup))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn_with_state(
            SecurityHeaders {
                hsts_enabled: config.security.hsts_enabled,
            },
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors_layer(&config.security))
        .with_state(state)
}
