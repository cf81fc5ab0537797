use axum::{middleware, routing::get, Router};
use domain::services::EditorLoader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{Config, SecurityConfig};
use crate::middleware::{
    metrics_handler, metrics_middleware, security_headers_middleware, setup_gate, trace_id,
    SecurityHeaders,
};
use crate::routes::{editor, frontend, health};
use crate::services::FsModuleSource;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub private_config_path: Arc<PathBuf>,
    pub frontend_dir: Arc<PathBuf>,
    pub editor: Arc<EditorLoader>,
}

impl AppState {
    pub fn new(config: Config, workspace_root: &Path) -> Self {
        let modules = FsModuleSource::new(config.editor_modules_dir(workspace_root));
        Self {
            private_config_path: Arc::new(config.private_config_path(workspace_root)),
            frontend_dir: Arc::new(config.frontend_dir(workspace_root)),
            editor: Arc::new(EditorLoader::new(Arc::new(modules))),
            config: Arc::new(config),
        }
    }
}

/// CORS from `security.cors_origins`; any origin when the list is empty.
pub fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Builds the CMS router.
///
/// Everything except the health probes and `/metrics` sits behind the setup
/// gate, which redirects to the setup wizard until the private config is
/// complete.
pub fn create_app(config: Config, workspace_root: &Path) -> Router {
    create_app_with_state(AppState::new(config, workspace_root))
}

pub fn create_app_with_state(state: AppState) -> Router {
    let config = state.config.clone();

    let gated_routes = Router::new()
        .route("/api/v1/editor", get(editor::get_editor))
        .fallback(frontend::serve_frontend)
        .layer(middleware::from_fn_with_state(state.clone(), setup_gate));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(gated_routes)
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
