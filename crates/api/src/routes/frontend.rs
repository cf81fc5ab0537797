//! Static CMS frontend serving with SPA fallback.
//!
//! Serves the built client from `frontend.dir`. Hashed assets under
//! `_app/immutable/` get a long-lived immutable cache header.

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::warn;

use crate::app::AppState;
use crate::config::FrontendConfig;

pub async fn serve_frontend(State(state): State<AppState>, uri: Uri) -> Response {
    let config = &state.config.frontend;
    let base_dir = state.frontend_dir.as_path();

    if !config.enabled {
        return StatusCode::NOT_FOUND.into_response();
    }

    if !fs::try_exists(base_dir).await.unwrap_or(false) {
        warn!(dir = %base_dir.display(), "Frontend directory does not exist");
        return (StatusCode::SERVICE_UNAVAILABLE, "Frontend not available").into_response();
    }

    let path = uri.path().trim_start_matches('/');
    let file_path = if path.is_empty() {
        base_dir.join("index.html")
    } else {
        base_dir.join(path)
    };

    if !is_safe_path(base_dir, &file_path) {
        warn!(
            requested_path = %file_path.display(),
            base_dir = %base_dir.display(),
            "Path traversal attempt detected"
        );
        return StatusCode::FORBIDDEN.into_response();
    }

    if let Ok(response) = serve_file(&file_path, config).await {
        return response;
    }

    // Extensionless paths are client-side routes.
    if !path.contains('.') {
        if let Ok(response) = serve_file(&base_dir.join("index.html"), config).await {
            return response;
        }
    }

    StatusCode::NOT_FOUND.into_response()
}

async fn serve_file(path: &Path, config: &FrontendConfig) -> Result<Response, std::io::Error> {
    let content = fs::read(path).await?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    let cache_control = if is_immutable_asset(path) {
        format!(
            "public, max-age={}, immutable",
            config.immutable_cache_max_age
        )
    } else {
        format!("public, max-age={}", config.mutable_cache_max_age)
    };

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (header::CACHE_CONTROL, cache_control),
        ],
        content,
    )
        .into_response())
}

fn is_safe_path(base: &Path, path: &Path) -> bool {
    if path.exists() {
        match (base.canonicalize(), path.canonicalize()) {
            (Ok(canonical_base), Ok(canonical_path)) => canonical_path.starts_with(canonical_base),
            _ => false,
        }
    } else {
        normalize_path(path).starts_with(normalize_path(base))
    }
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::CurDir => {}
            component => result.push(component),
        }
    }
    result
}

fn is_immutable_asset(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    path_str.contains("_app/immutable/") || path_str.contains("_app\\immutable\\")
}
