//! Rich-text editor endpoint.

use axum::{
    extract::{Query, State},
    Json,
};
use domain::services::Editor;
use serde::Deserialize;
use std::time::Instant;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_bundle_load;

fn default_language() -> String {
    "en".to_string()
}

#[derive(Debug, Deserialize)]
pub struct EditorQuery {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub content: String,
}

/// Returns the editor description, assembling the editor bundle on first use.
pub async fn get_editor(
    State(state): State<AppState>,
    Query(query): Query<EditorQuery>,
) -> Result<Json<Editor>, ApiError> {
    let first_load = !state.editor.is_loaded();
    let start = Instant::now();

    let editor = state
        .editor
        .create_editor(&query.content, &query.language)
        .await?;

    if first_load {
        let elapsed = start.elapsed();
        record_bundle_load("editor", elapsed.as_secs_f64());
        info!(
            modules = editor.modules.len(),
            duration_ms = elapsed.as_millis() as u64,
            "Editor bundle assembled"
        );
    }

    Ok(Json(editor))
}
