//! Workspace-level settings files shared by the CMS and the setup wizard.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// How many parent directories are inspected when looking for the workspace root.
pub const MAX_ROOT_SEARCH_DEPTH: usize = 5;

/// Languages offered when the inlang settings do not list any.
pub const DEFAULT_LOCALES: [&str; 2] = ["en", "de"];

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct PackageManifest {
    version: Option<String>,
    workspaces: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct InlangSettings {
    #[serde(default)]
    locales: Vec<String>,
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, WorkspaceError> {
    let raw = std::fs::read_to_string(path).map_err(|source| WorkspaceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| WorkspaceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Finds the workspace root starting at `start`.
///
/// Walks up at most [`MAX_ROOT_SEARCH_DEPTH`] levels looking for a
/// `package.json` that declares `workspaces`. Falls back to two levels above
/// `start` when running from inside `apps/setup-wizard`, and to `start` itself
/// otherwise.
pub fn find_workspace_root(start: &Path) -> PathBuf {
    let mut current = start.to_path_buf();

    for _ in 0..MAX_ROOT_SEARCH_DEPTH {
        let manifest_path = current.join("package.json");
        if let Ok(manifest) = read_json::<PackageManifest>(&manifest_path) {
            if manifest.workspaces.is_some() {
                return current;
            }
        }
        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }

    if start.ends_with("apps/setup-wizard") {
        if let Some(root) = start.parent().and_then(Path::parent) {
            return root.to_path_buf();
        }
    }

    start.to_path_buf()
}

/// Reads the application version from `<root>/package.json`.
pub fn read_package_version(root: &Path) -> Result<Option<String>, WorkspaceError> {
    let manifest: PackageManifest = read_json(&root.join("package.json"))?;
    Ok(manifest.version)
}

/// Reads the interface languages from `<root>/project.inlang/settings.json`.
///
/// An empty or absent `locales` list yields [`DEFAULT_LOCALES`].
pub fn read_available_languages(root: &Path) -> Result<Vec<String>, WorkspaceError> {
    let settings: InlangSettings = read_json(&root.join("project.inlang").join("settings.json"))?;
    if settings.locales.is_empty() {
        Ok(DEFAULT_LOCALES.iter().map(|l| l.to_string()).collect())
    } else {
        Ok(settings.locales)
    }
}
