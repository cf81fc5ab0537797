//! Page data the setup wizard passes from server to client.

use serde::Serialize;
use shared::workspace::{read_available_languages, read_package_version, DEFAULT_LOCALES};
use std::path::Path;
use tracing::warn;

/// Workspace settings read once at wizard startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceSettings {
    pub available_languages: Vec<String>,
    pub pkg_version: String,
}

impl WorkspaceSettings {
    /// Reads `package.json` and `project.inlang/settings.json` under `root`.
    ///
    /// Missing or malformed files fall back to the default locales and the
    /// crate version.
    pub fn load(root: &Path) -> Self {
        let available_languages = read_available_languages(root).unwrap_or_else(|err| {
            warn!(error = %err, "Could not read interface languages, using defaults");
            DEFAULT_LOCALES.iter().map(|l| l.to_string()).collect()
        });

        let pkg_version = match read_package_version(root) {
            Ok(Some(version)) => version,
            Ok(None) => env!("CARGO_PKG_VERSION").to_string(),
            Err(err) => {
                warn!(error = %err, "Could not read package version, using crate version");
                env!("CARGO_PKG_VERSION").to_string()
            }
        };

        Self {
            available_languages,
            pkg_version,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageSettings {
    #[serde(rename = "PKG_VERSION")]
    pub pkg_version: String,
}

/// Response of the wizard landing route.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardPageData {
    pub theme: String,
    pub dark_mode: bool,
    pub available_languages: Vec<String>,
    pub settings: PageSettings,
}

impl WizardPageData {
    pub fn new(theme: String, dark_mode: bool, workspace: &WorkspaceSettings) -> Self {
        Self {
            theme,
            dark_mode,
            available_languages: workspace.available_languages.clone(),
            settings: PageSettings {
                pkg_version: workspace.pkg_version.clone(),
            },
        }
    }
}
