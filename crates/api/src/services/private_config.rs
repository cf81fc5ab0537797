//! Private config file writer used by the setup wizard.
//!
//! The blank template is written once on first run; the wizard overwrites it
//! with the completed record. Reads go through `shared::setup_check`.

use domain::models::PrivateConfig;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum PrivateConfigError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config path: {0}")]
    InvalidPath(PathBuf),
}

/// Writes the blank template if no config file exists yet.
///
/// Idempotent: an existing file is never touched. Returns `true` when the
/// template was written.
pub async fn ensure_blank_config(path: &Path) -> Result<bool, PrivateConfigError> {
    if fs::try_exists(path).await.unwrap_or(false) {
        return Ok(false);
    }

    write_config(path, &PrivateConfig::blank()).await?;
    info!(path = %path.display(), "Wrote blank private config template");
    Ok(true)
}

/// Renders `config` and replaces the file atomically (temp file + rename).
pub async fn write_config(path: &Path, config: &PrivateConfig) -> Result<(), PrivateConfigError> {
    let write_err = |source: std::io::Error| PrivateConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| PrivateConfigError::InvalidPath(path.to_path_buf()))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, config.render()).await.map_err(write_err)?;
    fs::rename(&tmp_path, path).await.map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::setup_check::{check_setup, SetupStatus};

    #[tokio::test]
    async fn test_ensure_blank_config_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("private.ts");

        assert!(ensure_blank_config(&path).await.unwrap());
        assert!(matches!(check_setup(&path), SetupStatus::Incomplete { .. }));

        std::fs::write(&path, "DB_HOST: 'kept',").unwrap();
        assert!(!ensure_blank_config(&path).await.unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "DB_HOST: 'kept',");
    }

    #[tokio::test]
    async fn test_write_config_completes_setup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("private.ts");
        let config = PrivateConfig {
            db_host: "localhost".to_string(),
            db_name: "sveltycms".to_string(),
            jwt_secret_key: "abc123".to_string(),
            ..PrivateConfig::blank()
        };

        tokio_test::assert_ok!(write_config(&path, &config).await);
        assert_eq!(check_setup(&path), SetupStatus::Complete);
        assert!(!dir.path().join("private.ts.tmp").exists());
    }
}
