//! Filesystem-backed module source for the lazy loaders.

use async_trait::async_trait;
use domain::services::{LoadedModule, LoaderError, ModuleSource};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// Reads `<dir>/<name>.js` for each requested module.
#[derive(Debug, Clone)]
pub struct FsModuleSource {
    dir: PathBuf,
}

impl FsModuleSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn module_path(&self, name: &str) -> Option<PathBuf> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| self.dir.join(format!("{}.js", name)))
    }
}

#[async_trait]
impl ModuleSource for FsModuleSource {
    async fn fetch(&self, name: &str) -> Result<LoadedModule, LoaderError> {
        let path = self
            .module_path(name)
            .ok_or_else(|| LoaderError::NotFound(name.to_string()))?;

        match tokio::fs::read(&path).await {
            Ok(content) => {
                debug!(module = name, bytes = content.len(), "Loaded module");
                Ok(LoadedModule::new(name, content))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(LoaderError::NotFound(name.to_string()))
            }
            Err(err) => Err(LoaderError::Fetch {
                name: name.to_string(),
                reason: err.to_string(),
            }),
        }
    }
}
