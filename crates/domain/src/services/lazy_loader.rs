//! Lazy, all-or-nothing assembly of named modules.
//!
//! A [`LazyBundle`] fetches its modules concurrently the first time it is
//! used. If any fetch fails the remaining fetches are aborted and the error is
//! returned; nothing is cached, so the next call starts over. A successful
//! assembly is cached for the lifetime of the bundle.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;
use tokio::task::JoinSet;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoaderError {
    #[error("module not found: {0}")]
    NotFound(String),

    #[error("failed to load module {name}: {reason}")]
    Fetch { name: String, reason: String },

    #[error("module task failed: {0}")]
    Task(String),
}

/// One fetched module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedModule {
    pub name: String,
    pub content: Arc<[u8]>,
}

impl LoadedModule {
    pub fn new(name: impl Into<String>, content: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Where module contents come from.
#[async_trait]
pub trait ModuleSource: Send + Sync {
    async fn fetch(&self, name: &str) -> Result<LoadedModule, LoaderError>;
}

/// Modules in the order they were requested.
#[derive(Debug, Clone, Default)]
pub struct ModuleSet {
    modules: Vec<LoadedModule>,
}

impl ModuleSet {
    pub fn get(&self, name: &str) -> Option<&LoadedModule> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Like [`ModuleSet::get`] but reports an absent module as an error.
    pub fn require(&self, name: &str) -> Result<&LoadedModule, LoaderError> {
        self.get(name)
            .ok_or_else(|| LoaderError::NotFound(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadedModule> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Fetches every module concurrently; the first failure aborts the rest.
pub async fn load_all(
    source: Arc<dyn ModuleSource>,
    names: &[&str],
) -> Result<ModuleSet, LoaderError> {
    let mut tasks = JoinSet::new();
    for (index, name) in names.iter().enumerate() {
        let source = source.clone();
        let name = name.to_string();
        tasks.spawn(async move { (index, source.fetch(&name).await) });
    }

    let mut slots: Vec<Option<LoadedModule>> = vec![None; names.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = match joined {
            Ok(done) => done,
            Err(err) => {
                tasks.abort_all();
                return Err(LoaderError::Task(err.to_string()));
            }
        };
        match result {
            Ok(module) => slots[index] = Some(module),
            Err(err) => {
                tasks.abort_all();
                tracing::warn!(error = %err, "Module assembly failed");
                return Err(err);
            }
        }
    }

    let modules = slots
        .into_iter()
        .zip(names)
        .map(|(slot, name)| slot.ok_or_else(|| LoaderError::NotFound(name.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ModuleSet { modules })
}

/// A fixed set of modules fetched on first use.
pub struct LazyBundle {
    source: Arc<dyn ModuleSource>,
    names: &'static [&'static str],
    cell: OnceCell<Arc<ModuleSet>>,
}

impl LazyBundle {
    pub fn new(source: Arc<dyn ModuleSource>, names: &'static [&'static str]) -> Self {
        Self {
            source,
            names,
            cell: OnceCell::new(),
        }
    }

    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Returns the assembled modules, fetching them on the first call.
    pub async fn get(&self) -> Result<Arc<ModuleSet>, LoaderError> {
        self.cell
            .get_or_try_init(|| async {
                tracing::debug!(modules = self.names.len(), "Loading module bundle");
                load_all(self.source.clone(), self.names).await.map(Arc::new)
            })
            .await
            .cloned()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory source that fails for selected names.
    #[derive(Default)]
    pub struct MemorySource {
        pub failing: Mutex<HashSet<String>>,
        pub fetches: AtomicUsize,
    }

    impl MemorySource {
        pub fn failing(names: &[&str]) -> Self {
            Self {
                failing: Mutex::new(names.iter().map(|n| n.to_string()).collect()),
                fetches: AtomicUsize::new(0),
            }
        }

        pub fn heal(&self) {
            self.failing.lock().unwrap().clear();
        }

        pub fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModuleSource for MemorySource {
        async fn fetch(&self, name: &str) -> Result<LoadedModule, LoaderError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.failing.lock().unwrap().contains(name) {
                return Err(LoaderError::Fetch {
                    name: name.to_string(),
                    reason: "unavailable".to_string(),
                });
            }
            Ok(LoadedModule::new(name, format!("export default '{}';", name).into_bytes()))
        }
    }
}
