//! Setup wizard step components, fetched only when the wizard is opened.

use serde::Serialize;
use std::sync::Arc;

use super::lazy_loader::{LazyBundle, LoadedModule, LoaderError, ModuleSource};

pub const SETUP_COMPONENTS: &[&str] = &[
    "WelcomeModal",
    "DatabaseConfig",
    "AdminConfig",
    "EmailConfig",
    "SystemConfig",
    "ReviewConfig",
    "ConnectionStatus",
];

#[derive(Debug, Clone)]
pub struct SetupComponents {
    pub welcome_modal: LoadedModule,
    pub database_config: LoadedModule,
    pub admin_config: LoadedModule,
    pub email_config: LoadedModule,
    pub system_config: LoadedModule,
    pub review_config: LoadedModule,
    pub connection_status: LoadedModule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentInfo {
    pub name: String,
    pub size: usize,
}

impl SetupComponents {
    pub fn all(&self) -> [&LoadedModule; 7] {
        [
            &self.welcome_modal,
            &self.database_config,
            &self.admin_config,
            &self.email_config,
            &self.system_config,
            &self.review_config,
            &self.connection_status,
        ]
    }

    pub fn manifest(&self) -> Vec<ComponentInfo> {
        self.all()
            .iter()
            .map(|m| ComponentInfo {
                name: m.name.clone(),
                size: m.size(),
            })
            .collect()
    }
}

pub struct SetupComponentLoader {
    bundle: LazyBundle,
}

impl SetupComponentLoader {
    pub fn new(source: Arc<dyn ModuleSource>) -> Self {
        Self {
            bundle: LazyBundle::new(source, SETUP_COMPONENTS),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.bundle.is_loaded()
    }

    pub async fn load(&self) -> Result<SetupComponents, LoaderError> {
        let modules = self.bundle.get().await?;
        let take = |name: &str| modules.require(name).cloned();
        Ok(SetupComponents {
            welcome_modal: take("WelcomeModal")?,
            database_config: take("DatabaseConfig")?,
            admin_config: take("AdminConfig")?,
            email_config: take("EmailConfig")?,
            system_config: take("SystemConfig")?,
            review_config: take("ReviewConfig")?,
            connection_status: take("ConnectionStatus")?,
        })
    }
}
