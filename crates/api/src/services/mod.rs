//! Filesystem-backed services used by the route handlers.

pub mod cookies;
pub mod module_source;
pub mod page_data;
pub mod private_config;

pub use module_source::FsModuleSource;
pub use page_data::{WizardPageData, WorkspaceSettings};
pub use private_config::{ensure_blank_config, write_config, PrivateConfigError};
