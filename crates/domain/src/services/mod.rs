//! Domain services for the CMS.
//!
//! Services assemble lazily loaded modules into usable objects.

pub mod editor;
pub mod lazy_loader;
pub mod setup_components;

pub use editor::{Editor, EditorLoader, EDITOR_MODULES};
pub use lazy_loader::{load_all, LazyBundle, LoadedModule, LoaderError, ModuleSet, ModuleSource};
pub use setup_components::{SetupComponentLoader, SetupComponents, SETUP_COMPONENTS};
