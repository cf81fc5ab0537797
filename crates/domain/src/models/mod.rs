//! Domain models for the CMS.

pub mod dialog;
pub mod modal;
pub mod popup;
pub mod private_config;
pub mod toast;

pub use dialog::{ComponentRef, DialogKind, DialogState, DialogView};
pub use modal::{ModalSettings, ModalStore, ModalType};
pub use popup::{compute_position, Placement, PopupSettings, PopupState};
pub use private_config::PrivateConfig;
pub use toast::{Toast, ToastKind, ToastQueue, ToastSettings};
