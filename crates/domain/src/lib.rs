//! Domain layer for the CMS and its setup wizard.
//!
//! This crate contains:
//! - The private configuration record and its on-disk template
//! - UI state containers (dialog, modal store, toasts, popups)
//! - Lazy module loaders for the rich-text editor and the setup wizard steps

pub mod models;
pub mod services;
