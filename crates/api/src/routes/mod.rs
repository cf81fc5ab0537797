//! HTTP route handlers.

pub mod editor;
pub mod frontend;
pub mod health;
pub mod setup;
