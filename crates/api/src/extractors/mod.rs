//! Custom Axum extractors.

pub mod theme;

pub use theme::ThemePreference;
