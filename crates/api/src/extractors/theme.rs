//! Theme preference extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

use crate::services::cookies::extract_cookie;

pub const THEME_COOKIE: &str = "theme";
pub const DARK_MODE_COOKIE: &str = "darkMode";

/// Theme and dark-mode cookies as sent by the browser.
///
/// Absent or unparseable values come through as `None`; the handler decides
/// the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemePreference {
    pub theme: Option<String>,
    pub dark_mode: Option<bool>,
}

impl ThemePreference {
    pub fn theme_or(&self, default: &str) -> String {
        self.theme.clone().unwrap_or_else(|| default.to_string())
    }

    pub fn dark_mode_or_default(&self) -> bool {
        self.dark_mode.unwrap_or(false)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ThemePreference
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let theme = extract_cookie(&parts.headers, THEME_COOKIE)
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string());
        let dark_mode = extract_cookie(&parts.headers, DARK_MODE_COOKIE)
            .and_then(|v| v.parse::<bool>().ok());

        Ok(ThemePreference { theme, dark_mode })
    }
}
