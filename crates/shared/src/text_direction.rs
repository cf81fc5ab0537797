//! Text direction lookup for interface languages.

use serde::Serialize;

/// Language codes written right-to-left.
const RTL_LANGUAGES: [&str; 9] = ["ar", "arc", "dv", "fa", "ha", "he", "khw", "ks", "ur"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

/// Returns the direction for a language code such as `ar` or `en-US`.
pub fn text_direction(language: &str) -> TextDirection {
    let primary = language
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    if RTL_LANGUAGES.contains(&primary.as_str()) {
        TextDirection::Rtl
    } else {
        TextDirection::Ltr
    }
}
