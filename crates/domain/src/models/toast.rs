//! Toast notification queue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity of a toast, derived from caller style hints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    /// Classifies a free-form style hint such as `"preset-filled-error-500"`.
    ///
    /// Later matches win: a hint mentioning both `error` and `warning` is a
    /// warning.
    pub fn from_style(style: Option<&str>) -> Self {
        let Some(style) = style else {
            return ToastKind::Info;
        };
        let mut kind = ToastKind::Info;
        if style.contains("error") {
            kind = ToastKind::Error;
        }
        if style.contains("success") {
            kind = ToastKind::Success;
        }
        if style.contains("warning") {
            kind = ToastKind::Warning;
        }
        kind
    }
}

impl std::fmt::Display for ToastKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToastKind::Info => write!(f, "info"),
            ToastKind::Success => write!(f, "success"),
            ToastKind::Warning => write!(f, "warning"),
            ToastKind::Error => write!(f, "error"),
        }
    }
}

/// Legacy toast settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToastSettings {
    pub message: String,
    pub background: Option<String>,
    pub classes: Option<String>,
    /// Requested display time in milliseconds. Informational only.
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ToastKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    pub created_at: DateTime<Utc>,
}

/// Ordered toast entries in trigger order.
///
/// The queue never expires entries; the presentation layer removes them on
/// timeout or dismissal.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    entries: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a toast classified from `style` and returns its id.
    pub fn show(&mut self, message: impl Into<String>, style: Option<&str>) -> Uuid {
        self.push(message.into(), ToastKind::from_style(style), None)
    }

    /// Appends a toast from legacy settings and returns its id.
    pub fn trigger(&mut self, settings: ToastSettings) -> Uuid {
        let is_error = [&settings.background, &settings.classes]
            .iter()
            .any(|hint| hint.as_deref().is_some_and(|h| h.contains("error")));
        let kind = if is_error {
            ToastKind::Error
        } else {
            ToastKind::Info
        };
        self.push(settings.message, kind, settings.timeout)
    }

    fn push(&mut self, message: String, kind: ToastKind, timeout_ms: Option<u64>) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push(Toast {
            id,
            kind,
            message,
            timeout_ms,
            created_at: Utc::now(),
        });
        id
    }

    /// Removes a toast; returns it if it was still queued.
    pub fn remove(&mut self, id: Uuid) -> Option<Toast> {
        let index = self.entries.iter().position(|t| t.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Takes every queued toast, oldest first.
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.entries)
    }

    pub fn entries(&self) -> &[Toast] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
