//! Rich-text editor assembly.
//!
//! The editor core and its extensions are only fetched when a rich-text
//! widget is first used. [`EditorLoader::create_editor`] returns the
//! description the client mounts: extensions in order with their options,
//! the initial content and the element attributes.

use serde::Serialize;
use serde_json::{json, Value};
use shared::crypto::sha256_hex;
use shared::text_direction::{text_direction, TextDirection};
use std::sync::Arc;

use super::lazy_loader::{LazyBundle, LoaderError, ModuleSet, ModuleSource};

/// Modules fetched for the editor, in load order.
pub const EDITOR_MODULES: &[&str] = &[
    "core",
    "starter-kit",
    "link",
    "placeholder",
    "table",
    "table-cell",
    "table-header",
    "table-row",
    "text-align",
    "underline",
    "youtube",
    "character-count",
    "color",
    "font-family",
    "image-resize",
    "text-style",
];

pub const HEADING_PLACEHOLDER: &str = "Write a heading…";
pub const DEFAULT_PLACEHOLDER: &str = "Start writing your awesome content…";
pub const EDITOR_CLASS: &str = "prose dark:prose-invert max-w-none focus:outline-none";

/// Placeholder shown in an empty node of the given type.
pub fn placeholder_for(node_type: &str) -> &'static str {
    if node_type == "heading" {
        HEADING_PLACEHOLDER
    } else {
        DEFAULT_PLACEHOLDER
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionConfig {
    pub name: &'static str,
    /// Module providing the extension.
    pub module: &'static str,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

impl ExtensionConfig {
    fn plain(name: &'static str, module: &'static str) -> Self {
        Self {
            name,
            module,
            options: Value::Null,
        }
    }

    fn configured(name: &'static str, module: &'static str, options: Value) -> Self {
        Self {
            name,
            module,
            options,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorAttributes {
    pub class: &'static str,
    pub dir: TextDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInfo {
    pub name: String,
    pub size: usize,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Editor {
    pub extensions: Vec<ExtensionConfig>,
    pub content: String,
    pub attributes: EditorAttributes,
    pub modules: Vec<ModuleInfo>,
}

fn extensions() -> Vec<ExtensionConfig> {
    vec![
        ExtensionConfig::plain("StarterKit", "starter-kit"),
        ExtensionConfig::plain("TextStyle", "text-style"),
        ExtensionConfig::plain("FontFamily", "font-family"),
        ExtensionConfig::plain("Color", "color"),
        ExtensionConfig::plain("ImageResize", "image-resize"),
        ExtensionConfig::plain("Underline", "underline"),
        ExtensionConfig::configured("Link", "link", json!({ "openOnClick": false })),
        ExtensionConfig::configured(
            "Placeholder",
            "placeholder",
            json!({
                "placeholder": {
                    "heading": HEADING_PLACEHOLDER,
                    "default": DEFAULT_PLACEHOLDER,
                },
                "includeChildren": true,
                "emptyEditorClass": "is-editor-empty",
            }),
        ),
        ExtensionConfig::configured("Table", "table", json!({ "resizable": true })),
        ExtensionConfig::plain("TableRow", "table-row"),
        ExtensionConfig::plain("TableHeader", "table-header"),
        ExtensionConfig::plain("TableCell", "table-cell"),
        ExtensionConfig::configured(
            "TextAlign",
            "text-align",
            json!({ "types": ["heading", "paragraph", "image"] }),
        ),
        ExtensionConfig::configured(
            "Youtube",
            "youtube",
            json!({
                "modestBranding": true,
                "HTMLAttributes": { "class": "w-full aspect-video" },
            }),
        ),
        ExtensionConfig::plain("CharacterCount", "character-count"),
        // Tab inserts a literal tab character instead of moving focus.
        ExtensionConfig::configured(
            "Tab",
            "core",
            json!({ "keyboardShortcuts": { "Tab": "\t" } }),
        ),
    ]
}

fn assemble(modules: &ModuleSet, content: &str, language: &str) -> Result<Editor, LoaderError> {
    let extensions = extensions();
    for extension in &extensions {
        modules.require(extension.module)?;
    }

    Ok(Editor {
        extensions,
        content: content.to_string(),
        attributes: EditorAttributes {
            class: EDITOR_CLASS,
            dir: text_direction(language),
        },
        modules: modules
            .iter()
            .map(|m| ModuleInfo {
                name: m.name.clone(),
                size: m.size(),
                sha256: sha256_hex(&m.content),
            })
            .collect(),
    })
}

/// Builds editors from a lazily fetched module bundle.
pub struct EditorLoader {
    bundle: LazyBundle,
}

impl EditorLoader {
    pub fn new(source: Arc<dyn ModuleSource>) -> Self {
        Self {
            bundle: LazyBundle::new(source, EDITOR_MODULES),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.bundle.is_loaded()
    }

    /// Fetches the editor modules on first use and describes a new editor.
    pub async fn create_editor(&self, content: &str, language: &str) -> Result<Editor, LoaderError> {
        let modules = self.bundle.get().await?;
        assemble(&modules, content, language)
    }
}
