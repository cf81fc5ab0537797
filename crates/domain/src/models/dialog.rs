//! Dialog/modal state holder.
//!
//! A single state object tracks the overlay currently displayed. It is owned
//! by whoever renders dialogs and passed by `&mut` to the code that opens
//! them; there is no global instance.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::time::{Duration, Instant};

/// Delay between `close()` and the reset of all fields, leaving time for the
/// exit animation.
pub const DIALOG_RESET_DELAY: Duration = Duration::from_millis(300);

/// Single-shot callback receiving the dialog result.
pub type DialogResponse = Box<dyn FnOnce(Value) + Send>;

/// Presentation variant of the active dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogKind {
    #[default]
    Alert,
    Confirm,
    Component,
    Image,
}

/// Reference to a UI element embedded in a component dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentRef {
    pub name: String,
}

impl ComponentRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Serializable snapshot of the dialog for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogView {
    pub open: bool,
    #[serde(rename = "type")]
    pub kind: DialogKind,
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Default)]
pub struct DialogState {
    open: bool,
    kind: DialogKind,
    title: String,
    body: String,
    component: Option<ComponentRef>,
    props: Option<Map<String, Value>>,
    response: Option<DialogResponse>,
    image: Option<String>,
    reset_at: Option<Instant>,
}

impl fmt::Debug for DialogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogState")
            .field("open", &self.open)
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("body", &self.body)
            .field("component", &self.component)
            .field("has_response", &self.response.is_some())
            .field("image", &self.image)
            .finish()
    }
}

impl DialogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn component(&self) -> Option<&ComponentRef> {
        self.component.as_ref()
    }

    pub fn props(&self) -> Option<&Map<String, Value>> {
        self.props.as_ref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn has_pending_response(&self) -> bool {
        self.response.is_some()
    }

    pub fn view(&self) -> DialogView {
        DialogView {
            open: self.open,
            kind: self.kind,
            title: self.title.clone(),
            body: self.body.clone(),
            component: self.component.clone(),
            props: self.props.clone(),
            image: self.image.clone(),
        }
    }

    pub fn show_alert(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.reset();
        self.title = title.into();
        self.body = body.into();
        self.kind = DialogKind::Alert;
        self.open = true;
    }

    /// Opens a confirmation; `on_result` receives `true` only when the
    /// dialog is submitted with a boolean `true`.
    pub fn show_confirm<F>(&mut self, title: impl Into<String>, body: impl Into<String>, on_result: F)
    where
        F: FnOnce(bool) + Send + 'static,
    {
        self.reset();
        self.title = title.into();
        self.body = body.into();
        self.kind = DialogKind::Confirm;
        self.response = Some(Box::new(move |value: Value| {
            on_result(value.as_bool().unwrap_or(false))
        }));
        self.open = true;
    }

    pub fn show_component(
        &mut self,
        component: ComponentRef,
        props: Option<Map<String, Value>>,
        response: Option<DialogResponse>,
    ) {
        self.reset();
        self.component = Some(component);
        self.props = Some(props.unwrap_or_default());
        self.kind = DialogKind::Component;
        self.response = response;
        self.open = true;
    }

    pub fn show_image(&mut self, src: impl Into<String>, alt: impl Into<String>) {
        self.reset();
        self.image = Some(src.into());
        self.title = alt.into();
        self.kind = DialogKind::Image;
        self.open = true;
    }

    /// Hides the dialog now and schedules the field reset.
    pub fn close(&mut self) {
        self.close_at(Instant::now());
    }

    pub fn close_at(&mut self, now: Instant) {
        self.open = false;
        self.reset_at = Some(now + DIALOG_RESET_DELAY);
    }

    /// Invokes the pending response (at most once) and closes.
    pub fn submit(&mut self, value: Value) {
        if let Some(response) = self.response.take() {
            response(value);
        }
        self.close();
    }

    /// Applies a scheduled reset once its delay has elapsed.
    ///
    /// Returns `true` when the fields were cleared.
    pub fn poll_reset(&mut self, now: Instant) -> bool {
        match self.reset_at {
            Some(at) if now >= at && !self.open => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
