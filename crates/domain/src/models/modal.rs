//! Modal-store adapter over [`DialogState`].
//!
//! Older call sites describe a modal with a single [`ModalSettings`] value;
//! the store maps those settings onto the dialog operations.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::dialog::{ComponentRef, DialogResponse, DialogState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalType {
    Alert,
    Confirm,
    Component,
}

pub struct ModalComponent {
    pub component: ComponentRef,
    pub props: Option<Map<String, Value>>,
}

pub struct ModalSettings {
    pub modal_type: ModalType,
    pub title: Option<String>,
    pub body: Option<String>,
    pub component: Option<ModalComponent>,
    pub response: Option<DialogResponse>,
    /// Image source for legacy image modals.
    pub image: Option<String>,
}

impl ModalSettings {
    pub fn new(modal_type: ModalType) -> Self {
        Self {
            modal_type,
            title: None,
            body: None,
            component: None,
            response: None,
            image: None,
        }
    }
}

pub struct ModalStore<'a> {
    dialog: &'a mut DialogState,
}

impl<'a> ModalStore<'a> {
    pub fn new(dialog: &'a mut DialogState) -> Self {
        Self { dialog }
    }

    pub fn trigger(&mut self, settings: ModalSettings) {
        let ModalSettings {
            modal_type,
            title,
            body,
            component,
            response,
            image,
        } = settings;
        let title = title.unwrap_or_default();
        let body = body.unwrap_or_default();

        match (modal_type, component, image) {
            (ModalType::Confirm, _, _) => {
                let on_confirm = response;
                self.dialog.show_confirm(title, body, move |confirmed| {
                    if let Some(respond) = on_confirm {
                        respond(Value::Bool(confirmed));
                    }
                });
            }
            (ModalType::Component, Some(component), _) => {
                self.dialog
                    .show_component(component.component, component.props, response);
            }
            (_, _, Some(image)) => self.dialog.show_image(image, title),
            _ => self.dialog.show_alert(title, body),
        }
    }

    pub fn close(&mut self) {
        self.dialog.close();
    }

    pub fn clear(&mut self) {
        self.dialog.close();
    }
}
