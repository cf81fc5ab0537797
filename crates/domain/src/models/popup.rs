//! Popup positioning shim.
//!
//! Positions a floating element next to its reference element: offset along
//! the main axis, flip to the opposite side when the preferred side
//! overflows, then shift along the cross axis to stay inside the viewport.

use serde::{Deserialize, Serialize};

/// Gap between the reference element and the popup, in pixels.
pub const POPUP_OFFSET: f64 = 8.0;

/// Minimum distance kept from the viewport edges when shifting.
pub const SHIFT_PADDING: f64 = 5.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl Placement {
    pub fn opposite(self) -> Self {
        match self {
            Placement::Top => Placement::Bottom,
            Placement::Bottom => Placement::Top,
            Placement::Left => Placement::Right,
            Placement::Right => Placement::Left,
        }
    }

    fn is_vertical(self) -> bool {
        matches!(self, Placement::Top | Placement::Bottom)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PopupEvent {
    #[default]
    Click,
    Hover,
    FocusBlur,
    FocusClick,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupSettings {
    #[serde(default)]
    pub event: PopupEvent,
    /// Value of the `data-popup` attribute identifying the floating element.
    pub target: String,
    #[serde(default)]
    pub placement: Placement,
    #[serde(default)]
    pub close_query: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopupPosition {
    pub x: f64,
    pub y: f64,
    pub placement: Placement,
}

fn place(reference: Rect, floating: Size, placement: Placement) -> (f64, f64) {
    let center_x = reference.x + reference.width / 2.0 - floating.width / 2.0;
    let center_y = reference.y + reference.height / 2.0 - floating.height / 2.0;
    match placement {
        Placement::Bottom => (center_x, reference.y + reference.height + POPUP_OFFSET),
        Placement::Top => (center_x, reference.y - floating.height - POPUP_OFFSET),
        Placement::Left => (reference.x - floating.width - POPUP_OFFSET, center_y),
        Placement::Right => (reference.x + reference.width + POPUP_OFFSET, center_y),
    }
}

fn overflows(x: f64, y: f64, floating: Size, viewport: Size, placement: Placement) -> bool {
    match placement {
        Placement::Bottom => y + floating.height > viewport.height,
        Placement::Top => y < 0.0,
        Placement::Left => x < 0.0,
        Placement::Right => x + floating.width > viewport.width,
    }
}

fn shift(value: f64, extent: f64, limit: f64) -> f64 {
    let max = (limit - extent - SHIFT_PADDING).max(SHIFT_PADDING);
    value.clamp(SHIFT_PADDING, max)
}

/// Computes where the floating element goes for the preferred placement.
pub fn compute_position(
    reference: Rect,
    floating: Size,
    viewport: Size,
    preferred: Placement,
) -> PopupPosition {
    let mut placement = preferred;
    let (mut x, mut y) = place(reference, floating, placement);

    if overflows(x, y, floating, viewport, placement) {
        let flipped = placement.opposite();
        let (fx, fy) = place(reference, floating, flipped);
        if !overflows(fx, fy, floating, viewport, flipped) {
            placement = flipped;
            x = fx;
            y = fy;
        }
    }

    if placement.is_vertical() {
        x = shift(x, floating.width, viewport.width);
    } else {
        y = shift(y, floating.height, viewport.height);
    }

    PopupPosition { x, y, placement }
}

/// Visibility and last computed position of one popup.
#[derive(Debug, Clone)]
pub struct PopupState {
    settings: PopupSettings,
    visible: bool,
    position: Option<PopupPosition>,
}

impl PopupState {
    pub fn new(settings: PopupSettings) -> Self {
        Self {
            settings,
            visible: false,
            position: None,
        }
    }

    pub fn settings(&self) -> &PopupSettings {
        &self.settings
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> Option<PopupPosition> {
        self.position
    }

    pub fn show(&mut self, reference: Rect, floating: Size, viewport: Size) {
        self.visible = true;
        self.update(reference, floating, viewport);
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Click handler: shows a hidden popup, hides a visible one.
    pub fn toggle(&mut self, reference: Rect, floating: Size, viewport: Size) {
        if self.visible {
            self.hide();
        } else {
            self.show(reference, floating, viewport);
        }
    }

    /// Recomputes the position after layout changes; no-op while hidden.
    pub fn update(&mut self, reference: Rect, floating: Size, viewport: Size) {
        if self.visible {
            self.position = Some(compute_position(
                reference,
                floating,
                viewport,
                self.settings.placement,
            ));
        }
    }
}
