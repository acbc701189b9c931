//! Floating section-name tooltip.
//!
//! Created once per viewer after the map loads, repositioned on every
//! hover-enter, hidden (not destroyed) on leave, removed on teardown.

use crate::surface::Surface;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    created: bool,
    visible: bool,
    text: String,
    x: f64,
    y: f64,
}

impl Tooltip {
    /// Lazily create the host element. Later calls are no-ops.
    pub fn ensure_created<S: Surface>(&mut self, surface: &mut S, id: &str) {
        if self.created {
            return;
        }
        surface.create_tooltip(id);
        self.created = true;
    }

    /// Show `text` at pointer position plus `offset` on both axes.
    pub fn show<S: Surface>(&mut self, surface: &mut S, text: &str, x: f64, y: f64, offset: f64) {
        if !self.created {
            return;
        }
        self.visible = true;
        self.text = text.to_string();
        self.x = x + offset;
        self.y = y + offset;
        surface.show_tooltip(&self.text, self.x, self.y);
    }

    pub fn hide<S: Surface>(&mut self, surface: &mut S) {
        if self.created && self.visible {
            self.visible = false;
            surface.hide_tooltip();
        }
    }

    pub fn remove<S: Surface>(&mut self, surface: &mut S) {
        if self.created {
            surface.remove_tooltip();
        }
        *self = Self::default();
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}
