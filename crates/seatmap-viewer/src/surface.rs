//! Host surface: the container the map is rendered into, plus the tooltip.
//!
//! The viewer never touches a DOM directly. It mutates its own
//! `SvgDocument` and tells the surface which elements changed. The browser
//! bridge implements this over `web-sys`; `MemorySurface` implements it in
//! memory for headless rendering and tests.

use crate::error::MountError;
use seatmap_core::{NodeIndex, SvgDocument, emit_svg};
use std::cell::Cell;
use std::rc::Rc;

pub trait Surface {
    /// Handle for the listeners attached to one shape. Dropping it must
    /// detach them.
    type Listener;

    /// Replace the container contents with the document. On error the
    /// viewer shows the fallback, which must replace any partial content.
    fn mount(&mut self, doc: &SvgDocument) -> Result<(), MountError>;

    /// Replace the container contents with a static message.
    fn show_fallback(&mut self, message: &str);

    /// Push one element's current attributes to the host.
    fn sync_element(&mut self, doc: &SvgDocument, idx: NodeIndex);

    /// Attach click, enter and leave listeners to a mounted shape.
    fn listen(&mut self, shape: NodeIndex) -> Self::Listener;

    fn create_tooltip(&mut self, id: &str);
    fn show_tooltip(&mut self, text: &str, x: f64, y: f64);
    fn hide_tooltip(&mut self);
    fn remove_tooltip(&mut self);
}

// ─── In-memory surface ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    #[default]
    Empty,
    /// Emitted markup of the mounted document, kept current by `sync_element`.
    Map(String),
    Fallback(String),
}

/// Tooltip element as the host sees it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipElement {
    pub id: String,
    pub visible: bool,
    pub text: String,
    pub left: f64,
    pub top: f64,
}

/// Surface that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemorySurface {
    pub content: Content,
    pub tooltip: Option<TooltipElement>,
    pub mount_count: usize,
    /// Elements synced since mount, in order.
    pub synced: Vec<NodeIndex>,
    live_listeners: Rc<Cell<usize>>,
}

/// Listener registration on a `MemorySurface`.
#[derive(Debug)]
pub struct MemoryListener {
    pub shape: NodeIndex,
    live: Rc<Cell<usize>>,
}

impl Drop for MemoryListener {
    fn drop(&mut self) {
        self.live.set(self.live.get().saturating_sub(1));
    }
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listeners attached and not yet released.
    pub fn live_listeners(&self) -> usize {
        self.live_listeners.get()
    }

    /// Shared counter, readable after the surface has moved into a viewer.
    pub fn listener_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.live_listeners)
    }

    pub fn markup(&self) -> Option<&str> {
        match &self.content {
            Content::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl Surface for MemorySurface {
    type Listener = MemoryListener;

    fn mount(&mut self, doc: &SvgDocument) -> Result<(), MountError> {
        self.content = Content::Map(emit_svg(doc));
        self.mount_count += 1;
        self.synced.clear();
        Ok(())
    }

    fn show_fallback(&mut self, message: &str) {
        self.content = Content::Fallback(message.to_string());
    }

    fn sync_element(&mut self, doc: &SvgDocument, idx: NodeIndex) {
        if let Content::Map(markup) = &mut self.content {
            *markup = emit_svg(doc);
            self.synced.push(idx);
        }
    }

    fn listen(&mut self, shape: NodeIndex) -> MemoryListener {
        self.live_listeners.set(self.live_listeners.get() + 1);
        MemoryListener {
            shape,
            live: Rc::clone(&self.live_listeners),
        }
    }

    fn create_tooltip(&mut self, id: &str) {
        self.tooltip = Some(TooltipElement {
            id: id.to_string(),
            ..TooltipElement::default()
        });
    }

    fn show_tooltip(&mut self, text: &str, x: f64, y: f64) {
        if let Some(t) = &mut self.tooltip {
            t.visible = true;
            t.text = text.to_string();
            t.left = x;
            t.top = y;
        }
    }

    fn hide_tooltip(&mut self) {
        if let Some(t) = &mut self.tooltip {
            t.visible = false;
        }
    }

    fn remove_tooltip(&mut self) {
        self.tooltip = None;
    }
}
