//! Pointer events routed from the host to the viewer.

use seatmap_core::NodeIndex;

/// What happened on a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Click,
    /// Pointer entered the shape; viewport coordinates of the pointer.
    Enter { x: f64, y: f64 },
    Leave,
}

/// A pointer event targeted at one shape of the mounted document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeEvent {
    pub shape: NodeIndex,
    pub pointer: PointerEvent,
}

impl ShapeEvent {
    pub fn click(shape: NodeIndex) -> Self {
        Self {
            shape,
            pointer: PointerEvent::Click,
        }
    }

    pub fn enter(shape: NodeIndex, x: f64, y: f64) -> Self {
        Self {
            shape,
            pointer: PointerEvent::Enter { x, y },
        }
    }

    pub fn leave(shape: NodeIndex) -> Self {
        Self {
            shape,
            pointer: PointerEvent::Leave,
        }
    }
}
