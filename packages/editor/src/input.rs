//! Host input events.
//!
//! The host application translates its native UI events into these
//! types and feeds them to [`crate::Editor`]. Coordinates are in the
//! host's viewport space.

use inlay_dom::NodeId;

/// A pointer-activation event (click, tap)
#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    /// Deepest node under the pointer, if any
    pub target: Option<NodeId>,

    /// Viewport-space position
    pub x: f64,
    pub y: f64,
}

/// A key-down event
#[derive(Debug, Clone)]
pub struct KeyEvent {
    /// Key value as reported by the host (case-insensitive)
    pub key: String,

    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,

    /// True for auto-repeated events while the key is held
    pub repeat: bool,

    /// Node that had focus when the key was pressed, if any
    pub target: Option<NodeId>,
}

impl KeyEvent {
    /// Canonical combo key: held modifiers in fixed order, then the
    /// lowercased key, joined with `+` (e.g. `ctrl+shift+p`).
    pub fn combo(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("ctrl".to_string());
        }
        if self.shift {
            parts.push("shift".to_string());
        }
        if self.alt {
            parts.push("alt".to_string());
        }
        parts.push(self.key.to_lowercase());
        parts.join("+")
    }
}

/// What the host should do with a key event after dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Fully consumed: suppress the default action, stop propagation
    Consumed,
    /// Untouched: let the host handle it normally
    Pass,
}
