//! # Edit Session Controller
//!
//! State machine governing which region is being edited.
//!
//! ```text
//!          pointer inside registered region
//!   Idle ───────────────────────────────────▶ Editing
//!    ▲                                           │
//!    └───────────────────────────────────────────┘
//!          pointer outside region + toolbar
//!          (suppressed while a prompt is open)
//! ```
//!
//! At most one region is active at a time. On exit the live serialized
//! content is flushed into the section's `edited_text` before the
//! editable attributes are torn down; this ordering is what the sync
//! layer's dirty computation depends on.

use crate::registry::SectionRegistry;
use inlay_dom::{DocumentTree, NodeId, EDIT_MARKER_CLASS};
use tracing::debug;

/// Attribute marking the active region text-editable for the host
pub const EDITABLE_ATTR: &str = "contenteditable";

/// Session state: no region active, or exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing {
        node: NodeId,
    },
}

/// Owns the Idle ⇄ Editing transitions for one editor instance
#[derive(Debug, Default)]
pub struct SessionController {
    state: EditState,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    /// Node currently being edited, if any
    pub fn active_node(&self) -> Option<NodeId> {
        match self.state {
            EditState::Idle => None,
            EditState::Editing { node } => Some(node),
        }
    }

    /// Enter `Editing` on a registered region. Re-entering the active
    /// region is a no-op; a different region must be closed by the
    /// caller first so content is flushed in order.
    pub fn enter(&mut self, tree: &mut DocumentTree, node: NodeId) {
        if self.active_node() == Some(node) {
            return;
        }

        tree.add_class(node, EDIT_MARKER_CLASS);
        tree.set_attribute(node, EDITABLE_ATTR, "true");
        self.state = EditState::Editing { node };
        debug!(?node, "edit session started");
    }

    /// Exit to `Idle`, flushing the live serialized content into the
    /// region's section. Idempotent: exiting while idle does nothing.
    pub fn exit(&mut self, tree: &mut DocumentTree, registry: &mut SectionRegistry) {
        let EditState::Editing { node } = self.state else {
            return;
        };

        self.flush(tree, registry);
        tree.remove_attribute(node, EDITABLE_ATTR);
        tree.remove_class(node, EDIT_MARKER_CLASS);
        self.state = EditState::Idle;
        debug!(?node, "edit session ended");
    }

    /// Flush the active region's live content into its section without
    /// ending the session. Required before any save reads the dirty set.
    pub fn flush(&self, tree: &DocumentTree, registry: &mut SectionRegistry) {
        let Some(node) = self.active_node() else {
            return;
        };
        if let Some(section) = registry.find_by_node_mut(node) {
            section.edited_text = tree.serialized_content(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::Baseline;

    fn setup() -> (DocumentTree, SectionRegistry, NodeId) {
        let mut tree = DocumentTree::new("body");
        let main = tree.append_element(tree.root(), "main");
        let h1 = tree.append_element(main, "h1");
        tree.set_text(h1, "Old headline");

        let mut registry = SectionRegistry::new();
        registry.register(&tree, h1, "/");
        (tree, registry, h1)
    }

    #[test]
    fn test_enter_marks_region_editable() {
        let (mut tree, _registry, h1) = setup();
        let mut session = SessionController::new();

        session.enter(&mut tree, h1);
        assert_eq!(session.active_node(), Some(h1));
        assert_eq!(tree.attribute(h1, EDITABLE_ATTR), Some("true"));
        assert!(tree.node(h1).unwrap().has_class(EDIT_MARKER_CLASS));
    }

    #[test]
    fn test_exit_flushes_and_tears_down() {
        let (mut tree, mut registry, h1) = setup();
        let mut session = SessionController::new();

        session.enter(&mut tree, h1);
        tree.set_serialized_content(h1, "Welcome");
        session.exit(&mut tree, &mut registry);

        assert_eq!(session.state(), EditState::Idle);
        assert_eq!(tree.attribute(h1, EDITABLE_ATTR), None);
        assert!(!tree.node(h1).unwrap().has_class(EDIT_MARKER_CLASS));

        let section = registry.find_by_node(h1).unwrap();
        assert_eq!(section.edited_text, "Welcome");
        assert_eq!(section.saved_text, "Old headline");
        assert!(section.is_dirty(Baseline::Save));
    }

    #[test]
    fn test_exit_twice_is_idempotent() {
        let (mut tree, mut registry, h1) = setup();
        let mut session = SessionController::new();

        session.enter(&mut tree, h1);
        tree.set_serialized_content(h1, "Welcome");
        session.exit(&mut tree, &mut registry);

        // A second exit must not disturb anything.
        registry.find_by_node_mut(h1).unwrap().edited_text = "Welcome".to_string();
        session.exit(&mut tree, &mut registry);
        assert_eq!(registry.find_by_node(h1).unwrap().edited_text, "Welcome");
        assert_eq!(session.state(), EditState::Idle);
    }

    #[test]
    fn test_reenter_same_region_is_noop() {
        let (mut tree, _registry, h1) = setup();
        let mut session = SessionController::new();

        session.enter(&mut tree, h1);
        session.enter(&mut tree, h1);
        assert_eq!(session.active_node(), Some(h1));
    }
}
