//! # Sections
//!
//! One [`Section`] exists per discovered editable region. It is created
//! once at scan time, never destroyed, and mutated in place: the session
//! controller writes `edited_text`, the sync layer writes `saved_text`
//! and `original_text`.
//!
//! Dirtiness is purely a comparison of the three baselines:
//! `edited_text != saved_text` means unsaved work, `saved_text !=
//! original_text` means unpublished work.

use inlay_dom::{NodeId, SelectorPath};

/// Which baseline a dirty check compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    /// Unsaved work: `edited_text` vs `saved_text`
    Save,
    /// Unpublished work: `saved_text` vs `original_text`
    Publish,
}

/// Tracked state for one editable region
#[derive(Debug, Clone)]
pub struct Section {
    /// Canonical selector path at registration time, unique per registry
    pub path: SelectorPath,

    /// Non-owning handle to the live node backing this section
    pub node: NodeId,

    /// Logical page identifier the region belongs to
    pub page: String,

    /// Last-published value
    pub original_text: String,

    /// Current in-memory value
    pub edited_text: String,

    /// Last value acknowledged saved by the server
    pub saved_text: String,
}

impl Section {
    /// A freshly scanned section starts clean: all three baselines equal
    pub fn new(path: SelectorPath, node: NodeId, page: String, content: String) -> Self {
        Self {
            path,
            node,
            page,
            original_text: content.clone(),
            edited_text: content.clone(),
            saved_text: content,
        }
    }

    /// Whether this section diverges from the given baseline
    pub fn is_dirty(&self, baseline: Baseline) -> bool {
        match baseline {
            Baseline::Save => self.edited_text != self.saved_text,
            Baseline::Publish => self.saved_text != self.original_text,
        }
    }
}
