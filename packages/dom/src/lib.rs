//! # Inlay DOM
//!
//! Document-tree model for the inlay editing core.
//!
//! The editor never owns the page it edits. This crate models the host
//! document as an arena of nodes addressed by [`NodeId`] handles, which
//! is what the rest of the workspace holds instead of owning references:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ dom: DocumentTree + selector paths          │
//! │  - Arena nodes with explicit parent links   │
//! │  - build_path / resolve_path                │
//! │  - Bounded ancestor resolution              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: sections, sessions, shortcuts       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Parent pointers are stored explicitly (and are freely writable), so
//! malformed chains such as cycles or dangling parents are representable.
//! Every upward walk in this crate is bounded by [`path::MAX_CLIMB`] and
//! degrades gracefully instead of hanging on such trees.

mod path;
mod tree;

pub use path::{build_path, closest_matching, resolve_path, SelectorPath, EDIT_MARKER_CLASS, MAX_CLIMB};
pub use tree::{DocumentTree, Node, NodeId};
