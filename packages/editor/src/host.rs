//! # Host Page
//!
//! Seam between the editing core and the platform actually rendering
//! the page. Rich-text commands, layout measurement and viewport size
//! all belong to the host; the core only decides when to invoke them.

use crate::toolbar::Rect;
use inlay_dom::{DocumentTree, NodeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Rich-text command delegated to the host's editing surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextCommand {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    OrderedList,
    UnorderedList,
    CreateLink { url: String },
}

/// The platform rendering the page being edited
pub trait HostPage {
    /// Execute a rich-text command against the current selection
    /// inside `target`
    fn exec_command(&mut self, tree: &mut DocumentTree, target: NodeId, command: &TextCommand);

    /// Viewport-space bounds of a rendered node
    fn measure(&self, tree: &DocumentTree, node: NodeId) -> Rect;

    /// Current viewport bounds
    fn viewport(&self) -> Rect;
}

/// Host double with fixed geometry, recording executed commands.
/// The command log is shared so tests keep a handle after handing the
/// host to an editor.
#[derive(Debug, Clone)]
pub struct StaticHostPage {
    pub viewport: Rect,
    pub bounds: HashMap<NodeId, Rect>,
    executed: Arc<Mutex<Vec<(NodeId, TextCommand)>>>,
}

impl Default for StaticHostPage {
    fn default() -> Self {
        Self {
            viewport: Rect::new(0.0, 0.0, 1024.0, 768.0),
            bounds: HashMap::new(),
            executed: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl StaticHostPage {
    /// Commands executed so far, in order
    pub fn executed(&self) -> Vec<(NodeId, TextCommand)> {
        self.executed.lock().unwrap().clone()
    }
}

impl HostPage for StaticHostPage {
    fn exec_command(&mut self, _tree: &mut DocumentTree, target: NodeId, command: &TextCommand) {
        self.executed.lock().unwrap().push((target, command.clone()));
    }

    fn measure(&self, _tree: &DocumentTree, node: NodeId) -> Rect {
        self.bounds
            .get(&node)
            .copied()
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 0.0, 0.0))
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }
}
