//! # Document Tree
//!
//! Arena-backed stand-in for the live page.
//!
//! Nodes carry the handful of element features the editor cares about:
//! tag name, `id` attribute, class list, generic attributes, direct text
//! content and child order. The serialized content of a node (its
//! "innerHTML" equivalent) is what sections snapshot and diff against.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Handle into a [`DocumentTree`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// A single element node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Lowercase tag name
    pub tag: String,

    /// `id` attribute, assumed unique within the document when present
    pub id: Option<String>,

    /// Class list in document order
    pub classes: Vec<String>,

    /// Remaining attributes
    pub attributes: HashMap<String, String>,

    /// Direct text content, serialized before any children
    pub text: String,

    /// Child nodes in document order
    pub children: Vec<NodeId>,

    /// Upward link. Writable, so malformed chains are representable.
    pub parent: Option<NodeId>,
}

impl Node {
    fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            attributes: HashMap::new(),
            text: String::new(),
            children: Vec::new(),
            parent: None,
        }
    }

    /// Whether the class list contains `class_name`
    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes.iter().any(|c| c == class_name)
    }
}

/// Arena document tree with a designated root container
#[derive(Debug, Clone)]
pub struct DocumentTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl DocumentTree {
    /// Create a tree whose root container has the given tag
    pub fn new(root_tag: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node::new(root_tag)],
            root: NodeId(0),
        }
    }

    /// The designated root container (path-building boundary)
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.nodes.push(Node::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    /// Create an element and append it to `parent` in one step
    pub fn append_element(&mut self, parent: NodeId, tag: impl Into<String>) -> NodeId {
        let child = self.create_element(tag);
        self.append_child(parent, child);
        child
    }

    /// Append `child` to `parent`, updating the child's parent link.
    /// Invalid handles are ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() {
            return;
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Borrow a node, `None` for dangling handles
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Mutably borrow a node, `None` for dangling handles
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Set the `id` attribute
    pub fn set_id(&mut self, id: NodeId, value: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.id = Some(value.into());
        }
    }

    /// Add a class if not already present
    pub fn add_class(&mut self, id: NodeId, class_name: &str) {
        if let Some(node) = self.node_mut(id) {
            if !node.has_class(class_name) {
                node.classes.push(class_name.to_string());
            }
        }
    }

    /// Remove a class if present
    pub fn remove_class(&mut self, id: NodeId, class_name: &str) {
        if let Some(node) = self.node_mut(id) {
            node.classes.retain(|c| c != class_name);
        }
    }

    /// Set a generic attribute
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(id) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    /// Remove a generic attribute
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(node) = self.node_mut(id) {
            node.attributes.remove(name);
        }
    }

    /// Read a generic attribute
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)?.attributes.get(name).map(String::as_str)
    }

    /// Set the direct text content
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.text = text.into();
        }
    }

    /// Find a node by its `id` attribute (linear scan; ids assumed unique)
    pub fn find_by_id(&self, id_attr: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.id.as_deref() == Some(id_attr))
            .map(NodeId)
    }

    /// Whether `node` lies within `ancestor`'s subtree (self included).
    /// The climb is bounded, so cyclic parent chains terminate.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        for _ in 0..crate::path::MAX_CLIMB {
            match current {
                Some(id) if id == ancestor => return true,
                Some(id) => current = self.node(id).and_then(|n| n.parent),
                None => return false,
            }
        }
        false
    }

    /// Serialize a node's rich content: direct text followed by rendered
    /// children. This is the value sections snapshot and transmit.
    pub fn serialized_content(&self, id: NodeId) -> String {
        let Some(node) = self.node(id) else {
            return String::new();
        };

        let mut out = node.text.clone();
        for &child in &node.children {
            self.render_element(child, &mut out);
        }
        out
    }

    /// Replace a node's rich content wholesale. The new content is opaque
    /// to the tree: it becomes direct text and any children are dropped.
    pub fn set_serialized_content(&mut self, id: NodeId, content: &str) {
        if let Some(node) = self.node_mut(id) {
            node.text = content.to_string();
            node.children.clear();
        }
    }

    fn render_element(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };

        out.push('<');
        out.push_str(&node.tag);
        if let Some(id_attr) = &node.id {
            out.push_str(&format!(" id=\"{}\"", id_attr));
        }
        if !node.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", node.classes.join(" ")));
        }
        out.push('>');
        out.push_str(&node.text);
        for &child in &node.children {
            self.render_element(child, out);
        }
        out.push_str(&format!("</{}>", node.tag));
    }
}
