//! # Selector Paths
//!
//! Stable textual addressing for nodes, so an edited region can be
//! re-located across page reloads and correlated with server responses.
//!
//! A path is a space-joined chain of per-level selectors from the root
//! container down to the node, e.g. `main section.hero h1`. Level forms:
//!
//! - `tag#id` — an id short-circuits the climb (ids assumed unique)
//! - `tag.class1.class2` — class-based addressing
//! - `tag:nth-child(n)` — positional fallback when same-tag siblings
//!   would otherwise be ambiguous
//! - `tag` — when the tag alone is unambiguous
//!
//! The transient editing marker class is excluded from class lists so a
//! path is identical whether or not the region is mid-edit.

use crate::tree::{DocumentTree, Node, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker class applied to the region currently being edited
pub const EDIT_MARKER_CLASS: &str = "inlay-editing";

/// Hard cap on upward walks. Exceeding it truncates the walk rather
/// than failing, guarding against cyclic or pathological parent chains.
pub const MAX_CLIMB: usize = 256;

/// Canonical selector path for one node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SelectorPath {
    levels: Vec<String>,
}

impl SelectorPath {
    /// Per-level selectors, root-side first
    pub fn levels(&self) -> &[String] {
        &self.levels
    }
}

impl fmt::Display for SelectorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.levels.join(" "))
    }
}

impl From<String> for SelectorPath {
    fn from(s: String) -> Self {
        Self {
            levels: s.split_whitespace().map(str::to_string).collect(),
        }
    }
}

impl From<&str> for SelectorPath {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<SelectorPath> for String {
    fn from(path: SelectorPath) -> Self {
        path.to_string()
    }
}

/// Build the canonical path for `node`.
///
/// Returns `None` for the root container itself and when the parent
/// chain breaks before reaching the root. Hitting [`MAX_CLIMB`] is not
/// an error: the walk truncates and the partial path is returned.
pub fn build_path(tree: &DocumentTree, node: NodeId) -> Option<SelectorPath> {
    if node == tree.root() {
        return None;
    }
    tree.node(node)?;

    let mut levels = Vec::new();
    let mut current = node;

    for step in 0.. {
        let n = tree.node(current)?;
        levels.push(level_selector(tree, current, n));

        // An id uniquely addresses the level, no need to climb further.
        if n.id.is_some() {
            break;
        }

        if step + 1 >= MAX_CLIMB {
            break;
        }

        match n.parent {
            Some(parent) if parent == tree.root() => break,
            Some(parent) if tree.node(parent).is_some() => current = parent,
            _ => return None,
        }
    }

    levels.reverse();
    Some(SelectorPath { levels })
}

/// Resolve a path back to a node, `None` when no node matches.
///
/// A leading `tag#id` level resolves through a document-wide id lookup,
/// mirroring the builder's id short-circuit; remaining levels descend
/// through children.
pub fn resolve_path(tree: &DocumentTree, path: &SelectorPath) -> Option<NodeId> {
    let mut levels = path.levels.iter();
    let first = Level::parse(levels.next()?);

    let mut current = if let Some(id_attr) = &first.id {
        let found = tree.find_by_id(id_attr)?;
        if tree.node(found)?.tag != first.tag {
            return None;
        }
        found
    } else {
        match_child(tree, tree.root(), &first)?
    };

    for raw in levels {
        let level = Level::parse(raw);
        current = match_child(tree, current, &level)?;
    }
    Some(current)
}

/// Walk upward from `node` (self included) until `accept` matches.
///
/// Bounded by [`MAX_CLIMB`]; stops without a match at the root container
/// or on a broken parent chain.
pub fn closest_matching<F>(tree: &DocumentTree, node: NodeId, accept: F) -> Option<NodeId>
where
    F: Fn(NodeId, &Node) -> bool,
{
    let mut current = node;
    for _ in 0..MAX_CLIMB {
        let n = tree.node(current)?;
        if accept(current, n) {
            return Some(current);
        }
        if current == tree.root() {
            return None;
        }
        current = n.parent?;
    }
    None
}

fn level_selector(tree: &DocumentTree, id: NodeId, node: &Node) -> String {
    if let Some(id_attr) = &node.id {
        return format!("{}#{}", node.tag, id_attr);
    }

    let classes: Vec<&str> = node
        .classes
        .iter()
        .map(String::as_str)
        .filter(|c| *c != EDIT_MARKER_CLASS)
        .collect();
    if !classes.is_empty() {
        return format!("{}.{}", node.tag, classes.join("."));
    }

    // Positional disambiguation only when same-tag siblings exist.
    if let Some(parent) = node.parent.and_then(|p| tree.node(p)) {
        let same_tag = parent
            .children
            .iter()
            .filter(|&&c| tree.node(c).is_some_and(|n| n.tag == node.tag))
            .count();
        if same_tag > 1 {
            if let Some(position) = parent.children.iter().position(|&c| c == id) {
                return format!("{}:nth-child({})", node.tag, position + 1);
            }
        }
    }

    node.tag.clone()
}

fn match_child(tree: &DocumentTree, parent: NodeId, level: &Level) -> Option<NodeId> {
    let parent_node = tree.node(parent)?;

    if let Some(nth) = level.nth_child {
        let child = *parent_node.children.get(nth.checked_sub(1)?)?;
        let node = tree.node(child)?;
        return (node.tag == level.tag).then_some(child);
    }

    parent_node.children.iter().copied().find(|&child| {
        let Some(node) = tree.node(child) else {
            return false;
        };
        if node.tag != level.tag {
            return false;
        }
        if let Some(id_attr) = &level.id {
            return node.id.as_deref() == Some(id_attr);
        }
        level.classes.iter().all(|c| node.has_class(c))
    })
}

/// One parsed path level
struct Level {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    nth_child: Option<usize>,
}

impl Level {
    fn parse(raw: &str) -> Self {
        if let Some((tag, id)) = raw.split_once('#') {
            return Self {
                tag: tag.to_string(),
                id: Some(id.to_string()),
                classes: Vec::new(),
                nth_child: None,
            };
        }

        if let Some((tag, rest)) = raw.split_once(":nth-child(") {
            let nth = rest.trim_end_matches(')').parse().ok();
            return Self {
                tag: tag.to_string(),
                id: None,
                classes: Vec::new(),
                nth_child: nth,
            };
        }

        let mut parts = raw.split('.');
        let tag = parts.next().unwrap_or_default().to_string();
        Self {
            tag,
            id: None,
            classes: parts.map(str::to_string).collect(),
            nth_child: None,
        }
    }
}
