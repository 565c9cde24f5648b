//! # Section Registry
//!
//! Ordered collection of editable-region records with lookup by node,
//! by selector path, and by dirty subset. Registration happens once,
//! at scan time; lookups never fail hard, a miss is a `None`.

use crate::section::{Baseline, Section};
use inlay_dom::{build_path, DocumentTree, NodeId};
use std::collections::{HashMap, HashSet};

/// Registry of all editable regions discovered on the page
#[derive(Debug, Default)]
pub struct SectionRegistry {
    sections: Vec<Section>,
    by_path: HashMap<String, usize>,
    by_node: HashMap<NodeId, usize>,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one editable node, snapshotting its current serialized
    /// content as all three baselines.
    ///
    /// Idempotent: re-registering a node (or a node whose path is
    /// already taken) returns the existing section instead of creating
    /// a duplicate. Returns `None` when no path can be built for the
    /// node (detached or root).
    pub fn register(
        &mut self,
        tree: &DocumentTree,
        node: NodeId,
        page: &str,
    ) -> Option<&Section> {
        if let Some(&index) = self.by_node.get(&node) {
            return Some(&self.sections[index]);
        }

        let path = build_path(tree, node)?;
        let key = path.to_string();
        if let Some(&index) = self.by_path.get(&key) {
            return Some(&self.sections[index]);
        }

        let content = tree.serialized_content(node);
        let index = self.sections.len();
        self.sections
            .push(Section::new(path, node, page.to_string(), content));
        self.by_path.insert(key, index);
        self.by_node.insert(node, index);
        Some(&self.sections[index])
    }

    /// Discover and register every element whose tag is in `tags`,
    /// in document order. Returns the number of sections newly created;
    /// nodes resolving to an already-registered path don't count.
    pub fn scan(&mut self, tree: &DocumentTree, tags: &[String], page: &str) -> usize {
        let before = self.sections.len();
        let mut visited = HashSet::new();
        let mut stack = vec![tree.root()];

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let Some(node) = tree.node(id) else {
                continue;
            };
            if tags.iter().any(|t| *t == node.tag) {
                self.register(tree, id, page);
            }
            // Reverse push keeps document order on the stack.
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }

        self.sections.len() - before
    }

    /// Look up a section by its canonical path string
    pub fn find_by_path(&self, path: &str) -> Option<&Section> {
        self.by_path.get(path).map(|&i| &self.sections[i])
    }

    /// Look up a section by its live node handle
    pub fn find_by_node(&self, node: NodeId) -> Option<&Section> {
        self.by_node.get(&node).map(|&i| &self.sections[i])
    }

    /// Mutable lookup by path
    pub fn find_by_path_mut(&mut self, path: &str) -> Option<&mut Section> {
        let index = *self.by_path.get(path)?;
        Some(&mut self.sections[index])
    }

    /// Mutable lookup by node
    pub fn find_by_node_mut(&mut self, node: NodeId) -> Option<&mut Section> {
        let index = *self.by_node.get(&node)?;
        Some(&mut self.sections[index])
    }

    /// Sections that diverge from the given baseline
    pub fn changed_since(&self, baseline: Baseline) -> Vec<&Section> {
        self.sections
            .iter()
            .filter(|s| s.is_dirty(baseline))
            .collect()
    }

    /// All sections in registration (document) order
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Mutable iteration, used by the sync layer for promotions
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Section> {
        self.sections.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_tree() -> (DocumentTree, NodeId, NodeId) {
        let mut tree = DocumentTree::new("body");
        let main = tree.append_element(tree.root(), "main");
        let section = tree.append_element(main, "section");
        tree.add_class(section, "hero");
        let h1 = tree.append_element(section, "h1");
        tree.set_text(h1, "Original headline");
        let p = tree.append_element(section, "p");
        tree.set_text(p, "Original body");
        (tree, h1, p)
    }

    #[test]
    fn test_register_snapshots_equal_baselines() {
        let (tree, h1, _) = page_tree();
        let mut registry = SectionRegistry::new();

        let section = registry.register(&tree, h1, "/").unwrap();
        assert_eq!(section.original_text, "Original headline");
        assert_eq!(section.edited_text, section.original_text);
        assert_eq!(section.saved_text, section.original_text);
    }

    #[test]
    fn test_reregistration_does_not_duplicate() {
        let (tree, h1, _) = page_tree();
        let mut registry = SectionRegistry::new();

        registry.register(&tree, h1, "/");
        registry.register(&tree, h1, "/");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_scan_discovers_in_document_order() {
        let (tree, h1, p) = page_tree();
        let mut registry = SectionRegistry::new();

        let count = registry.scan(
            &tree,
            &["h1".to_string(), "p".to_string()],
            "/",
        );
        assert_eq!(count, 2);

        let nodes: Vec<NodeId> = registry.iter().map(|s| s.node).collect();
        assert_eq!(nodes, vec![h1, p]);
    }

    #[test]
    fn test_lookup_by_path_and_node() {
        let (tree, h1, _) = page_tree();
        let mut registry = SectionRegistry::new();
        registry.register(&tree, h1, "/");

        assert!(registry.find_by_path("main section.hero h1").is_some());
        assert!(registry.find_by_node(h1).is_some());
        assert!(registry.find_by_path("main aside").is_none());
    }

    #[test]
    fn test_changed_since_tracks_exact_divergence() {
        let (tree, h1, p) = page_tree();
        let mut registry = SectionRegistry::new();
        registry.register(&tree, h1, "/");
        registry.register(&tree, p, "/");

        assert!(registry.changed_since(Baseline::Save).is_empty());

        registry.find_by_node_mut(h1).unwrap().edited_text = "Welcome".to_string();
        let dirty = registry.changed_since(Baseline::Save);
        assert_eq!(dirty.len(), 1);
        assert_eq!(dirty[0].node, h1);
        assert!(registry.changed_since(Baseline::Publish).is_empty());
    }

    #[test]
    fn test_scan_count_skips_path_collisions() {
        let mut tree = DocumentTree::new("body");
        let main = tree.append_element(tree.root(), "main");
        // Same tag, same class: both resolve to "main p.note".
        let first = tree.append_element(main, "p");
        tree.add_class(first, "note");
        let second = tree.append_element(main, "p");
        tree.add_class(second, "note");

        let mut registry = SectionRegistry::new();
        let count = registry.scan(&tree, &["p".to_string()], "/");
        assert_eq!(count, 1);
        assert_eq!(count, registry.len());
    }

    #[test]
    fn test_rescan_creates_nothing_new() {
        let (tree, _, _) = page_tree();
        let tags = vec!["h1".to_string(), "p".to_string()];
        let mut registry = SectionRegistry::new();

        assert_eq!(registry.scan(&tree, &tags, "/"), 2);
        assert_eq!(registry.scan(&tree, &tags, "/"), 0);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_scan_survives_cyclic_children() {
        let (mut tree, h1, _) = page_tree();
        // Malformed tree: h1 adopts the root as a child.
        let root = tree.root();
        tree.node_mut(h1).unwrap().children.push(root);

        let mut registry = SectionRegistry::new();
        registry.scan(&tree, &["h1".to_string()], "/");
        assert_eq!(registry.len(), 1);
    }
}
