//! Hierarchical node structures for climate-solutions datasets.
//!
//! This module defines the tree of categories and topics a dataset is
//! made of. Each [`Node`] is a category or topic; leaf-level records
//! (articles, resources, solution entries) hang off nodes as
//! [`ContentItem`]s. Trees arrive as JSON and are given stable ids in
//! pre-order immediately after deserialization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for a node, assigned once at dataset load.
///
/// Ids are sequential in pre-order, so the root is always id 0. Filter
/// stages clone nodes freely; the id survives every clone, which makes
/// it the identity key for match sets and annotations. Node names are
/// display labels and may repeat.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A leaf-level record attached to a node: an article, resource, or
/// solution entry.
///
/// Source datasets are inconsistent about attribute names, so the
/// variants seen in the wild (`creator`/`source` for author,
/// `country`/`region` for location, `abstract` for description) are
/// accepted as aliases and collapse to one field each at parse time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// The item's title.
    pub title: String,

    /// Link to the underlying resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Who produced the item.
    #[serde(
        default,
        alias = "creator",
        alias = "source",
        skip_serializing_if = "Option::is_none"
    )]
    pub author: Option<String>,

    /// Where the item applies or originates.
    #[serde(
        default,
        alias = "country",
        alias = "region",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,

    /// Publication date as found in the source data; parsed lazily and
    /// loosely by date-range filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Free-form tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Short description of the item.
    #[serde(
        default,
        alias = "abstract",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// The item's content type (article, report, video, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A node in the dataset tree: a category or topic.
///
/// Nodes own their content items exclusively and their children
/// directly. The `id` field is not part of the source data; it is
/// assigned by [`Node::assign_ids`] (normally via dataset loading) and
/// defaults to 0 until then.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Stable identity, assigned in pre-order at dataset load.
    #[serde(skip_deserializing)]
    pub id: NodeId,

    /// Display name. Not guaranteed unique; missing names parse as
    /// empty strings and are skipped by document extraction.
    #[serde(default)]
    pub name: String,

    /// The node's content type (sector, solution, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Free-form tags on the node itself.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Short description of the node.
    #[serde(
        default,
        alias = "abstract",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Leaf records attached to this node.
    #[serde(
        rename = "contentItems",
        alias = "items",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub items: Vec<ContentItem>,

    /// Child nodes in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

impl Node {
    /// Creates a bare named node with no content, for building trees in
    /// code.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::default(),
            name: name.into(),
            kind: None,
            tags: Vec::new(),
            description: None,
            items: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns a copy of this node with an empty child list.
    ///
    /// Useful when rebuilding a tree with a different set of children,
    /// since it avoids cloning the whole subtree first.
    pub fn detached(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind.clone(),
            tags: self.tags.clone(),
            description: self.description.clone(),
            items: self.items.clone(),
            children: Vec::new(),
        }
    }

    /// Assigns sequential pre-order ids to this node and all
    /// descendants. The root receives id 0.
    pub fn assign_ids(&mut self) {
        for (position, node) in self.iter_preorder_mut().enumerate() {
            node.id = NodeId(position as u32);
        }
    }

    /// Returns an iterator over this node and all descendants in
    /// pre-order (depth-first).
    pub fn iter_preorder(&self) -> PreorderIter<'_> {
        PreorderIter { stack: vec![self] }
    }

    /// Returns an iterator over this node and all descendants in
    /// pre-order (depth-first), yielding mutable references.
    pub fn iter_preorder_mut(&mut self) -> PreorderIterMut<'_> {
        PreorderIterMut { stack: vec![self] }
    }

    /// Returns the total number of nodes in this subtree (including
    /// self).
    pub fn node_count(&self) -> usize {
        self.iter_preorder().count()
    }

    /// Returns the depth of the deepest node in this subtree, where the
    /// subtree root has depth 0.
    pub fn max_depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&Self, usize)> = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            for child in &node.children {
                stack.push((child, depth + 1));
            }
        }
        deepest
    }

    /// Looks up a node by id anywhere in this subtree.
    pub fn find(&self, id: NodeId) -> Option<&Self> {
        self.iter_preorder().find(|node| node.id == id)
    }

    /// Returns true if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Iterator for pre-order traversal of nodes.
pub struct PreorderIter<'a> {
    /// Stack of nodes to visit (rightmost children pushed first).
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for PreorderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order so leftmost child is processed first
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

/// Iterator for mutable pre-order traversal of nodes.
pub struct PreorderIterMut<'a> {
    /// Stack of nodes to visit (rightmost children pushed first).
    stack: Vec<&'a mut Node>,
}

impl<'a> Iterator for PreorderIterMut<'a> {
    type Item = &'a mut Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Safety: We need to get mutable references to children while holding a mutable ref
        // to the node. This is safe because we're moving the node reference out before
        // accessing children.
        let node_ptr = node as *mut Node;
        // Push children in reverse order so leftmost child is processed first
        unsafe {
            for child in (*node_ptr).children.iter_mut().rev() {
                self.stack.push(child);
            }
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Node {
        let mut root = Node::named("Root");
        let mut energy = Node::named("Energy");
        energy.children.push(Node::named("Solar"));
        energy.children.push(Node::named("Wind"));
        root.children.push(energy);
        root.children.push(Node::named("Food"));
        root.assign_ids();
        root
    }

    #[test]
    fn preorder_traversal_order() {
        let root = sample_tree();
        let names: Vec<&str> = root.iter_preorder().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Root", "Energy", "Solar", "Wind", "Food"]);
    }

    #[test]
    fn assign_ids_is_sequential_preorder() {
        let root = sample_tree();
        let ids: Vec<u32> = root.iter_preorder().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn node_count_includes_self() {
        assert_eq!(sample_tree().node_count(), 5);
        assert_eq!(Node::named("leaf").node_count(), 1);
    }

    #[test]
    fn max_depth_counts_levels() {
        assert_eq!(sample_tree().max_depth(), 2);
        assert_eq!(Node::named("leaf").max_depth(), 0);
    }

    #[test]
    fn find_by_id() {
        let root = sample_tree();
        assert_eq!(root.find(NodeId(3)).unwrap().name, "Wind");
        assert!(root.find(NodeId(99)).is_none());
    }

    #[test]
    fn is_leaf() {
        let root = sample_tree();
        assert!(!root.is_leaf());
        assert!(root.find(NodeId(2)).unwrap().is_leaf());
    }

    #[test]
    fn ids_survive_cloning() {
        let root = sample_tree();
        let copy = root.children[0].clone();
        assert_eq!(copy.id, NodeId(1));
        assert_eq!(copy.children[0].id, NodeId(2));
    }

    #[test]
    fn detached_drops_children_keeps_fields() {
        let root = sample_tree();
        let energy = root.find(NodeId(1)).unwrap();
        let detached = energy.detached();
        assert_eq!(detached.id, NodeId(1));
        assert_eq!(detached.name, "Energy");
        assert!(detached.children.is_empty());
        assert_eq!(energy.children.len(), 2);
    }

    #[test]
    fn deserialize_with_type_rename() {
        let node: Node = serde_json::from_str(r#"{"name": "Solar", "type": "sector"}"#).unwrap();
        assert_eq!(node.name, "Solar");
        assert_eq!(node.kind.as_deref(), Some("sector"));
        assert!(node.tags.is_empty());
        assert!(node.children.is_empty());
    }

    #[test]
    fn deserialize_missing_name_defaults_empty() {
        let node: Node = serde_json::from_str(r#"{"tags": ["x"]}"#).unwrap();
        assert_eq!(node.name, "");
        assert_eq!(node.tags, vec!["x"]);
    }

    #[test]
    fn deserialize_item_aliases() {
        let item: ContentItem = serde_json::from_str(
            r#"{"title": "Grid report", "creator": "IEA", "country": "France", "abstract": "Summary"}"#,
        )
        .unwrap();
        assert_eq!(item.author.as_deref(), Some("IEA"));
        assert_eq!(item.location.as_deref(), Some("France"));
        assert_eq!(item.description.as_deref(), Some("Summary"));

        let item: ContentItem = serde_json::from_str(
            r#"{"title": "Wind atlas", "source": "NREL", "region": "Midwest"}"#,
        )
        .unwrap();
        assert_eq!(item.author.as_deref(), Some("NREL"));
        assert_eq!(item.location.as_deref(), Some("Midwest"));
    }

    #[test]
    fn deserialize_content_items_field() {
        let node: Node = serde_json::from_str(
            r#"{"name": "Solar", "contentItems": [{"title": "Rooftop PV", "type": "article"}]}"#,
        )
        .unwrap();
        assert_eq!(node.items.len(), 1);
        assert_eq!(node.items[0].kind.as_deref(), Some("article"));
    }

    #[test]
    fn deserialized_ids_default_to_zero() {
        let node: Node =
            serde_json::from_str(r#"{"name": "X", "children": [{"name": "Y"}]}"#).unwrap();
        assert_eq!(node.id, NodeId(0));
        assert_eq!(node.children[0].id, NodeId(0));
    }
}
