//! Document extraction.
//!
//! The text index works on flat records, not trees, so each node in the
//! dataset is projected into exactly one [`Document`] carrying the
//! node's searchable text: its own name, description, and tags; every
//! attached content item's title, description, author, type, and tags;
//! and the root-to-node breadcrumb, so path terms are searchable too.

use serde::Serialize;

use crate::node::{Node, NodeId};

/// Separator between breadcrumb segments.
const PATH_SEPARATOR: &str = " › ";

/// A flattened, searchable projection of one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// The node's stable id.
    pub id: NodeId,
    /// The node's display name.
    pub name: String,
    /// Root-to-node breadcrumb, segments joined by `›`.
    pub path: String,
    /// Aggregated searchable text for the node and its content items.
    pub text: String,
    /// The node's content type, if any.
    pub kind: Option<String>,
    /// The node's own tags.
    pub tags: Vec<String>,
}

impl Document {
    /// Builds the document for one node given its breadcrumb path.
    fn from_node(node: &Node, path: &str) -> Self {
        Self {
            id: node.id,
            name: node.name.clone(),
            path: path.to_string(),
            text: aggregate_text(node, path),
            kind: node.kind.clone(),
            tags: node.tags.clone(),
        }
    }
}

/// Flattens a tree into one document per node, in pre-order.
///
/// Nodes with a blank name get no document (their subtrees are still
/// descended into), so the result can be shorter than the node count.
pub fn extract(root: &Node) -> Vec<Document> {
    let mut documents = Vec::new();
    // Each stack entry carries the breadcrumb of the node's ancestors.
    let mut stack: Vec<(&Node, String)> = vec![(root, String::new())];

    while let Some((node, parent_path)) = stack.pop() {
        let name = node.name.trim();
        let path = if name.is_empty() {
            parent_path.clone()
        } else if parent_path.is_empty() {
            node.name.clone()
        } else {
            format!("{parent_path}{PATH_SEPARATOR}{}", node.name)
        };

        // Push children in reverse order so leftmost child is processed first
        for child in node.children.iter().rev() {
            stack.push((child, path.clone()));
        }

        if name.is_empty() {
            continue;
        }
        documents.push(Document::from_node(node, &path));
    }

    documents
}

/// Space-joins everything searchable about a node: its own fields, its
/// content items' fields, and the breadcrumb.
fn aggregate_text(node: &Node, path: &str) -> String {
    let mut parts: Vec<&str> = vec![&node.name];

    if let Some(description) = &node.description {
        parts.push(description);
    }
    for tag in &node.tags {
        parts.push(tag);
    }

    for item in &node.items {
        parts.push(&item.title);
        if let Some(description) = &item.description {
            parts.push(description);
        }
        if let Some(author) = &item.author {
            parts.push(author);
        }
        if let Some(kind) = &item.kind {
            parts.push(kind);
        }
        for tag in &item.tags {
            parts.push(tag);
        }
    }

    parts.push(path);
    parts.join(" ")
}
