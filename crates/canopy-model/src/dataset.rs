//! Dataset loading.
//!
//! A dataset is a single JSON document whose top level is the root
//! [`Node`] of the category tree. Loading parses the JSON, rejects
//! trees with nothing in them, and assigns stable pre-order ids before
//! anything else can observe the tree.

use std::{collections::BTreeMap, fs, path::Path};

use thiserror::Error;

use crate::node::{ContentItem, Node};

/// Errors raised while loading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset JSON could not be parsed.
    #[error("failed to parse dataset JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The dataset parsed but contains nothing to browse.
    #[error("dataset contains no usable nodes")]
    EmptyTree,
}

/// A loaded dataset: the root node plus derived lookups.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// The root of the category tree, with ids assigned.
    root: Node,
}

impl Dataset {
    /// Wraps an already-built tree, assigning pre-order ids.
    ///
    /// Returns [`DatasetError::EmptyTree`] when the root carries no
    /// name, no items, and no children.
    pub fn new(mut root: Node) -> Result<Self, DatasetError> {
        if root.name.trim().is_empty() && root.items.is_empty() && root.children.is_empty() {
            return Err(DatasetError::EmptyTree);
        }
        root.assign_ids();
        Ok(Self { root })
    }

    /// Parses a dataset from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let root: Node = serde_json::from_str(json)?;
        Self::new(root)
    }

    /// Reads and parses a dataset from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, DatasetError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Returns the root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Consumes the dataset, returning the root node.
    pub fn into_root(self) -> Node {
        self.root
    }

    /// Returns the total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Returns the total number of content items across all nodes.
    pub fn item_count(&self) -> usize {
        self.root.iter_preorder().map(|n| n.items.len()).sum()
    }

    /// Returns the depth of the deepest node (root is depth 0).
    pub fn max_depth(&self) -> usize {
        self.root.max_depth()
    }

    /// Returns every distinct node type with the number of nodes
    /// carrying it, sorted by type.
    pub fn kinds(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for node in self.root.iter_preorder() {
            if let Some(kind) = &node.kind {
                *counts.entry(kind.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Returns every distinct tag (node tags and item tags) with its
    /// occurrence count, sorted by tag.
    pub fn tags(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for node in self.root.iter_preorder() {
            for tag in &node.tags {
                *counts.entry(tag.clone()).or_insert(0) += 1;
            }
            for item in &node.items {
                for tag in &item.tags {
                    *counts.entry(tag.clone()).or_insert(0) += 1;
                }
            }
        }
        counts
    }

    /// Returns every distinct content item author with its item count,
    /// sorted by author.
    pub fn authors(&self) -> BTreeMap<String, usize> {
        self.item_field_counts(|item| item.author.as_deref())
    }

    /// Returns every distinct content item location with its item
    /// count, sorted by location.
    pub fn locations(&self) -> BTreeMap<String, usize> {
        self.item_field_counts(|item| item.location.as_deref())
    }

    /// Counts distinct values of one optional item field.
    fn item_field_counts(
        &self,
        field: impl Fn(&ContentItem) -> Option<&str>,
    ) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for node in self.root.iter_preorder() {
            for item in &node.items {
                if let Some(value) = field(item) {
                    *counts.entry(value.to_string()).or_insert(0) += 1;
                }
            }
        }
        counts
    }
}
