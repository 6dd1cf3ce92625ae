//! canopy: a faceted browser for hierarchical datasets.
//!
//! canopy loads a JSON dataset describing a tree of categories with
//! attached content items, indexes every named node, and lets users
//! carve the tree down with boolean text queries and facet filters.
//! The result is always a connected subtree: matching nodes, the
//! ancestors needed to reach them, and annotations saying which is
//! which.

#![warn(missing_docs)]

pub mod cli;
