//! Match annotation for filtered trees.
//!
//! Filtering decides which nodes survive; annotation records why. The
//! flags live in a map keyed by node id rather than on the nodes
//! themselves, so one tree can carry independent annotations for
//! several facets at once.

use std::collections::HashMap;

use canopy_model::{Node, NodeId};

/// Match state recorded for one node under one facet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchFlags {
    /// Node satisfied the predicate, or sits on the path to a node
    /// that did.
    pub is_match: bool,
    /// At least one strict descendant satisfied the predicate.
    pub has_matched_descendants: bool,
}

/// Per-node match flags produced by one annotation pass.
pub type AnnotationMap = HashMap<NodeId, MatchFlags>;

/// Walks `node` and records, for every node in the subtree, whether it
/// matched `predicate` and whether anything below it did.
///
/// Ancestors of a match are flagged as matches themselves, so a branch
/// kept only for its descendants still reads as relevant at every
/// level.
pub fn annotate<P>(node: &Node, predicate: &P) -> AnnotationMap
where
    P: Fn(&Node) -> bool + ?Sized,
{
    let mut map = AnnotationMap::new();
    annotate_node(node, predicate, &mut map);
    map
}

/// Recursive worker; returns whether this subtree contains a match.
fn annotate_node<P>(node: &Node, predicate: &P, map: &mut AnnotationMap) -> bool
where
    P: Fn(&Node) -> bool + ?Sized,
{
    let direct = predicate(node);
    let mut below = false;
    for child in &node.children {
        if annotate_node(child, predicate, map) {
            below = true;
        }
    }
    map.insert(
        node.id,
        MatchFlags {
            is_match: direct || below,
            has_matched_descendants: below,
        },
    );
    direct || below
}
