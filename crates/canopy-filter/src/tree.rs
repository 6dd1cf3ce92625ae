//! Structural tree filtering.
//!
//! A node survives when it matches the predicate itself or when any of
//! its children survive, so every match keeps its chain of ancestors
//! and the result is always a connected subtree of the input.

use canopy_model::Node;

/// What happens to a node's children when the node itself matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildRetention {
    /// Keep only children that survive filtering on their own.
    SurvivorsOnly,
    /// A direct match whose children were all filtered away keeps its
    /// original child list unchanged, so a branch found by search stays
    /// explorable below the match.
    ReattachOriginalOnDirectMatch,
}

/// Filters `node` recursively, keeping nodes that match `predicate` or
/// have surviving descendants.
///
/// Returns `None` when neither the node nor anything below it matches.
/// The input tree is never modified; survivors are rebuilt into a new
/// tree, preserving relative child order.
pub fn filter_tree<P>(node: &Node, predicate: &P, retention: ChildRetention) -> Option<Node>
where
    P: Fn(&Node) -> bool + ?Sized,
{
    let is_match = predicate(node);
    let survivors: Vec<Node> = node
        .children
        .iter()
        .filter_map(|child| filter_tree(child, predicate, retention))
        .collect();

    if !is_match && survivors.is_empty() {
        return None;
    }

    let mut kept = node.detached();
    kept.children = if is_match
        && survivors.is_empty()
        && retention == ChildRetention::ReattachOriginalOnDirectMatch
    {
        node.children.clone()
    } else {
        survivors
    };
    Some(kept)
}
