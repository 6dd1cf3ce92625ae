//! Deduplicated result sets and the set algebra behind boolean
//! operators.

use std::{cmp::Ordering, collections::HashMap};

use canopy_model::NodeId;

use crate::index::Hit;

/// A set of scored documents, at most one hit per node id.
///
/// When the same document arrives more than once (for example from the
/// two sides of an OR) the higher score wins. Membership tests drive
/// tree filtering; [`Self::into_ranked`] produces the flat display
/// order.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// Best hit seen so far for each document.
    hits: HashMap<NodeId, Hit>,
}

impl ResultSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a hit, keeping the higher score when the document is
    /// already present.
    pub fn insert_max(&mut self, hit: Hit) {
        self.hits
            .entry(hit.id)
            .and_modify(|existing| {
                if hit.score > existing.score {
                    existing.score = hit.score;
                }
            })
            .or_insert(hit);
    }

    /// Union of two sets, keeping the higher score for documents present
    /// in both.
    #[must_use]
    pub fn union_max(mut self, other: Self) -> Self {
        for hit in other.hits.into_values() {
            self.insert_max(hit);
        }
        self
    }

    /// Intersection: keeps documents also present in `other`, with this
    /// set's scores.
    #[must_use]
    pub fn intersect(mut self, other: &Self) -> Self {
        self.hits.retain(|id, _| other.hits.contains_key(id));
        self
    }

    /// Difference: drops documents present in `other`.
    #[must_use]
    pub fn subtract(mut self, other: &Self) -> Self {
        self.hits.retain(|id, _| !other.hits.contains_key(id));
        self
    }

    /// True when `id` is in the set.
    pub fn contains(&self, id: NodeId) -> bool {
        self.hits.contains_key(&id)
    }

    /// Number of documents in the set.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// True when the set holds no documents.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Consumes the set, returning hits sorted by descending score with
    /// id as the tie-break.
    pub fn into_ranked(self) -> Vec<Hit> {
        let mut hits: Vec<Hit> = self.hits.into_values().collect();
        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        hits
    }
}

impl FromIterator<Hit> for ResultSet {
    fn from_iter<T: IntoIterator<Item = Hit>>(iter: T) -> Self {
        let mut set = Self::new();
        for hit in iter {
            set.insert_max(hit);
        }
        set
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn hit(id: u32, score: f32) -> Hit {
        Hit::new(NodeId(id), format!("node-{id}"), score)
    }

    fn set(hits: Vec<Hit>) -> ResultSet {
        hits.into_iter().collect()
    }

    #[test]
    fn duplicate_inserts_keep_higher_score() {
        let set = set(vec![hit(1, 0.5), hit(1, 2.0), hit(1, 1.0)]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.into_ranked()[0].score, 2.0);
    }

    #[test]
    fn union_keeps_higher_score_per_document() {
        let left = set(vec![hit(1, 1.0), hit(2, 3.0)]);
        let right = set(vec![hit(2, 1.0), hit(3, 2.0)]);
        let union = left.union_max(right);
        assert_eq!(union.len(), 3);
        let ranked = union.into_ranked();
        assert_eq!(ranked[0].id, NodeId(2));
        assert_eq!(ranked[0].score, 3.0);
    }

    #[test]
    fn intersect_keeps_left_scores() {
        let left = set(vec![hit(1, 5.0), hit(2, 4.0)]);
        let right = set(vec![hit(2, 0.1), hit(3, 9.0)]);
        let both = left.intersect(&right);
        assert_eq!(both.len(), 1);
        let ranked = both.into_ranked();
        assert_eq!(ranked[0].id, NodeId(2));
        assert_eq!(ranked[0].score, 4.0);
    }

    #[test]
    fn subtract_removes_overlap() {
        let left = set(vec![hit(1, 1.0), hit(2, 1.0), hit(3, 1.0)]);
        let right = set(vec![hit(2, 1.0)]);
        let diff = left.subtract(&right);
        assert_eq!(diff.len(), 2);
        assert!(diff.contains(NodeId(1)));
        assert!(!diff.contains(NodeId(2)));
        assert!(diff.contains(NodeId(3)));
    }

    #[test]
    fn subtract_result_is_disjoint_from_subtrahend() {
        let left = set(vec![hit(1, 1.0), hit(2, 1.0)]);
        let right = set(vec![hit(1, 1.0), hit(3, 1.0)]);
        let diff = left.clone().subtract(&right);
        for h in diff.into_ranked() {
            assert!(!right.contains(h.id));
        }
    }

    #[test]
    fn ranked_sorts_by_score_then_id() {
        let ranked = set(vec![hit(3, 1.0), hit(1, 1.0), hit(2, 5.0)]).into_ranked();
        let ids: Vec<u32> = ranked.iter().map(|h| h.id.0).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn empty_set_behaves() {
        let empty = ResultSet::new();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
        assert!(!empty.contains(NodeId(0)));
        assert!(empty.into_ranked().is_empty());
    }
}
