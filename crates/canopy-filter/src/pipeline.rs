//! The filtering pipeline: search first, then facets, then annotation.

use std::collections::BTreeMap;

use canopy_model::Node;

use crate::{
    annotate::{AnnotationMap, annotate},
    eval::evaluate_with,
    facet::{Facet, FacetSelection},
    index::{MatchOptions, TextIndex},
    tree::{ChildRetention, filter_tree},
};

/// Annotation maps keyed by the facet that produced them.
pub type Annotations = BTreeMap<Facet, AnnotationMap>;

/// A surviving tree together with one annotation pass per applied
/// facet.
#[derive(Debug, Clone)]
pub struct FilteredTree {
    /// The filtered tree.
    pub root: Node,
    /// Match annotations over the surviving tree.
    pub annotations: Annotations,
}

/// Chained search and facet filtering over a dataset tree.
///
/// Filters apply in a fixed order: the search query, then each active
/// facet. Every step only removes nodes, so the survivors are exactly
/// the nodes passing the intersection of all active filters, plus the
/// ancestors needed to keep them connected.
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline {
    /// Raw search query. Blank means the search facet is inactive.
    pub query: String,
    /// Selected facet values.
    pub facets: FacetSelection,
    /// How bare query terms are matched. Quoted phrases always match
    /// exactly, whatever is set here.
    pub term_options: MatchOptions,
}

impl FilterPipeline {
    /// Creates a pipeline from a query string and a facet selection.
    pub fn new(query: impl Into<String>, facets: FacetSelection) -> Self {
        Self {
            query: query.into(),
            facets,
            term_options: MatchOptions::default(),
        }
    }

    /// True when neither a search query nor any facet is active.
    pub fn is_inactive(&self) -> bool {
        self.query.trim().is_empty() && self.facets.is_empty()
    }

    /// Runs the pipeline against `root`.
    ///
    /// Returns `None` when filtering eliminates every node. An inactive
    /// pipeline returns the tree unchanged, with no annotations.
    pub fn run<I: TextIndex + ?Sized>(&self, root: &Node, index: &I) -> Option<FilteredTree> {
        let search_results = if self.query.trim().is_empty() {
            None
        } else {
            Some(evaluate_with(&self.query, index, self.term_options))
        };

        // Search goes first and is the only step allowed to reattach
        // pruned children under a direct match.
        let mut current = match &search_results {
            Some(results) => {
                let matched = |node: &Node| results.contains(node.id);
                filter_tree(
                    root,
                    &matched,
                    ChildRetention::ReattachOriginalOnDirectMatch,
                )?
            }
            None => root.clone(),
        };

        for facet in self.facets.active_facets() {
            let matched = |node: &Node| self.facets.node_matches(facet, node);
            current = filter_tree(&current, &matched, ChildRetention::SurvivorsOnly)?;
        }

        let mut annotations = Annotations::new();
        if let Some(results) = &search_results {
            let matched = |node: &Node| results.contains(node.id);
            annotations.insert(Facet::Search, annotate(&current, &matched));
        }
        for facet in self.facets.active_facets() {
            let matched = |node: &Node| self.facets.node_matches(facet, node);
            annotations.insert(facet, annotate(&current, &matched));
        }

        Some(FilteredTree {
            root: current,
            annotations,
        })
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use canopy_model::{ContentItem, NaiveDate, NodeId};

    use super::*;
    use crate::{
        annotate::MatchFlags,
        facet::DateRange,
        index::{Hit, MatchOptions},
    };

    /// Maps exact term text to canned hits.
    struct StubIndex {
        /// Canned hits per term.
        responses: HashMap<String, Vec<Hit>>,
        /// Whole corpus for leading-NOT queries.
        corpus: Vec<Hit>,
    }

    impl StubIndex {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
                corpus: Vec::new(),
            }
        }

        fn with_term(mut self, term: &str, hits: Vec<Hit>) -> Self {
            self.responses.insert(term.to_string(), hits);
            self
        }

        fn with_corpus(mut self, hits: Vec<Hit>) -> Self {
            self.corpus = hits;
            self
        }
    }

    impl TextIndex for StubIndex {
        fn search(&self, term: &str, _options: MatchOptions) -> Vec<Hit> {
            self.responses.get(term).cloned().unwrap_or_default()
        }

        fn all_documents(&self) -> Vec<Hit> {
            self.corpus.clone()
        }
    }

    fn hit(id: u32, score: f32) -> Hit {
        Hit::new(NodeId(id), format!("node-{id}"), score)
    }

    /// Root(0) -> Energy(1) -> {Solar(2), Wind(3)}, with tagged leaves
    /// and one content item each.
    fn sample_tree() -> Node {
        let mut root = Node::named("Root");
        let mut energy = Node::named("Energy");
        energy.kind = Some("category".to_string());
        energy.description = Some("Generation and efficiency".to_string());

        let mut solar = Node::named("Solar");
        solar.kind = Some("sector".to_string());
        solar.tags = vec!["solar".to_string()];
        solar.items.push(ContentItem {
            title: "Rooftop PV methods".to_string(),
            author: Some("IEA".to_string()),
            location: Some("Kenya".to_string()),
            date: Some("2022".to_string()),
            ..ContentItem::default()
        });

        let mut wind = Node::named("Wind");
        wind.kind = Some("sector".to_string());
        wind.tags = vec!["wind".to_string()];
        wind.items.push(ContentItem {
            title: "Offshore siting".to_string(),
            author: Some("IRENA".to_string()),
            location: Some("Denmark".to_string()),
            date: Some("2015-06-01".to_string()),
            ..ContentItem::default()
        });

        energy.children.push(solar);
        energy.children.push(wind);
        root.children.push(energy);
        root.assign_ids();
        root
    }

    /// Index hits consistent with `sample_tree`'s extracted documents.
    fn sample_index() -> StubIndex {
        StubIndex::new()
            .with_term("solar", vec![hit(2, 2.0)])
            .with_term("wind", vec![hit(3, 2.0)])
            .with_term("efficiency", vec![hit(1, 2.0)])
            .with_corpus(vec![hit(0, 1.0), hit(1, 1.0), hit(2, 1.0), hit(3, 1.0)])
    }

    fn names(node: &Node) -> Vec<&str> {
        node.iter_preorder().map(|n| n.name.as_str()).collect()
    }

    fn tag_selection(tag: &str) -> FacetSelection {
        FacetSelection {
            tag: Some(tag.to_string()),
            ..FacetSelection::default()
        }
    }

    #[test]
    fn inactive_pipeline_returns_tree_unchanged() {
        let root = sample_tree();
        let pipeline = FilterPipeline::default();
        assert!(pipeline.is_inactive());
        let filtered = pipeline.run(&root, &sample_index()).unwrap();
        assert_eq!(filtered.root, root);
        assert!(filtered.annotations.is_empty());
    }

    #[test]
    fn pipeline_defaults_to_loose_term_matching() {
        let pipeline = FilterPipeline::new("solar", FacetSelection::default());
        assert_eq!(pipeline.term_options, MatchOptions::loose());
    }

    #[test]
    fn or_query_keeps_both_matching_leaves() {
        let root = sample_tree();
        let pipeline = FilterPipeline::new("solar OR wind", FacetSelection::default());
        let filtered = pipeline.run(&root, &sample_index()).unwrap();
        assert_eq!(names(&filtered.root), vec!["Root", "Energy", "Solar", "Wind"]);
    }

    #[test]
    fn facet_after_search_narrows_to_intersection() {
        let root = sample_tree();
        let pipeline = FilterPipeline::new("solar OR wind", tag_selection("solar"));
        let filtered = pipeline.run(&root, &sample_index()).unwrap();
        assert_eq!(names(&filtered.root), vec!["Root", "Energy", "Solar"]);
    }

    #[test]
    fn contradictory_and_query_yields_no_results() {
        let root = sample_tree();
        let pipeline = FilterPipeline::new("solar AND battery", FacetSelection::default());
        assert!(pipeline.run(&root, &sample_index()).is_none());
    }

    #[test]
    fn negated_query_drops_branch_and_keeps_the_rest() {
        let root = sample_tree();
        let pipeline = FilterPipeline::new("NOT wind", FacetSelection::default());
        let filtered = pipeline.run(&root, &sample_index()).unwrap();
        assert_eq!(names(&filtered.root), vec!["Root", "Energy", "Solar"]);
    }

    #[test]
    fn year_range_facet_matches_year_only_dates() {
        let root = sample_tree();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2022, 12, 31).unwrap(),
        );
        let pipeline = FilterPipeline::new(
            "",
            FacetSelection {
                date: Some(range),
                ..FacetSelection::default()
            },
        );
        // Solar's item is dated "2022", Wind's is from 2015.
        let filtered = pipeline.run(&root, &sample_index()).unwrap();
        assert_eq!(names(&filtered.root), vec!["Root", "Energy", "Solar"]);
    }

    #[test]
    fn direct_search_match_reattaches_its_branch() {
        let root = sample_tree();
        let pipeline = FilterPipeline::new("efficiency", FacetSelection::default());
        let filtered = pipeline.run(&root, &sample_index()).unwrap();

        // Energy matched directly with no matching descendants, so its
        // original children come back untouched.
        assert_eq!(names(&filtered.root), vec!["Root", "Energy", "Solar", "Wind"]);
        assert_eq!(filtered.root.children[0].children, root.children[0].children);

        // Reattached children are visible but not matches.
        let search = &filtered.annotations[&Facet::Search];
        assert_eq!(search[&NodeId(2)], MatchFlags::default());
        assert_eq!(search[&NodeId(3)], MatchFlags::default());
        assert_eq!(
            search[&NodeId(1)],
            MatchFlags {
                is_match: true,
                has_matched_descendants: false
            }
        );
    }

    #[test]
    fn facets_alone_filter_without_a_query() {
        let root = sample_tree();
        let pipeline = FilterPipeline::new("", tag_selection("wind"));
        let filtered = pipeline.run(&root, &sample_index()).unwrap();
        assert_eq!(names(&filtered.root), vec!["Root", "Energy", "Wind"]);
    }

    #[test]
    fn chained_facets_must_all_hold() {
        let root = sample_tree();
        let index = sample_index();

        let pipeline = FilterPipeline::new(
            "",
            FacetSelection {
                tag: Some("solar".to_string()),
                author: Some("IEA".to_string()),
                ..FacetSelection::default()
            },
        );
        let filtered = pipeline.run(&root, &index).unwrap();
        assert_eq!(names(&filtered.root), vec!["Root", "Energy", "Solar"]);

        // Same tag but an author only found under Wind: nothing passes
        // both.
        let pipeline = FilterPipeline::new(
            "",
            FacetSelection {
                tag: Some("solar".to_string()),
                author: Some("IRENA".to_string()),
                ..FacetSelection::default()
            },
        );
        assert!(pipeline.run(&root, &index).is_none());
    }

    #[test]
    fn unmatched_facet_value_yields_no_results() {
        let root = sample_tree();
        let pipeline = FilterPipeline::new("", tag_selection("geothermal"));
        assert!(pipeline.run(&root, &sample_index()).is_none());
    }

    #[test]
    fn annotations_propagate_to_ancestors() {
        let root = sample_tree();
        let pipeline = FilterPipeline::new("", tag_selection("solar"));
        let filtered = pipeline.run(&root, &sample_index()).unwrap();

        let tags = &filtered.annotations[&Facet::Tag];
        assert_eq!(
            tags[&NodeId(2)],
            MatchFlags {
                is_match: true,
                has_matched_descendants: false
            }
        );
        for id in [0, 1] {
            assert_eq!(
                tags[&NodeId(id)],
                MatchFlags {
                    is_match: true,
                    has_matched_descendants: true
                }
            );
        }
    }

    #[test]
    fn one_annotation_pass_per_applied_facet() {
        let root = sample_tree();
        let pipeline = FilterPipeline::new(
            "solar",
            FacetSelection {
                kind: Some("sector".to_string()),
                tag: Some("solar".to_string()),
                ..FacetSelection::default()
            },
        );
        let filtered = pipeline.run(&root, &sample_index()).unwrap();
        let facets: Vec<Facet> = filtered.annotations.keys().copied().collect();
        assert_eq!(facets, vec![Facet::Search, Facet::Kind, Facet::Tag]);
    }

    #[test]
    fn unparsable_query_behaves_as_no_results() {
        let root = sample_tree();
        let pipeline = FilterPipeline::new("AND solar", FacetSelection::default());
        assert!(pipeline.run(&root, &sample_index()).is_none());
    }
}
