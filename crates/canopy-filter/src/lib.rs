//! Boolean search evaluation and faceted tree filtering.
//!
//! This crate turns a query string and a set of facet selections into a
//! filtered, annotated tree. The pieces compose in a fixed order:
//!
//! 1. **Evaluation**: the parsed query runs against a [`TextIndex`],
//!    producing a [`ResultSet`] with union/intersection/difference
//!    semantics for OR/AND/NOT.
//! 2. **Filtering**: [`filter_tree`] keeps nodes that match or have
//!    matching descendants, so results always form a connected subtree.
//! 3. **Annotation**: [`annotate`] records per node why it survived,
//!    one pass per applied facet.
//!
//! [`FilterPipeline`] wires the three together and is the entry point
//! most callers want. The index backend stays behind the [`TextIndex`]
//! trait; evaluation itself never fails, a broken query or backend
//! reads as "no results".

#![warn(missing_docs)]

mod annotate;
mod eval;
mod facet;
mod index;
mod pipeline;
mod result;
mod tree;

pub use annotate::{AnnotationMap, MatchFlags, annotate};
pub use eval::{evaluate, evaluate_expr, evaluate_expr_with, evaluate_with};
pub use facet::{
    DateRange, FACET_ALL, Facet, FacetSelection, active_value, matches_author, matches_date_range,
    matches_kind, matches_location, matches_tag,
};
pub use index::{Hit, MatchOptions, TextIndex};
pub use pipeline::{Annotations, FilterPipeline, FilteredTree};
pub use result::ResultSet;
pub use tree::{ChildRetention, filter_tree};
