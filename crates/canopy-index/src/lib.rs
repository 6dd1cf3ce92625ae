//! Tantivy-based search index for canopy.
//!
//! This crate builds an in-memory full-text index over the documents
//! extracted from a canopy dataset and implements the
//! [`canopy_filter::TextIndex`] seam on top of it:
//! - Loose term lookups expand by prefix and edit distance
//! - Quoted phrases match the exact token sequence
//! - Every word of a multi-word term must match
//! - Index failures surface as empty hit lists through the trait
//!
//! # Example
//!
//! ```no_run
//! use canopy_filter::{MatchOptions, TextIndex};
//! use canopy_index::SearchIndex;
//! use canopy_model::{Node, extract};
//!
//! let mut root = Node::named("Root");
//! root.children.push(Node::named("Solar"));
//! root.assign_ids();
//!
//! let index = SearchIndex::build(&extract(&root)).unwrap();
//! let hits = index.search("solar", MatchOptions::loose());
//! assert_eq!(hits[0].name, "Solar");
//! ```

#![warn(missing_docs)]

mod analyzer;
mod error;
mod schema;
mod search;

pub use analyzer::{CANOPY_TOKENIZER, build_analyzer};
pub use error::IndexError;
pub use schema::{IndexSchema, boost};
pub use search::SearchIndex;
