//! Dataset model and document extraction for canopy.
//!
//! This crate owns the in-memory shape of a climate-solutions dataset:
//! - The category/topic tree ([`Node`]) with its attached leaf records
//!   ([`ContentItem`])
//! - Stable pre-order [`NodeId`]s assigned at load time
//! - Dataset loading from JSON with alias-tolerant field names
//! - Loose date parsing for content item dates
//! - Flattening the tree into one searchable [`Document`] per node
//!
//! # Example
//!
//! ```
//! use canopy_model::{Dataset, extract};
//!
//! let dataset = Dataset::from_json_str(
//!     r#"{"name": "Root", "children": [{"name": "Solar", "tags": ["solar"]}]}"#,
//! )
//! .unwrap();
//! let documents = extract(dataset.root());
//! assert_eq!(documents.len(), 2);
//! ```

#![warn(missing_docs)]

mod dataset;
mod date;
mod document;
mod node;

pub use chrono::NaiveDate;
pub use dataset::{Dataset, DatasetError};
pub use date::parse_loose_date;
pub use document::{Document, extract};
pub use node::{ContentItem, Node, NodeId, PreorderIter, PreorderIterMut};
