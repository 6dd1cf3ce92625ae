//! Boolean query parsing for canopy search.
//!
//! This crate provides the query language users type into the search
//! box:
//!
//! - **Terms**: `solar energy` - adjacent words form one query in which
//!   every word must match
//! - **Phrases**: `"heat pump"` - exact sequences
//! - **OR**: `solar OR wind` - alternatives (lowest precedence)
//! - **AND**: `solar AND storage` - both sides must match
//! - **NOT**: `energy NOT nuclear` - exclusion; a leading `NOT nuclear`
//!   excludes from the whole corpus
//!
//! Keywords are case-insensitive. There is no grouping syntax; the
//! fixed precedence (OR, then AND, then NOT) is the whole story.
//!
//! # Example
//!
//! ```
//! use canopy_query::parse;
//!
//! let expr = parse("solar energy OR wind NOT offshore").unwrap();
//! assert!(expr.is_some());
//! ```

#![warn(missing_docs)]

mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::{QueryExpr, TermExpr};
pub use error::ParseError;
pub use lexer::{Token, tokenize};
pub use parser::parse;
