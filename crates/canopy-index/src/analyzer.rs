//! Text analysis pipeline for the canopy search index.
//!
//! Implements a three-stage text analysis pipeline:
//! 1. `SimpleTokenizer` - splits on whitespace and punctuation
//! 2. `LowerCaser` - converts tokens to lowercase
//! 3. `RemoveLongFilter` - removes tokens longer than 40 bytes
//!
//! There is no stemming stage: terms are matched with prefix and fuzzy
//! expansion at query time, and phrase queries match the literal token
//! sequence.

use tantivy::tokenizer::{LowerCaser, RemoveLongFilter, SimpleTokenizer, TextAnalyzer};

/// Name of the custom tokenizer registered with Tantivy.
pub const CANOPY_TOKENIZER: &str = "canopy_text";

/// Maximum token length in bytes before filtering.
const MAX_TOKEN_LENGTH: usize = 40;

/// Builds the canopy text analyzer.
///
/// The pipeline is:
/// 1. `SimpleTokenizer` - splits text on whitespace and punctuation
/// 2. `LowerCaser` - normalizes tokens to lowercase
/// 3. `RemoveLongFilter` - removes tokens > 40 bytes
pub fn build_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
        .build()
}
