//! Index schema definition for the canopy search index.
//!
//! Defines the Tantivy schema with all fields needed for document
//! indexing:
//! - `id`: Node id as a decimal string (stored, raw token)
//! - `name`: Node display name (text, stored, boosted 3.0x)
//! - `tags`: Node tags (text, boosted 2.5x)
//! - `path`: Root-to-node breadcrumb (text, boosted 2.0x)
//! - `kind`: Node content type (text, boosted 1.5x)
//! - `text`: Aggregated searchable text (text)

use tantivy::schema::{
    Field, IndexRecordOption, STORED, STRING, Schema, TextFieldIndexing, TextOptions,
};

use crate::analyzer::CANOPY_TOKENIZER;

/// Field boost weights for search ranking.
pub mod boost {
    /// Name field boost (3.0x).
    pub const NAME: f32 = 3.0;
    /// Tags field boost (2.5x).
    pub const TAGS: f32 = 2.5;
    /// Path field boost (2.0x).
    pub const PATH: f32 = 2.0;
    /// Kind field boost (1.5x).
    pub const KIND: f32 = 1.5;
    /// Aggregated text field boost (1.0x).
    pub const TEXT: f32 = 1.0;
}

/// Handles to all fields in the index schema.
#[derive(Debug, Clone)]
pub struct IndexSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Node id as a decimal string.
    pub id: Field,
    /// Node display name.
    pub name: Field,
    /// Node tags.
    pub tags: Field,
    /// Root-to-node breadcrumb.
    pub path: Field,
    /// Node content type.
    pub kind: Field,
    /// Aggregated searchable text.
    pub text: Field,
}

impl IndexSchema {
    /// Creates a new index schema with all fields configured.
    pub fn new() -> Self {
        let mut builder = Schema::builder();

        // ID field: raw single token, stored so hits can be mapped back
        let id = builder.add_text_field("id", STRING | STORED);

        // Name field: text with positions, stored for hit display
        let name_options = tokenized_text_options().set_stored();
        let name = builder.add_text_field("name", name_options);

        // Remaining fields are searchable only, never read back
        let tags = builder.add_text_field("tags", tokenized_text_options());
        let path = builder.add_text_field("path", tokenized_text_options());
        let kind = builder.add_text_field("kind", tokenized_text_options());
        let text = builder.add_text_field("text", tokenized_text_options());

        let schema = builder.build();

        Self {
            schema,
            id,
            name,
            tags,
            path,
            kind,
            text,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Text options shared by all tokenized fields: canopy tokenizer with
/// positions recorded, so phrase queries work.
fn tokenized_text_options() -> TextOptions {
    TextOptions::default().set_indexing_options(
        TextFieldIndexing::default()
            .set_tokenizer(CANOPY_TOKENIZER)
            .set_index_option(IndexRecordOption::WithFreqsAndPositions),
    )
}
