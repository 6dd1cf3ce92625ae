//! In-memory search index over extracted documents.
//!
//! [`SearchIndex::build`] indexes a document set in RAM and serves the
//! term lookups behind the [`TextIndex`] trait. Loose matching expands
//! each token by prefix and edit distance, phrase matching requires the
//! exact token sequence, and every token of a multi-word term must
//! match somewhere in the document.

use canopy_filter::{Hit, MatchOptions, TextIndex};
use canopy_model::{Document, NodeId};
use tantivy::{
    Index, IndexWriter, TantivyDocument, Term,
    collector::TopDocs,
    query::{
        AllQuery, BooleanQuery, BoostQuery, FuzzyTermQuery, Occur, PhraseQuery, Query, TermQuery,
    },
    schema::{Field, IndexRecordOption, Value},
    tokenizer::{TextAnalyzer, TokenStream},
};

use crate::{
    analyzer::{CANOPY_TOKENIZER, build_analyzer},
    error::IndexError,
    schema::{IndexSchema, boost},
};

/// Default heap size for the index writer (50 MB).
const DEFAULT_HEAP_SIZE: usize = 50_000_000;

/// Upper bound on hits collected per query, sized well past any
/// realistic dataset so result sets are complete rather than paged.
const MAX_HITS: usize = 100_000;

/// An in-memory full-text index over a set of extracted documents.
///
/// The index is built once from the whole document set and queried one
/// term at a time; boolean structure lives in the caller.
pub struct SearchIndex {
    /// The Tantivy index.
    index: Index,
    /// Schema with field handles.
    schema: IndexSchema,
    /// Text analyzer for tokenizing query input.
    analyzer: TextAnalyzer,
}

impl SearchIndex {
    /// Builds an in-memory index over the given documents.
    pub fn build(documents: &[Document]) -> Result<Self, IndexError> {
        let schema = IndexSchema::new();
        let index = Index::create_in_ram(schema.schema().clone());

        let analyzer = build_analyzer();
        index.tokenizers().register(CANOPY_TOKENIZER, analyzer.clone());

        let mut writer: IndexWriter = index
            .writer(DEFAULT_HEAP_SIZE)
            .map_err(|e| IndexError::create(&e))?;
        for document in documents {
            writer
                .add_document(to_tantivy(&schema, document))
                .map_err(|e| IndexError::write(&e))?;
        }
        writer.commit().map_err(|e| IndexError::commit(&e))?;

        Ok(Self {
            index,
            schema,
            analyzer,
        })
    }

    /// Runs a single term query, returning scored hits.
    ///
    /// Terms that tokenize to nothing return no hits. The hit order is
    /// Tantivy's descending score order.
    pub fn query_hits(&self, term: &str, options: MatchOptions) -> Result<Vec<Hit>, IndexError> {
        let Some(query) = self.build_query(term, options) else {
            return Ok(Vec::new());
        };
        self.collect_hits(query.as_ref())
    }

    /// Lists every indexed document with a neutral score, ordered by id.
    pub fn list_all(&self) -> Result<Vec<Hit>, IndexError> {
        let reader = self.index.reader().map_err(|e| IndexError::search(&e))?;
        let searcher = reader.searcher();
        let top_docs = searcher
            .search(&AllQuery, &TopDocs::with_limit(MAX_HITS))
            .map_err(|e| IndexError::search(&e))?;

        let mut hits: Vec<Hit> = top_docs
            .into_iter()
            .filter_map(|(_, address)| {
                let doc: TantivyDocument = searcher.doc(address).ok()?;
                self.read_hit(&doc, 1.0)
            })
            .collect();
        hits.sort_by_key(|hit| hit.id);
        Ok(hits)
    }

    /// Number of documents in the index.
    pub fn num_docs(&self) -> Result<u64, IndexError> {
        let reader = self.index.reader().map_err(|e| IndexError::search(&e))?;
        Ok(reader.searcher().num_docs())
    }

    /// Compiles a term into a Tantivy query.
    ///
    /// Returns `None` when tokenization leaves nothing to search for.
    fn build_query(&self, term: &str, options: MatchOptions) -> Option<Box<dyn Query>> {
        let mut analyzer = self.analyzer.clone();
        let tokens = tokenize(&mut analyzer, term);
        if tokens.is_empty() {
            return None;
        }

        if options.phrase {
            return Some(self.build_phrase_query(&tokens));
        }

        let clauses: Vec<(Occur, Box<dyn Query>)> = tokens
            .iter()
            .map(|token| (Occur::Must, self.build_token_query(token, options)))
            .collect();
        Some(Box::new(BooleanQuery::new(clauses)))
    }

    /// Builds the boosted multi-field query for a single token.
    ///
    /// Each searchable field contributes one clause, any of which may
    /// match.
    fn build_token_query(&self, token: &str, options: MatchOptions) -> Box<dyn Query> {
        let clauses: Vec<(Occur, Box<dyn Query>)> = fields_with_boosts(&self.schema)
            .into_iter()
            .map(|(field, boost_value)| {
                let term = Term::from_field_text(field, token);
                let term_query: Box<dyn Query> = if options.prefix {
                    Box::new(FuzzyTermQuery::new_prefix(term, options.fuzzy, true))
                } else if options.fuzzy > 0 {
                    Box::new(FuzzyTermQuery::new(term, options.fuzzy, true))
                } else {
                    Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs))
                };
                let boosted: Box<dyn Query> = Box::new(BoostQuery::new(term_query, boost_value));
                (Occur::Should, boosted)
            })
            .collect();
        Box::new(BooleanQuery::new(clauses))
    }

    /// Builds the boosted multi-field phrase query for a token sequence.
    ///
    /// A single token falls back to exact term matching, since a phrase
    /// needs at least two positions.
    fn build_phrase_query(&self, tokens: &[String]) -> Box<dyn Query> {
        if let [token] = tokens {
            return self.build_token_query(token, MatchOptions::exact_phrase());
        }

        let clauses: Vec<(Occur, Box<dyn Query>)> = fields_with_boosts(&self.schema)
            .into_iter()
            .map(|(field, boost_value)| {
                let terms: Vec<Term> = tokens
                    .iter()
                    .map(|t| Term::from_field_text(field, t))
                    .collect();
                let phrase: Box<dyn Query> = Box::new(PhraseQuery::new(terms));
                let boosted: Box<dyn Query> = Box::new(BoostQuery::new(phrase, boost_value));
                (Occur::Should, boosted)
            })
            .collect();
        Box::new(BooleanQuery::new(clauses))
    }

    /// Executes a query and maps stored fields back into hits.
    fn collect_hits(&self, query: &dyn Query) -> Result<Vec<Hit>, IndexError> {
        let reader = self.index.reader().map_err(|e| IndexError::search(&e))?;
        let searcher = reader.searcher();
        let top_docs = searcher
            .search(query, &TopDocs::with_limit(MAX_HITS))
            .map_err(|e| IndexError::search(&e))?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let doc: TantivyDocument = searcher.doc(address).map_err(|e| IndexError::search(&e))?;
            if let Some(hit) = self.read_hit(&doc, score) {
                hits.push(hit);
            }
        }
        Ok(hits)
    }

    /// Reads the stored id and name fields of a matched document.
    ///
    /// Documents with a malformed stored id are skipped.
    fn read_hit(&self, doc: &TantivyDocument, score: f32) -> Option<Hit> {
        let id: u32 = doc
            .get_first(self.schema.id)
            .and_then(|value| value.as_str())
            .and_then(|raw| raw.parse().ok())?;
        let name = doc
            .get_first(self.schema.name)
            .and_then(|value| value.as_str())
            .unwrap_or("")
            .to_string();
        Some(Hit::new(NodeId(id), name, score))
    }
}

impl TextIndex for SearchIndex {
    fn search(&self, term: &str, options: MatchOptions) -> Vec<Hit> {
        self.query_hits(term, options).unwrap_or_default()
    }

    fn all_documents(&self) -> Vec<Hit> {
        self.list_all().unwrap_or_default()
    }
}

/// Converts an extracted document into a Tantivy document.
fn to_tantivy(schema: &IndexSchema, document: &Document) -> TantivyDocument {
    let mut doc = TantivyDocument::new();
    doc.add_text(schema.id, document.id.to_string());
    doc.add_text(schema.name, &document.name);
    // Tags become a single concatenated string; each tag is tokenized
    doc.add_text(schema.tags, document.tags.join(" "));
    doc.add_text(schema.path, &document.path);
    if let Some(kind) = &document.kind {
        doc.add_text(schema.kind, kind);
    }
    doc.add_text(schema.text, &document.text);
    doc
}

/// Searchable fields paired with their boost weights.
fn fields_with_boosts(schema: &IndexSchema) -> [(Field, f32); 5] {
    [
        (schema.name, boost::NAME),
        (schema.tags, boost::TAGS),
        (schema.path, boost::PATH),
        (schema.kind, boost::KIND),
        (schema.text, boost::TEXT),
    ]
}

/// Tokenizes text using the index analyzer.
fn tokenize(analyzer: &mut TextAnalyzer, text: &str) -> Vec<String> {
    let mut stream = analyzer.token_stream(text);
    let mut tokens = Vec::new();
    while let Some(token) = stream.next() {
        tokens.push(token.text.clone());
    }
    tokens
}
