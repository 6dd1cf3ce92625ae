//! The search backend contract used by query evaluation.

use canopy_model::NodeId;

/// How a single term should be matched against the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Treat each token as a prefix so partially typed words still match.
    pub prefix: bool,
    /// Maximum edit distance tolerated per token.
    pub fuzzy: u8,
    /// Require tokens to appear adjacent and in order.
    pub phrase: bool,
}

impl MatchOptions {
    /// Forgiving matching for bare terms: prefixes allowed, one edit
    /// tolerated.
    pub fn loose() -> Self {
        Self {
            prefix: true,
            fuzzy: 1,
            phrase: false,
        }
    }

    /// Exact adjacency matching for quoted phrases.
    pub fn exact_phrase() -> Self {
        Self {
            prefix: false,
            fuzzy: 0,
            phrase: true,
        }
    }
}

impl Default for MatchOptions {
    /// Defaults to [`MatchOptions::loose`], the bare-term behavior.
    fn default() -> Self {
        Self::loose()
    }
}

/// A single scored match returned by the index.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// Identifier of the node the matched document was extracted from.
    pub id: NodeId,
    /// Display name of the node.
    pub name: String,
    /// Relevance score, higher is better.
    pub score: f32,
}

impl Hit {
    /// Creates a hit.
    pub fn new(id: NodeId, name: impl Into<String>, score: f32) -> Self {
        Self {
            id,
            name: name.into(),
            score,
        }
    }
}

/// Search backend used by the boolean evaluator.
///
/// Implementations never surface errors through this trait: a backend
/// failure is reported as an empty hit list, so a broken index reads as
/// "no results" rather than aborting evaluation.
pub trait TextIndex {
    /// Returns documents matching `term` under the given options, with
    /// all tokens of a multi-word term required to match.
    fn search(&self, term: &str, options: MatchOptions) -> Vec<Hit>;

    /// Returns every indexed document with a neutral score, ordered by
    /// id.
    fn all_documents(&self) -> Vec<Hit>;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn loose_options_allow_prefix_and_one_edit() {
        let options = MatchOptions::loose();
        assert!(options.prefix);
        assert_eq!(options.fuzzy, 1);
        assert!(!options.phrase);
    }

    #[test]
    fn phrase_options_are_exact() {
        let options = MatchOptions::exact_phrase();
        assert!(!options.prefix);
        assert_eq!(options.fuzzy, 0);
        assert!(options.phrase);
    }
}
