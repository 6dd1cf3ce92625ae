//! Query abstract syntax tree.
//!
//! Represents parsed boolean queries before evaluation against a text index.

use std::fmt;

/// A single index query: one or more words matched together.
///
/// A term is the atomic unit of the query language. Multi-word terms
/// (`solar energy`) require every word to match; quoted terms
/// (`"heat pump"`) additionally require the words to appear as an
/// exact phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermExpr {
    /// The term text, whitespace-collapsed, with no surrounding quotes.
    pub text: String,
    /// True when the term was quoted and must match as an exact phrase.
    pub phrase: bool,
}

impl TermExpr {
    /// Creates an unquoted (loose-match) term.
    pub fn word(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            phrase: false,
        }
    }

    /// Creates a quoted (exact-phrase) term.
    pub fn quoted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            phrase: true,
        }
    }

    /// Returns true if the term has no searchable text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl fmt::Display for TermExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.phrase {
            write!(f, "\"{}\"", self.text)
        } else {
            write!(f, "{}", self.text)
        }
    }
}

/// A parsed query expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryExpr {
    /// A single term, possibly multi-word, possibly an exact phrase.
    Term(TermExpr),

    /// Conjunction: every sub-expression must match.
    And(Vec<Self>),

    /// Disjunction: at least one sub-expression must match.
    Or(Vec<Self>),

    /// Exclusion: matches of `exclude` are removed from `include`,
    /// or from the whole corpus when `include` is absent.
    Not {
        /// The expression to start from; `None` means "everything".
        include: Option<Box<Self>>,
        /// The single term whose matches are removed.
        exclude: TermExpr,
    },
}

impl QueryExpr {
    /// Creates an And expression, flattening nested Ands.
    pub fn and(exprs: Vec<Self>) -> Self {
        let flattened: Vec<Self> = exprs
            .into_iter()
            .flat_map(|e| match e {
                Self::And(inner) => inner,
                other => vec![other],
            })
            .collect();

        match flattened.len() {
            0 => Self::And(vec![]),
            1 => flattened.into_iter().next().unwrap(),
            _ => Self::And(flattened),
        }
    }

    /// Creates an Or expression, flattening nested Ors.
    pub fn or(exprs: Vec<Self>) -> Self {
        let flattened: Vec<Self> = exprs
            .into_iter()
            .flat_map(|e| match e {
                Self::Or(inner) => inner,
                other => vec![other],
            })
            .collect();

        match flattened.len() {
            0 => Self::Or(vec![]),
            1 => flattened.into_iter().next().unwrap(),
            _ => Self::Or(flattened),
        }
    }

    /// Formats the expression as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::Term(term) => {
                if term.phrase {
                    writeln!(f, "{prefix}Phrase({:?})", term.text)
                } else {
                    writeln!(f, "{prefix}Term({:?})", term.text)
                }
            }
            Self::And(exprs) => {
                writeln!(f, "{prefix}And")?;
                for expr in exprs {
                    expr.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            Self::Or(exprs) => {
                writeln!(f, "{prefix}Or")?;
                for expr in exprs {
                    expr.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            Self::Not { include, exclude } => {
                writeln!(f, "{prefix}Not")?;
                if let Some(inner) = include {
                    writeln!(f, "{prefix}  include:")?;
                    inner.fmt_tree(f, indent + 2)?;
                }
                writeln!(f, "{prefix}  exclude:")?;
                if exclude.phrase {
                    writeln!(f, "{prefix}    Phrase({:?})", exclude.text)
                } else {
                    writeln!(f, "{prefix}    Term({:?})", exclude.text)
                }
            }
        }
    }

    /// Formats the expression as a query string (human-readable form).
    ///
    /// This produces output like: `solar OR "heat pump" NOT rooftop`
    pub fn to_query_string(&self) -> String {
        match self {
            Self::Term(term) => term.to_string(),
            Self::And(exprs) => {
                let parts: Vec<String> = exprs.iter().map(Self::to_query_string).collect();
                parts.join(" AND ")
            }
            Self::Or(exprs) => {
                let parts: Vec<String> = exprs.iter().map(Self::to_query_string).collect();
                parts.join(" OR ")
            }
            Self::Not { include, exclude } => match include {
                Some(inner) => format!("{} NOT {}", inner.to_query_string(), exclude),
                None => format!("NOT {}", exclude),
            },
        }
    }
}

impl fmt::Display for QueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}
