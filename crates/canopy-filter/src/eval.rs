//! Boolean query evaluation against a text index.
//!
//! Evaluation walks the parsed query bottom-up: each term becomes a
//! [`ResultSet`], OR unions keeping the higher score, AND intersects,
//! and NOT subtracts either from its include side or from the whole
//! corpus. Nothing in this module returns an error: queries that fail
//! to parse evaluate to the empty set, matching how an interactive
//! filter should behave while a query is being typed.
//!
//! Bare terms match with [`MatchOptions::loose`] by default; the
//! `_with` variants accept different options, which is how configured
//! fuzzy distance and prefix settings reach the index. Quoted phrases
//! always match exactly.

use canopy_query::{QueryExpr, TermExpr, parse};

use crate::{
    index::{MatchOptions, TextIndex},
    result::ResultSet,
};

/// Parses and evaluates `input` against `index`.
///
/// A blank or unparsable query yields an empty set.
pub fn evaluate<I: TextIndex + ?Sized>(input: &str, index: &I) -> ResultSet {
    evaluate_with(input, index, MatchOptions::default())
}

/// Parses and evaluates `input`, matching bare terms with
/// `term_options`.
pub fn evaluate_with<I: TextIndex + ?Sized>(
    input: &str,
    index: &I,
    term_options: MatchOptions,
) -> ResultSet {
    match parse(input) {
        Ok(Some(expr)) => evaluate_expr_with(&expr, index, term_options),
        Ok(None) | Err(_) => ResultSet::new(),
    }
}

/// Evaluates an already-parsed query tree against `index`.
pub fn evaluate_expr<I: TextIndex + ?Sized>(expr: &QueryExpr, index: &I) -> ResultSet {
    evaluate_expr_with(expr, index, MatchOptions::default())
}

/// Evaluates an already-parsed query tree, matching bare terms with
/// `term_options`.
pub fn evaluate_expr_with<I: TextIndex + ?Sized>(
    expr: &QueryExpr,
    index: &I,
    term_options: MatchOptions,
) -> ResultSet {
    match expr {
        QueryExpr::Term(term) => evaluate_term(term, index, term_options),
        QueryExpr::Or(parts) => parts
            .iter()
            .map(|part| evaluate_expr_with(part, index, term_options))
            .fold(ResultSet::new(), ResultSet::union_max),
        QueryExpr::And(parts) => evaluate_and(parts, index, term_options),
        QueryExpr::Not { include, exclude } => {
            evaluate_not(include.as_deref(), exclude, index, term_options)
        }
    }
}

/// Intersects the result sets of all AND operands.
///
/// Stops querying the index as soon as the running intersection is
/// empty, since no later operand can bring documents back.
fn evaluate_and<I: TextIndex + ?Sized>(
    parts: &[QueryExpr],
    index: &I,
    term_options: MatchOptions,
) -> ResultSet {
    let mut operands = parts.iter();
    let Some(first) = operands.next() else {
        return ResultSet::new();
    };
    let mut set = evaluate_expr_with(first, index, term_options);
    for part in operands {
        if set.is_empty() {
            break;
        }
        set = set.intersect(&evaluate_expr_with(part, index, term_options));
    }
    set
}

/// Subtracts the excluded term from the include side, or from the whole
/// corpus when the query starts with NOT.
fn evaluate_not<I: TextIndex + ?Sized>(
    include: Option<&QueryExpr>,
    exclude: &TermExpr,
    index: &I,
    term_options: MatchOptions,
) -> ResultSet {
    let base = match include {
        Some(inner) => evaluate_expr_with(inner, index, term_options),
        None => index.all_documents().into_iter().collect(),
    };
    if base.is_empty() {
        return base;
    }
    base.subtract(&evaluate_term(exclude, index, term_options))
}

/// Queries the index for a single term.
fn evaluate_term<I: TextIndex + ?Sized>(
    term: &TermExpr,
    index: &I,
    term_options: MatchOptions,
) -> ResultSet {
    if term.is_empty() {
        return ResultSet::new();
    }
    let options = if term.phrase {
        MatchOptions::exact_phrase()
    } else {
        term_options
    };
    index.search(&term.text, options).into_iter().collect()
}
