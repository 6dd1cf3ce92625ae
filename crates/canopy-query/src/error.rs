//! Error type for query parsing.
//!
//! Lexing is tolerant (an unclosed quote simply runs to the end of the
//! input), so the only failure surface is the parser. Parse errors carry
//! the byte position of the offending token so callers can render a
//! caret pointer under the original query.

use std::{error::Error, fmt};

/// Parse error with position information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Error message.
    pub message: String,
    /// Byte position in the query where the error occurred, if known.
    pub position: Option<usize>,
    /// The original query string.
    pub query: String,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(message: impl Into<String>, position: Option<usize>, query: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position,
            query: query.into(),
        }
    }

    /// Formats the error with a position indicator showing where the error occurred.
    pub fn format_with_context(&self) -> String {
        let mut result = String::new();
        result.push_str(&format!("query syntax error: {}\n", self.message));
        result.push_str(&format!("  {}\n", self.query));
        if let Some(pos) = self.position {
            let clamped = pos.min(self.query.len());
            result.push_str(&format!("  {}^", " ".repeat(clamped)));
        }
        result
    }

    /// Returns a suggestion for common errors.
    pub fn suggestion(&self) -> Option<&'static str> {
        if self.message.contains("AND") {
            Some("AND requires terms on both sides, e.g., 'solar AND storage'")
        } else if self.message.contains("OR") {
            Some("OR requires terms on both sides, e.g., 'solar OR wind'")
        } else if self.message.contains("NOT") || self.message.contains("single term") {
            Some("NOT excludes one term from what precedes it, e.g., 'energy NOT nuclear'")
        } else {
            None
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_context())?;
        if let Some(suggestion) = self.suggestion() {
            write!(f, "\nhint: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_caret_at_position() {
        let err = ParseError::new("unexpected OR (needs a term before it)", Some(0), "OR wind");
        let display = err.to_string();
        assert!(display.contains("unexpected OR"));
        assert!(display.contains("OR wind"));
        assert!(display.contains("^"));
        assert!(display.contains("hint:"));
    }

    #[test]
    fn display_without_position_omits_caret() {
        let err = ParseError::new("unexpected end of query", None, "solar AND");
        let display = err.to_string();
        assert!(display.contains("unexpected end of query"));
        assert!(!display.contains("^"));
    }

    #[test]
    fn caret_position_is_clamped() {
        let err = ParseError::new("unexpected end of query", Some(100), "ab");
        let context = err.format_with_context();
        assert!(context.ends_with("  ab\n    ^"));
    }

    #[test]
    fn not_errors_get_a_hint() {
        let err = ParseError::new("expected a term after NOT", Some(4), "NOT");
        assert!(err.suggestion().unwrap().contains("NOT excludes"));
    }

    #[test]
    fn unrelated_errors_get_no_hint() {
        let err = ParseError::new("something else entirely", None, "q");
        assert!(err.suggestion().is_none());
    }
}
