//! Query parser.
//!
//! Parses a token stream into a query AST using recursive descent.
//!
//! # Grammar
//!
//! ```text
//! query    → or_expr
//! or_expr  → and_expr ("OR" and_expr)*
//! and_expr → not_expr ("AND" not_expr)*
//! not_expr → "NOT" term | term ("NOT" term)?
//! term     → (WORD | PHRASE)+
//! ```
//!
//! # Precedence (lowest to highest)
//!
//! 1. OR (explicit keyword)
//! 2. AND (explicit keyword)
//! 3. NOT (binds one term on its right)
//!
//! Adjacent bare words are one multi-word term, not an implicit AND:
//! `solar energy` is a single index query in which every word must
//! match. A lone quoted phrase keeps exact-phrase matching; a phrase
//! mixed into a longer run of words dissolves into the surrounding
//! term. The exclude side of NOT is always a single term, so
//! `a NOT b NOT c` is rejected rather than guessed at.

use std::mem;

use crate::{
    ast::{QueryExpr, TermExpr},
    error::ParseError,
    lexer::{Spanned, Token, scan},
};

/// Recursive descent parser for query expressions.
struct Parser<'a> {
    /// The original input, kept for error reporting.
    input: &'a str,
    /// Token stream to parse.
    tokens: Vec<Spanned>,
    /// Current position in token stream.
    position: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input and its token stream.
    fn new(input: &'a str, tokens: Vec<Spanned>) -> Self {
        Self {
            input,
            tokens,
            position: 0,
        }
    }

    /// Parses the token stream into a query expression.
    fn parse(mut self) -> Result<Option<QueryExpr>, ParseError> {
        if self.tokens.is_empty() {
            return Ok(None);
        }

        let expr = self.parse_or_expr()?;

        if let Some(spanned) = self.tokens.get(self.position) {
            let message = match &spanned.token {
                Token::Not => "NOT exclusion must be a single term".to_string(),
                other => format!("unexpected token: {:?}", other),
            };
            return Err(ParseError::new(message, Some(spanned.start), self.input));
        }

        Ok(Some(expr))
    }

    /// Parses: or_expr → and_expr ("OR" and_expr)*
    fn parse_or_expr(&mut self) -> Result<QueryExpr, ParseError> {
        let mut left = self.parse_and_expr()?;

        while self.check(&Token::Or) {
            self.advance(); // consume OR
            let right = self.parse_and_expr()?;
            left = QueryExpr::or(vec![left, right]);
        }

        Ok(left)
    }

    /// Parses: and_expr → not_expr ("AND" not_expr)*
    fn parse_and_expr(&mut self) -> Result<QueryExpr, ParseError> {
        let mut exprs = Vec::new();

        exprs.push(self.parse_not_expr()?);

        while self.check(&Token::And) {
            self.advance(); // consume AND
            exprs.push(self.parse_not_expr()?);
        }

        Ok(QueryExpr::and(exprs))
    }

    /// Parses: not_expr → "NOT" term | term ("NOT" term)?
    ///
    /// The leading form excludes a term from the whole corpus; the infix
    /// form subtracts the exclude term's matches from the include term's.
    fn parse_not_expr(&mut self) -> Result<QueryExpr, ParseError> {
        if self.check(&Token::Not) {
            self.advance(); // consume NOT
            let exclude = self.parse_term(true)?;
            return Ok(QueryExpr::Not {
                include: None,
                exclude,
            });
        }

        let include = self.parse_term(false)?;

        if self.check(&Token::Not) {
            self.advance(); // consume NOT
            let exclude = self.parse_term(true)?;
            return Ok(QueryExpr::Not {
                include: Some(Box::new(QueryExpr::Term(include))),
                exclude,
            });
        }

        Ok(QueryExpr::Term(include))
    }

    /// Parses a run of adjacent WORD/PHRASE tokens into a single term.
    ///
    /// A lone quoted phrase becomes an exact-phrase term; any other run
    /// joins all words (including the interior of phrases) into one
    /// multi-word term with collapsed whitespace.
    fn parse_term(&mut self, after_not: bool) -> Result<TermExpr, ParseError> {
        let mut pieces: Vec<(String, bool)> = Vec::new();

        while let Some(token) = self.peek() {
            match token {
                Token::Word(word) => {
                    pieces.push((word.clone(), false));
                    self.advance();
                }
                Token::Phrase(content) => {
                    pieces.push((content.clone(), true));
                    self.advance();
                }
                _ => break,
            }
        }

        if pieces.is_empty() {
            return Err(self.missing_term_error(after_not));
        }

        if pieces.len() == 1 && pieces[0].1 {
            let words: Vec<&str> = pieces[0].0.split_whitespace().collect();
            return Ok(TermExpr::quoted(words.join(" ")));
        }

        let mut words: Vec<&str> = Vec::new();
        for (text, _) in &pieces {
            words.extend(text.split_whitespace());
        }
        Ok(TermExpr::word(words.join(" ")))
    }

    /// Builds the error for a missing term at the current position.
    fn missing_term_error(&self, after_not: bool) -> ParseError {
        match self.peek() {
            Some(Token::And) => self.error_at_current("unexpected AND (needs a term before it)"),
            Some(Token::Or) => self.error_at_current("unexpected OR (needs a term before it)"),
            Some(Token::Not) => self.error_at_current("expected a term after NOT"),
            None => {
                let message = if after_not {
                    "expected a term after NOT"
                } else {
                    "unexpected end of query"
                };
                ParseError::new(message, Some(self.input.len()), self.input)
            }
            Some(Token::Word(_)) | Some(Token::Phrase(_)) => {
                unreachable!("term tokens are consumed by the run loop")
            }
        }
    }

    /// Creates an error pointing at the current token.
    fn error_at_current(&self, message: &str) -> ParseError {
        let position = self.tokens.get(self.position).map(|s| s.start);
        ParseError::new(message, position, self.input)
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position).map(|s| &s.token)
    }

    /// Checks if the current token matches the given token.
    fn check(&self, token: &Token) -> bool {
        self.peek()
            .map(|t| mem::discriminant(t) == mem::discriminant(token))
            .unwrap_or(false)
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }
}

/// Parses a query string into an AST.
///
/// Returns `Ok(None)` for empty queries, `Ok(Some(expr))` for valid
/// queries, or `Err(ParseError)` for invalid syntax.
pub fn parse(input: &str) -> Result<Option<QueryExpr>, ParseError> {
    let tokens = scan(input);
    Parser::new(input, tokens).parse()
}
