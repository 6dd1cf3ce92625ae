//! Query lexer (tokenizer).
//!
//! Converts a query string into a stream of tokens for the parser.
//! The keywords `AND`, `OR`, and `NOT` are recognized case-insensitively
//! as standalone words; everything else is a bare word or a quoted
//! phrase. Lexing never fails: an unclosed quote captures everything up
//! to the end of the input as a phrase.

use std::{iter::Peekable, str::Chars};

/// A token in the query language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A bare word (part of a search term).
    Word(String),

    /// A quoted phrase (the quotes are stripped, content preserved).
    Phrase(String),

    /// The AND keyword.
    And,

    /// The OR keyword.
    Or,

    /// The NOT keyword.
    Not,
}

/// A token paired with the byte offset of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    /// The token itself.
    pub token: Token,
    /// Byte offset of the token's first character in the input.
    pub start: usize,
}

/// Tokenizes a query string.
struct Lexer<'a> {
    /// Character iterator with one-character lookahead.
    chars: Peekable<Chars<'a>>,
    /// Current byte position in input.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    /// Tokenizes the entire input.
    fn scan(mut self) -> Vec<Spanned> {
        let mut tokens = Vec::new();

        while let Some(spanned) = self.next_token() {
            tokens.push(spanned);
        }

        tokens
    }

    /// Returns the next token, or None at end of input.
    fn next_token(&mut self) -> Option<Spanned> {
        self.skip_whitespace();

        let start = self.position;
        let &ch = self.chars.peek()?;

        let token = if ch == '"' {
            self.read_phrase()
        } else {
            self.read_word()
        };

        Some(Spanned { token, start })
    }

    /// Reads a quoted phrase. A missing closing quote is tolerated: the
    /// phrase runs to the end of the input.
    fn read_phrase(&mut self) -> Token {
        self.advance(); // consume opening quote

        let mut content = String::new();

        loop {
            match self.chars.peek() {
                Some(&'"') => {
                    self.advance(); // consume closing quote
                    return Token::Phrase(content);
                }
                Some(&ch) => {
                    content.push(ch);
                    self.advance();
                }
                None => return Token::Phrase(content),
            }
        }
    }

    /// Reads a bare word, promoting it to a keyword token when it is
    /// exactly AND, OR, or NOT (any case).
    fn read_word(&mut self) -> Token {
        let mut word = String::new();

        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() || ch == '"' {
                break;
            }
            word.push(ch);
            self.advance();
        }

        if word.eq_ignore_ascii_case("AND") {
            Token::And
        } else if word.eq_ignore_ascii_case("OR") {
            Token::Or
        } else if word.eq_ignore_ascii_case("NOT") {
            Token::Not
        } else {
            Token::Word(word)
        }
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Advances to the next character.
    fn advance(&mut self) {
        if let Some(ch) = self.chars.next() {
            self.position += ch.len_utf8();
        }
    }
}

/// Tokenizes a query string with byte offsets, for the parser.
pub fn scan(input: &str) -> Vec<Spanned> {
    Lexer::new(input).scan()
}

/// Convenience function to tokenize a query string.
pub fn tokenize(input: &str) -> Vec<Token> {
    scan(input).into_iter().map(|s| s.token).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(tokenize(""), vec![]);
    }

    #[test]
    fn whitespace_only() {
        assert_eq!(tokenize("   "), vec![]);
    }

    #[test]
    fn single_word() {
        assert_eq!(tokenize("solar"), vec![Token::Word("solar".into())]);
    }

    #[test]
    fn multiple_words() {
        assert_eq!(
            tokenize("solar energy"),
            vec![Token::Word("solar".into()), Token::Word("energy".into())]
        );
    }

    #[test]
    fn quoted_phrase() {
        assert_eq!(
            tokenize("\"heat pump\""),
            vec![Token::Phrase("heat pump".into())]
        );
    }

    #[test]
    fn unclosed_quote_runs_to_end() {
        assert_eq!(
            tokenize("\"heat pump"),
            vec![Token::Phrase("heat pump".into())]
        );
    }

    #[test]
    fn keywords() {
        assert_eq!(
            tokenize("solar AND wind OR hydro NOT coal"),
            vec![
                Token::Word("solar".into()),
                Token::And,
                Token::Word("wind".into()),
                Token::Or,
                Token::Word("hydro".into()),
                Token::Not,
                Token::Word("coal".into()),
            ]
        );
    }

    #[test]
    fn keywords_case_insensitive() {
        assert_eq!(
            tokenize("a and b Or c nOt d"),
            vec![
                Token::Word("a".into()),
                Token::And,
                Token::Word("b".into()),
                Token::Or,
                Token::Word("c".into()),
                Token::Not,
                Token::Word("d".into()),
            ]
        );
    }

    #[test]
    fn embedded_keywords_stay_words() {
        assert_eq!(
            tokenize("android nothing oregon"),
            vec![
                Token::Word("android".into()),
                Token::Word("nothing".into()),
                Token::Word("oregon".into()),
            ]
        );
    }

    #[test]
    fn keyword_inside_phrase_is_literal() {
        assert_eq!(
            tokenize("\"solar AND wind\""),
            vec![Token::Phrase("solar AND wind".into())]
        );
    }

    #[test]
    fn punctuation_stays_in_word() {
        assert_eq!(tokenize("(solar)"), vec![Token::Word("(solar)".into())]);
    }

    #[test]
    fn extra_whitespace() {
        assert_eq!(
            tokenize("  solar   wind  "),
            vec![Token::Word("solar".into()), Token::Word("wind".into())]
        );
    }

    #[test]
    fn empty_phrase() {
        assert_eq!(tokenize("\"\""), vec![Token::Phrase(String::new())]);
    }

    #[test]
    fn spans_record_byte_offsets() {
        let spanned = scan("solar OR wind");
        assert_eq!(spanned[0].start, 0);
        assert_eq!(spanned[1].start, 6);
        assert_eq!(spanned[2].start, 9);
    }

    #[test]
    fn phrase_span_starts_at_quote() {
        let spanned = scan("a \"b c\"");
        assert_eq!(spanned[1].start, 2);
    }
}
