//! Lexer (tokenizer) for MiniJava source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Lexical problems never abort scanning: they are collected as [`LexError`]s
//! on the side while the lexer keeps producing best-effort tokens, so the
//! stream handed to the parser is always complete and ends in exactly one
//! [`TokenKind::Eof`].
//!
//! The lexer can run eagerly ([`Lexer::tokenize`]) or be pulled one token at
//! a time through its [`Iterator`] implementation; both yield the same tokens
//! and the same diagnostics.

use super::ast::SourceLocation;
use super::token::{Token, TokenKind};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    InvalidCharacter,
    MalformedIdentifier,
    UnterminatedComment,
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at line {}, column {}: {message}", .location.line, .location.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub message: String,
    pub location: SourceLocation,
}

/// Tokens plus the diagnostics collected while scanning them.
#[derive(Debug, Clone, Default)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

/// Tokenize a whole source string.
pub fn tokenize(source: &str) -> Lexed {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize();
    Lexed {
        tokens,
        errors: lexer.take_errors(),
    }
}

/// Lexer for MiniJava source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    errors: Vec<LexError>,
    finished: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            errors: Vec::new(),
            finished: false,
        }
    }

    /// Tokenize the remaining input, up to and including the end-of-file token.
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    /// Diagnostics collected so far.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    /// Scan the next token. Once the input is exhausted every call returns
    /// an end-of-file token.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();

            let loc = self.current_location();
            let Some(ch) = self.advance() else {
                return Token::eof(loc);
            };

            if let Some(kind) = TokenKind::single_char(ch) {
                return Token::new(kind, ch.to_string(), loc);
            }

            match ch {
                // Identifiers and keywords
                c if c.is_alphabetic() => return self.identifier_or_keyword(c, loc),

                // Integer literals
                c if c.is_ascii_digit() => return self.number_literal(c, loc),

                // Comments or division
                '/' => match self.peek() {
                    Some('/') => self.skip_line_comment(),
                    Some('*') => {
                        self.advance(); // skip '*'
                        if !self.skip_block_comment() {
                            self.error(
                                LexErrorKind::UnterminatedComment,
                                "Unclosed multiline comment".to_string(),
                                loc,
                            );
                            return Token::eof(self.current_location());
                        }
                    }
                    _ => return Token::new(TokenKind::Div, "/", loc),
                },

                '=' => {
                    if self.peek() == Some('=') {
                        self.advance();
                        return Token::new(TokenKind::Eq, "==", loc);
                    }
                    return Token::new(TokenKind::Assign, "=", loc);
                }

                '|' => return self.doubled(ch, TokenKind::Or, loc),
                '&' => return self.doubled(ch, TokenKind::And, loc),

                _ => {
                    self.error(
                        LexErrorKind::InvalidCharacter,
                        format!("Invalid input character '{}'", ch.escape_debug()),
                        loc,
                    );
                    return Token::new(TokenKind::Identifier, ch.to_string(), loc);
                }
            }
        }
    }

    /// `||` and `&&`: the only lexemes built from `|` and `&`.
    fn doubled(&mut self, ch: char, kind: TokenKind, loc: SourceLocation) -> Token {
        if self.peek() == Some(ch) {
            self.advance();
            return Token::new(kind, format!("{ch}{ch}"), loc);
        }
        self.error(
            LexErrorKind::InvalidCharacter,
            format!("Invalid input character '{ch}', expected '{ch}{ch}'"),
            loc,
        );
        Token::new(TokenKind::Identifier, ch.to_string(), loc)
    }

    /// Parse integer literal. The body is kept as text; no range check.
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Token {
        let mut digits = String::new();
        digits.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::IntLiteral, digits, loc)
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if let Some(kind) = TokenKind::reserved(&ident) {
            return Token::new(kind, ident, loc);
        }

        if !is_valid_identifier(&ident) {
            self.error(
                LexErrorKind::MalformedIdentifier,
                format!("Invalid identifier: {}", ident),
                loc,
            );
        }

        Token::new(TokenKind::Identifier, ident, loc)
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r') = self.peek() {
            self.advance();
        }
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip the rest of a block comment whose `/*` is already consumed.
    /// Returns false when the input ends before `*/`.
    fn skip_block_comment(&mut self) -> bool {
        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return true;
            }
            self.advance();
        }
        false
    }

    fn error(&mut self, kind: LexErrorKind, message: String, location: SourceLocation) {
        log::trace!("lex error at {}:{}: {}", location.line, location.column, message);
        self.errors.push(LexError {
            kind,
            message,
            location,
        });
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        match ch {
            '\n' => {
                self.line += 1;
                self.column = 1;
            }
            _ => self.column += 1,
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every token including the final end-of-file token, then `None`.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.is(TokenKind::Eof) {
            self.finished = true;
        }
        Some(token)
    }
}

/// Letter first, then letters, decimal digits or underscores.
fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphabetic() || c.is_ascii_digit() || c == '_')
}
