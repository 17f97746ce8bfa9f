//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, the token cursor, and the main parse entry points.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, cursor helpers, error policy and coordination
//! - `declarations`: main class, classes, fields, methods, types, parameters
//! - `statements`: statement dispatch and each statement form
//! - `expressions`: precedence climbing over prefix and tail forms
//!
//! # Cursor
//!
//! The parser owns the token vector produced by the lexer. It looks at most
//! two tokens ahead ([`Parser::peek_nth`]) and never backtracks; the one local
//! ambiguity of the grammar (`Foo x;` versus `foo.bar();`) is resolved by
//! peeking at the second token.
//!
//! # Errors
//!
//! With [`ErrorPolicy::FailFast`] the first mismatch aborts the parse. With
//! [`ErrorPolicy::Recover`] the parser records the error, skips to a statement
//! or class boundary and keeps going, so one run can report several problems.
//! Either way no partial tree is handed out when anything went wrong.

use crate::parser::ast::*;
use crate::parser::grammar::{self, NodeKind};
use crate::parser::lexer::{self, LexError};
use crate::parser::token::{Token, TokenKind};
use std::fmt;
use thiserror::Error;

/// Open statements plus open expressions a parse may hold at once.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at line {}, column {}: {message}", .location.line, .location.column)]
pub struct ParseError {
    pub message: String,
    pub expected: Vec<TokenKind>,
    pub found: TokenKind,
    pub found_text: String,
    pub location: SourceLocation,
}

impl ParseError {
    /// `found` did not match any of `expected`.
    pub fn unexpected(expected: &[TokenKind], found: &Token) -> Self {
        ParseError {
            message: format!("Expected {}, found {}", describe(expected), found),
            expected: expected.to_vec(),
            found: found.kind,
            found_text: found.text.clone(),
            location: found.location,
        }
    }

    /// An expression in statement position that is neither an assignment
    /// nor a method call. `found` is the token after the expression.
    pub fn invalid_statement(found: &Token) -> Self {
        ParseError {
            message: format!(
                "Expression is not a valid statement: expected '=' or a method call, found {}",
                found
            ),
            expected: vec![TokenKind::Assign],
            found: found.kind,
            found_text: found.text.clone(),
            location: found.location,
        }
    }

    /// Statements or expressions nested past [`MAX_NESTING_DEPTH`].
    pub fn too_deep(found: &Token) -> Self {
        ParseError {
            message: format!(
                "Nesting deeper than {} levels at {}",
                MAX_NESTING_DEPTH, found
            ),
            expected: Vec::new(),
            found: found.kind,
            found_text: found.text.clone(),
            location: found.location,
        }
    }
}

fn describe(kinds: &[TokenKind]) -> String {
    match kinds {
        [] => "nothing".to_string(),
        [only] => only.to_string(),
        [init @ .., last] => {
            let init: Vec<String> = init.iter().map(|k| k.to_string()).collect();
            format!("{} or {}", init.join(", "), last)
        }
    }
}

/// What the parser does after a syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Abort on the first error.
    #[default]
    FailFast,
    /// Skip to the next statement or class boundary and keep collecting errors.
    Recover,
}

/// Everything that went wrong while turning source text into a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", render(.lexical, .syntax))]
pub struct Diagnostics {
    pub lexical: Vec<LexError>,
    pub syntax: Vec<ParseError>,
}

impl Diagnostics {
    pub fn is_empty(&self) -> bool {
        self.lexical.is_empty() && self.syntax.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lexical.len() + self.syntax.len()
    }

    /// Every diagnostic as (location, rendered message), ordered by position.
    pub fn entries(&self) -> Vec<(SourceLocation, String)> {
        let mut entries: Vec<(SourceLocation, String)> = self
            .lexical
            .iter()
            .map(|e| (e.location, e.to_string()))
            .chain(self.syntax.iter().map(|e| (e.location, e.to_string())))
            .collect();
        entries.sort_by_key(|(location, _)| *location);
        entries
    }
}

fn render(lexical: &[LexError], syntax: &[ParseError]) -> String {
    let mut lines: Vec<String> = lexical.iter().map(|e| e.to_string()).collect();
    lines.extend(syntax.iter().map(|e| e.to_string()));
    lines.join("\n")
}

/// Lex and parse a compilation unit.
///
/// Returns the tree only when neither the lexer nor the parser reported
/// anything.
pub fn parse(source: &str, policy: ErrorPolicy) -> Result<Program, Diagnostics> {
    Parser::new(source).with_policy(policy).parse_with_diagnostics()
}

/// Recursive descent parser for MiniJava
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) policy: ErrorPolicy,
    /// Errors recorded while recovering
    pub(crate) errors: Vec<ParseError>,
    depth: usize,
    lex_errors: Vec<LexError>,
}

impl Parser {
    /// Tokenize `source` and set up a parser over the result.
    pub fn new(source: &str) -> Self {
        let lexed = lexer::tokenize(source);
        let mut parser = Parser::from_tokens(lexed.tokens);
        parser.lex_errors = lexed.errors;
        parser
    }

    /// Parse an already tokenized stream. A missing end-of-file token is added.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        let needs_eof = tokens.last().map_or(true, |t| !t.is(TokenKind::Eof));
        if needs_eof {
            let location = tokens
                .last()
                .map_or(SourceLocation::new(1, 1), |t| t.location);
            tokens.push(Token::eof(location));
        }
        Self {
            tokens,
            position: 0,
            policy: ErrorPolicy::default(),
            errors: Vec::new(),
            depth: 0,
            lex_errors: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn lex_errors(&self) -> &[LexError] {
        &self.lex_errors
    }

    pub fn take_lex_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.lex_errors)
    }

    /// Parse under the configured policy and fold the lexer's errors in.
    /// The token stream stays available afterwards.
    pub fn parse_with_diagnostics(&mut self) -> Result<Program, Diagnostics> {
        let result = self.parse_program_collecting();
        let lexical = self.take_lex_errors();

        match result {
            Ok(program) if lexical.is_empty() => Ok(program),
            Ok(_) => Err(Diagnostics {
                lexical,
                syntax: Vec::new(),
            }),
            Err(syntax) => Err(Diagnostics { lexical, syntax }),
        }
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Parse the entire program in fail-fast mode.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        self.policy = ErrorPolicy::FailFast;
        self.parse_program_collecting().map_err(|mut errors| errors.remove(0))
    }

    /// Parse the entire program under the configured policy, returning every
    /// syntax error that was recorded.
    pub fn parse_program_collecting(&mut self) -> Result<Program, Vec<ParseError>> {
        log::debug!(
            "parsing {} tokens ({:?})",
            self.tokens.len(),
            self.policy
        );
        let result = self.parse_program_inner();

        match result {
            Ok(Some(program)) if self.errors.is_empty() => {
                log::debug!("parsed main class and {} classes", program.classes.len());
                Ok(program)
            }
            Ok(_) => Err(std::mem::take(&mut self.errors)),
            Err(err) => {
                let mut errors = std::mem::take(&mut self.errors);
                errors.push(err);
                Err(errors)
            }
        }
    }

    // ===== Error policy =====

    /// Under `Recover`, record the error and report that parsing may go on.
    pub(crate) fn recover(&mut self, err: ParseError) -> Result<(), ParseError> {
        match self.policy {
            ErrorPolicy::FailFast => Err(err),
            ErrorPolicy::Recover => {
                log::trace!("recovering from: {}", err);
                // Nested lists unwinding at end of file all fail at the same token
                let repeated = self
                    .errors
                    .last()
                    .is_some_and(|last| last.location == err.location);
                if !repeated {
                    self.errors.push(err);
                }
                Ok(())
            }
        }
    }

    /// Skip to the end of the broken statement: past the next `;`, or up to
    /// the next `}` or statement keyword. Consumes at least one token.
    pub(crate) fn synchronize_statement(&mut self, start: usize) {
        log::trace!("skipping to a statement boundary from {:?}", self.peek().location);
        while !self.is_at_end() {
            let kind = self.peek_kind();
            if kind == TokenKind::Semicolon {
                self.advance();
                return;
            }
            if grammar::is_statement_boundary(kind) && self.position > start {
                return;
            }
            self.advance();
        }
    }

    /// Skip to the next `class` keyword, consuming at least one token.
    pub(crate) fn synchronize_class(&mut self, start: usize) {
        log::trace!("skipping to the next class from {:?}", self.peek().location);
        while !self.is_at_end() {
            if grammar::follow_set(NodeKind::Class).contains(&self.peek_kind())
                && self.position > start
            {
                return;
            }
            self.advance();
        }
    }

    // ===== Cursor =====

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Kind of the token `n` positions ahead; the end-of-file token repeats.
    pub(crate) fn peek_nth(&self, n: usize) -> TokenKind {
        let last = self.tokens.len() - 1;
        self.tokens[(self.position + n).min(last)].kind
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consume the current token. The end-of-file token is never passed.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    /// Consume the current token if its kind is one of `kinds`.
    pub(crate) fn accept(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.contains(&self.peek_kind()) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Like [`Parser::accept`], but a mismatch is a syntax error.
    pub(crate) fn expect(&mut self, kinds: &[TokenKind]) -> Result<Token, ParseError> {
        self.accept(kinds)
            .ok_or_else(|| ParseError::unexpected(kinds, self.peek()))
    }

    /// Run `f` one nesting level deeper, failing once [`MAX_NESTING_DEPTH`]
    /// levels are open.
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::too_deep(self.peek()));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<Identifier, ParseError> {
        self.expect(&[TokenKind::Identifier]).map(Identifier::new)
    }

}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("position", &self.position)
            .field("current", self.peek())
            .field("policy", &self.policy)
            .field("errors", &self.errors.len())
            .finish()
    }
}
