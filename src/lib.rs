//! # Introduction
//!
//! `minijava` is a front end for MiniJava, the small Java subset used in
//! compiler courses. It turns source text into a typed syntax tree and can
//! show the result in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → Printer / TUI
//! ```
//!
//! 1. [`parser`]: tokenises the source, collecting lexical diagnostics, and
//!    builds the AST by recursive descent with precedence climbing.
//! 2. [`printer`]: renders an AST back to MiniJava source that parses to the
//!    same tree.
//! 3. [`ui`]: ratatui-based viewer; not part of the stable library API.
//!
//! ## Error handling
//!
//! Lexical errors never stop the lexer; the token stream always ends in one
//! end-of-file token. Syntax errors abort the parse by default
//! ([`parser::ErrorPolicy::FailFast`]) or are collected while the parser
//! skips to the next statement or class ([`parser::ErrorPolicy::Recover`]).
//! Either way [`parser::parse`] only returns a tree when nothing went wrong.

pub mod parser;
pub mod printer;
pub mod ui;
