//! MiniJava front end
//!
//! This module transforms MiniJava source text into an Abstract Syntax Tree (AST):
//! - [`token`]: Token categories and the token record
//! - [`lexer`]: Tokenization (source text → tokens + lexical diagnostics)
//! - [`precedence`]: Binding powers of the binary operators
//! - [`grammar`]: Static FIRST/FOLLOW sets per node kind
//! - [`parse`]: Parsing (tokens → AST), error policy and diagnostics
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! - Types: `int`, `boolean`, `void`, class names, one-dimensional arrays
//! - One main class with a `public static` entry method, then ordinary
//!   classes with single inheritance, fields and methods
//! - Statements: blocks, local declarations, assignment, method calls,
//!   `System.out.println`, `assert`, `return`, `if`/`else`, `while`
//! - Expressions: `* / % + - < > == && ||`, unary `!`, indexing,
//!   `.length`, method calls, `new`, literals, `this`
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.
//!
//! ```
//! use minijava::parser::{parse, ErrorPolicy};
//!
//! let program = parse(
//!     "class Main { public static void main() { System.out.println(1 + 2); } }",
//!     ErrorPolicy::FailFast,
//! )
//! .unwrap();
//! assert_eq!(program.main_class.name.name(), "Main");
//! ```

pub mod ast;
pub mod grammar;
pub mod lexer;
pub mod parse;
pub mod precedence;
pub mod token;

mod declarations;
mod expressions;
mod statements;

pub use parse::{parse, Diagnostics, ErrorPolicy, ParseError, Parser};
