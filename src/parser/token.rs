//! Token model shared by the lexer and the parser
//!
//! A [`Token`] is an immutable record of a classified source fragment: its
//! [`TokenKind`], the raw text it was scanned from, and the 1-based position
//! of its first character. Two derived kind sets live here as well, because
//! the parser uses them to pick a production:
//!
//! - [`TokenKind::BINARY_OPERATORS`]: kinds the infix loop may consume
//! - [`TokenKind::EXPRESSION_START`]: kinds an expression can begin with

use super::ast::SourceLocation;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;

/// All lexical categories of MiniJava.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,

    // Literals
    IntLiteral,
    BoolLiteral,

    // Primitive types
    Int,
    Boolean,
    Void,

    // Structural keywords
    Class,
    Extends,
    Public,
    Static,
    This,
    New,
    Length,

    // Statement keywords
    If,
    Else,
    While,
    Assert,
    Return,

    // System.out.println
    System,
    Out,
    Println,

    // Binary operators
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    Mod, // %
    And, // &&
    Or,  // ||
    Eq,  // ==
    Lt,  // <
    Gt,  // >

    // Unary
    Not, // !

    Assign, // =

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    LBrace,    // {
    RBrace,    // }
    Comma,     // ,
    Semicolon, // ;
    Dot,       // .

    Eof,
}

impl TokenKind {
    /// Kinds accepted by the binary infix loop.
    pub const BINARY_OPERATORS: &'static [TokenKind] = &[
        TokenKind::Add,
        TokenKind::Sub,
        TokenKind::Mul,
        TokenKind::Div,
        TokenKind::Mod,
        TokenKind::And,
        TokenKind::Or,
        TokenKind::Eq,
        TokenKind::Lt,
        TokenKind::Gt,
    ];

    /// FIRST set of an expression.
    pub const EXPRESSION_START: &'static [TokenKind] = &[
        TokenKind::Not,
        TokenKind::LParen,
        TokenKind::This,
        TokenKind::BoolLiteral,
        TokenKind::IntLiteral,
        TokenKind::Identifier,
        TokenKind::New,
    ];

    pub fn is_binary_operator(self) -> bool {
        Self::BINARY_OPERATORS.contains(&self)
    }

    pub fn is_keyword(self) -> bool {
        reserved_words().values().any(|kind| *kind == self)
    }

    /// Resolve an identifier-shaped run of characters against the reserved words.
    pub fn reserved(word: &str) -> Option<TokenKind> {
        reserved_words().get(word).copied()
    }

    /// Fixed single-character lexemes. `=`, `|`, `&` and `/` need lookahead
    /// and are handled by the lexer directly.
    pub fn single_char(ch: char) -> Option<TokenKind> {
        let kind = match ch {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '+' => TokenKind::Add,
            '-' => TokenKind::Sub,
            '*' => TokenKind::Mul,
            '%' => TokenKind::Mod,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '!' => TokenKind::Not,
            _ => return None,
        };
        Some(kind)
    }
}

fn reserved_words() -> &'static FxHashMap<&'static str, TokenKind> {
    static RESERVED: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    RESERVED.get_or_init(|| {
        [
            ("while", TokenKind::While),
            ("assert", TokenKind::Assert),
            ("if", TokenKind::If),
            ("else", TokenKind::Else),
            ("return", TokenKind::Return),
            ("class", TokenKind::Class),
            ("public", TokenKind::Public),
            ("static", TokenKind::Static),
            ("extends", TokenKind::Extends),
            ("this", TokenKind::This),
            ("new", TokenKind::New),
            ("length", TokenKind::Length),
            ("int", TokenKind::Int),
            ("boolean", TokenKind::Boolean),
            ("void", TokenKind::Void),
            ("true", TokenKind::BoolLiteral),
            ("false", TokenKind::BoolLiteral),
            ("System", TokenKind::System),
            ("out", TokenKind::Out),
            ("println", TokenKind::Println),
        ]
        .into_iter()
        .collect()
    })
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::IntLiteral => "integer literal",
            TokenKind::BoolLiteral => "boolean literal",
            TokenKind::Int => "'int'",
            TokenKind::Boolean => "'boolean'",
            TokenKind::Void => "'void'",
            TokenKind::Class => "'class'",
            TokenKind::Extends => "'extends'",
            TokenKind::Public => "'public'",
            TokenKind::Static => "'static'",
            TokenKind::This => "'this'",
            TokenKind::New => "'new'",
            TokenKind::Length => "'length'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::Assert => "'assert'",
            TokenKind::Return => "'return'",
            TokenKind::System => "'System'",
            TokenKind::Out => "'out'",
            TokenKind::Println => "'println'",
            TokenKind::Add => "'+'",
            TokenKind::Sub => "'-'",
            TokenKind::Mul => "'*'",
            TokenKind::Div => "'/'",
            TokenKind::Mod => "'%'",
            TokenKind::And => "'&&'",
            TokenKind::Or => "'||'",
            TokenKind::Eq => "'=='",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::Not => "'!'",
            TokenKind::Assign => "'='",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Dot => "'.'",
            TokenKind::Eof => "end of file",
        };
        f.write_str(text)
    }
}

/// A scanned lexeme. Never mutated after the lexer creates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Token {
            kind,
            text: text.into(),
            location,
        }
    }

    pub fn eof(location: SourceLocation) -> Self {
        Token::new(TokenKind::Eof, "", location)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::IntLiteral => write!(f, "integer literal {}", self.text),
            TokenKind::BoolLiteral => write!(f, "boolean literal {}", self.text),
            kind => write!(f, "{}", kind),
        }
    }
}
