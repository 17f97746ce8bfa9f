//! Static FIRST/FOLLOW sets of the MiniJava grammar
//!
//! These are grammar facts, not node data: the table is indexed by
//! [`NodeKind`], the tag of an AST variant (plus the `Statement` and
//! `Expression` nonterminals), and never computed from a node instance.
//! The parser consults it to choose productions and, in recovery mode, to
//! find a safe point to resume after a syntax error.

use super::token::TokenKind;
use TokenKind::*;

/// Tag of an AST node variant or grammar nonterminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    MainClass,
    Class,
    Method,
    Field,
    Param,
    Type,
    Identifier,

    Statement,
    Block,
    VarDecl,
    Assignment,
    Print,
    Assert,
    Return,
    MethodCallStatement,
    If,
    While,

    Expression,
    BinaryOp,
    UnaryOp,
    ArrayAccess,
    ArrayLength,
    NewObject,
    NewArray,
    MethodCall,
    IntLiteral,
    BoolLiteral,
    This,
}

const VAR_DECL_START: &[TokenKind] = &[Int, Boolean, Identifier];

const EXPRESSION_FOLLOW: &[TokenKind] = &[
    Add, Sub, Mul, Div, Mod, And, Or, Eq, Lt, Gt, RParen, RBracket, Assign, Semicolon, Comma,
];

const STATEMENT_FOLLOW: &[TokenKind] = &[
    LBrace, Return, Assert, System, Int, Boolean, If, While, Identifier, RBrace, Else,
];

/// Tokens that can begin a node of the given kind.
pub fn first_set(kind: NodeKind) -> &'static [TokenKind] {
    match kind {
        NodeKind::Program | NodeKind::MainClass | NodeKind::Class => &[Class],
        NodeKind::Method => &[Public],
        NodeKind::Field | NodeKind::Param | NodeKind::Type => &[Int, Boolean, Void, Identifier],
        NodeKind::VarDecl => VAR_DECL_START,
        NodeKind::Identifier => &[Identifier],

        NodeKind::Statement => &[
            LBrace, Return, Assert, System, Int, Boolean, If, While, Identifier,
        ],
        NodeKind::Block => &[LBrace],
        NodeKind::Assignment | NodeKind::MethodCallStatement => &[Identifier],
        NodeKind::Print => &[System],
        NodeKind::Assert => &[Assert],
        NodeKind::Return => &[Return],
        NodeKind::If => &[If],
        NodeKind::While => &[While],

        NodeKind::Expression
        | NodeKind::BinaryOp
        | NodeKind::ArrayAccess
        | NodeKind::ArrayLength
        | NodeKind::MethodCall => TokenKind::EXPRESSION_START,
        NodeKind::UnaryOp => &[Not],
        NodeKind::NewObject | NodeKind::NewArray => &[New],
        NodeKind::IntLiteral => &[IntLiteral],
        NodeKind::BoolLiteral => &[BoolLiteral],
        NodeKind::This => &[This],
    }
}

/// Tokens that can immediately follow a node of the given kind.
pub fn follow_set(kind: NodeKind) -> &'static [TokenKind] {
    match kind {
        NodeKind::Program => &[Eof],
        NodeKind::MainClass | NodeKind::Class => &[Class, Eof],
        NodeKind::Method | NodeKind::Field => &[Public, Int, Boolean, Identifier, RBrace],
        NodeKind::Param => &[Comma, RParen],
        NodeKind::Type => &[Identifier],
        NodeKind::Identifier => &[
            LBrace, LParen, LBracket, RParen, RBracket, Semicolon, Comma, Dot, Assign, Extends,
            Add, Sub, Mul, Div, Mod, And, Or, Eq, Lt, Gt,
        ],

        NodeKind::Statement
        | NodeKind::Block
        | NodeKind::VarDecl
        | NodeKind::Assignment
        | NodeKind::Print
        | NodeKind::Assert
        | NodeKind::Return
        | NodeKind::MethodCallStatement
        | NodeKind::If
        | NodeKind::While => STATEMENT_FOLLOW,

        NodeKind::Expression
        | NodeKind::BinaryOp
        | NodeKind::UnaryOp
        | NodeKind::ArrayAccess
        | NodeKind::ArrayLength
        | NodeKind::NewObject
        | NodeKind::NewArray
        | NodeKind::MethodCall
        | NodeKind::IntLiteral
        | NodeKind::BoolLiteral
        | NodeKind::This => EXPRESSION_FOLLOW,
    }
}

/// Where statement-level recovery may resume without consuming the token.
///
/// Identifiers are left out on purpose: they occur mid-statement far more
/// often than at its start.
pub fn is_statement_boundary(kind: TokenKind) -> bool {
    kind != Identifier && kind != Else && follow_set(NodeKind::Statement).contains(&kind)
}
