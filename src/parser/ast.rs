// AST (Abstract Syntax Tree) definitions for MiniJava

use super::grammar::NodeKind;
use super::token::{Token, TokenKind};

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A name appearing in a declaration or a member access.
///
/// Keeps the token it was built from so diagnostics and the printer can
/// refer back to the exact source text and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub token: Token,
}

impl Identifier {
    pub fn new(token: Token) -> Self {
        Identifier { token }
    }

    pub fn name(&self) -> &str {
        &self.token.text
    }

    pub fn location(&self) -> SourceLocation {
        self.token.location
    }
}

/// Type representation: a primitive or class name, optionally an array of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    /// `int`, `boolean`, `void` or an identifier token
    pub base: Token,
    pub is_array: bool,
}

impl Type {
    pub fn new(base: Token) -> Self {
        Type {
            base,
            is_array: false,
        }
    }

    pub fn with_array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.base.text
    }

    /// True for a class-typed (rather than primitive) base.
    pub fn is_named(&self) -> bool {
        self.base.kind == TokenKind::Identifier
    }

    pub fn location(&self) -> SourceLocation {
        self.base.location
    }
}

/// Method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub param_type: Type,
    pub name: Identifier,
}

/// Field or local variable declaration: `Type name;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub var_type: Type,
    pub name: Identifier,
}

impl VarDecl {
    pub fn location(&self) -> SourceLocation {
        self.var_type.location()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub return_type: Type,
    pub name: Identifier,
    pub params: Vec<Param>,
    pub body: Vec<Statement>,
}

impl MethodDecl {
    pub fn location(&self) -> SourceLocation {
        self.name.location()
    }
}

/// The class holding `public static void main()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainClass {
    pub name: Identifier,
    pub main_method: MethodDecl,
}

/// Ordinary class declaration.
///
/// Field order and method order are those of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: Identifier,
    pub parent: Option<Identifier>,
    pub fields: Vec<VarDecl>,
    pub methods: Vec<MethodDecl>,
}

impl ClassDecl {
    pub fn location(&self) -> SourceLocation {
        self.name.location()
    }
}

/// Top-level program structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub main_class: MainClass,
    pub classes: Vec<ClassDecl>,
}

/// `receiver.method(args...)`, usable both as an expression and a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCall {
    pub receiver: Box<Expr>,
    pub method: Identifier,
    pub args: Vec<Expr>,
}

/// Statements. Blocks introduce no scope of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Block {
        statements: Vec<Statement>,
        location: SourceLocation,
    },
    VarDecl(VarDecl),
    Assignment {
        target: Expr,
        value: Expr,
        location: SourceLocation,
    },
    Print {
        value: Expr,
        location: SourceLocation,
    },
    Assert {
        condition: Expr,
        location: SourceLocation,
    },
    Return {
        value: Expr,
        location: SourceLocation,
    },
    MethodCall(MethodCall),
    If {
        condition: Expr,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Box<Statement>,
        location: SourceLocation,
    },
}

impl Statement {
    /// Get the source location of this statement (its first token)
    pub fn location(&self) -> SourceLocation {
        match self {
            Statement::Block { location, .. }
            | Statement::Assignment { location, .. }
            | Statement::Print { location, .. }
            | Statement::Assert { location, .. }
            | Statement::Return { location, .. }
            | Statement::If { location, .. }
            | Statement::While { location, .. } => *location,
            Statement::VarDecl(decl) => decl.location(),
            Statement::MethodCall(call) => call.receiver.location(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Statement::Block { .. } => NodeKind::Block,
            Statement::VarDecl(_) => NodeKind::VarDecl,
            Statement::Assignment { .. } => NodeKind::Assignment,
            Statement::Print { .. } => NodeKind::Print,
            Statement::Assert { .. } => NodeKind::Assert,
            Statement::Return { .. } => NodeKind::Return,
            Statement::MethodCall(_) => NodeKind::MethodCallStatement,
            Statement::If { .. } => NodeKind::If,
            Statement::While { .. } => NodeKind::While,
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    BinaryOp {
        left: Box<Expr>,
        op: Token,
        right: Box<Expr>,
    },
    UnaryOp {
        op: Token,
        operand: Box<Expr>,
    },
    ArrayAccess {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    ArrayLength {
        array: Box<Expr>,
    },
    NewObject {
        class_name: Identifier,
        location: SourceLocation,
    },
    NewArray {
        element_type: Type,
        length: Box<Expr>,
        location: SourceLocation,
    },
    MethodCall(MethodCall),
    IntLiteral(Token),
    BoolLiteral(Token),
    Identifier(Identifier),
    This(Token),
}

impl Expr {
    /// Location of the leftmost token of the expression.
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::BinaryOp { left, .. } => left.location(),
            Expr::UnaryOp { op, .. } => op.location,
            Expr::ArrayAccess { array, .. } | Expr::ArrayLength { array } => array.location(),
            Expr::NewObject { location, .. } | Expr::NewArray { location, .. } => *location,
            Expr::MethodCall(call) => call.receiver.location(),
            Expr::IntLiteral(token) | Expr::BoolLiteral(token) | Expr::This(token) => {
                token.location
            }
            Expr::Identifier(ident) => ident.location(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Expr::BinaryOp { .. } => NodeKind::BinaryOp,
            Expr::UnaryOp { .. } => NodeKind::UnaryOp,
            Expr::ArrayAccess { .. } => NodeKind::ArrayAccess,
            Expr::ArrayLength { .. } => NodeKind::ArrayLength,
            Expr::NewObject { .. } => NodeKind::NewObject,
            Expr::NewArray { .. } => NodeKind::NewArray,
            Expr::MethodCall(_) => NodeKind::MethodCall,
            Expr::IntLiteral(_) => NodeKind::IntLiteral,
            Expr::BoolLiteral(_) => NodeKind::BoolLiteral,
            Expr::Identifier(_) => NodeKind::Identifier,
            Expr::This(_) => NodeKind::This,
        }
    }
}
