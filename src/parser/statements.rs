//! Statement parsing implementation
//!
//! This module handles parsing of all MiniJava statement forms:
//!
//! - Blocks: `{ ... }` (no scope of their own)
//! - Local variable declarations: `int x;`, `Foo f;`
//! - Assignments and method-call statements
//! - `System.out.println(e);`, `assert(e);`, `return e;`
//! - Control flow: `if`/`else`, `while`
//!
//! # Grammar
//!
//! ```text
//! statement ::= block | var_decl | print | assert | return
//!             | if_stmt | while_stmt | expr "=" expr ";" | call ";"
//! ```
//!
//! The dispatch looks only at the current token, except for a leading
//! identifier: `Foo x;` and `foo.bar();` both start with one, so the second
//! token decides.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::grammar::{first_set, NodeKind};
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;

impl Parser {
    /// Parse statements up to and including the closing `}`.
    ///
    /// In recovery mode a broken statement is recorded and skipped; the list
    /// itself keeps going.
    pub(crate) fn parse_statement_list(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            let start = self.position;
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(err) => {
                    self.recover(err)?;
                    self.synchronize_statement(start);
                }
            }
        }

        self.expect(&[TokenKind::RBrace])?;
        Ok(statements)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        self.nested(Self::parse_statement_kind)
    }

    fn parse_statement_kind(&mut self) -> Result<Statement, ParseError> {
        match self.peek_kind() {
            TokenKind::LBrace => self.parse_block(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Assert => self.parse_assert(),
            TokenKind::System => self.parse_print(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Int | TokenKind::Boolean => self.parse_var_decl(),
            TokenKind::Identifier if self.peek_nth(1) == TokenKind::Identifier => {
                self.parse_var_decl()
            }
            TokenKind::Identifier => self.parse_expression_statement(),
            _ => Err(ParseError::unexpected(
                first_set(NodeKind::Statement),
                self.peek(),
            )),
        }
    }

    fn parse_block(&mut self) -> Result<Statement, ParseError> {
        let open = self.expect(&[TokenKind::LBrace])?;
        let statements = self.parse_statement_list()?;
        Ok(Statement::Block {
            statements,
            location: open.location,
        })
    }

    fn parse_var_decl(&mut self) -> Result<Statement, ParseError> {
        let var_type = self.parse_type_from(first_set(NodeKind::VarDecl))?;
        let name = self.expect_identifier()?;
        self.expect(&[TokenKind::Semicolon])?;
        Ok(Statement::VarDecl(VarDecl { var_type, name }))
    }

    fn parse_return(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.expect(&[TokenKind::Return])?;
        let value = self.parse_expression()?;
        self.expect(&[TokenKind::Semicolon])?;
        Ok(Statement::Return {
            value,
            location: keyword.location,
        })
    }

    fn parse_assert(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.expect(&[TokenKind::Assert])?;
        let condition = self.parse_parenthesized()?;
        self.expect(&[TokenKind::Semicolon])?;
        Ok(Statement::Assert {
            condition,
            location: keyword.location,
        })
    }

    /// `System.out.println(e);`
    fn parse_print(&mut self) -> Result<Statement, ParseError> {
        let system = self.expect(&[TokenKind::System])?;
        self.expect(&[TokenKind::Dot])?;
        self.expect(&[TokenKind::Out])?;
        self.expect(&[TokenKind::Dot])?;
        self.expect(&[TokenKind::Println])?;
        let value = self.parse_parenthesized()?;
        self.expect(&[TokenKind::Semicolon])?;
        Ok(Statement::Print {
            value,
            location: system.location,
        })
    }

    fn parse_if(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.expect(&[TokenKind::If])?;
        let condition = self.parse_parenthesized()?;
        let then_branch = Box::new(self.parse_statement()?);

        // `else` binds to the nearest `if`
        let else_branch = match self.accept(&[TokenKind::Else]) {
            Some(_) => Some(Box::new(self.parse_statement()?)),
            None => None,
        };

        Ok(Statement::If {
            condition,
            then_branch,
            else_branch,
            location: keyword.location,
        })
    }

    fn parse_while(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.expect(&[TokenKind::While])?;
        let condition = self.parse_parenthesized()?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::While {
            condition,
            body,
            location: keyword.location,
        })
    }

    /// An assignment or a bare method call.
    fn parse_expression_statement(&mut self) -> Result<Statement, ParseError> {
        let target = self.parse_expression()?;

        if self.accept(&[TokenKind::Assign]).is_some() {
            let value = self.parse_expression()?;
            self.expect(&[TokenKind::Semicolon])?;
            let location = target.location();
            return Ok(Statement::Assignment {
                target,
                value,
                location,
            });
        }

        match target {
            Expr::MethodCall(call) => {
                self.expect(&[TokenKind::Semicolon])?;
                Ok(Statement::MethodCall(call))
            }
            _ => Err(ParseError::invalid_statement(self.peek())),
        }
    }

    fn parse_parenthesized(&mut self) -> Result<Expr, ParseError> {
        self.expect(&[TokenKind::LParen])?;
        let expr = self.parse_expression()?;
        self.expect(&[TokenKind::RParen])?;
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::ErrorPolicy;

    fn statements(body: &str) -> Vec<Statement> {
        let source = format!("class Main {{ public static void main() {{ {} }} }}", body);
        let mut parser = Parser::new(&source);
        match parser.parse_program() {
            Ok(program) => program.main_class.main_method.body,
            Err(e) => panic!("Parse failed: {}", e),
        }
    }

    fn statement(body: &str) -> Statement {
        let mut all = statements(body);
        assert_eq!(all.len(), 1, "expected one statement in {:?}", body);
        all.remove(0)
    }

    fn error(body: &str) -> ParseError {
        let source = format!("class Main {{ public static void main() {{ {} }} }}", body);
        Parser::new(&source).parse_program().unwrap_err()
    }

    #[test]
    fn test_named_type_declaration() {
        match statement("Foo x;") {
            Statement::VarDecl(decl) => {
                assert_eq!(decl.var_type.name(), "Foo");
                assert!(decl.var_type.is_named());
                assert_eq!(decl.name.name(), "x");
            }
            other => panic!("Expected VarDecl, got {:?}", other),
        }
    }

    #[test]
    fn test_primitive_array_declaration() {
        match statement("int[] xs;") {
            Statement::VarDecl(decl) => {
                assert_eq!(decl.var_type.name(), "int");
                assert!(decl.var_type.is_array);
            }
            other => panic!("Expected VarDecl, got {:?}", other),
        }
    }

    #[test]
    fn test_method_call_statement() {
        match statement("Foo.bar();") {
            Statement::MethodCall(call) => {
                assert_eq!(call.method.name(), "bar");
                assert!(call.args.is_empty());
                assert!(matches!(*call.receiver, Expr::Identifier(_)));
            }
            other => panic!("Expected MethodCall, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment() {
        match statement("x = 1;") {
            Statement::Assignment { target, value, .. } => {
                assert!(matches!(target, Expr::Identifier(ref id) if id.name() == "x"));
                assert!(matches!(value, Expr::IntLiteral(ref t) if t.text == "1"));
            }
            other => panic!("Expected Assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_array_element_assignment() {
        match statement("a[i + 1] = a.length;") {
            Statement::Assignment { target, value, .. } => {
                assert!(matches!(target, Expr::ArrayAccess { .. }));
                assert!(matches!(value, Expr::ArrayLength { .. }));
            }
            other => panic!("Expected Assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_expression_is_rejected() {
        let err = error("x + 1;");
        assert_eq!(err.found, TokenKind::Semicolon);
        assert!(err.message.contains("not a valid statement"));
        assert_eq!(err.found_text, ";");
        assert_eq!(err.location, SourceLocation::new(1, 47));
    }

    #[test]
    fn test_print_assert_return() {
        let body = statements("System.out.println(1); assert(true); return 0;");
        assert!(matches!(body[0], Statement::Print { .. }));
        assert!(matches!(body[1], Statement::Assert { .. }));
        assert!(matches!(body[2], Statement::Return { .. }));
    }

    #[test]
    fn test_nested_blocks() {
        match statement("{ { x = 1; } y = 2; }") {
            Statement::Block { statements, .. } => {
                assert_eq!(statements.len(), 2);
                assert!(matches!(statements[0], Statement::Block { .. }));
            }
            other => panic!("Expected Block, got {:?}", other),
        }
    }

    #[test]
    fn test_dangling_else_binds_to_inner_if() {
        match statement("if (a) if (b) x = 1; else x = 2;") {
            Statement::If {
                then_branch,
                else_branch,
                ..
            } => {
                assert!(else_branch.is_none());
                assert!(matches!(
                    *then_branch,
                    Statement::If {
                        else_branch: Some(_),
                        ..
                    }
                ));
            }
            other => panic!("Expected If, got {:?}", other),
        }
    }

    #[test]
    fn test_while() {
        match statement("while (i < n) { i = i + 1; }") {
            Statement::While { condition, body, .. } => {
                assert!(matches!(condition, Expr::BinaryOp { .. }));
                assert_eq!(body.kind(), NodeKind::Block);
            }
            other => panic!("Expected While, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_statement_start() {
        let err = error("; x = 1;");
        assert_eq!(err.found, TokenKind::Semicolon);
        assert_eq!(err.expected, first_set(NodeKind::Statement).to_vec());
    }

    #[test]
    fn test_recovery_collects_each_broken_statement() {
        let source = "class Main { public static void main() {\n\
                      x = ;\n\
                      y = 2;\n\
                      return ;\n\
                      Foo.bar();\n\
                      } }";
        let mut parser = Parser::new(source).with_policy(ErrorPolicy::Recover);
        let errors = parser.parse_program_collecting().unwrap_err();

        let lines: Vec<usize> = errors.iter().map(|e| e.location.line).collect();
        assert_eq!(lines, vec![2, 4]);
    }

    #[test]
    fn test_recovery_stops_at_closing_brace() {
        let source = "class Main { public static void main() { x = 1 } }";
        let mut parser = Parser::new(source).with_policy(ErrorPolicy::Recover);
        let errors = parser.parse_program_collecting().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].found, TokenKind::RBrace);
    }

    #[test]
    fn test_deeply_nested_blocks_are_rejected() {
        let err = error(&format!("{}{}", "{".repeat(50_000), "}".repeat(50_000)));
        assert_eq!(err.found, TokenKind::LBrace);
        assert!(err.message.contains("Nesting deeper than"));

        let recovered = format!(
            "class Main {{ public static void main() {{ {} x = 1; }} }}",
            "while (true) ".repeat(300)
        );
        let mut parser = Parser::new(&recovered).with_policy(ErrorPolicy::Recover);
        assert!(parser.parse_program_collecting().is_err());
    }
}
