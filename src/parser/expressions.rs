//! Expression parsing implementation
//!
//! This module implements precedence climbing for MiniJava expressions.
//!
//! An operand is a prefix form followed by any number of tail extensions:
//!
//! - Prefix: `!e`, `(e)`, `this`, literals, identifiers, `new` forms
//! - Tails: `[e]` (index), `.length`, `.name(args)` (method call)
//!
//! Operands are then folded by the binary infix loop using the binding
//! powers from [`crate::parser::precedence`]. The right-hand side of an
//! operator is parsed with the operator's own precedence as the bound, so
//! operators of equal precedence associate to the left.
//!
//! `!` applies to the prefix form that follows it, before any tails, so
//! `!a[0]` indexes the negation. Write `!(a[0])` to negate an element.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::precedence::{precedence, LOWEST};
use crate::parser::token::{Token, TokenKind};

impl Parser {
    /// Parse a full expression
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.nested(|p| p.parse_binary(LOWEST))
    }

    /// Fold binary operators that bind tighter than `min_precedence`.
    fn parse_binary(&mut self, min_precedence: u8) -> Result<Expr, ParseError> {
        let mut left = self.parse_operand()?;

        while self.peek_kind().is_binary_operator()
            && precedence(self.peek_kind()) > min_precedence
        {
            let op = self.advance();
            let right = self.parse_binary(precedence(op.kind))?;
            left = Expr::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_operand(&mut self) -> Result<Expr, ParseError> {
        let prefix = self.parse_prefix()?;
        self.parse_tail(prefix)
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let token = self.expect(TokenKind::EXPRESSION_START)?;

        match token.kind {
            TokenKind::Not => {
                let operand = self.nested(Self::parse_prefix)?;
                Ok(Expr::UnaryOp {
                    op: token,
                    operand: Box::new(operand),
                })
            }
            TokenKind::LParen => {
                let inner = self.parse_expression()?;
                self.expect(&[TokenKind::RParen])?;
                Ok(inner)
            }
            TokenKind::This => Ok(Expr::This(token)),
            TokenKind::BoolLiteral => Ok(Expr::BoolLiteral(token)),
            TokenKind::IntLiteral => Ok(Expr::IntLiteral(token)),
            TokenKind::Identifier => Ok(Expr::Identifier(Identifier::new(token))),
            TokenKind::New => self.parse_new(token),
            kind => unreachable!("{:?} accepted as an expression start", kind),
        }
    }

    /// `new int[e]`, `new boolean[e]`, `new Foo[e]` or `new Foo()`.
    fn parse_new(&mut self, keyword: Token) -> Result<Expr, ParseError> {
        let base = self.expect(&[TokenKind::Int, TokenKind::Boolean, TokenKind::Identifier])?;

        if base.is(TokenKind::Identifier) {
            let opening = self.expect(&[TokenKind::LParen, TokenKind::LBracket])?;
            if opening.is(TokenKind::LParen) {
                self.expect(&[TokenKind::RParen])?;
                return Ok(Expr::NewObject {
                    class_name: Identifier::new(base),
                    location: keyword.location,
                });
            }
        } else {
            self.expect(&[TokenKind::LBracket])?;
        }

        let length = self.parse_expression()?;
        self.expect(&[TokenKind::RBracket])?;

        Ok(Expr::NewArray {
            element_type: Type::new(base),
            length: Box::new(length),
            location: keyword.location,
        })
    }

    /// Extend `expr` with index, `.length` and call suffixes for as long as
    /// they keep coming.
    fn parse_tail(&mut self, mut expr: Expr) -> Result<Expr, ParseError> {
        loop {
            if self.accept(&[TokenKind::LBracket]).is_some() {
                let index = self.parse_expression()?;
                self.expect(&[TokenKind::RBracket])?;
                expr = Expr::ArrayAccess {
                    array: Box::new(expr),
                    index: Box::new(index),
                };
            } else if self.accept(&[TokenKind::Dot]).is_some() {
                let member = self.expect(&[TokenKind::Length, TokenKind::Identifier])?;
                if member.is(TokenKind::Length) {
                    expr = Expr::ArrayLength {
                        array: Box::new(expr),
                    };
                } else {
                    let args = self.parse_arguments()?;
                    expr = Expr::MethodCall(MethodCall {
                        receiver: Box::new(expr),
                        method: Identifier::new(member),
                        args,
                    });
                }
            } else {
                return Ok(expr);
            }
        }
    }

    /// `(` (expr (`,` expr)*)? `)`
    fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(&[TokenKind::LParen])?;

        let mut args = Vec::new();
        if self.accept(&[TokenKind::RParen]).is_some() {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);
            if self.accept(&[TokenKind::Comma]).is_none() {
                break;
            }
        }

        self.expect(&[TokenKind::Comma, TokenKind::RParen])?;
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_expr(source: &str) -> Expr {
        let mut parser = Parser::new(source);
        let expr = match parser.parse_expression() {
            Ok(expr) => expr,
            Err(e) => panic!("Parse failed for {:?}: {}", source, e),
        };
        assert!(parser.is_at_end(), "trailing input in {:?}", source);
        expr
    }

    /// Fully parenthesized rendering of the tree shape.
    fn shape(expr: &Expr) -> String {
        match expr {
            Expr::BinaryOp { left, op, right } => {
                format!("({} {} {})", shape(left), op.text, shape(right))
            }
            Expr::UnaryOp { operand, .. } => format!("!{}", shape(operand)),
            Expr::ArrayAccess { array, index } => format!("{}[{}]", shape(array), shape(index)),
            Expr::ArrayLength { array } => format!("{}.length", shape(array)),
            Expr::NewObject { class_name, .. } => format!("new {}()", class_name.name()),
            Expr::NewArray {
                element_type,
                length,
                ..
            } => format!("new {}[{}]", element_type.name(), shape(length)),
            Expr::MethodCall(call) => {
                let args: Vec<String> = call.args.iter().map(shape).collect();
                format!(
                    "{}.{}({})",
                    shape(&call.receiver),
                    call.method.name(),
                    args.join(", ")
                )
            }
            Expr::IntLiteral(token) | Expr::BoolLiteral(token) | Expr::This(token) => {
                token.text.clone()
            }
            Expr::Identifier(ident) => ident.name().to_string(),
        }
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        match parse_expr("2 + 3 * 4") {
            Expr::BinaryOp { op, right, .. } => {
                assert_eq!(op.kind, TokenKind::Add);
                assert!(matches!(*right, Expr::BinaryOp { ref op, .. } if op.kind == TokenKind::Mul));
            }
            other => panic!("Expected BinaryOp, got {:?}", other),
        }
    }

    #[test]
    fn test_or_is_root_over_and() {
        match parse_expr("a && b || c") {
            Expr::BinaryOp { op, left, .. } => {
                assert_eq!(op.kind, TokenKind::Or);
                assert!(matches!(*left, Expr::BinaryOp { ref op, .. } if op.kind == TokenKind::And));
            }
            other => panic!("Expected BinaryOp, got {:?}", other),
        }
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(shape(&parse_expr("a - b - c")), "((a - b) - c)");
        assert_eq!(shape(&parse_expr("a / b * c % d")), "(((a / b) * c) % d)");
    }

    #[test]
    fn test_full_ladder() {
        assert_eq!(
            shape(&parse_expr("a || b && c == d < e + f * g")),
            "(a || (b && (c == (d < (e + (f * g))))))"
        );
        assert_eq!(
            shape(&parse_expr("a * b + c < d == e && f || g")),
            "((((((a * b) + c) < d) == e) && f) || g)"
        );
    }

    #[test]
    fn test_parentheses_reset_precedence() {
        assert_eq!(shape(&parse_expr("(a + b) * c")), "((a + b) * c)");
    }

    #[test]
    fn test_tail_chains() {
        assert_eq!(shape(&parse_expr("a[0].length")), "a[0].length");
        match parse_expr("a[0].length") {
            Expr::ArrayLength { array } => {
                assert!(matches!(*array, Expr::ArrayAccess { .. }));
            }
            other => panic!("Expected ArrayLength, got {:?}", other),
        }

        match parse_expr("a.b(1,2)[0]") {
            Expr::ArrayAccess { array, index } => {
                assert!(matches!(*index, Expr::IntLiteral(_)));
                match *array {
                    Expr::MethodCall(call) => {
                        assert_eq!(call.method.name(), "b");
                        assert_eq!(call.args.len(), 2);
                    }
                    other => panic!("Expected MethodCall, got {:?}", other),
                }
            }
            other => panic!("Expected ArrayAccess, got {:?}", other),
        }

        assert_eq!(
            shape(&parse_expr("a.b(x)[2].length")),
            "a.b(x)[2].length"
        );
    }

    #[test]
    fn test_unary_not_binds_to_prefix() {
        assert_eq!(shape(&parse_expr("!a && b")), "(!a && b)");
        assert_eq!(shape(&parse_expr("!!a")), "!!a");
        assert_eq!(shape(&parse_expr("!a[0]")), "!a[0]");
        match parse_expr("!a[0]") {
            Expr::ArrayAccess { array, .. } => {
                assert!(matches!(*array, Expr::UnaryOp { .. }));
            }
            other => panic!("Expected ArrayAccess, got {:?}", other),
        }
        match parse_expr("!(a[0])") {
            Expr::UnaryOp { operand, .. } => {
                assert!(matches!(*operand, Expr::ArrayAccess { .. }));
            }
            other => panic!("Expected UnaryOp, got {:?}", other),
        }
    }

    #[test]
    fn test_new_forms() {
        assert_eq!(shape(&parse_expr("new Foo()")), "new Foo()");
        assert_eq!(shape(&parse_expr("new int[n + 1]")), "new int[(n + 1)]");
        assert_eq!(shape(&parse_expr("new Foo[3]")), "new Foo[3]");
        assert_eq!(shape(&parse_expr("new Foo().run()")), "new Foo().run()");
        assert_eq!(shape(&parse_expr("new int[3].length")), "new int[3].length");
    }

    #[test]
    fn test_new_primitive_requires_brackets() {
        let err = Parser::new("new int()").parse_expression().unwrap_err();
        assert_eq!(err.expected, vec![TokenKind::LBracket]);
        assert_eq!(err.found, TokenKind::LParen);
    }

    #[test]
    fn test_method_call_arguments() {
        assert_eq!(shape(&parse_expr("this.f()")), "this.f()");
        assert_eq!(
            shape(&parse_expr("o.f(a + 1, g.h(), true)")),
            "o.f((a + 1), g.h(), true)"
        );
    }

    #[test]
    fn test_missing_operand() {
        let err = Parser::new("a + ;").parse_expression().unwrap_err();
        assert_eq!(err.found, TokenKind::Semicolon);
        assert_eq!(err.expected, TokenKind::EXPRESSION_START.to_vec());
        assert_eq!(err.location, SourceLocation::new(1, 5));
    }

    #[test]
    fn test_bad_member_after_dot() {
        let err = Parser::new("a.5").parse_expression().unwrap_err();
        assert_eq!(err.expected, vec![TokenKind::Length, TokenKind::Identifier]);
        assert_eq!(err.found_text, "5");
    }

    #[test]
    fn test_nesting_limit() {
        let shallow = format!("{}x{}", "(".repeat(100), ")".repeat(100));
        assert!(matches!(parse_expr(&shallow), Expr::Identifier(_)));

        let deep = format!("{}x{}", "(".repeat(500), ")".repeat(500));
        let err = Parser::new(&deep).parse_expression().unwrap_err();
        assert_eq!(err.found, TokenKind::LParen);
        assert!(err.expected.is_empty());
        assert!(err.message.contains("Nesting deeper than"));

        let nots = format!("{}x", "!".repeat(100_000));
        let err = Parser::new(&nots).parse_expression().unwrap_err();
        assert_eq!(err.found, TokenKind::Not);
    }
}
