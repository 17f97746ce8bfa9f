//! Declaration parsing implementation
//!
//! This module handles the class-level structure of a MiniJava program:
//!
//! - The main class and its `public static` entry method
//! - Class definitions with an optional `extends` clause
//! - Fields and methods inside a class body
//! - Types (primitive or class name, optionally `[]`) and parameter lists
//!
//! # Grammar
//!
//! ```text
//! program     ::= main_class class* EOF
//! main_class  ::= "class" identifier "{" main_method "}"
//! main_method ::= "public" "static" type identifier "(" ")" "{" statement* "}"
//! class       ::= "class" identifier ("extends" identifier)? "{" (method | field)* "}"
//! method      ::= "public" type identifier "(" params ")" "{" statement* "}"
//! field       ::= type identifier ";"
//! params      ::= (type identifier ("," type identifier)*)?
//! type        ::= ("int" | "boolean" | "void" | identifier) ("[" "]")?
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::grammar::{first_set, follow_set, NodeKind};
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::{Token, TokenKind};

impl Parser {
    /// Parse the whole compilation unit.
    ///
    /// Yields `None` only in recovery mode, when the main class itself was
    /// broken; the recorded errors then describe why.
    pub(crate) fn parse_program_inner(&mut self) -> Result<Option<Program>, ParseError> {
        let start = self.position;
        let main_class = match self.parse_main_class() {
            Ok(main_class) => Some(main_class),
            Err(err) => {
                self.recover(err)?;
                self.synchronize_class(start);
                None
            }
        };

        let mut classes = Vec::new();
        while self.check(TokenKind::Class) {
            let start = self.position;
            match self.parse_class() {
                Ok(class) => classes.push(class),
                Err(err) => {
                    self.recover(err)?;
                    self.synchronize_class(start);
                }
            }
        }

        self.expect(follow_set(NodeKind::Class))?;

        Ok(main_class.map(|main_class| Program {
            main_class,
            classes,
        }))
    }

    pub(crate) fn parse_main_class(&mut self) -> Result<MainClass, ParseError> {
        self.expect(&[TokenKind::Class])?;
        let name = self.expect_identifier()?;
        self.expect(&[TokenKind::LBrace])?;
        let main_method = self.parse_main_method()?;
        self.expect(&[TokenKind::RBrace])?;

        Ok(MainClass { name, main_method })
    }

    fn parse_main_method(&mut self) -> Result<MethodDecl, ParseError> {
        self.expect(&[TokenKind::Public])?;
        self.expect(&[TokenKind::Static])?;
        let return_type = self.parse_type()?;
        let name = self.expect_identifier()?;
        self.expect(&[TokenKind::LParen])?;
        self.expect(&[TokenKind::RParen])?;
        let body = self.parse_body()?;

        Ok(MethodDecl {
            return_type,
            name,
            params: Vec::new(),
            body,
        })
    }

    pub(crate) fn parse_class(&mut self) -> Result<ClassDecl, ParseError> {
        self.expect(&[TokenKind::Class])?;
        let name = self.expect_identifier()?;

        let parent = match self.accept(&[TokenKind::Extends]) {
            Some(_) => Some(self.expect_identifier()?),
            None => None,
        };

        self.expect(&[TokenKind::LBrace])?;

        let mut fields = Vec::new();
        let mut methods = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            // A leading `public` is the only thing telling a method from a field
            if self.check(TokenKind::Public) {
                methods.push(self.parse_method()?);
            } else {
                fields.push(self.parse_field()?);
            }
        }

        self.expect(&[TokenKind::RBrace])?;

        Ok(ClassDecl {
            name,
            parent,
            fields,
            methods,
        })
    }

    pub(crate) fn parse_method(&mut self) -> Result<MethodDecl, ParseError> {
        self.expect(&[TokenKind::Public])?;
        let return_type = self.parse_type()?;
        let name = self.expect_identifier()?;
        self.expect(&[TokenKind::LParen])?;
        let params = self.parse_param_list()?;
        let body = self.parse_body()?;

        Ok(MethodDecl {
            return_type,
            name,
            params,
            body,
        })
    }

    fn parse_field(&mut self) -> Result<VarDecl, ParseError> {
        let var_type = self.parse_type_from(first_set(NodeKind::Field))?;
        let name = self.expect_identifier()?;
        self.expect(&[TokenKind::Semicolon])?;
        Ok(VarDecl { var_type, name })
    }

    /// Parse the parameters after `(`, including the closing `)`.
    fn parse_param_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut opening: Vec<TokenKind> = vec![TokenKind::RParen];
        opening.extend_from_slice(first_set(NodeKind::Param));

        let first = self.expect(&opening)?;
        if first.is(TokenKind::RParen) {
            return Ok(Vec::new());
        }

        let mut params = vec![self.finish_param(first)?];
        while self.accept(&[TokenKind::Comma]).is_some() {
            let base = self.expect(first_set(NodeKind::Param))?;
            params.push(self.finish_param(base)?);
        }

        self.expect(&[TokenKind::Comma, TokenKind::RParen])?;
        Ok(params)
    }

    fn finish_param(&mut self, base: Token) -> Result<Param, ParseError> {
        let param_type = self.parse_array_suffix(base)?;
        let name = self.expect_identifier()?;
        Ok(Param { param_type, name })
    }

    /// `{` statement* `}` of a method.
    fn parse_body(&mut self) -> Result<Vec<Statement>, ParseError> {
        self.expect(&[TokenKind::LBrace])?;
        self.parse_statement_list()
    }

    pub(crate) fn parse_type(&mut self) -> Result<Type, ParseError> {
        self.parse_type_from(first_set(NodeKind::Type))
    }

    /// Parse a type whose base must be one of `bases`.
    pub(crate) fn parse_type_from(&mut self, bases: &[TokenKind]) -> Result<Type, ParseError> {
        let base = self.expect(bases)?;
        self.parse_array_suffix(base)
    }

    fn parse_array_suffix(&mut self, base: Token) -> Result<Type, ParseError> {
        let ty = Type::new(base);
        if self.accept(&[TokenKind::LBracket]).is_some() {
            self.expect(&[TokenKind::RBracket])?;
            return Ok(ty.with_array());
        }
        Ok(ty)
    }
}
