//! Pretty-printer for the MiniJava AST
//!
//! The output is valid MiniJava: parsing it again gives a tree with the same
//! shape. Every binary and unary operation is printed inside parentheses, so
//! grouping never depends on the reader knowing the precedence table.
//! Indentation is four spaces; fields are listed before methods.

use crate::parser::ast::*;

const INDENT: &str = "    ";

/// Render a whole program.
pub fn print_program(program: &Program) -> String {
    let mut printer = Printer::default();
    printer.main_class(&program.main_class);
    for class in &program.classes {
        printer.blank_line();
        printer.class(class);
    }
    printer.out
}

/// Render one statement at indentation level `depth`.
pub fn print_statement(statement: &Statement, depth: usize) -> String {
    let mut printer = Printer {
        depth,
        ..Printer::default()
    };
    printer.statement(statement);
    printer.out
}

/// Render an expression on a single line.
pub fn print_expression(expr: &Expr) -> String {
    match expr {
        Expr::BinaryOp { left, op, right } => format!(
            "({} {} {})",
            print_expression(left),
            op.text,
            print_expression(right)
        ),
        Expr::UnaryOp { op, operand } => {
            let inner = print_expression(operand);
            match **operand {
                // `!a[0]` would index the negation
                Expr::ArrayAccess { .. } | Expr::ArrayLength { .. } | Expr::MethodCall(_) => {
                    format!("({}({}))", op.text, inner)
                }
                _ => format!("({}{})", op.text, inner),
            }
        }
        Expr::ArrayAccess { array, index } => {
            format!("{}[{}]", print_expression(array), print_expression(index))
        }
        Expr::ArrayLength { array } => format!("{}.length", print_expression(array)),
        Expr::NewObject { class_name, .. } => format!("new {}()", class_name.name()),
        Expr::NewArray {
            element_type,
            length,
            ..
        } => format!("new {}[{}]", element_type.name(), print_expression(length)),
        Expr::MethodCall(call) => print_call(call),
        Expr::IntLiteral(token) | Expr::BoolLiteral(token) | Expr::This(token) => {
            token.text.clone()
        }
        Expr::Identifier(ident) => ident.name().to_string(),
    }
}

fn print_call(call: &MethodCall) -> String {
    let args: Vec<String> = call.args.iter().map(print_expression).collect();
    format!(
        "{}.{}({})",
        print_expression(&call.receiver),
        call.method.name(),
        args.join(", ")
    )
}

fn print_type(ty: &Type) -> String {
    if ty.is_array {
        format!("{}[]", ty.name())
    } else {
        ty.name().to_string()
    }
}

#[derive(Default)]
struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank_line(&mut self) {
        self.out.push('\n');
    }

    fn indented(&mut self, f: impl FnOnce(&mut Self)) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    fn main_class(&mut self, main_class: &MainClass) {
        self.line(&format!("class {} {{", main_class.name.name()));
        self.indented(|p| {
            let method = &main_class.main_method;
            p.line(&format!(
                "public static {} {}() {{",
                print_type(&method.return_type),
                method.name.name()
            ));
            p.indented(|p| p.statements(&method.body));
            p.line("}");
        });
        self.line("}");
    }

    fn class(&mut self, class: &ClassDecl) {
        let header = match &class.parent {
            Some(parent) => format!("class {} extends {} {{", class.name.name(), parent.name()),
            None => format!("class {} {{", class.name.name()),
        };
        self.line(&header);
        self.indented(|p| {
            for field in &class.fields {
                p.var_decl(field);
            }
            for (i, method) in class.methods.iter().enumerate() {
                if i > 0 || !class.fields.is_empty() {
                    p.blank_line();
                }
                p.method(method);
            }
        });
        self.line("}");
    }

    fn method(&mut self, method: &MethodDecl) {
        let params: Vec<String> = method
            .params
            .iter()
            .map(|param| format!("{} {}", print_type(&param.param_type), param.name.name()))
            .collect();
        self.line(&format!(
            "public {} {}({}) {{",
            print_type(&method.return_type),
            method.name.name(),
            params.join(", ")
        ));
        self.indented(|p| p.statements(&method.body));
        self.line("}");
    }

    fn var_decl(&mut self, decl: &VarDecl) {
        self.line(&format!("{} {};", print_type(&decl.var_type), decl.name.name()));
    }

    fn statements(&mut self, statements: &[Statement]) {
        for statement in statements {
            self.statement(statement);
        }
    }

    fn statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Block { statements, .. } => {
                self.line("{");
                self.indented(|p| p.statements(statements));
                self.line("}");
            }
            Statement::VarDecl(decl) => self.var_decl(decl),
            Statement::Assignment { target, value, .. } => self.line(&format!(
                "{} = {};",
                print_expression(target),
                print_expression(value)
            )),
            Statement::Print { value, .. } => {
                self.line(&format!("System.out.println({});", print_expression(value)))
            }
            Statement::Assert { condition, .. } => {
                self.line(&format!("assert({});", print_expression(condition)))
            }
            Statement::Return { value, .. } => {
                self.line(&format!("return {};", print_expression(value)))
            }
            Statement::MethodCall(call) => self.line(&format!("{};", print_call(call))),
            Statement::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.line(&format!("if ({})", print_expression(condition)));
                self.branch(then_branch);
                if let Some(else_branch) = else_branch {
                    self.line("else");
                    self.branch(else_branch);
                }
            }
            Statement::While {
                condition, body, ..
            } => {
                self.line(&format!("while ({})", print_expression(condition)));
                self.branch(body);
            }
        }
    }

    /// Body of `if`/`else`/`while`: blocks stay level with the keyword,
    /// anything else is indented under it.
    fn branch(&mut self, statement: &Statement) {
        match statement {
            Statement::Block { .. } => self.statement(statement),
            _ => self.indented(|p| p.statement(statement)),
        }
    }
}
