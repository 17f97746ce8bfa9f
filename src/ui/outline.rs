//! Flattened, indented view of a syntax tree for the tree pane

use crate::parser::ast::*;

/// One row of the outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub depth: usize,
    pub label: String,
    pub location: SourceLocation,
}

/// Walk `program` depth-first, one row per node, in source order.
pub fn outline(program: &Program) -> Vec<TreeLine> {
    let mut builder = OutlineBuilder::default();
    builder.program(program);
    builder.lines
}

fn type_name(ty: &Type) -> String {
    if ty.is_array {
        format!("{}[]", ty.name())
    } else {
        ty.name().to_string()
    }
}

#[derive(Default)]
struct OutlineBuilder {
    lines: Vec<TreeLine>,
}

impl OutlineBuilder {
    fn push(&mut self, depth: usize, label: String, location: SourceLocation) {
        self.lines.push(TreeLine {
            depth,
            label,
            location,
        });
    }

    fn program(&mut self, program: &Program) {
        let main = &program.main_class;
        self.push(0, format!("class {} (main)", main.name.name()), main.name.location());
        self.method(1, &main.main_method, "static method");

        for class in &program.classes {
            let label = match &class.parent {
                Some(parent) => format!("class {} extends {}", class.name.name(), parent.name()),
                None => format!("class {}", class.name.name()),
            };
            self.push(0, label, class.location());

            for field in &class.fields {
                self.push(
                    1,
                    format!("field {} {}", type_name(&field.var_type), field.name.name()),
                    field.location(),
                );
            }
            for method in &class.methods {
                self.method(1, method, "method");
            }
        }
    }

    fn method(&mut self, depth: usize, method: &MethodDecl, keyword: &str) {
        let params: Vec<String> = method
            .params
            .iter()
            .map(|p| format!("{} {}", type_name(&p.param_type), p.name.name()))
            .collect();
        self.push(
            depth,
            format!(
                "{} {} {}({})",
                keyword,
                type_name(&method.return_type),
                method.name.name(),
                params.join(", ")
            ),
            method.location(),
        );
        for statement in &method.body {
            self.statement(depth + 1, statement);
        }
    }

    fn statement(&mut self, depth: usize, statement: &Statement) {
        let location = statement.location();
        match statement {
            Statement::Block { statements, .. } => {
                self.push(depth, "block".to_string(), location);
                for inner in statements {
                    self.statement(depth + 1, inner);
                }
            }
            Statement::VarDecl(decl) => self.push(
                depth,
                format!("var {} {}", type_name(&decl.var_type), decl.name.name()),
                location,
            ),
            Statement::Assignment { target, value, .. } => {
                self.push(depth, "assign".to_string(), location);
                self.expression(depth + 1, target);
                self.expression(depth + 1, value);
            }
            Statement::Print { value, .. } => {
                self.push(depth, "println".to_string(), location);
                self.expression(depth + 1, value);
            }
            Statement::Assert { condition, .. } => {
                self.push(depth, "assert".to_string(), location);
                self.expression(depth + 1, condition);
            }
            Statement::Return { value, .. } => {
                self.push(depth, "return".to_string(), location);
                self.expression(depth + 1, value);
            }
            Statement::MethodCall(call) => {
                self.push(depth, "call statement".to_string(), location);
                self.call(depth + 1, call);
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.push(depth, "if".to_string(), location);
                self.expression(depth + 1, condition);
                self.statement(depth + 1, then_branch);
                if let Some(else_branch) = else_branch {
                    self.push(depth, "else".to_string(), else_branch.location());
                    self.statement(depth + 1, else_branch);
                }
            }
            Statement::While {
                condition, body, ..
            } => {
                self.push(depth, "while".to_string(), location);
                self.expression(depth + 1, condition);
                self.statement(depth + 1, body);
            }
        }
    }

    fn call(&mut self, depth: usize, call: &MethodCall) {
        self.push(
            depth,
            format!("call .{}", call.method.name()),
            call.method.location(),
        );
        self.expression(depth + 1, &call.receiver);
        for arg in &call.args {
            self.expression(depth + 1, arg);
        }
    }

    fn expression(&mut self, depth: usize, expr: &Expr) {
        let location = expr.location();
        match expr {
            Expr::BinaryOp { left, op, right } => {
                self.push(depth, format!("binary {}", op.text), op.location);
                self.expression(depth + 1, left);
                self.expression(depth + 1, right);
            }
            Expr::UnaryOp { op, operand } => {
                self.push(depth, format!("unary {}", op.text), location);
                self.expression(depth + 1, operand);
            }
            Expr::ArrayAccess { array, index } => {
                self.push(depth, "index".to_string(), location);
                self.expression(depth + 1, array);
                self.expression(depth + 1, index);
            }
            Expr::ArrayLength { array } => {
                self.push(depth, "length".to_string(), location);
                self.expression(depth + 1, array);
            }
            Expr::NewObject { class_name, .. } => {
                self.push(depth, format!("new {}()", class_name.name()), location)
            }
            Expr::NewArray {
                element_type,
                length,
                ..
            } => {
                self.push(depth, format!("new {}[]", element_type.name()), location);
                self.expression(depth + 1, length);
            }
            Expr::MethodCall(call) => self.call(depth, call),
            Expr::IntLiteral(token) => self.push(depth, format!("int {}", token.text), location),
            Expr::BoolLiteral(token) => {
                self.push(depth, format!("boolean {}", token.text), location)
            }
            Expr::Identifier(ident) => {
                self.push(depth, format!("ident {}", ident.name()), location)
            }
            Expr::This(_) => self.push(depth, "this".to_string(), location),
        }
    }
}
