// Integration tests for the MiniJava front end

use minijava::parser::ast::*;
use minijava::parser::lexer::{tokenize, LexErrorKind};
use minijava::parser::token::TokenKind;
use minijava::parser::{parse, ErrorPolicy, Parser};
use minijava::printer::print_program;
use std::fs;
use std::path::Path;

fn parse_ok(source: &str) -> Program {
    match parse(source, ErrorPolicy::FailFast) {
        Ok(program) => program,
        Err(diagnostics) => panic!("Parsing failed:\n{}", diagnostics),
    }
}

fn main_body(body: &str) -> Vec<Statement> {
    let source = format!("class Main {{ public static void main() {{ {} }} }}", body);
    parse_ok(&source).main_class.main_method.body
}

fn printed_value(body: &str) -> Expr {
    match main_body(body).remove(0) {
        Statement::Print { value, .. } => value,
        other => panic!("Expected Print, got {:?}", other),
    }
}

#[test]
fn test_sample_program() {
    let path = Path::new("demos/sample.java");
    let source = fs::read_to_string(path).expect("Failed to read sample program");

    let program = parse_ok(&source);
    assert_eq!(program.main_class.name.name(), "Foo");
    assert_eq!(program.main_class.main_method.body.len(), 6);

    let names: Vec<&str> = program.classes.iter().map(|c| c.name.name()).collect();
    assert_eq!(names, vec!["Bar", "Baz"]);

    let bar = &program.classes[0];
    let fields: Vec<&str> = bar.fields.iter().map(|f| f.name.name()).collect();
    assert_eq!(fields, vec!["a", "foo"]);
    let methods: Vec<&str> = bar.methods.iter().map(|m| m.name.name()).collect();
    assert_eq!(methods, vec!["init", "set", "get", "sum"]);

    let baz = &program.classes[1];
    assert_eq!(baz.parent.as_ref().map(|p| p.name()), Some("Bar"));
    assert_eq!(baz.location(), SourceLocation::new(44, 7));
}

#[test]
fn test_sample_program_round_trips() {
    let source = fs::read_to_string("demos/sample.java").expect("Failed to read sample program");
    let printed = print_program(&parse_ok(&source));
    let reprinted = print_program(&parse_ok(&printed));
    assert_eq!(printed, reprinted);
}

#[test]
fn test_leaf_tokens_match_source_text() {
    let source = fs::read_to_string("demos/sample.java").expect("Failed to read sample program");
    let lines: Vec<&str> = source.lines().collect();
    let lexed = tokenize(&source);
    assert!(lexed.errors.is_empty());

    for token in lexed.tokens.iter().filter(|t| !t.is(TokenKind::Eof)) {
        let line = lines[token.location.line - 1];
        let at: String = line
            .chars()
            .skip(token.location.column - 1)
            .take(token.text.chars().count())
            .collect();
        assert_eq!(at, token.text, "at {:?}", token.location);
    }
}

#[test]
fn test_precedence_shapes() {
    match printed_value("System.out.println(2 + 3 * 4);") {
        Expr::BinaryOp { op, right, .. } => {
            assert_eq!(op.kind, TokenKind::Add);
            match *right {
                Expr::BinaryOp { op, .. } => assert_eq!(op.kind, TokenKind::Mul),
                other => panic!("Expected BinaryOp, got {:?}", other),
            }
        }
        other => panic!("Expected BinaryOp, got {:?}", other),
    }

    match printed_value("System.out.println(a && b || c);") {
        Expr::BinaryOp { op, left, .. } => {
            assert_eq!(op.kind, TokenKind::Or);
            assert_eq!(left.kind(), minijava::parser::grammar::NodeKind::BinaryOp);
        }
        other => panic!("Expected BinaryOp, got {:?}", other),
    }
}

#[test]
fn test_statement_disambiguation() {
    let body = main_body("Foo x; Foo.bar(); x = 1; x y;");
    assert!(matches!(&body[0], Statement::VarDecl(d) if d.var_type.name() == "Foo"));
    assert!(matches!(&body[1], Statement::MethodCall(c) if c.method.name() == "bar"));
    assert!(matches!(&body[2], Statement::Assignment { .. }));
    assert!(
        matches!(&body[3], Statement::VarDecl(d) if d.var_type.name() == "x" && d.name.name() == "y")
    );
}

#[test]
fn test_tail_chaining() {
    match printed_value("System.out.println(a[0].length);") {
        Expr::ArrayLength { array } => match *array {
            Expr::ArrayAccess { array, index } => {
                assert!(matches!(*array, Expr::Identifier(ref id) if id.name() == "a"));
                assert!(matches!(*index, Expr::IntLiteral(ref t) if t.text == "0"));
            }
            other => panic!("Expected ArrayAccess, got {:?}", other),
        },
        other => panic!("Expected ArrayLength, got {:?}", other),
    }

    match printed_value("System.out.println(a.b(1,2)[0]);") {
        Expr::ArrayAccess { array, .. } => match *array {
            Expr::MethodCall(call) => {
                assert!(matches!(*call.receiver, Expr::Identifier(ref id) if id.name() == "a"));
                assert_eq!(call.method.name(), "b");
                assert_eq!(call.args.len(), 2);
            }
            other => panic!("Expected MethodCall, got {:?}", other),
        },
        other => panic!("Expected ArrayAccess, got {:?}", other),
    }
}

#[test]
fn test_malformed_parameter_list() {
    let main = "class Main { public static void main() { } }\n";
    let source = format!("{}class Foo {{ public int get( {{ return 1; }} }}", main);

    let diagnostics = parse(&source, ErrorPolicy::FailFast).unwrap_err();
    assert!(diagnostics.lexical.is_empty());
    assert_eq!(diagnostics.syntax.len(), 1);

    let err = &diagnostics.syntax[0];
    assert_eq!(err.found, TokenKind::LBrace);
    assert_eq!(err.found_text, "{");
    assert_eq!(err.location, SourceLocation::new(2, 29));
    assert!(err.expected.contains(&TokenKind::RParen));
    assert_eq!(
        err.to_string(),
        "Parse error at line 2, column 29: \
         Expected ')', 'int', 'boolean', 'void' or identifier, found '{'"
    );
}

#[test]
fn test_malformed_class_as_whole_program() {
    let err = Parser::new("class Foo { public int get( { return 1; } }")
        .parse_program()
        .unwrap_err();
    assert_eq!(err.expected, vec![TokenKind::Static]);
    assert_eq!(err.found, TokenKind::Int);
    assert_eq!(err.location, SourceLocation::new(1, 20));
}

#[test]
fn test_unterminated_comment_does_not_hang() {
    let source = "class Main { public static void main() { } }\n/* never closed";
    let lexed = tokenize(source);

    assert_eq!(lexed.tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    assert_eq!(
        lexed.tokens.iter().filter(|t| t.is(TokenKind::Eof)).count(),
        1
    );
    assert_eq!(lexed.errors.len(), 1);
    assert_eq!(lexed.errors[0].kind, LexErrorKind::UnterminatedComment);
    assert_eq!(lexed.errors[0].location, SourceLocation::new(2, 1));

    // The tree itself would be fine, but no partial success is reported
    let diagnostics = parse(source, ErrorPolicy::FailFast).unwrap_err();
    assert_eq!(diagnostics.lexical.len(), 1);
    assert!(diagnostics.syntax.is_empty());
}

#[test]
fn test_recovery_reports_errors_across_classes() {
    let source = "class Main { public static void main() { x = ; } }\n\
                  class A { int ; }\n\
                  class B { public int f() { return 1 } }\n\
                  class C { public int g() { return 2; } }";

    let strict = parse(source, ErrorPolicy::FailFast).unwrap_err();
    assert_eq!(strict.syntax.len(), 1);

    let recovered = parse(source, ErrorPolicy::Recover).unwrap_err();
    let lines: Vec<usize> = recovered.syntax.iter().map(|e| e.location.line).collect();
    assert_eq!(lines, vec![1, 2, 3]);
}

#[test]
fn test_recovery_with_clean_input_returns_tree() {
    let source = fs::read_to_string("demos/sample.java").expect("Failed to read sample program");
    let strict = parse_ok(&source);
    let recovered = parse(&source, ErrorPolicy::Recover).expect("clean input");
    assert_eq!(strict, recovered);
}

#[test]
fn test_diagnostics_display_lists_everything() {
    let source = "class Main { public static void main() { x = 1 # 2; } }";
    let diagnostics = parse(source, ErrorPolicy::FailFast).unwrap_err();
    assert_eq!(diagnostics.len(), 2);

    let rendered = diagnostics.to_string();
    let lines: Vec<&str> = rendered.lines().collect();
    assert!(lines[0].starts_with("Lexer error at line 1, column 48"));
    assert!(lines[1].starts_with("Parse error at line 1, column 48"));
}
