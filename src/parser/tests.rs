//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Function, struct and enum declarations
//! - Expressions, precedence and associativity
//! - Control flow statements
//! - Compound assignment desugaring
//! - Syntax errors

use std::rc::Rc;

use super::parser::parse;
use crate::{
    ast::{
        ast::{AstNode, Module, Node},
        expressions::{BinaryOperator, Expr, ExprWrapper},
        statements::{FnDeclStmt, Item, Stmt},
        types::TypeDecl,
    },
    errors::errors::{Error, ErrorImpl, ErrorKind},
    lexer::lexer::tokenize,
};

fn parse_source(source: &str) -> Result<Module, Error> {
    let tokens = tokenize(source, Some("test.v".to_string()))?;
    parse(tokens, Rc::new("test.v".to_string()))
}

fn parse_ok(source: &str) -> Module {
    parse_source(source).unwrap()
}

fn function(module: &Module, index: usize) -> &FnDeclStmt {
    match &module.items[index] {
        Item::FnDecl(decl) => decl,
        other => panic!("expected a function, got {:?}", other),
    }
}

/// Parses `body` inside `fn main() { ... }` and returns its statements.
fn body_of(body: &str) -> Vec<Stmt> {
    let module = parse_ok(&format!("fn main() {{\n{}\n}}\n", body));
    function(&module, 0).body.body.clone()
}

/// Parses a single expression statement.
fn expr_of(source: &str) -> ExprWrapper {
    match body_of(source).remove(0) {
        Stmt::Expression(stmt) => stmt.expression,
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

/// Renders an expression with explicit parentheses around every binary node.
fn shape(expr: &ExprWrapper) -> String {
    match &expr.expr {
        Expr::Number(number) => number.value.to_string(),
        Expr::Symbol(symbol) => symbol.value.clone(),
        Expr::Boolean(boolean) => boolean.value.to_string(),
        Expr::Binary(binary) => format!(
            "({} {} {})",
            shape(&binary.left),
            binary.operator,
            shape(&binary.right)
        ),
        Expr::Call(call) => format!(
            "{}({})",
            shape(&call.callee),
            call.arguments.iter().map(shape).collect::<Vec<_>>().join(", ")
        ),
        Expr::Index(index) => format!("{}[{}]", shape(&index.base), shape(&index.index)),
        Expr::Member(member) => format!("{}.{}", shape(&member.base), member.member),
        Expr::In(in_expr) => format!("({} in {})", shape(&in_expr.item), shape(&in_expr.collection)),
        Expr::Array(array) => format!(
            "[{}]",
            array.elements.iter().map(shape).collect::<Vec<_>>().join(", ")
        ),
        Expr::Temp(temp) => format!("$t{}", temp.id),
        Expr::String(string) => format!("{:?}", string.value),
        Expr::Char(character) => format!("`{}`", character.value),
    }
}

#[test]
fn test_parse_empty_program() {
    let module = parse_ok("");
    assert!(module.items.is_empty());
}

#[test]
fn test_blank_lines_between_items() {
    let module = parse_ok("\n\nmodule main\n\nimport os\n\n\nfn main() {\n}\n\n");

    assert_eq!(module.items.len(), 3);
    assert!(matches!(&module.items[0], Item::Module(m) if m.name == "main"));
    assert!(matches!(&module.items[1], Item::Import(i) if i.name == "os"));
    assert_eq!(function(&module, 2).identifier, "main");
}

#[test]
fn test_parse_function_declaration() {
    let module = parse_ok("fn add(a int, b mut int, c ?[]byte) int {\n return a + b\n}\n");
    let decl = function(&module, 0);

    assert_eq!(decl.identifier, "add");
    assert_eq!(decl.parameters.len(), 3);
    assert_eq!(decl.parameters[0].name, "a");
    assert!(!decl.parameters[0].is_mutable);
    assert!(decl.parameters[1].is_mutable);
    assert!(!decl.parameters[1].is_optional);
    assert!(decl.parameters[2].is_optional);
    assert_eq!(decl.parameters[2].ty.to_string(), "[]byte");
    assert_eq!(decl.return_types.len(), 1);
    assert_eq!(decl.return_types[0].to_string(), "int");
    assert_eq!(decl.body.body.len(), 1);
}

#[test]
fn test_function_without_parameters_or_returns() {
    let module = parse_ok("fn main() {\n}\n");
    let decl = function(&module, 0);

    assert!(decl.parameters.is_empty());
    assert!(decl.return_types.is_empty());
    assert!(decl.body.body.is_empty());
}

#[test]
fn test_multiple_return_types() {
    let module = parse_ok("fn pair() (int, map[string]&User) {\n}\n");
    let types: Vec<String> = function(&module, 0)
        .return_types
        .iter()
        .map(|t| t.to_string())
        .collect();

    assert_eq!(types, vec!["int", "map[string]&User"]);
}

#[test]
fn test_return_list_must_open_with_a_name() {
    let error = parse_source("fn pair() ([]int, int) {\n}\n").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_error_kind(), ErrorKind::Syntax);
}

#[test]
fn test_parse_struct_definition() {
    let module = parse_ok("struct User {\n\n  name string\n  age int\n  Base\n  &Node\n}\n");

    let decl = match &module.items[0] {
        Item::StructDecl(decl) => decl,
        other => panic!("expected a struct, got {:?}", other),
    };
    assert_eq!(decl.name, "User");
    let fields: Vec<(String, String)> = decl
        .fields
        .iter()
        .map(|f| (f.name.clone(), f.ty.to_string()))
        .collect();
    assert_eq!(
        fields,
        vec![
            ("name".to_string(), "string".to_string()),
            ("age".to_string(), "int".to_string()),
            (String::new(), "Base".to_string()),
            (String::new(), "&Node".to_string()),
        ]
    );
    assert!(decl.fields[2].is_embedded());
}

#[test]
fn test_empty_struct_and_enum() {
    let module = parse_ok("struct Empty {}\nenum Nothing {}\n");

    assert!(matches!(&module.items[0], Item::StructDecl(s) if s.fields.is_empty()));
    assert!(matches!(&module.items[1], Item::EnumDecl(e) if e.name == "Nothing" && e.members.is_empty()));
}

#[test]
fn test_parse_enum_definition() {
    let module = parse_ok("enum Color {\n  red\n\n  green\n  blue\n}\n");

    match &module.items[0] {
        Item::EnumDecl(decl) => {
            assert_eq!(decl.name, "Color");
            assert_eq!(decl.members, vec!["red", "green", "blue"]);
        }
        other => panic!("expected an enum, got {:?}", other),
    }
}

#[test]
fn test_parse_variable_declarations() {
    let stmts = body_of("x := 42\nmut y := x");

    match (&stmts[0], &stmts[1]) {
        (Stmt::VarDecl(x), Stmt::VarDecl(y)) => {
            assert_eq!(x.identifier, "x");
            assert!(!x.is_mutable);
            assert_eq!(shape(&x.value), "42");
            assert_eq!(y.identifier, "y");
            assert!(y.is_mutable);
        }
        other => panic!("expected two declarations, got {:?}", other),
    }
}

#[test]
fn test_blank_lines_produce_no_statement() {
    assert_eq!(body_of("\n\na := 1\n\n\nb := 2\n\n").len(), 2);
}

#[test]
fn test_multiplication_binds_tighter() {
    assert_eq!(shape(&expr_of("1 + 2 * 3")), "(1 + (2 * 3))");
}

#[test]
fn test_subtraction_is_left_associative() {
    assert_eq!(shape(&expr_of("1 - 2 - 3")), "((1 - 2) - 3)");
}

#[test]
fn test_logical_or_is_loosest() {
    assert_eq!(
        shape(&expr_of("a && b || c && d")),
        "((a && b) || (c && d))"
    );
}

#[test]
fn test_precedence_ladder() {
    assert_eq!(
        shape(&expr_of("a | b ^ c & d == e < f << g + h * i")),
        "(a | (b ^ (c & (d == (e < (f << (g + (h * i))))))))"
    );
}

#[test]
fn test_equality_below_relational() {
    assert_eq!(shape(&expr_of("a < b == c > d")), "((a < b) == (c > d))");
}

#[test]
fn test_parentheses_are_transparent() {
    let expr = expr_of("(1 + 2) * 3");

    assert_eq!(shape(&expr), "((1 + 2) * 3)");
    match &expr.expr {
        Expr::Binary(binary) => {
            assert_eq!(binary.operator, BinaryOperator::Multiply);
            assert!(matches!(binary.left.expr, Expr::Binary(_)));
        }
        other => panic!("expected a binary expression, got {:?}", other),
    }
}

#[test]
fn test_postfix_forms() {
    assert_eq!(shape(&expr_of("a.b[1](x, y).c")), "a.b[1](x, y).c");
    assert_eq!(shape(&expr_of("f()")), "f()");
}

#[test]
fn test_postfix_binds_tighter_than_binary() {
    assert_eq!(shape(&expr_of("a + b[0] * c.d")), "(a + (b[0] * c.d))");
}

#[test]
fn test_membership_test() {
    assert_eq!(shape(&expr_of("x in items && ok")), "((x in items) && ok)");
}

#[test]
fn test_literals() {
    assert_eq!(shape(&expr_of("[1, true, false]")), "[1, true, false]");
    assert_eq!(shape(&expr_of("[]")), "[]");
    assert_eq!(shape(&expr_of("'hi'")), "\"hi\"");
    assert_eq!(shape(&expr_of("`c`")), "`c`");
}

#[test]
fn test_number_too_large_for_u128() {
    let error = parse_source("fn main() {\n x := 999999999999999999999999999999999999999999\n}\n")
        .unwrap_err();

    assert_eq!(error.get_error_name(), "NumberParseError");
    assert_eq!(error.get_error_kind(), ErrorKind::Syntax);
    assert_eq!(error.get_line(), 2);
}

#[test]
fn test_parse_if_else() {
    let stmts = body_of("if a < b {\n x := 1\n} else {\n x := 2\n}");

    match &stmts[0] {
        Stmt::If(stmt) => {
            assert_eq!(shape(&stmt.condition), "(a < b)");
            assert_eq!(stmt.then_body.body.len(), 1);
            assert_eq!(stmt.else_body.as_ref().map(|b| b.body.len()), Some(1));
        }
        other => panic!("expected an if statement, got {:?}", other),
    }
}

#[test]
fn test_else_must_follow_closing_brace() {
    let error = parse_source("fn main() {\nif a {\n}\nelse {\n}\n}\n").unwrap_err();

    assert_eq!(error.get_error_kind(), ErrorKind::Syntax);
    assert_eq!(error.get_line(), 4);
}

#[test]
fn test_parse_for_forms() {
    let stmts = body_of("for {\n break\n}\nfor x in xs {\n continue\n}\nfor k, v in m {\n}");

    assert!(matches!(&stmts[0], Stmt::Forever(f) if matches!(f.body.body[0], Stmt::Break(_))));
    match &stmts[1] {
        Stmt::ForEach(stmt) => {
            assert_eq!(stmt.binding, "x");
            assert_eq!(shape(&stmt.iterable), "xs");
            assert!(matches!(stmt.body.body[0], Stmt::Continue(_)));
        }
        other => panic!("expected a for-each, got {:?}", other),
    }
    match &stmts[2] {
        Stmt::ForEachPair(stmt) => {
            assert_eq!(stmt.first, "k");
            assert_eq!(stmt.second, "v");
            assert_eq!(shape(&stmt.iterable), "m");
        }
        other => panic!("expected a two-binding for, got {:?}", other),
    }
}

#[test]
fn test_parse_return_forms() {
    let module = parse_ok("fn f() (int, int) {\n return 1, 2\n}\nfn g() {\n return\n}\n");

    assert!(matches!(&function(&module, 0).body.body[0], Stmt::Return(r) if r.values.len() == 2));
    assert!(matches!(&function(&module, 1).body.body[0], Stmt::Return(r) if r.values.is_empty()));
}

#[test]
fn test_defer_assert_and_nested_block() {
    let stmts = body_of("defer close(f)\nassert x == 1\n{\n y := 2\n}");

    assert!(matches!(&stmts[0], Stmt::Defer(d) if shape(&d.expression) == "close(f)"));
    assert!(matches!(&stmts[1], Stmt::Assert(a) if shape(&a.condition) == "(x == 1)"));
    assert!(matches!(&stmts[2], Stmt::Block(b) if b.body.len() == 1));
}

#[test]
fn test_parse_assignment_targets() {
    let stmts = body_of("x = 1\na[0] = 2\np.name = 3");

    let targets: Vec<String> = stmts
        .iter()
        .map(|stmt| match stmt {
            Stmt::Assign(assign) => shape(&assign.assignee),
            other => panic!("expected an assignment, got {:?}", other),
        })
        .collect();
    assert_eq!(targets, vec!["x", "a[0]", "p.name"]);
}

#[test]
fn test_assignment_to_call_is_rejected() {
    let error = parse_source("fn main() {\n f() = 1\n}\n").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_declaration_needs_identifier() {
    let error = parse_source("fn main() {\n a.b := 1\n}\n").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_compound_assignment_desugars_through_temporary() {
    let stmts = body_of("x += 5");

    match &stmts[0] {
        Stmt::CompoundAssign(stmt) => {
            assert_eq!(stmt.operator, BinaryOperator::Add);
            assert_eq!(shape(&stmt.temp.target), "x");
            assert_eq!(
                shape(&stmt.assignment.assignee),
                format!("$t{}", stmt.temp.id)
            );
            assert_eq!(
                shape(&stmt.assignment.value),
                format!("($t{} + 5)", stmt.temp.id)
            );
        }
        other => panic!("expected a compound assignment, got {:?}", other),
    }
}

#[test]
fn test_every_compound_operator() {
    let cases = [
        ("+=", BinaryOperator::Add),
        ("-=", BinaryOperator::Subtract),
        ("*=", BinaryOperator::Multiply),
        ("/=", BinaryOperator::Divide),
        ("%=", BinaryOperator::Modulo),
        ("&=", BinaryOperator::BitwiseAnd),
        ("|=", BinaryOperator::BitwiseOr),
        ("^=", BinaryOperator::BitwiseXor),
        ("<<=", BinaryOperator::ShiftLeft),
        (">>=", BinaryOperator::ShiftRight),
    ];

    for (token, operator) in cases {
        let stmts = body_of(&format!("x {} 1", token));
        assert!(
            matches!(&stmts[0], Stmt::CompoundAssign(c) if c.operator == operator),
            "{} did not desugar to {}",
            token,
            operator
        );
    }
}

#[test]
fn test_compound_assignment_evaluates_target_once() {
    let module = parse_ok("fn main() {\n a[side_effect()] += 1\n}\n");

    let mut calls = 0;
    Node::Module(&module).walk(&mut |node| {
        if let Node::Expr(expr) = node {
            if matches!(&expr.expr, Expr::Call(call) if call.callee.as_symbol() == Some("side_effect")) {
                calls += 1;
            }
        }
    });

    assert_eq!(calls, 1);
}

#[test]
fn test_temporaries_are_fresh() {
    let stmts = body_of("x += 1\ny -= 2");

    let ids: Vec<usize> = stmts
        .iter()
        .map(|stmt| match stmt {
            Stmt::CompoundAssign(c) => c.temp.id,
            other => panic!("expected a compound assignment, got {:?}", other),
        })
        .collect();
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn test_parsing_is_deterministic() {
    let source = "struct P {\n x int\n}\nfn main(p P) int {\n a := [1, 2]\n a[0] += p.x\n return a[0]\n}\n";

    assert_eq!(parse_ok(source), parse_ok(source));
}

#[test]
fn test_statement_needs_newline() {
    let error = parse_source("fn main() {\n x := 1 y := 2\n}\n").unwrap_err();

    assert_eq!(error.get_error_kind(), ErrorKind::Syntax);
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedToken {
            token: "y".to_string()
        }
    );
}

#[test]
fn test_top_level_statement_is_rejected() {
    let error = parse_source("x := 1\n").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.get_line(), 1);
}

#[test]
fn test_unclosed_block() {
    let error = parse_source("fn main() {\n x := 1\n").unwrap_err();
    assert_eq!(error.get_error_kind(), ErrorKind::Syntax);
}

#[test]
fn test_type_declarations() {
    let module = parse_ok("fn f(a [][]int, b &map[string][]&User) {\n}\n");
    let decl = function(&module, 0);

    assert!(matches!(&decl.parameters[0].ty, TypeDecl::Array(_)));
    assert_eq!(decl.parameters[0].ty.to_string(), "[][]int");
    assert!(matches!(&decl.parameters[1].ty, TypeDecl::Reference(_)));
    assert_eq!(decl.parameters[1].ty.to_string(), "&map[string][]&User");
}

#[test]
fn test_children_follow_field_order() {
    let stmts = body_of("x := a + 1");
    let names: Vec<&str> = stmts[0].children().iter().map(|(name, _)| *name).collect();

    assert_eq!(stmts[0].node_name(), "VarDeclStmt");
    assert_eq!(names, vec!["mutable", "name", "value"]);
}

#[test]
fn test_declaration_needs_bare_name() {
    let error = parse_source("fn main() {\n    (x) := 1\n}\n").unwrap_err();

    assert_eq!(error.get_error_kind(), ErrorKind::Syntax);
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_line(), 2);

    let error = parse_source("fn main() {\n    a[0] := 1\n}\n").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");

    match &body_of("x := 1")[0] {
        Stmt::VarDecl(decl) => {
            assert_eq!(decl.identifier, "x");
            assert!(!decl.is_mutable);
            assert_eq!(decl.span.start.line, 2);
        }
        other => panic!("expected a declaration, got {:?}", other),
    }
}

#[test]
fn test_module_span_names_source() {
    let module = parse_ok("fn main() {\n}\n");

    assert_eq!(module.span.start.file.as_str(), "test.v");
    assert_eq!(module.span.start.line, 1);
}
