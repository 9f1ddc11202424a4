//! Parser tests for statements, precedence, and primaries.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use tao_ir::{
    BinaryOp, Expr, ExprKind, FunctionBody, Literal, Name, Program, StmtKind, UnaryOp, UpdateOp,
};

use crate::parse_source;

fn parse_ok(source: &str) -> Program {
    parse_source(source).expect("parse failed")
}

/// Parse a single expression statement and return its expression.
fn parse_expr(source: &str) -> Expr {
    let program = parse_ok(&format!("{source};"));
    assert_eq!(program.stmts.len(), 1);
    match program.stmts.into_iter().next().unwrap().kind {
        StmtKind::Expr(expr) => expr,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

fn binary_op(expr: &Expr) -> BinaryOp {
    match &expr.kind {
        ExprKind::Binary { op, .. } => *op,
        other => panic!("expected binary expression, got {other:?}"),
    }
}

fn binary_parts(expr: &Expr) -> (&Expr, BinaryOp, &Expr) {
    match &expr.kind {
        ExprKind::Binary { left, op, right } => (left, *op, right),
        other => panic!("expected binary expression, got {other:?}"),
    }
}

#[test]
fn test_var_definition_with_and_without_init() {
    let program = parse_ok("var x; let y = 5;");
    assert_eq!(program.stmts.len(), 2);
    assert!(matches!(
        &program.stmts[0].kind,
        StmtKind::VarDef { name, init: None } if name.as_str() == "x"
    ));
    let StmtKind::VarDef { init: Some(init), .. } = &program.stmts[1].kind else {
        panic!("expected var definition");
    };
    assert_eq!(init.kind, ExprKind::Literal(Literal::Number(5)));
}

#[test]
fn test_name_assignment_is_statement() {
    let program = parse_ok("x = 5;");
    assert!(matches!(
        &program.stmts[0].kind,
        StmtKind::VarAssign { name, .. } if name.as_str() == "x"
    ));
}

#[test]
fn test_index_assignment_is_expression() {
    let expr = parse_expr("obj.k = 1");
    let ExprKind::Assign { target, .. } = &expr.kind else {
        panic!("expected assignment");
    };
    assert!(target.is_assignable());
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let expr = parse_expr("1 + 2 * 3");
    let (left, op, right) = binary_parts(&expr);
    assert_eq!(op, BinaryOp::Add);
    assert_eq!(left.kind, ExprKind::Literal(Literal::Number(1)));
    assert_eq!(binary_op(right), BinaryOp::Mul);
}

#[test]
fn test_subtraction_is_left_associative() {
    let expr = parse_expr("10 - 3 - 2");
    let (left, op, _) = binary_parts(&expr);
    assert_eq!(op, BinaryOp::Sub);
    assert_eq!(binary_op(left), BinaryOp::Sub);
}

#[test]
fn test_power_is_right_associative() {
    let expr = parse_expr("2 ** 3 ** 2");
    let (left, op, right) = binary_parts(&expr);
    assert_eq!(op, BinaryOp::Pow);
    assert_eq!(left.kind, ExprKind::Literal(Literal::Number(2)));
    assert_eq!(binary_op(right), BinaryOp::Pow);
}

#[test]
fn test_logical_precedence() {
    // a || (b && (c == d))
    let expr = parse_expr("a || b && c == d");
    let (_, op, right) = binary_parts(&expr);
    assert_eq!(op, BinaryOp::Or);
    let (_, op, right) = binary_parts(right);
    assert_eq!(op, BinaryOp::And);
    assert_eq!(binary_op(right), BinaryOp::Eq);
}

#[test]
fn test_bitwise_levels() {
    // a | (b & c): `|` is additive, `&` multiplicative
    let expr = parse_expr("a | b & c");
    let (_, op, right) = binary_parts(&expr);
    assert_eq!(op, BinaryOp::BitOr);
    assert_eq!(binary_op(right), BinaryOp::BitAnd);

    assert_eq!(binary_op(&parse_expr("a &^ b")), BinaryOp::BitAndNot);
    assert_eq!(binary_op(&parse_expr("a << 2")), BinaryOp::Shl);
}

#[test]
fn test_ternary() {
    let expr = parse_expr("c ? 1 : 2");
    assert!(matches!(expr.kind, ExprKind::Ternary { .. }));
}

#[test]
fn test_assignment_is_right_associative() {
    let expr = parse_expr("a.x = b.y = 3");
    let ExprKind::Assign { value, .. } = &expr.kind else {
        panic!("expected assignment");
    };
    assert!(matches!(value.kind, ExprKind::Assign { .. }));
}

#[test]
fn test_unary_and_update() {
    let expr = parse_expr("-x");
    assert!(matches!(expr.kind, ExprKind::Unary { op: UnaryOp::Neg, .. }));

    let expr = parse_expr("^x");
    assert!(matches!(expr.kind, ExprKind::Unary { op: UnaryOp::BitNot, .. }));

    let expr = parse_expr("++x");
    assert!(matches!(
        expr.kind,
        ExprKind::Update { op: UpdateOp::Increment, prefix: true, .. }
    ));

    let expr = parse_expr("x--");
    assert!(matches!(
        expr.kind,
        ExprKind::Update { op: UpdateOp::Decrement, prefix: false, .. }
    ));
}

#[test]
fn test_member_access_becomes_string_index() {
    let expr = parse_expr("p.then");
    let ExprKind::Index { key, .. } = &expr.kind else {
        panic!("expected index");
    };
    assert_eq!(key.kind, ExprKind::Literal(Literal::String("then".to_string())));
}

#[test]
fn test_call_chain() {
    let expr = parse_expr("p.then(f).then(g, h)");
    let ExprKind::Call { callee, args } = &expr.kind else {
        panic!("expected call");
    };
    assert_eq!(args.len(), 2);
    assert!(matches!(callee.kind, ExprKind::Index { .. }));
}

#[test]
fn test_single_param_lambda() {
    let expr = parse_expr("x => x + 1");
    let ExprKind::Function(def) = &expr.kind else {
        panic!("expected function");
    };
    assert_eq!(def.params, vec![Name::new("x")]);
    assert!(matches!(def.body, FunctionBody::Expr(_)));
}

#[test]
fn test_paren_lambda_with_block_body() {
    let expr = parse_expr("(a, b) => { return a + b; }");
    let ExprKind::Function(def) = &expr.kind else {
        panic!("expected function");
    };
    assert_eq!(def.params, vec![Name::new("a"), Name::new("b")]);
    assert!(matches!(def.body, FunctionBody::Block(ref stmts) if stmts.len() == 1));
}

#[test]
fn test_parenthesized_ident_is_not_lambda() {
    let expr = parse_expr("(x) * 2");
    let (left, op, _) = binary_parts(&expr);
    assert_eq!(op, BinaryOp::Mul);
    assert_eq!(left.kind, ExprKind::Ident(Name::new("x")));
}

#[test]
fn test_empty_param_lambda() {
    let expr = parse_expr("() => 1");
    assert!(matches!(expr.kind, ExprKind::Function(ref def) if def.params.is_empty()));
}

#[test]
fn test_function_definition_and_expression() {
    let program = parse_ok("function add(a, b) { return a + b; } var f = function named() {};");
    let StmtKind::FunctionDef(def) = &program.stmts[0].kind else {
        panic!("expected function definition");
    };
    assert_eq!(def.name, Some(Name::new("add")));
    assert_eq!(def.params.len(), 2);

    let StmtKind::VarDef { init: Some(init), .. } = &program.stmts[1].kind else {
        panic!("expected var definition");
    };
    assert!(matches!(
        &init.kind,
        ExprKind::Function(def) if def.name == Some(Name::new("named"))
    ));
}

#[test]
fn test_object_and_array_literals() {
    let expr = parse_expr(r#"({ a: 1, "b c": [1, 2,], })"#);
    let ExprKind::Object(props) = &expr.kind else {
        panic!("expected object literal");
    };
    assert_eq!(props.len(), 2);
    assert_eq!(props[1].0, Name::new("b c"));
    assert!(matches!(props[1].1.kind, ExprKind::Array(ref elems) if elems.len() == 2));
}

#[test]
fn test_new_expression() {
    let expr = parse_expr("new Promise((resolve, reject) => resolve(1))");
    let ExprKind::New { constructor, args } = &expr.kind else {
        panic!("expected new");
    };
    assert_eq!(constructor.as_str(), "Promise");
    assert_eq!(args.len(), 1);
}

#[test]
fn test_control_flow_statements() {
    let program = parse_ok(
        "if (x) { y = 1; } else y = 2;
         while (x) { break; }
         for (var i = 0; i < 10; i++) { }
         for (;;) break;
         ;",
    );
    assert!(matches!(program.stmts[0].kind, StmtKind::If { else_branch: Some(_), .. }));
    assert!(matches!(program.stmts[1].kind, StmtKind::While { .. }));
    let StmtKind::For { init, cond, step, .. } = &program.stmts[2].kind else {
        panic!("expected for");
    };
    assert!(matches!(init.as_deref().map(|s| &s.kind), Some(StmtKind::VarDef { .. })));
    assert!(cond.is_some() && step.is_some());
    assert!(matches!(
        program.stmts[3].kind,
        StmtKind::For { init: None, cond: None, step: None, .. }
    ));
    assert_eq!(program.stmts[4].kind, StmtKind::Empty);
}

#[test]
fn test_return_without_value() {
    let program = parse_ok("function f() { return; }");
    let StmtKind::FunctionDef(def) = &program.stmts[0].kind else {
        panic!("expected function definition");
    };
    let FunctionBody::Block(body) = &def.body else {
        panic!("expected block body");
    };
    assert_eq!(body[0].kind, StmtKind::Return(None));
}

#[test]
fn test_spans_cover_source() {
    let program = parse_ok("var abc = 1 + 2;");
    assert_eq!(program.stmts[0].span, tao_ir::Span::new(0, 16));
}
