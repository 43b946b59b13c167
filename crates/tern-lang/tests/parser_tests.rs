use pretty_assertions::assert_eq;
use tern_core::ast::*;
use tern_core::ops::BinOpKind;
use tern_lang::{parse_expression, parse_program, ParseError};

fn parse_expr(src: &str) -> Expr {
    parse_expression(src).unwrap_or_else(|e| panic!("parse failed for `{src}`: {e}"))
}

fn binop(expr: &Expr) -> &BinaryExpression {
    match expr.kind() {
        ExprKind::Binary(binary) => binary,
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn precedence_mul_over_add() {
    let expr = parse_expr("1 + 2 * 3");
    let add = binop(&expr);
    assert_eq!(add.op, BinOpKind::Add);
    assert_eq!(binop(&add.rhs).op, BinOpKind::Mul);
}

#[test]
fn left_associative_subtraction() {
    let expr = parse_expr("1 - 2 - 3");
    let outer = binop(&expr);
    assert_eq!(outer.op, BinOpKind::Sub);
    assert_eq!(binop(&outer.lhs).op, BinOpKind::Sub);
}

#[test]
fn comparison_binds_looser_than_arithmetic() {
    let expr = parse_expr("a + 1 >= b * 2 == true");
    let eq = binop(&expr);
    assert_eq!(eq.op, BinOpKind::Eq);
    let ge = binop(&eq.lhs);
    assert_eq!(ge.op, BinOpKind::Ge);
    assert_eq!(binop(&ge.lhs).op, BinOpKind::Add);
    assert_eq!(binop(&ge.rhs).op, BinOpKind::Mul);
}

#[test]
fn ternary_is_right_associative() {
    let expr = parse_expr("a ? 1 : b ? 2 : 3");
    let ExprKind::Conditional(outer) = expr.kind() else {
        panic!("expected conditional");
    };
    assert!(matches!(outer.alternate.kind(), ExprKind::Conditional(_)));
}

#[test]
fn parenthesized_expression_is_not_an_arrow() {
    let expr = parse_expr("(a + b) * c");
    let mul = binop(&expr);
    assert_eq!(mul.op, BinOpKind::Mul);
    assert_eq!(binop(&mul.lhs).op, BinOpKind::Add);
    assert_eq!(expr.span.map(|s| (s.lo, s.hi)), Some((0, 11)));
}

#[test]
fn arrow_with_block_body() {
    let expr = parse_expr("(x, y) => { const z = x; return z; }");
    let ExprKind::Arrow(arrow) = expr.kind() else {
        panic!("expected arrow");
    };
    let names: Vec<_> = arrow.params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["x", "y"]);
    let ArrowBody::Block(stmts) = &arrow.body else {
        panic!("expected block body");
    };
    assert_eq!(stmts.len(), 2);
    assert!(matches!(stmts[1], Stmt::Return(_)));
}

#[test]
fn single_parameter_arrow_without_parens() {
    let expr = parse_expr("x => x + 1");
    let ExprKind::Arrow(arrow) = expr.kind() else {
        panic!("expected arrow");
    };
    assert_eq!(arrow.params.len(), 1);
    assert!(matches!(arrow.body, ArrowBody::Expr(_)));
}

#[test]
fn arrow_annotations_are_parsed() {
    let expr = parse_expr("(xs: number[], f: (n: number) => boolean): Array<string> => []");
    let ExprKind::Arrow(arrow) = expr.kind() else {
        panic!("expected arrow");
    };
    assert_eq!(
        arrow.params[0].annotation.as_ref().map(|a| a.to_string()),
        Some("number[]".to_string())
    );
    assert_eq!(
        arrow.params[1].annotation.as_ref().map(|a| a.to_string()),
        Some("(number) => boolean".to_string())
    );
    assert_eq!(
        arrow.ret_annotation.as_ref().map(|a| a.to_string()),
        Some("string[]".to_string())
    );
}

#[test]
fn calls_and_indexing_chain() {
    let expr = parse_expr("make(1, 2)[0](x)");
    let ExprKind::Call(outer) = expr.kind() else {
        panic!("expected call");
    };
    assert_eq!(outer.args.len(), 1);
    let ExprKind::Member(member) = outer.callee.kind() else {
        panic!("expected member");
    };
    assert!(matches!(member.object.kind(), ExprKind::Call(_)));
}

#[test]
fn literals() {
    assert!(matches!(parse_expr("1.5").kind(), ExprKind::Number(n) if n.value == 1.5));
    assert!(matches!(parse_expr("'a\\'b'").kind(), ExprKind::String(s) if s.value == "a'b"));
    assert!(matches!(parse_expr("false").kind(), ExprKind::Bool(b) if !b.value));
    assert!(matches!(parse_expr("[1, 2,]").kind(), ExprKind::Array(a) if a.elements.len() == 2));
}

#[test]
fn program_statements() {
    let program = parse_program("const x: number = 5;\nconst y = x;\nx + y").expect("parse");
    assert_eq!(program.body.len(), 3);
    let decl = program.declaration("x").expect("x declared");
    assert_eq!(
        decl.annotation.as_ref().map(|a| a.to_string()),
        Some("number".to_string())
    );
    assert_eq!(decl.span.map(|s| (s.lo, s.hi)), Some((0, 20)));
    assert!(matches!(program.body[2], Stmt::Expr(_)));
}

#[test]
fn missing_initializer_is_reported() {
    let err = parse_program("const x = ;").expect_err("should fail");
    match err {
        ParseError::Unexpected { found, span, .. } => {
            assert_eq!(found, ";");
            assert_eq!(span.lo, 10);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn unclosed_block_is_reported() {
    let err = parse_program("const f = () => { return 1;").expect_err("should fail");
    assert!(matches!(err, ParseError::UnexpectedEof { .. }));
}
