use tern_core::ast::*;
use tern_core::ops::BinOpKind;
use tern_core::span::Span;
use tern_core::types::Ty;

fn sample_program() -> Program {
    Program::new(vec![
        ConstDeclaration::new("x", Expr::number(5.0).with_span(Span::new(10, 11)))
            .with_span(Span::new(0, 12))
            .into(),
        ConstDeclaration::new(
            "y",
            Expr::binary(BinOpKind::Add, Expr::ident("x"), Expr::number(1.5)),
        )
        .into(),
    ])
}

#[test]
fn numeric_literal_integrality() {
    assert!(NumericLiteral { value: 5.0 }.is_integer());
    assert!(NumericLiteral { value: -3.0 }.is_integer());
    assert!(!NumericLiteral { value: 1.5 }.is_integer());
    assert!(!NumericLiteral { value: f64::NAN }.is_integer());
}

#[test]
fn node_kinds_match_contract_names() {
    let program = sample_program();
    let kinds: Vec<_> = program.body.iter().map(Stmt::node_kind).collect();
    assert_eq!(kinds, vec!["ConstDeclaration", "ConstDeclaration"]);
    assert_eq!(Expr::array(vec![]).kind().node_kind(), "ArrayLiteral");
    assert_eq!(
        Expr::member(Expr::ident("a"), Expr::number(0.0))
            .kind()
            .node_kind(),
        "MemberExpression"
    );
}

#[test]
fn json_dump_carries_type_discriminators() {
    let mut program = sample_program();
    if let Stmt::Const(decl) = &mut program.body[0] {
        decl.ty = Some(Ty::number());
        decl.init.set_ty(Ty::number());
    }
    let json: serde_json::Value =
        serde_json::from_str(&program.to_json().expect("serialize")).expect("parse json");

    assert_eq!(json["type"], "Program");
    assert_eq!(json["body"][0]["type"], "ConstDeclaration");
    assert_eq!(json["body"][0]["name"], "x");
    assert_eq!(json["body"][0]["inferredType"], "Number");
    assert_eq!(json["body"][0]["init"]["type"], "NumericLiteral");
    assert_eq!(json["body"][0]["init"]["span"]["lo"], 10);
    assert_eq!(json["body"][1]["init"]["type"], "BinaryExpression");
    assert_eq!(json["body"][1]["init"]["operator"], "+");
    assert!(json["body"][1].get("inferredType").is_none());
}

#[test]
fn annotations_display_like_source() {
    let callback = TypeAnnotation::function(
        vec![TypeAnnotation::named("number")],
        TypeAnnotation::named("boolean"),
    );
    assert_eq!(callback.to_string(), "(number) => boolean");
    assert_eq!(
        TypeAnnotation::array(callback).to_string(),
        "((number) => boolean)[]"
    );
    assert_eq!(
        TypeAnnotation::array(TypeAnnotation::named("string")).to_string(),
        "string[]"
    );
}

#[test]
fn program_lookup_by_name() {
    let program = sample_program();
    assert!(program.declaration("y").is_some());
    assert!(program.declaration("z").is_none());
}
