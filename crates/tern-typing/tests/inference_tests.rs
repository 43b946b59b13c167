use pretty_assertions::assert_eq;
use tern_core::ast::Program;
use tern_core::types::Ty;
use tern_lang::{parse_program, resolve_program};
use tern_typing::{infer_program, AstTypeInferencer, TypingOptions, TypingOutcome};

fn check_with(src: &str, options: TypingOptions) -> (Program, TypingOutcome) {
    let mut program =
        parse_program(src).unwrap_or_else(|e| panic!("parse failed for `{src}`: {e}"));
    let resolution = resolve_program(&program);
    let outcome = AstTypeInferencer::with_options(options).infer_resolved(&mut program, resolution);
    (program, outcome)
}

fn check(src: &str) -> (Program, TypingOutcome) {
    check_with(src, TypingOptions::strict())
}

fn binding_type(program: &Program, name: &str) -> String {
    program
        .declaration(name)
        .and_then(|decl| decl.ty.as_ref())
        .map(|ty| ty.to_string())
        .unwrap_or_else(|| panic!("no inferred type for `{name}`"))
}

fn assert_clean(outcome: &TypingOutcome) {
    assert!(
        outcome.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        outcome.messages()
    );
    assert!(!outcome.has_errors);
}

#[test]
fn literal_types() {
    let (program, outcome) =
        check("const a = 1; const b = 1.5; const c = \"s\"; const d = true; const e = 2.0;");
    assert_clean(&outcome);
    assert_eq!(binding_type(&program, "a"), "Number");
    assert_eq!(binding_type(&program, "b"), "Float");
    assert_eq!(binding_type(&program, "c"), "String");
    assert_eq!(binding_type(&program, "d"), "Bool");
    assert_eq!(binding_type(&program, "e"), "Number");
}

#[test]
fn well_typed_function_and_call() {
    let (program, outcome) = check("const add = (a, b) => a + b; const r = add(1, 2);");
    assert_clean(&outcome);
    assert_eq!(binding_type(&program, "add"), "(Number, Number) -> Number");
    assert_eq!(binding_type(&program, "r"), "Number");
    assert_eq!(outcome.program_ty, Some(Ty::number()));
}

#[test]
fn empty_program_is_void() {
    let (program, outcome) = check("");
    assert_clean(&outcome);
    assert_eq!(outcome.program_ty, Some(Ty::void()));
    assert_eq!(program.ty, Some(Ty::void()));
}

#[test]
fn float_does_not_mix_with_number() {
    let (program, outcome) = check("const x = 1; const y = 1.5; const z = x + y;");
    assert_eq!(outcome.error_count(), 1);
    assert_eq!(outcome.diagnostics[0].code.as_deref(), Some("type-mismatch"));
    assert_eq!(
        outcome.messages(),
        vec!["type mismatch between `Float` and `Number`"]
    );
    assert_eq!(binding_type(&program, "z"), "Number");
}

#[test]
fn string_concatenation() {
    let (program, outcome) = check("const x = \"a\"; const y = \"b\"; const z = x + y;");
    assert_clean(&outcome);
    assert_eq!(binding_type(&program, "z"), "String");
}

#[test]
fn mixed_concatenation_reports_once() {
    let (program, outcome) = check("const x = 5; const y = \"hello\"; const z = x + y;");
    assert_eq!(
        outcome.messages(),
        vec!["cannot concatenate string with non-string value"]
    );
    assert!(outcome.has_errors);
    assert_eq!(binding_type(&program, "z"), "String");
}

#[test]
fn ternary_condition_must_be_bool() {
    let (program, outcome) = check("const t = 1 ? 2 : 3;");
    assert_eq!(
        outcome.messages(),
        vec!["ternary condition must be Bool: type mismatch between `Number` and `Bool`"]
    );
    assert_eq!(outcome.diagnostics[0].code.as_deref(), Some("type-mismatch"));
    assert_eq!(binding_type(&program, "t"), "Number");
}

#[test]
fn ternary_branches_must_agree() {
    let (program, outcome) = check("const t = true ? 1 : \"a\";");
    assert_eq!(
        outcome.messages(),
        vec!["ternary branches must have the same type: type mismatch between `String` and `Number`"]
    );
    assert_eq!(binding_type(&program, "t"), "Number");
}

#[test]
fn array_elements_report_each_mismatch_once() {
    let (program, outcome) = check("const arr = [1, \"a\", 3];");
    assert_eq!(outcome.error_count(), 1);
    assert_eq!(binding_type(&program, "arr"), "Array<Number>");

    let (_, outcome) = check("const arr = [1, \"a\", true];");
    assert_eq!(outcome.error_count(), 2);
}

#[test]
fn empty_array_has_open_element_type() {
    let (program, outcome) = check("const xs = [];");
    assert_clean(&outcome);
    assert_eq!(binding_type(&program, "xs"), "Array<a>");
}

#[test]
fn indexing() {
    let (program, outcome) = check("const arr = [1, 2]; const first = arr[0];");
    assert_clean(&outcome);
    assert_eq!(binding_type(&program, "first"), "Number");

    let (_, outcome) = check("const arr = [1, 2]; const bad = arr[\"x\"];");
    assert_eq!(
        outcome.messages(),
        vec!["array index must be Number: type mismatch between `String` and `Number`"]
    );

    let (_, outcome) = check("const n = 5; const v = n[0];");
    assert_eq!(outcome.error_count(), 1);
    assert!(outcome.messages()[0].starts_with("indexed value must be an array: cannot unify `Number`"));
}

#[test]
fn let_polymorphism() {
    let (program, outcome) =
        check("const id = x => x; const n = id(1); const s = id(\"s\"); const b = id(true);");
    assert_clean(&outcome);
    assert_eq!(binding_type(&program, "id"), "(a) -> a");
    assert_eq!(binding_type(&program, "n"), "Number");
    assert_eq!(binding_type(&program, "s"), "String");
    assert_eq!(binding_type(&program, "b"), "Bool");
}

#[test]
fn higher_order_parameters_are_inferred_from_use() {
    let (program, outcome) = check("const apply = (f, x) => f(x);");
    assert_clean(&outcome);
    assert_eq!(binding_type(&program, "apply"), "((b) -> c, b) -> c");
}

#[test]
fn parameters_stay_monomorphic_inside_their_body() {
    let (program, outcome) = check("const g = x => { const y = x; return y + 1; };");
    assert_clean(&outcome);
    assert_eq!(binding_type(&program, "g"), "(Number) -> Number");
}

#[test]
fn monomorphic_function_rejects_wrong_argument() {
    let (_, outcome) = check("const f = x => x + 1; const r = f(\"s\");");
    assert_eq!(
        outcome.messages(),
        vec!["argument 1 of call: type mismatch between `String` and `Number`"]
    );
}

#[test]
fn occurs_check_in_self_application() {
    let (_, outcome) = check("const f = x => x(x);");
    assert_eq!(
        outcome.messages(),
        vec!["infinite unification: `a` occurs in `(a) -> b`"]
    );
    assert_eq!(outcome.diagnostics[0].code.as_deref(), Some("infinite-type"));
}

#[test]
fn occurs_check_leaves_variable_unresolved() {
    let mut typer = AstTypeInferencer::with_options(TypingOptions::strict());
    let v = typer.fresh_var();
    assert!(!typer.unify(&v, &Ty::array(v.clone()), None));
    assert!(typer.is_unresolved(0));
    assert_eq!(typer.resolve(&v), v);

    let diagnostics = typer.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "infinite unification: `a` occurs in `Array<a>`");
    assert_eq!(diagnostics[0].location(), "unknown position");
}

#[test]
fn printing_is_idempotent() {
    let mut typer = AstTypeInferencer::with_options(TypingOptions::strict());
    let a = typer.fresh_var();
    let b = typer.fresh_var();
    typer.unify(&b, &Ty::string(), None);
    let ty = Ty::function(vec![a.clone(), Ty::array(b.clone())], a);
    let first = typer.type_to_string(&ty);
    assert_eq!(first, "(a, Array<String>) -> a");
    assert_eq!(typer.type_to_string(&ty), first);
}

#[test]
fn resolution_errors_skip_inference() {
    let (program, outcome) = check("const a = b;");
    assert!(outcome.skipped);
    assert!(outcome.has_errors);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].code.as_deref(), Some("unresolved-name"));
    assert_eq!(program.declaration("a").and_then(|decl| decl.ty.as_ref()), None);
    assert_eq!(outcome.program_ty, None);

    let mut program = program;
    let resolution = resolve_program(&program);
    assert!(infer_program(&mut program, resolution).skipped);
}

#[test]
fn lossy_mode_downgrades_errors() {
    let (program, outcome) = check_with("const z = 5 + \"a\";", TypingOptions { lossy: true });
    assert!(!outcome.has_errors);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert!(!outcome.diagnostics[0].is_error());
    assert_eq!(binding_type(&program, "z"), "String");
}

#[test]
fn annotations_constrain_bindings() {
    let (program, outcome) = check(
        "const x: number = 5; const f = (a: number): boolean => a > 1; const xs: number[] = []; \
         const g: (n: number) => string = n => \"x\";",
    );
    assert_clean(&outcome);
    assert_eq!(binding_type(&program, "x"), "Number");
    assert_eq!(binding_type(&program, "f"), "(Number) -> Bool");
    assert_eq!(binding_type(&program, "xs"), "Array<Number>");
    assert_eq!(binding_type(&program, "g"), "(Number) -> String");

    let (program, outcome) = check("const y: string = 5;");
    assert_eq!(
        outcome.messages(),
        vec!["declared type of `y`: type mismatch between `Number` and `String`"]
    );
    assert_eq!(binding_type(&program, "y"), "String");
}

#[test]
fn arity_mismatch_still_returns_declared_type() {
    let (program, outcome) = check("const f = (a, b) => a + b; const r = f(1);");
    assert_eq!(
        outcome.messages(),
        vec!["function expects 2 argument(s) but was called with 1"]
    );
    assert_eq!(outcome.diagnostics[0].code.as_deref(), Some("arity-mismatch"));
    assert_eq!(binding_type(&program, "r"), "Number");
}

#[test]
fn calling_a_non_function() {
    let (_, outcome) = check("const n = 1; const r = n(2);");
    assert_eq!(
        outcome.messages(),
        vec!["called value is not a function: `Number`"]
    );
    assert_eq!(outcome.diagnostics[0].code.as_deref(), Some("misuse"));
}

#[test]
fn unsupported_operator_and_early_return() {
    let (_, outcome) = check("const m = 4 % 2;");
    assert_eq!(outcome.messages(), vec!["unsupported binary operator `%`"]);

    let (program, outcome) = check("const f = () => { return 1; const y = 2; };");
    assert_eq!(
        outcome.messages(),
        vec!["`return` must be the last statement of a function body"]
    );
    assert_eq!(binding_type(&program, "f"), "() -> Void");
}

#[test]
fn block_without_return_is_void() {
    let (program, outcome) = check("const f = (a) => { const b = a * 2; };");
    assert_clean(&outcome);
    assert_eq!(binding_type(&program, "f"), "(Number) -> Void");
}

#[test]
fn diagnostics_keep_traversal_order_and_positions() {
    let src = "const a = 1 ? 2 : 3;\nconst b = [true, 1];";
    let (_, outcome) = check(src);
    assert_eq!(outcome.error_count(), 2);
    assert!(outcome.messages()[0].starts_with("ternary condition"));
    assert!(outcome.messages()[1].starts_with("array elements"));
    assert_eq!(outcome.diagnostics[0].location(), "position 10");
    assert_eq!(outcome.diagnostics[1].location(), format!("position {}", src.find("1]").unwrap()));
}

#[test]
fn every_expression_is_annotated() {
    let (program, outcome) = check("const f = x => [x, x]; const v = f(3)[0];");
    assert_clean(&outcome);
    let json = program.to_json().unwrap();
    assert!(json.contains("\"inferredType\": \"(a) -> Array<a>\""));
    assert!(json.contains("\"inferredType\": \"Array<Number>\""));
    assert_eq!(binding_type(&program, "v"), "Number");
}

#[test]
fn hand_built_trees_report_unknown_positions() {
    use tern_core::ast::*;
    use tern_core::ops::BinOpKind;

    let body = ArrowBody::Expr(Box::new(Expr::binary(
        BinOpKind::Add,
        Expr::ident("n"),
        Expr::number(1.0),
    )));
    let arrow = ArrowFunctionExpression {
        params: vec![Param::new("n")],
        ret_annotation: None,
        body,
    }
    .with_return_annotation(TypeAnnotation::named("string"));
    let mut program = Program::new(vec![
        ConstDeclaration::new("f", arrow.into()).into(),
        Stmt::Expr(Expr::arrow(vec![], ArrowBody::Block(vec![]))),
    ]);

    let outcome = AstTypeInferencer::with_options(TypingOptions::strict()).infer(&mut program);
    assert_eq!(
        outcome.messages(),
        vec!["declared return type: type mismatch between `Number` and `String`"]
    );
    assert_eq!(outcome.diagnostics[0].location(), "unknown position");
    assert_eq!(binding_type(&program, "f"), "(Number) -> String");
    assert_eq!(
        outcome.program_ty.map(|ty| ty.to_string()).as_deref(),
        Some("() -> Void")
    );
}
