//! Name resolution: declaration-before-use and duplicate bindings.
//!
//! A `const` becomes visible only after its initializer, so a binding can
//! never refer to itself. Function parameters and the `const`s of the body
//! share one scope; inner functions may shadow outer names.

use std::collections::HashSet;
use tern_core::ast::{ArrowBody, Expr, ExprKind, Program, Stmt};
use tern_core::diagnostics::Diagnostic;
use tern_core::span::Span;

pub const UNRESOLVED_NAME: &str = "unresolved-name";
pub const DUPLICATE_BINDING: &str = "duplicate-binding";

pub fn resolve_program(program: &Program) -> Vec<Diagnostic> {
    let mut resolver = NameResolver::new();
    resolver.resolve_stmts(&program.body);
    tracing::debug!(
        "name resolution finished with {} diagnostics",
        resolver.diagnostics.len()
    );
    resolver.diagnostics
}

struct NameResolver {
    scopes: Vec<HashSet<String>>,
    diagnostics: Vec<Diagnostic>,
}

impl NameResolver {
    fn new() -> Self {
        Self {
            scopes: vec![HashSet::new()],
            diagnostics: Vec::new(),
        }
    }

    fn declare(&mut self, name: &str, span: Option<Span>) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };
        if !scope.insert(name.to_string()) {
            self.report(
                DUPLICATE_BINDING,
                format!("`{}` is already declared in this scope", name),
                span,
            );
        }
    }

    fn is_declared(&self, name: &str) -> bool {
        self.scopes.iter().rev().any(|scope| scope.contains(name))
    }

    fn report(&mut self, code: &str, message: String, span: Option<Span>) {
        self.diagnostics.push(
            Diagnostic::error(message)
                .with_optional_span(span)
                .with_code(code)
                .with_source_context("resolve"),
        );
    }

    fn resolve_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            match stmt {
                Stmt::Const(decl) => {
                    self.resolve_expr(&decl.init);
                    self.declare(decl.name.as_str(), decl.span);
                }
                Stmt::Return(ret) => {
                    if let Some(argument) = &ret.argument {
                        self.resolve_expr(argument);
                    }
                }
                Stmt::Expr(expr) => self.resolve_expr(expr),
            }
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Number(_) | ExprKind::String(_) | ExprKind::Bool(_) => {}
            ExprKind::Ident(ident) => {
                let name = ident.name.as_str();
                if !self.is_declared(name) {
                    self.report(
                        UNRESOLVED_NAME,
                        format!("`{}` is used before it is declared", name),
                        expr.span,
                    );
                }
            }
            ExprKind::Binary(binary) => {
                self.resolve_expr(&binary.lhs);
                self.resolve_expr(&binary.rhs);
            }
            ExprKind::Conditional(cond) => {
                self.resolve_expr(&cond.test);
                self.resolve_expr(&cond.consequent);
                self.resolve_expr(&cond.alternate);
            }
            ExprKind::Arrow(arrow) => {
                self.scopes.push(HashSet::new());
                for param in &arrow.params {
                    self.declare(param.name.as_str(), param.span);
                }
                match &arrow.body {
                    ArrowBody::Block(stmts) => self.resolve_stmts(stmts),
                    ArrowBody::Expr(body) => self.resolve_expr(body),
                }
                self.scopes.pop();
            }
            ExprKind::Call(call) => {
                self.resolve_expr(&call.callee);
                for arg in &call.args {
                    self.resolve_expr(arg);
                }
            }
            ExprKind::Array(array) => {
                for element in &array.elements {
                    self.resolve_expr(element);
                }
            }
            ExprKind::Member(member) => {
                self.resolve_expr(&member.object);
                self.resolve_expr(&member.index);
            }
        }
    }
}
