pub mod typing;
pub use typing::types::{TypeErrorKind, TypingOptions, TypingOutcome};

use crate::typing::scope::ScopeFrame;
use crate::typing::unify::TypeVar;
use tern_core::ast::Program;
use tern_core::diagnostics::{self, Diagnostic};
use tern_core::span::Span;
use tern_core::types::Ty;

pub use tern_core::types::TypeVarId;

/// A single inference session. All mutable state (type-variable arena, scope
/// stack, diagnostics) lives here; build a fresh one per run.
pub struct AstTypeInferencer {
    type_vars: Vec<TypeVar>,
    scopes: Vec<ScopeFrame>,
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
    lossy_mode: bool,
}

impl Default for AstTypeInferencer {
    fn default() -> Self {
        Self::new()
    }
}

impl AstTypeInferencer {
    pub fn new() -> Self {
        Self::with_options(TypingOptions::from_env())
    }

    pub fn with_options(options: TypingOptions) -> Self {
        Self {
            type_vars: Vec::new(),
            scopes: vec![ScopeFrame::default()],
            diagnostics: Vec::new(),
            has_errors: false,
            lossy_mode: options.lossy,
        }
    }

    /// Infers every node of `program`, annotating it in place.
    pub fn infer(&mut self, program: &mut Program) -> TypingOutcome {
        tracing::debug!("type inference over {} statements", program.body.len());
        let program_ty = self.infer_program_body(program);
        self.finalize_program(program);
        let program_ty = self.resolve(&program_ty);
        tracing::debug!(
            "type inference finished: {} diagnostics, program type {}",
            self.diagnostics.len(),
            program_ty
        );
        self.finish(Some(program_ty))
    }

    /// Gate on upstream name resolution: when it reported errors they are
    /// returned unchanged and no inference happens.
    pub fn infer_resolved(
        &mut self,
        program: &mut Program,
        resolution: Vec<Diagnostic>,
    ) -> TypingOutcome {
        if diagnostics::has_errors(&resolution) {
            tracing::debug!(
                "skipping type inference: name resolution reported {} diagnostics",
                resolution.len()
            );
            return TypingOutcome {
                diagnostics: resolution,
                has_errors: true,
                program_ty: None,
                skipped: true,
            };
        }
        let mut outcome = self.infer(program);
        if !resolution.is_empty() {
            let mut merged = resolution;
            merged.append(&mut outcome.diagnostics);
            outcome.diagnostics = merged;
        }
        outcome
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    fn finish(&mut self, program_ty: Option<Ty>) -> TypingOutcome {
        TypingOutcome {
            diagnostics: std::mem::take(&mut self.diagnostics),
            has_errors: std::mem::replace(&mut self.has_errors, false),
            program_ty,
            skipped: false,
        }
    }

    pub(crate) fn report(
        &mut self,
        kind: TypeErrorKind,
        span: Option<Span>,
        message: impl Into<String>,
    ) {
        let message = message.into();
        tracing::debug!("typing diagnostic ({}): {}", kind.code(), message);
        let diagnostic = if self.lossy_mode {
            Diagnostic::warning(message)
        } else {
            self.has_errors = true;
            Diagnostic::error(message)
        };
        self.diagnostics.push(
            diagnostic
                .with_optional_span(span)
                .with_code(kind.code())
                .with_source_context("typing"),
        );
    }
}

/// Runs a fresh inference session over `program` after name resolution.
pub fn infer_program(program: &mut Program, resolution: Vec<Diagnostic>) -> TypingOutcome {
    AstTypeInferencer::new().infer_resolved(program, resolution)
}
