use itertools::Itertools;
use tern_core::ast::Program;
use tern_core::diagnostics::{self, Diagnostic, DiagnosticDisplayOptions};
use tern_core::source_map::SourceFile;
use tern_core::types::Ty;

/// Result of checking one source file: the typed tree plus everything the
/// resolver and the inferencer reported, in order.
#[derive(Debug)]
pub struct CheckReport {
    pub file: SourceFile,
    pub program: Program,
    pub diagnostics: Vec<Diagnostic>,
    pub program_ty: Option<Ty>,
    /// True when name resolution failed and inference did not run.
    pub skipped: bool,
}

impl CheckReport {
    pub fn has_errors(&self) -> bool {
        diagnostics::has_errors(&self.diagnostics)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Top-level `const` names with their printed types, in source order.
    pub fn binding_types(&self) -> Vec<(String, String)> {
        self.program
            .declarations()
            .filter_map(|decl| {
                let ty = decl.ty.as_ref()?;
                Some((decl.name.to_string(), ty.to_string()))
            })
            .collect()
    }

    pub fn render(&self, options: &DiagnosticDisplayOptions) -> String {
        self.diagnostics
            .iter()
            .flat_map(|diagnostic| diagnostics::render(diagnostic, Some(&self.file), options))
            .join("\n")
    }

    pub fn render_bindings(&self) -> String {
        self.binding_types()
            .into_iter()
            .map(|(name, ty)| format!("{}: {}", name, ty))
            .join("\n")
    }

    pub fn to_json(&self) -> eyre::Result<String> {
        Ok(self.program.to_json()?)
    }
}
