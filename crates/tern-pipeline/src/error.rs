use tern_core::diagnostics::Diagnostic;
use std::error::Error;
use std::fmt;

/// Diagnostics collected across stages. Nothing is dropped; `emit_stage` only
/// logs what the stage that just finished added.
#[derive(Debug, Default, Clone)]
pub struct PipelineDiagnostics {
    pub items: Vec<Diagnostic>,
    emitted: usize,
}

impl PipelineDiagnostics {
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: Vec<Diagnostic>) {
        if diagnostics.is_empty() {
            return;
        }
        self.items.extend(diagnostics);
    }

    pub fn emit_stage(&mut self, stage: &'static str) {
        for diagnostic in &self.items[self.emitted..] {
            tracing::debug!("[{}] {}", stage, diagnostic);
        }
        self.emitted = self.items.len();
    }

    pub fn has_errors(&self) -> bool {
        tern_core::diagnostics::has_errors(&self.items)
    }

    pub fn into_items(self) -> Vec<Diagnostic> {
        self.items
    }
}

/// A stage that could not produce its output at all, e.g. a syntax error.
#[derive(Debug)]
pub struct PipelineError {
    pub stage: &'static str,
    pub message: String,
}

impl PipelineError {
    pub fn new(stage: &'static str, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)
    }
}

impl Error for PipelineError {}
