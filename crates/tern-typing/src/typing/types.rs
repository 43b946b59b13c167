use tern_core::config;
use tern_core::diagnostics::Diagnostic;
use tern_core::types::Ty;

/// Classes of typing errors; the code is attached to each diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeErrorKind {
    Mismatch,
    Arity,
    InfiniteType,
    Unsupported,
    Misuse,
}

impl TypeErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            TypeErrorKind::Mismatch => "type-mismatch",
            TypeErrorKind::Arity => "arity-mismatch",
            TypeErrorKind::InfiniteType => "infinite-type",
            TypeErrorKind::Unsupported => "unsupported",
            TypeErrorKind::Misuse => "misuse",
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TypingOptions {
    pub lossy: bool,
}

impl TypingOptions {
    pub fn from_env() -> Self {
        Self {
            lossy: config::lossy_mode(),
        }
    }

    pub fn strict() -> Self {
        Self { lossy: false }
    }
}

#[derive(Debug)]
pub struct TypingOutcome {
    pub diagnostics: Vec<Diagnostic>,
    pub has_errors: bool,
    /// Type of the last top-level statement; `None` when inference was skipped.
    pub program_ty: Option<Ty>,
    pub skipped: bool,
}

impl TypingOutcome {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.diagnostics.iter().map(|d| d.message.as_str()).collect()
    }
}
