use crate::source_map::SourceFile;
use crate::span::Span;
use std::fmt::{Display, Formatter};

/// Built-in templates supported when rendering diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticTemplate {
    Pretty,
    Plain,
}

/// Runtime configuration for rendering diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticDisplayOptions {
    pub template: DiagnosticTemplate,
    pub show_source_line: bool,
}

impl DiagnosticDisplayOptions {
    pub fn pretty() -> Self {
        Self {
            template: DiagnosticTemplate::Pretty,
            show_source_line: true,
        }
    }

    pub fn plain() -> Self {
        Self {
            template: DiagnosticTemplate::Plain,
            show_source_line: false,
        }
    }
}

impl Default for DiagnosticDisplayOptions {
    fn default() -> Self {
        DiagnosticDisplayOptions::plain()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    pub span: Option<Span>,
    pub source_context: Option<String>,
    pub code: Option<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            message: message.into(),
            span: None,
            source_context: None,
            code: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            message: message.into(),
            span: None,
            source_context: None,
            code: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_optional_span(mut self, span: Option<Span>) -> Self {
        self.span = span;
        self
    }

    pub fn with_source_context(mut self, context: impl Into<String>) -> Self {
        self.source_context = Some(context.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }

    /// Location without source text: `position N` or `unknown position`.
    pub fn location(&self) -> String {
        describe_location(self.span, None)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.message, self.location())?;
        if let Some(code) = &self.code {
            write!(f, " [{}]", code)?;
        }
        Ok(())
    }
}

pub fn describe_location(span: Option<Span>, source: Option<&SourceFile>) -> String {
    match (span, source) {
        (Some(span), Some(file)) => {
            let (line, col) = file.line_col(span.lo);
            format!("{}:{}:{}", file.path.display(), line, col)
        }
        (Some(span), None) => format!("position {}", span.position()),
        (None, _) => "unknown position".to_string(),
    }
}

pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

pub fn render(
    diagnostic: &Diagnostic,
    source: Option<&SourceFile>,
    options: &DiagnosticDisplayOptions,
) -> Vec<String> {
    match options.template {
        DiagnosticTemplate::Pretty => render_pretty(diagnostic, source, options),
        DiagnosticTemplate::Plain => render_plain(diagnostic, source),
    }
}

fn render_pretty(
    diagnostic: &Diagnostic,
    source: Option<&SourceFile>,
    options: &DiagnosticDisplayOptions,
) -> Vec<String> {
    let level = match diagnostic.level {
        DiagnosticLevel::Error => "error",
        DiagnosticLevel::Warning => "warning",
    };
    let header = match diagnostic.code.as_ref() {
        Some(code) => format!("{}[{}]: {}", level, code, diagnostic.message),
        None => format!("{}: {}", level, diagnostic.message),
    };

    let mut lines = vec![header];
    lines.push(format!(
        "  --> {}",
        describe_location(diagnostic.span, source)
    ));

    if options.show_source_line {
        if let (Some(span), Some(file)) = (diagnostic.span, source) {
            if let Some(line_span) = file.span_on_line(span) {
                let gutter = line_span.line.to_string();
                let pad = " ".repeat(gutter.len());
                let width = line_span.col_end.saturating_sub(line_span.col_start).max(1);
                lines.push(format!("{} |", pad));
                lines.push(format!("{} | {}", gutter, line_span.text));
                lines.push(format!(
                    "{} | {}{}",
                    pad,
                    " ".repeat(line_span.col_start - 1),
                    "^".repeat(width)
                ));
            }
        }
    }

    lines
}

fn render_plain(diagnostic: &Diagnostic, source: Option<&SourceFile>) -> Vec<String> {
    let level = match diagnostic.level {
        DiagnosticLevel::Error => "ERROR",
        DiagnosticLevel::Warning => "WARNING",
    };
    let context = diagnostic.source_context.as_deref().unwrap_or("tern");

    let header = match diagnostic.code.as_ref() {
        Some(code) => format!("[{}] {}: {} ({})", context, level, diagnostic.message, code),
        None => format!("[{}] {}: {}", context, level, diagnostic.message),
    };

    vec![
        header,
        format!("   at {}", describe_location(diagnostic.span, source)),
    ]
}
