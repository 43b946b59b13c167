use crate::span::Span;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub source: Arc<str>,
    line_starts: Arc<Vec<usize>>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, source: &str) -> Self {
        Self {
            path: path.into(),
            source: Arc::from(source),
            line_starts: Arc::new(compute_line_starts(source)),
        }
    }

    pub fn load(path: &Path) -> crate::Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::new(path, &source))
    }

    pub fn line_col(&self, offset: u32) -> (usize, usize) {
        let offset = offset as usize;
        let idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let line_start = self.line_starts.get(idx).copied().unwrap_or(0);
        let line = idx + 1;
        let col = offset.saturating_sub(line_start) + 1;
        (line, col)
    }

    pub fn line_text(&self, line: usize) -> Option<&str> {
        if line == 0 {
            return None;
        }
        let idx = line - 1;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .copied()
            .unwrap_or_else(|| self.source.len());
        self.source
            .get(start..end)
            .map(|s| s.trim_end_matches('\n'))
    }

    pub fn span_on_line(&self, span: Span) -> Option<LineSpan> {
        let (line, col_start) = self.line_col(span.lo);
        let (_, col_end) = self.line_col(span.hi.max(span.lo + 1));
        let text = self.line_text(line)?.to_string();
        Some(LineSpan {
            line,
            col_start,
            col_end,
            text,
        })
    }
}

#[derive(Clone, Debug)]
pub struct LineSpan {
    pub line: usize,
    pub col_start: usize,
    pub col_end: usize,
    pub text: String,
}

fn compute_line_starts(source: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (idx, ch) in source.char_indices() {
        if ch == '\n' {
            starts.push(idx + 1);
        }
    }
    starts
}
