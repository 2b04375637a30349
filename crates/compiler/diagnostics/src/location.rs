//! Source locations handed to diagnostic-reporting hosts.

use std::fmt;
use std::sync::Arc;

use chumsky::span::SimpleSpan;

/// A 1-based line and column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineColumn {
    pub line: u32,
    pub column: u32,
}

/// Maps byte offsets of a text to line/column positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(offset, _)| offset + 1))
            .collect();
        Self {
            line_starts,
            len: text.len(),
        }
    }

    /// Line/column of `offset`; offsets past the end clamp to the end of the text.
    pub fn line_column(&self, offset: usize) -> LineColumn {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        LineColumn {
            line: line as u32 + 1,
            column: (offset - self.line_starts[line]) as u32 + 1,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// A span inside a named source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub file_path: Arc<str>,
    pub span: SimpleSpan<usize>,
    pub start: LineColumn,
    pub end: LineColumn,
}

impl Location {
    pub fn new(file_path: Arc<str>, span: SimpleSpan<usize>, index: &LineIndex) -> Self {
        Self {
            file_path,
            start: index.line_column(span.start),
            end: index.line_column(span.end),
            span,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.file_path, self.start.line, self.start.column
        )
    }
}
