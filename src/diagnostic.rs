//! Positioned failures produced by every stage, and their text rendering.

use std::fmt;
use std::fmt::Write as _;

use crate::token::{Position, Span};

/// Classifies a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Character that cannot start any token.
    IllegalCharacter,
    /// Token sequence that does not match the grammar.
    InvalidSyntax,
    /// A required follow-up character is missing (`=` after `!`).
    ExpectedCharacter,
    /// Failure while evaluating.
    Runtime,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::IllegalCharacter => "Illegal Character",
            Self::InvalidSyntax => "Invalid Syntax",
            Self::ExpectedCharacter => "Expected Character",
            Self::Runtime => "Runtime Error",
        })
    }
}

/// One traceback line: the frame's display name and the position
/// execution was at inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub name: String,
    pub position: Position,
}

/// Failure value produced by the lexer, parser, or interpreter.
///
/// `Display` gives a one-line summary; [`Diagnostic::render`] gives
/// the full report with source excerpt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
    pub message: String,
    /// Innermost frame first. Empty unless `kind` is `Runtime`.
    pub traceback: Vec<Frame>,
}

impl Diagnostic {
    fn new(kind: DiagnosticKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
            traceback: Vec::new(),
        }
    }

    #[must_use]
    pub fn illegal_character(span: Span, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::IllegalCharacter, span, message)
    }

    #[must_use]
    pub fn invalid_syntax(span: Span, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::InvalidSyntax, span, message)
    }

    #[must_use]
    pub fn expected_character(span: Span, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::ExpectedCharacter, span, message)
    }

    #[must_use]
    pub fn runtime(span: Span, message: impl Into<String>, traceback: Vec<Frame>) -> Self {
        Self {
            traceback,
            ..Self::new(DiagnosticKind::Runtime, span, message)
        }
    }

    /// Full human-readable report.
    ///
    /// ```text
    /// Invalid Syntax: Expected ')' File <stdin>, line 1
    ///
    /// (1 + 2
    ///       ^
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.kind == DiagnosticKind::Runtime {
            out.push_str(&self.render_traceback());
            let _ = write!(out, "{}, {}", self.kind, self.message);
        } else {
            let start = &self.span.start;
            let _ = write!(
                out,
                "{}: {} File {}, line {}",
                self.kind,
                self.message,
                start.file_name(),
                start.line + 1
            );
        }
        out.push_str(" \n\n");
        out.push_str(&render_excerpt(&self.span.start, &self.span.end));
        out
    }

    fn render_traceback(&self) -> String {
        let mut out = String::from("Traceback (most recent call last):\n");
        for frame in self.traceback.iter().rev() {
            let _ = writeln!(
                out,
                "  File {}, line {}, in {}",
                frame.position.file_name(),
                frame.position.line + 1,
                frame.name
            );
        }
        out
    }
}

/// Render the source lines covered by `start..end`, each followed by
/// a line of carets under the covered columns. Tabs are removed from
/// the result.
#[must_use]
pub fn render_excerpt(start: &Position, end: &Position) -> String {
    let text: Vec<char> = start.source.text.chars().collect();
    let mut out = String::new();

    let line_start = |from: usize| {
        text[..from.min(text.len())]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1)
    };
    let line_end = |from: usize| {
        text.iter()
            .skip(from)
            .position(|&c| c == '\n')
            .map_or(text.len(), |i| from + i)
    };

    let mut idx_start = line_start(start.offset);
    let mut idx_end = line_end(idx_start);
    let line_count = end.line.saturating_sub(start.line) + 1;

    for i in 0..line_count {
        let line: String = text[idx_start.min(idx_end)..idx_end].iter().collect();
        let col_start = if i == 0 { start.column } else { 0 };
        let col_end = if i == line_count - 1 {
            end.column
        } else {
            line.chars().count().saturating_sub(1)
        };

        out.push_str(&line);
        out.push('\n');
        out.push_str(&" ".repeat(col_start));
        out.push_str(&"^".repeat(col_end.saturating_sub(col_start)));

        idx_start = (idx_end + 1).min(text.len());
        idx_end = line_end(idx_start);
    }

    out.replace('\t', "")
}
