//! # Diagnostic System
//!
//! This module provides the diagnostic infrastructure for reporting lexical, syntax
//! and binding problems found while building a compilation.

use std::fmt;
use std::sync::Arc;

use ariadne::ReportKind;
use chumsky::span::SimpleSpan;

/// A diagnostic message from parsing or binding
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub code: DiagnosticCode,
    pub message: String,
    /// Path of the file the span refers to, when known
    pub file_path: Option<Arc<str>>,
    /// Source span where this diagnostic applies
    pub span: SimpleSpan<usize>,
    /// Optional related spans for additional context
    pub related_spans: Vec<(SimpleSpan<usize>, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Info,
    Hint,
}

impl From<ReportKind<'static>> for DiagnosticSeverity {
    fn from(kind: ReportKind<'static>) -> Self {
        match kind {
            ReportKind::Error => Self::Error,
            ReportKind::Warning => Self::Warning,
            ReportKind::Advice => Self::Info,
            ReportKind::Custom(_, _) => Self::Info,
        }
    }
}

impl From<DiagnosticSeverity> for ReportKind<'static> {
    fn from(severity: DiagnosticSeverity) -> Self {
        match severity {
            DiagnosticSeverity::Error => ReportKind::Error,
            DiagnosticSeverity::Warning => ReportKind::Warning,
            DiagnosticSeverity::Info => ReportKind::Advice,
            DiagnosticSeverity::Hint => ReportKind::Advice,
        }
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
            Self::Hint => write!(f, "hint"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    // Parse-related errors (0-999)
    LexicalError,
    UnexpectedToken,
    UnexpectedEndOfFile,

    // Binding errors (1000-1999)
    UnresolvedType,
    UnresolvedAttribute,
    DuplicateDefinition,
    InvalidAttributeArgument,
    ConflictingPartialDeclaration,
    InvalidConstant,
}

impl From<DiagnosticCode> for u32 {
    fn from(code: DiagnosticCode) -> Self {
        match code {
            DiagnosticCode::LexicalError => 1,
            DiagnosticCode::UnexpectedToken => 3,
            DiagnosticCode::UnexpectedEndOfFile => 4,
            DiagnosticCode::UnresolvedType => 1001,
            DiagnosticCode::UnresolvedAttribute => 1002,
            DiagnosticCode::DuplicateDefinition => 1003,
            DiagnosticCode::InvalidAttributeArgument => 1004,
            DiagnosticCode::ConflictingPartialDeclaration => 1005,
            DiagnosticCode::InvalidConstant => 1006,
        }
    }
}

impl Diagnostic {
    /// Create an error diagnostic
    pub fn error(code: DiagnosticCode, message: String) -> Self {
        Self::new(DiagnosticSeverity::Error, code, message)
    }

    fn new(severity: DiagnosticSeverity, code: DiagnosticCode, message: String) -> Self {
        Self {
            severity,
            code,
            message,
            file_path: None,
            span: SimpleSpan::from(0..0),
            related_spans: Vec::new(),
        }
    }

    /// Add location information to this diagnostic
    pub const fn with_location(mut self, span: SimpleSpan<usize>) -> Self {
        self.span = span;
        self
    }

    pub fn with_file(mut self, path: Arc<str>) -> Self {
        self.file_path = Some(path);
        self
    }

    /// Add a related span with context message
    pub fn with_related_span(mut self, span: SimpleSpan<usize>, message: String) -> Self {
        self.related_spans.push((span, message));
        self
    }

    /// Convenience method for lexical errors
    pub fn lexical_error(message: String, span: SimpleSpan<usize>) -> Self {
        Self::error(DiagnosticCode::LexicalError, message).with_location(span)
    }

    /// Convenience method for unexpected token errors
    pub fn unexpected_token(expected: &str, found: &str, span: SimpleSpan<usize>) -> Self {
        Self::error(
            DiagnosticCode::UnexpectedToken,
            format!("Expected {expected}, found {found}"),
        )
        .with_location(span)
    }

    pub fn unexpected_end_of_file(expected: &str, span: SimpleSpan<usize>) -> Self {
        Self::error(
            DiagnosticCode::UnexpectedEndOfFile,
            format!("Expected {expected}, found end of file"),
        )
        .with_location(span)
    }

    /// The type name could not be bound to any declaration
    pub fn unresolved_type(name: &str, span: SimpleSpan<usize>) -> Self {
        Self::error(
            DiagnosticCode::UnresolvedType,
            format!("The type or namespace name '{name}' could not be found"),
        )
        .with_location(span)
    }

    pub fn unresolved_attribute(name: &str, span: SimpleSpan<usize>) -> Self {
        Self::error(
            DiagnosticCode::UnresolvedAttribute,
            format!("The attribute type '{name}' could not be found"),
        )
        .with_location(span)
    }

    pub fn duplicate_definition(name: &str, span: SimpleSpan<usize>) -> Self {
        Self::error(
            DiagnosticCode::DuplicateDefinition,
            format!("Duplicate definition of '{name}'"),
        )
        .with_location(span)
    }

    pub fn invalid_attribute_argument(message: String, span: SimpleSpan<usize>) -> Self {
        Self::error(DiagnosticCode::InvalidAttributeArgument, message).with_location(span)
    }

    /// A `const` or enum member initializer that is not a valid constant
    pub fn invalid_constant(message: String, span: SimpleSpan<usize>) -> Self {
        Self::error(DiagnosticCode::InvalidConstant, message).with_location(span)
    }

    /// Two declarations of the same type disagree and at least one is not `partial`
    pub fn missing_partial_modifier(name: &str, span: SimpleSpan<usize>) -> Self {
        Self::error(
            DiagnosticCode::ConflictingPartialDeclaration,
            format!("Missing partial modifier on declaration of type '{name}'"),
        )
        .with_location(span)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        match &self.file_path {
            Some(path) => write!(f, " (at {}:{}:{})", path, self.span.start, self.span.end)?,
            None => write!(f, " (at {}:{})", self.span.start, self.span.end)?,
        }
        for (span, message) in &self.related_spans {
            write!(f, "\n  note: {} (at {}:{})", message, span.start, span.end)?;
        }
        Ok(())
    }
}
