//! # Prism Diagnostics
//!
//! Diagnostics produced while parsing and binding declarations, and the [`Location`]
//! values handed to diagnostic-reporting hosts.

mod diagnostics;
mod location;
mod reporting;

pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSeverity};
pub use location::{LineColumn, LineIndex, Location};
pub use reporting::build_diagnostic_message;
