//! # Error Reporting Utilities
//!
//! This module renders diagnostics against their source text with `ariadne`.

use ariadne::{Label, Report, Source};

use crate::Diagnostic;

/// Build a formatted message for a diagnostic
pub fn build_diagnostic_message(source: &str, diagnostic: &Diagnostic, with_color: bool) -> String {
    let mut write_buffer = Vec::new();
    let code_u32: u32 = diagnostic.code.into();
    let mut report = Report::build(
        diagnostic.severity.into(),
        ((), diagnostic.span.into_range()),
    )
    .with_config(
        ariadne::Config::new()
            .with_index_type(ariadne::IndexType::Byte)
            .with_color(with_color),
    )
    .with_code(code_u32)
    .with_message(&diagnostic.message)
    .with_label(Label::new(((), diagnostic.span.into_range())).with_message(&diagnostic.message));

    for (span, message) in &diagnostic.related_spans {
        report = report.with_label(Label::new(((), span.into_range())).with_message(message));
    }

    if report
        .finish()
        .write(Source::from(source), &mut write_buffer)
        .is_err()
    {
        return diagnostic.to_string();
    }
    String::from_utf8_lossy(&write_buffer).to_string()
}

#[cfg(test)]
mod tests {
    use chumsky::span::SimpleSpan;

    use super::*;

    #[test]
    fn test_report_mentions_message_and_code() {
        let source = "public class Widget : Missing {}";
        let start = source.find("Missing").unwrap();
        let diagnostic = Diagnostic::unresolved_type("Missing", SimpleSpan::from(start..start + 7));
        let rendered = build_diagnostic_message(source, &diagnostic, false);
        assert!(rendered.contains("[1001]"));
        assert!(rendered.contains("The type or namespace name 'Missing' could not be found"));
    }
}
