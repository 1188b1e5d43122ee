//! Human-readable error reports

use std::ops::Range;

use ariadne::{Config, Label, Report, ReportKind, Source};
use sqlport_ast::Span;

use crate::Error;

impl Error {
    /// The source with a `<< ` marker inserted at the error offset
    pub fn marked_source(&self, source: &str) -> String {
        let mut at = self.offset().min(source.len());
        while !source.is_char_boundary(at) {
            at -= 1;
        }
        format!("{}<< {}", &source[..at], &source[at..])
    }

    /// An ariadne report pointing at the offending byte, without colors.
    ///
    /// `name` identifies the script in the report header.
    pub fn report(&self, source: &str, name: &str) -> String {
        let start = self.offset().min(source.len().saturating_sub(1));
        let span = Span::new(start, (start + 1).min(source.len()));
        let message = self.to_string();

        let mut out = Vec::new();
        let written = Report::build(ReportKind::Error, name.to_string(), start)
            .with_code(self.code())
            .with_message(&message)
            .with_label(Label::new((name.to_string(), Range::from(span))).with_message(&message))
            .with_config(Config::default().with_color(false))
            .finish()
            .write((name.to_string(), Source::from(source)), &mut out);

        match written {
            Ok(()) => String::from_utf8_lossy(&out).into_owned(),
            Err(_) => format!("{}: {}", self.code(), message),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;

    #[test]
    fn test_marked_source() {
        let source = "select * from t1 where x='abc";
        let err = parse(source).unwrap_err();
        assert_eq!(err.marked_source(source), "select * from t1 where x=<< 'abc");
    }

    #[test]
    fn test_report_mentions_code_and_name() {
        let source = "declare @i int\nset @j = 1";
        let err = parse(source).unwrap_err();
        let report = err.report(source, "batch.sql");
        assert!(report.contains("E-SCOPE-001"), "{}", report);
        assert!(report.contains("batch.sql"), "{}", report);
        assert!(report.contains("@j"), "{}", report);
    }
}
