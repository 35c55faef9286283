//! Rendering pipeline diagnostics against the manifest source.

use std::fmt;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use valobj_ir::SourceLocation;

use crate::SourceContext;

/// A pipeline diagnostic attached to the manifest source, for miette rendering.
#[derive(Debug)]
pub struct DiagnosticReport {
    code: String,
    severity: miette::Severity,
    message: String,
    src: NamedSource<String>,
    offset: usize,
    length: usize,
}

impl DiagnosticReport {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_error(&self) -> bool {
        self.severity == miette::Severity::Error
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DiagnosticReport {}

impl Diagnostic for DiagnosticReport {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(self.severity)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new(
            Some("declared here".to_string()),
            self.offset,
            self.length,
        ))))
    }
}

impl SourceContext {
    /// Attach a diagnostic to the declaration at `location`.
    pub fn report(
        &self,
        code: impl Into<String>,
        is_error: bool,
        message: impl Into<String>,
        location: &SourceLocation,
    ) -> DiagnosticReport {
        // Locations past the end of this source belong to another file
        let in_bounds = location.offset + location.length <= self.src().len();
        DiagnosticReport {
            code: code.into(),
            severity: if is_error {
                miette::Severity::Error
            } else {
                miette::Severity::Warning
            },
            message: message.into(),
            src: self.named_source(),
            offset: if in_bounds { location.offset } else { 0 },
            length: if in_bounds { location.length } else { 0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Manifest;

    #[test]
    fn test_report_labels_declaration() {
        let manifest: Manifest = "[[value-object]]\nname = \"Age\"\n".parse().unwrap();
        let location = &manifest.value_objects()[0].declaration.location;
        let report = manifest.source().report(
            "VOG016",
            true,
            "Type 'Age' should be partial",
            location,
        );

        assert!(report.is_error());
        assert_eq!(report.code(), "VOG016");
        assert_eq!(report.to_string(), "Type 'Age' should be partial");

        let labels: Vec<_> = report.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 25);
        assert_eq!(labels[0].len(), 3);
    }

    #[test]
    fn test_warning_severity() {
        let ctx = SourceContext::new("", "valobj.toml");
        let report = ctx.report("VOG022", false, "advisory", &SourceLocation::new(10, 5));

        assert!(!report.is_error());
        assert_eq!(report.severity(), Some(miette::Severity::Warning));
        let labels: Vec<_> = report.labels().unwrap().collect();
        assert_eq!(labels[0].offset(), 0);
    }
}
