//! Check command report data structures.

use std::path::PathBuf;

use miette::GraphicalReportHandler;
use valobj_manifest::DiagnosticReport;

use super::output::{Output, Report};

/// Report data from validating every declared value object.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Number of declared value objects.
    pub declared: usize,
    /// Number of value objects that would be generated.
    pub accepted: usize,
    /// Diagnostics attached to the manifest source, in declaration order.
    pub diagnostics: Vec<DiagnosticReport>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        let handler = GraphicalReportHandler::new();
        for diagnostic in &self.diagnostics {
            let mut rendered = String::new();
            // Fall back to the plain message if the graphical handler fails
            if handler.render_report(&mut rendered, diagnostic).is_err() {
                rendered = format!("{}: {}", diagnostic.code(), diagnostic.message());
            }
            out.diagnostic(&rendered);
        }

        if !self.diagnostics.is_empty() {
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!(
                "✓ {} is valid: {} value object{}",
                self.config_path.display(),
                self.accepted,
                if self.accepted == 1 { "" } else { "s" }
            ));
        } else {
            out.preformatted(&format!(
                "✗ {}: {} error{}, {} warning{}; {} of {} value objects accepted",
                self.config_path.display(),
                self.error_count(),
                if self.error_count() == 1 { "" } else { "s" },
                self.warning_count(),
                if self.warning_count() == 1 { "" } else { "s" },
                self.accepted,
                self.declared,
            ));
        }
    }
}
