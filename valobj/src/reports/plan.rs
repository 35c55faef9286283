//! Plan command report data structures.

use std::path::PathBuf;

use serde::Serialize;
use valobj_codegen::pipeline::Diagnostic;
use valobj_ir::{AugmentationPlan, ConverterSetPlan};

use super::output::{Output, Report};

/// Plans of every declared value object.
#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub config_path: PathBuf,
    pub value_objects: Vec<PlannedValueObject>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub converter_sets: Vec<PlannedConverterSet>,
    /// Directory snapshots were written to, if requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_dir: Option<PathBuf>,
}

/// Outcome for one value object: a plan, or the diagnostics that blocked it.
#[derive(Debug, Serialize)]
pub struct PlannedValueObject {
    pub name: String,
    pub plan: Option<AugmentationPlan>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome for one converter set.
#[derive(Debug, Serialize)]
pub struct PlannedConverterSet {
    pub name: String,
    pub plan: Option<ConverterSetPlan>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report for PlanReport {
    fn render(&self, out: &mut dyn Output) {
        for (i, vo) in self.value_objects.iter().enumerate() {
            if i > 0 {
                out.newline();
            }

            match &vo.plan {
                Some(plan) => out.preformatted(plan.to_string().trim_end()),
                None => out.preformatted(&format!("{} (not generated)", vo.name)),
            }
            for diagnostic in &vo.diagnostics {
                out.diagnostic(&diagnostic.to_string());
            }
        }

        for set in &self.converter_sets {
            out.newline();
            match &set.plan {
                Some(plan) => out.preformatted(plan.to_string().trim_end()),
                None => out.preformatted(&format!("{} (not generated)", set.name)),
            }
            for diagnostic in &set.diagnostics {
                out.diagnostic(&diagnostic.to_string());
            }
        }

        if let Some(dir) = &self.snapshot_dir {
            out.newline();
            out.preformatted(&format!("Snapshots written to {}", dir.display()));
        }
    }
}
