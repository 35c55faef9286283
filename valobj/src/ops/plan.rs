//! Plan operation - augmentation plans of accepted value objects.

use std::path::Path;

use eyre::{Context, Result};
use valobj_codegen::pipeline::{Pipeline, SnapshotPlugin};
use valobj_manifest::Manifest;

use crate::reports::{PlanReport, PlannedConverterSet, PlannedValueObject};

/// Execute the plan operation.
///
/// Rejected value objects and converter sets are reported with their
/// diagnostics instead of a plan.
pub fn plan(
    manifest: &Manifest,
    config_path: &Path,
    snapshot_dir: Option<&Path>,
) -> Result<PlanReport> {
    let mut pipeline = Pipeline::new();
    if let Some(dir) = snapshot_dir {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(dir));
    }

    let contexts = pipeline
        .run_all(manifest.inputs())
        .wrap_err("Planning failed")?;

    let converter_sets = manifest
        .converter_sets()
        .iter()
        .map(|set| {
            let ctx = pipeline.run_converter_set(set.clone(), &contexts);
            PlannedConverterSet {
                name: ctx.declaration.qualified_name(),
                plan: ctx.plan,
                diagnostics: ctx.diagnostics,
            }
        })
        .collect();

    let value_objects = contexts
        .into_iter()
        .map(|ctx| PlannedValueObject {
            name: ctx.declaration.qualified_name(),
            plan: ctx.plan,
            diagnostics: ctx.diagnostics,
        })
        .collect();

    Ok(PlanReport {
        config_path: config_path.to_path_buf(),
        value_objects,
        converter_sets,
        snapshot_dir: snapshot_dir.map(Path::to_path_buf),
    })
}
