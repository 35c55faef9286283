//! Check operation - validation of every declared value object.

use std::path::Path;

use eyre::{Context, Result};
use tracing::debug;
use valobj_codegen::pipeline::Pipeline;
use valobj_manifest::Manifest;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs the pipeline over every value object, resolves the converter sets
/// against the results and attaches all diagnostics to the manifest source.
pub fn check(manifest: &Manifest, config_path: &Path) -> Result<CheckReport> {
    let pipeline = Pipeline::new();
    let contexts = pipeline
        .run_all(manifest.inputs())
        .wrap_err("Validation failed")?;
    let sets: Vec<_> = manifest
        .converter_sets()
        .iter()
        .map(|set| pipeline.run_converter_set(set.clone(), &contexts))
        .collect();

    let diagnostics = contexts
        .iter()
        .flat_map(|ctx| &ctx.diagnostics)
        .chain(sets.iter().flat_map(|set| &set.diagnostics))
        .map(|diag| {
            manifest.source().report(
                diag.code.as_str(),
                diag.is_blocking(),
                &diag.message,
                &diag.location,
            )
        })
        .collect::<Vec<_>>();
    debug!(diagnostics = diagnostics.len(), "check finished");

    Ok(CheckReport {
        config_path: config_path.to_path_buf(),
        declared: contexts.len(),
        accepted: contexts.iter().filter(|ctx| ctx.is_accepted()).count(),
        diagnostics,
    })
}
