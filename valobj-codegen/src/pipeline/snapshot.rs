//! Pipeline snapshot plugin for inspection and debugging.
//!
//! This module provides a plugin that captures the pipeline state after each
//! phase, so the intermediate results of a run can be written out as JSON.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use eyre::Result;
use serde::Serialize;
use valobj_ir::{AugmentationPlan, DeclarationFacts, PrimitiveCategory};

use super::{CompilationContext, Diagnostic, Plugin};

/// A snapshot of the pipeline state at a specific phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    /// The phase that just completed.
    pub phase: String,

    /// The declaration being compiled.
    pub type_name: String,

    /// Declaration facts (available after the "analyze" phase).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facts: Option<DeclarationFacts>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<PrimitiveCategory>,

    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,

    /// The plan (available after the "plan" phase for accepted declarations).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<AugmentationPlan>,
}

impl PhaseSnapshot {
    /// File name used when writing this snapshot.
    pub fn file_name(&self) -> String {
        format!("{}.{}.json", self.type_name, self.phase)
    }
}

/// A plugin that captures pipeline state after each phase.
///
/// # Example
///
/// ```ignore
/// let snapshots = Arc::new(SnapshotPlugin::new());
/// let pipeline = Pipeline::new().plugin(Arc::clone(&snapshots));
/// let ctx = pipeline.run(declaration, configuration)?;
///
/// snapshots.write_to_dir(".valobj/debug")?;
/// ```
pub struct SnapshotPlugin {
    /// Collected snapshots.
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    /// Output directory for snapshots.
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    /// Create a new snapshot plugin.
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a new snapshot plugin that writes to a directory as it goes.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// Get all collected snapshots.
    ///
    /// Snapshots of one declaration are in phase order; declarations run in
    /// parallel may interleave.
    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Write all snapshots to a directory, one file per declaration and phase.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        for snapshot in self.snapshots().iter() {
            write_snapshot(dir, snapshot)?;
        }

        Ok(())
    }

    fn capture_snapshot(&self, phase: &str, ctx: &CompilationContext) -> PhaseSnapshot {
        let snapshot = PhaseSnapshot {
            phase: phase.to_string(),
            type_name: ctx.type_name().to_string(),
            facts: ctx.facts.clone(),
            category: ctx.category,
            diagnostics: ctx.diagnostics.clone(),
            plan: ctx.plan.clone(),
        };
        self.snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(snapshot.clone());
        snapshot
    }
}

fn write_snapshot(dir: &Path, snapshot: &PhaseSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(dir.join(snapshot.file_name()), json)?;
    Ok(())
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        let snapshot = self.capture_snapshot(phase, ctx);

        // If output directory is configured, write immediately
        if let Some(ref dir) = self.output_dir {
            fs::create_dir_all(dir)?;
            write_snapshot(dir, &snapshot)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use valobj_ir::{CandidateDeclaration, Configuration, DeclaredKind};

    use super::*;
    use crate::pipeline::Pipeline;

    #[test]
    fn test_snapshot_plugin_creation() {
        let plugin = SnapshotPlugin::new();
        assert!(plugin.snapshots().is_empty());
    }

    #[test]
    fn test_captures_every_phase() {
        let plugin = Arc::new(SnapshotPlugin::new());
        Pipeline::new()
            .plugin(Arc::clone(&plugin))
            .run(
                CandidateDeclaration::partial("Age", DeclaredKind::Struct),
                Configuration::default(),
            )
            .unwrap();

        let snapshots = plugin.snapshots();
        let phases: Vec<_> = snapshots.iter().map(|s| s.phase.as_str()).collect();
        assert_eq!(phases, vec!["analyze", "validate", "plan"]);
        assert!(snapshots[0].facts.is_some());
        assert!(snapshots[0].plan.is_none());
        assert!(snapshots[2].plan.is_some());
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let plugin = Arc::new(SnapshotPlugin::new());
        Pipeline::new()
            .plugin(Arc::clone(&plugin))
            .run(
                CandidateDeclaration::partial("Age", DeclaredKind::Struct),
                Configuration::default(),
            )
            .unwrap();

        plugin.write_to_dir(dir.path()).unwrap();

        let plan = fs::read_to_string(dir.path().join("Age.plan.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&plan).unwrap();
        assert_eq!(value["phase"], "plan");
        assert_eq!(value["plan"]["type_name"], "Age");
    }
}
