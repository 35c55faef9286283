//! Pipeline phase trait.

use eyre::Result;

use super::CompilationContext;

/// Information about a pipeline phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseInfo {
    /// The phase name.
    pub name: &'static str,
    /// A human-readable description.
    pub description: &'static str,
}

/// A phase in the compilation pipeline.
///
/// Phases are executed in order by the pipeline. Each phase can read and
/// modify the compilation context, adding facts, diagnostics or the plan.
///
/// Built-in phases:
/// - `AnalyzePhase` - derives declaration facts and the primitive category
/// - `ValidatePhase` - runs the rule engine and collects diagnostics
/// - `PlanPhase` - plans the augmentation of accepted declarations
///
/// Custom phases can be added to the pipeline for additional processing.
pub trait Phase: Send + Sync {
    /// The name of this phase (used in logs and plugin hooks).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &'static str;

    /// Run this phase on the compilation context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Problems with the
    /// declaration itself are recorded as diagnostics instead.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;

    /// Get information about this phase.
    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
