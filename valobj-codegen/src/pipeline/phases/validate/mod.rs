//! Validate phase - runs the rule engine on the analyzed declaration.

mod engine;
mod rule;
pub mod rules;

use std::sync::Arc;

use eyre::Result;
use tracing::debug;

pub use engine::{RuleEngine, RuleEngineBuilder, RuleEngineError};
pub use rule::{Finding, Rule, RuleInfo, RuleInput};

use crate::{
    analyze,
    pipeline::{CompilationContext, Phase},
};

/// Phase that validates the declaration and collects diagnostics.
///
/// Errors never abort the pipeline; they only prevent the plan phase from
/// producing a plan.
pub struct ValidatePhase {
    engine: Arc<RuleEngine>,
}

impl ValidatePhase {
    /// Create a new validate phase with the built-in rules.
    pub fn new() -> Self {
        Self::with_engine(Arc::new(RuleEngine::new()))
    }

    /// Create a validate phase sharing `engine`.
    pub fn with_engine(engine: Arc<RuleEngine>) -> Self {
        Self { engine }
    }

    /// Get information about all rules that will be run.
    pub fn rule_info(&self) -> Vec<RuleInfo> {
        self.engine.rule_info()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check the declaration against the rule registry"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let facts = ctx
            .facts
            .get_or_insert_with(|| analyze(&ctx.declaration));
        let diagnostics = self.engine.validate(facts, &ctx.configuration);
        ctx.diagnostics.extend(diagnostics);

        debug!(
            errors = ctx.error_count(),
            warnings = ctx.warning_count(),
            "validation finished"
        );
        Ok(())
    }
}
