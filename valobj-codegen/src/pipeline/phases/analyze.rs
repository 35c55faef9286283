//! Analyze phase - derives facts from the declaration.

use eyre::Result;
use tracing::debug;
use valobj_core::classify;

use crate::{
    analyze,
    pipeline::{CompilationContext, Phase},
};

/// Phase that runs the shape analyzer and classifies the underlying type.
pub struct AnalyzePhase;

impl Phase for AnalyzePhase {
    fn name(&self) -> &'static str {
        "analyze"
    }

    fn description(&self) -> &'static str {
        "Derive declaration facts and classify the underlying type"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let facts = analyze(&ctx.declaration);
        let category = classify(&ctx.configuration.underlying);
        debug!(
            kind = %facts.declared_kind,
            underlying = %ctx.configuration.underlying,
            %category,
            "declaration analyzed"
        );

        ctx.facts = Some(facts);
        ctx.category = Some(category);
        Ok(())
    }
}
