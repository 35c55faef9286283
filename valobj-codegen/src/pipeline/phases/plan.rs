//! Plan phase - plans the augmentation of accepted declarations.

use eyre::Result;
use tracing::debug;
use valobj_core::classify;

use crate::{
    analyze,
    pipeline::{CompilationContext, Phase},
    plan::Planner,
};

/// Phase that produces the augmentation plan.
///
/// Does nothing when a blocking diagnostic was recorded: a rejected
/// declaration never gets a plan.
#[derive(Clone, Default)]
pub struct PlanPhase {
    planner: Planner,
}

impl PlanPhase {
    pub fn new(planner: Planner) -> Self {
        Self { planner }
    }
}

impl Phase for PlanPhase {
    fn name(&self) -> &'static str {
        "plan"
    }

    fn description(&self) -> &'static str {
        "Plan generated members and converter adapters"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        if ctx.has_errors() {
            debug!(errors = ctx.error_count(), "declaration rejected, skipping plan");
            return Ok(());
        }

        let category = *ctx
            .category
            .get_or_insert_with(|| classify(&ctx.configuration.underlying));
        let facts = ctx
            .facts
            .get_or_insert_with(|| analyze(&ctx.declaration));
        let plan = self.planner.plan(facts, &ctx.configuration, category);

        debug!(
            members = plan.members.len(),
            converters = plan.converters.len(),
            "plan ready"
        );
        ctx.plan = Some(plan);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use valobj_ir::{CandidateDeclaration, Configuration, DeclaredKind, Modifier};

    use super::*;
    use crate::pipeline::phases::{AnalyzePhase, ValidatePhase};

    fn run_all_phases(decl: CandidateDeclaration) -> CompilationContext {
        let mut ctx = CompilationContext::new(decl, Configuration::default());
        AnalyzePhase.run(&mut ctx).unwrap();
        ValidatePhase::new().run(&mut ctx).unwrap();
        PlanPhase::default().run(&mut ctx).unwrap();
        ctx
    }

    #[test]
    fn test_accepted_declaration_gets_plan() {
        let ctx = run_all_phases(CandidateDeclaration::partial("Age", DeclaredKind::Struct));
        assert!(ctx.is_accepted());
    }

    #[test]
    fn test_rejected_declaration_gets_no_plan() {
        let ctx = run_all_phases(
            CandidateDeclaration::partial("Age", DeclaredKind::Class)
                .with_modifier(Modifier::Abstract),
        );
        assert!(ctx.plan.is_none());
    }
}
