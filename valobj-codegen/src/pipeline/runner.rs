//! Pipeline orchestrator.

use std::sync::Arc;

use eyre::Result;
use rayon::prelude::*;
use tracing::{debug, debug_span};
use valobj_ir::{
    CandidateDeclaration, Configuration, ConverterSetDeclaration, ConverterSetMember,
    ConverterSetPlan,
};

use super::{
    CompilationContext, ConverterSetContext, Diagnostic, DiagnosticCode, Phase, PhaseInfo, Plugin,
    phases::{AnalyzePhase, Finding, PlanPhase, RuleEngine, RuleInfo, ValidatePhase},
};
use crate::{adapters::TemplateRegistry, plan::Planner};

/// The compilation pipeline orchestrator.
///
/// The pipeline manages the execution of compilation phases and plugin hooks.
/// It runs the built-in phases (analyze, validate, plan) followed by any user
/// phases, calling plugin hooks before and after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .plugin(SnapshotPlugin::new())
///     .phase(MyCustomPhase);
///
/// let ctx = pipeline.run(declaration, configuration)?;
/// ```
pub struct Pipeline {
    engine: Arc<RuleEngine>,
    planner: Planner,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a new pipeline with the built-in rules and converter templates.
    pub fn new() -> Self {
        Self::with_engine(RuleEngine::new())
    }

    /// Create a pipeline validating with `engine`.
    ///
    /// The planner shares the engine's converter templates, so a target the
    /// engine accepts is always one the planner can build.
    pub fn with_engine(engine: RuleEngine) -> Self {
        let planner = Planner::new(Arc::clone(engine.templates()));
        Self {
            engine: Arc::new(engine),
            planner,
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Create a pipeline with the built-in rules and custom converter templates.
    pub fn with_templates(templates: TemplateRegistry) -> Self {
        Self::with_engine(RuleEngine::with_templates(Arc::new(templates)))
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// The converter templates used for validation and planning.
    pub fn templates(&self) -> &TemplateRegistry {
        self.engine.templates()
    }

    /// Information about the phases, in execution order.
    pub fn phase_info(&self) -> Vec<PhaseInfo> {
        self.builtin_phases()
            .iter()
            .chain(self.phases.iter())
            .map(|p| p.info())
            .collect()
    }

    /// Information about the rules, in registry order.
    pub fn rule_info(&self) -> Vec<RuleInfo> {
        self.engine.rule_info()
    }

    fn builtin_phases(&self) -> Vec<Box<dyn Phase>> {
        vec![
            Box::new(AnalyzePhase),
            Box::new(ValidatePhase::with_engine(Arc::clone(&self.engine))),
            Box::new(PlanPhase::new(self.planner.clone())),
        ]
    }

    /// Run the pipeline on one declaration.
    ///
    /// Executes all phases in order:
    /// 1. AnalyzePhase - derives facts and the primitive category
    /// 2. ValidatePhase - collects diagnostics
    /// 3. PlanPhase - plans the augmentation unless an error was reported
    /// 4. User phases (if any)
    ///
    /// Plugin hooks are called before and after each phase.
    ///
    /// # Errors
    ///
    /// Returns an error if a plugin or user phase fails. The built-in phases
    /// report problems with the declaration as diagnostics and never fail.
    pub fn run(
        &self,
        declaration: CandidateDeclaration,
        configuration: Configuration,
    ) -> Result<CompilationContext> {
        let span = debug_span!("value_object", name = %declaration.name);
        let _guard = span.enter();

        let mut ctx = CompilationContext::new(declaration, configuration);
        for phase in self.builtin_phases().iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    /// Run the pipeline on many declarations in parallel.
    ///
    /// Declarations are independent; the output is in input order.
    pub fn run_all(
        &self,
        inputs: Vec<(CandidateDeclaration, Configuration)>,
    ) -> Result<Vec<CompilationContext>> {
        debug!(count = inputs.len(), "running pipeline");
        inputs
            .into_par_iter()
            .map(|(declaration, configuration)| self.run(declaration, configuration))
            .collect()
    }

    /// Resolve a converter set against already compiled value objects.
    ///
    /// Entries name value objects by simple or qualified name. An entry that
    /// names nothing in `compiled` is an error. An entry whose value object was
    /// rejected is skipped, since that value object already carries its own
    /// diagnostics. Every requested target must support the entry's underlying
    /// type. The plan is produced only when no entry reported an error.
    pub fn run_converter_set(
        &self,
        declaration: ConverterSetDeclaration,
        compiled: &[CompilationContext],
    ) -> ConverterSetContext {
        let span = debug_span!("converter_set", name = %declaration.name);
        let _guard = span.enter();

        let mut ctx = ConverterSetContext::new(declaration);
        let mut members: Vec<ConverterSetMember> = Vec::new();

        for entry in &ctx.declaration.entries {
            let Some(target) = resolve(compiled, &entry.value_object) else {
                let finding = Finding::for_type(&ctx.declaration.name)
                    .with("value_object", &entry.value_object);
                ctx.diagnostics.push(Diagnostic::new(
                    DiagnosticCode::UnknownConverterSetEntry,
                    finding.into_placeholders(),
                    entry.location.clone(),
                ));
                continue;
            };
            let (Some(facts), Some(plan)) = (&target.facts, &target.plan) else {
                debug!(value_object = %entry.value_object, "skipping rejected value object");
                continue;
            };
            if members.iter().any(|m| m.value_object == plan.qualified_name) {
                continue;
            }

            let problems = self.engine.validate_converters(
                facts,
                &target.configuration,
                &ctx.declaration.targets,
                &entry.location,
            );
            if !problems.is_empty() {
                ctx.diagnostics.extend(problems);
                continue;
            }

            members.push(ConverterSetMember {
                value_object: plan.qualified_name.clone(),
                adapters: self.planner.adapters(
                    &target.configuration,
                    plan.category,
                    &ctx.declaration.targets,
                ),
            });
        }

        if !ctx.has_errors() {
            ctx.plan = Some(ConverterSetPlan {
                name: ctx.declaration.name.clone(),
                qualified_name: ctx.declaration.qualified_name(),
                members,
            });
        }
        ctx
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        debug!(phase = phase_name, "running phase");
        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

/// Find a compiled value object by qualified name, or by a simple name that
/// only one of them carries.
fn resolve<'c>(compiled: &'c [CompilationContext], name: &str) -> Option<&'c CompilationContext> {
    if let Some(ctx) = compiled
        .iter()
        .find(|ctx| ctx.declaration.qualified_name() == name)
    {
        return Some(ctx);
    }

    let mut by_name = compiled.iter().filter(|ctx| ctx.declaration.name == name);
    match (by_name.next(), by_name.next()) {
        (Some(ctx), None) => Some(ctx),
        _ => None,
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use valobj_ir::{DeclaredKind, Modifier};

    use super::*;

    struct CountingPlugin {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
    }

    impl CountingPlugin {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let before = Arc::new(AtomicUsize::new(0));
            let after = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    before_count: before.clone(),
                    after_count: after.clone(),
                },
                before,
                after,
            )
        }
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct OrderPlugin(Arc<Mutex<Vec<String>>>);

    impl Plugin for OrderPlugin {
        fn name(&self) -> &'static str {
            "order"
        }

        fn on_after_phase(&self, phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.0.lock().unwrap().push(phase.to_string());
            Ok(())
        }
    }

    fn customer_id() -> CandidateDeclaration {
        CandidateDeclaration::partial("CustomerId", DeclaredKind::Class)
    }

    #[test]
    fn test_pipeline_runs_phases() {
        let ctx = Pipeline::new()
            .run(customer_id(), Configuration::default())
            .expect("pipeline should succeed");

        assert!(ctx.facts.is_some());
        assert!(ctx.category.is_some());
        assert!(ctx.plan.is_some());
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let (plugin, before_count, after_count) = CountingPlugin::new();

        let pipeline = Pipeline::new().plugin(plugin);
        let _ = pipeline
            .run(customer_id(), Configuration::default())
            .expect("pipeline should succeed");

        // 3 built-in phases = 3 before + 3 after hooks
        assert_eq!(before_count.load(Ordering::SeqCst), 3);
        assert_eq!(after_count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_phases_run_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        Pipeline::new()
            .plugin(OrderPlugin(seen.clone()))
            .run(customer_id(), Configuration::default())
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["analyze", "validate", "plan"]);
    }

    #[test]
    fn test_rejected_declaration_has_no_plan() {
        let decl = customer_id().with_modifier(Modifier::Abstract);
        let ctx = Pipeline::new().run(decl, Configuration::default()).unwrap();

        assert!(ctx.has_errors());
        assert!(ctx.plan.is_none());
    }

    #[test]
    fn test_run_all_preserves_input_order() {
        let inputs: Vec<_> = (0..32)
            .map(|i| {
                let decl = CandidateDeclaration::partial(format!("Id{}", i), DeclaredKind::Struct);
                (decl, Configuration::default())
            })
            .collect();

        let contexts = Pipeline::new().run_all(inputs).unwrap();
        let names: Vec<_> = contexts.iter().map(|c| c.type_name().to_string()).collect();
        let expected: Vec<_> = (0..32).map(|i| format!("Id{}", i)).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_phase_info() {
        let names: Vec<_> = Pipeline::new().phase_info().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["analyze", "validate", "plan"]);
    }
}
