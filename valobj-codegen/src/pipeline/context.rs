//! Compilation context passed through pipeline phases.

use valobj_ir::{
    AugmentationPlan, CandidateDeclaration, Configuration, ConverterSetDeclaration,
    ConverterSetPlan, DeclarationFacts, PrimitiveCategory,
};

use super::diagnostic::Diagnostic;

/// Context passed through all pipeline phases.
///
/// This struct carries the state of one declaration through each phase,
/// accumulating results and diagnostics along the way.
#[derive(Debug, Clone)]
pub struct CompilationContext {
    /// The declaration being compiled.
    pub declaration: CandidateDeclaration,
    /// Its generation configuration.
    pub configuration: Configuration,
    /// Structural facts (populated by AnalyzePhase).
    pub facts: Option<DeclarationFacts>,
    /// Category of the underlying type (populated by AnalyzePhase).
    pub category: Option<PrimitiveCategory>,
    /// Diagnostics collected during compilation.
    pub diagnostics: Vec<Diagnostic>,
    /// The augmentation plan (populated by PlanPhase for accepted declarations).
    pub plan: Option<AugmentationPlan>,
}

impl CompilationContext {
    /// Create a new compilation context.
    pub fn new(declaration: CandidateDeclaration, configuration: Configuration) -> Self {
        Self {
            declaration,
            configuration,
            facts: None,
            category: None,
            diagnostics: Vec::new(),
            plan: None,
        }
    }

    /// Name of the declaration being compiled.
    pub fn type_name(&self) -> &str {
        &self.declaration.name
    }

    /// Check if any blocking diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_blocking())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Count the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Count the number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Add a diagnostic.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get all error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_error())
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_warning())
    }

    /// Returns true if a plan was produced.
    pub fn is_accepted(&self) -> bool {
        self.plan.is_some()
    }
}

/// Result of resolving one converter set against compiled value objects.
#[derive(Debug, Clone)]
pub struct ConverterSetContext {
    pub declaration: ConverterSetDeclaration,
    pub diagnostics: Vec<Diagnostic>,
    /// Present when no entry reported an error.
    pub plan: Option<ConverterSetPlan>,
}

impl ConverterSetContext {
    pub fn new(declaration: ConverterSetDeclaration) -> Self {
        Self {
            declaration,
            diagnostics: Vec::new(),
            plan: None,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_blocking())
    }

    pub fn is_accepted(&self) -> bool {
        self.plan.is_some()
    }
}
