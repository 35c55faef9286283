//! Rule trait for declaration validation.

use indexmap::IndexMap;
use valobj_core::PrimitiveInfo;
use valobj_ir::{Configuration, DeclarationFacts};

use crate::{
    adapters::TemplateRegistry,
    pipeline::{DiagnosticCode, Severity},
};

/// Everything a rule may look at.
#[derive(Clone, Copy)]
pub struct RuleInput<'a> {
    pub facts: &'a DeclarationFacts,
    pub config: &'a Configuration,
    /// Classification of `config.underlying`.
    pub primitive: PrimitiveInfo,
    pub templates: &'a TemplateRegistry,
}

/// One violation found by a rule: the placeholder values of its message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Finding {
    placeholders: IndexMap<String, String>,
}

impl Finding {
    /// Start a finding about the type named `type_name`.
    pub fn for_type(type_name: impl Into<String>) -> Self {
        Self::default().with("type", type_name.into())
    }

    /// Add a placeholder value.
    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        self.placeholders.insert(name.to_string(), value.to_string());
        self
    }

    pub fn placeholders(&self) -> &IndexMap<String, String> {
        &self.placeholders
    }

    pub fn into_placeholders(self) -> IndexMap<String, String> {
        self.placeholders
    }
}

/// Information about a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInfo {
    pub name: &'static str,
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub description: &'static str,
}

/// A rule that checks a declaration for one kind of problem.
///
/// Rules are pure: they only report findings. The engine turns findings into
/// diagnostics carrying the rule's own code.
pub trait Rule: Send + Sync {
    /// The name of this rule.
    fn name(&self) -> &'static str;

    /// A human-readable description of what this rule checks.
    fn description(&self) -> &'static str;

    /// The single diagnostic code this rule reports.
    fn code(&self) -> DiagnosticCode;

    /// Check the declaration and return one finding per violation.
    fn check(&self, input: &RuleInput<'_>) -> Vec<Finding>;

    /// Get information about this rule.
    fn info(&self) -> RuleInfo {
        RuleInfo {
            name: self.name(),
            code: self.code(),
            severity: self.code().severity(),
            description: self.description(),
        }
    }
}
