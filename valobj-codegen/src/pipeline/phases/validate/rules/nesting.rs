//! Rule rejecting declarations nested inside another type.

use super::super::{Finding, Rule, RuleInput};
use crate::pipeline::DiagnosticCode;

/// Rule that errors on nested types, naming the immediate container.
pub struct NestingRule;

impl Rule for NestingRule {
    fn name(&self) -> &'static str {
        "nesting"
    }

    fn description(&self) -> &'static str {
        "Value objects must be top-level types"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::TypeCannotBeNested
    }

    fn check(&self, input: &RuleInput<'_>) -> Vec<Finding> {
        let facts = input.facts;
        if !facts.is_nested {
            return Vec::new();
        }
        let container = facts.nesting_container_name.as_deref().unwrap_or_default();
        vec![Finding::for_type(&facts.type_name).with("container", container)]
    }
}
