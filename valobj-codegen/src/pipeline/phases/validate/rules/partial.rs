//! Rule requiring `partial` when members are added to the declaration.

use super::super::{Finding, Rule, RuleInput};
use crate::pipeline::DiagnosticCode;

/// Rule that errors when the augment strategy meets a closed declaration.
pub struct PartialRule;

impl Rule for PartialRule {
    fn name(&self) -> &'static str {
        "partiality"
    }

    fn description(&self) -> &'static str {
        "Augmented declarations must be partial"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::TypeShouldBePartial
    }

    fn check(&self, input: &RuleInput<'_>) -> Vec<Finding> {
        if input.facts.is_partial || !input.config.strategy.requires_partial() {
            return Vec::new();
        }
        vec![Finding::for_type(&input.facts.type_name)]
    }
}
