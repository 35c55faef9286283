//! Rule rejecting abstract declarations.

use super::super::{Finding, Rule, RuleInput};
use crate::pipeline::DiagnosticCode;

/// Rule that errors on abstract types.
pub struct AbstractTypeRule;

impl Rule for AbstractTypeRule {
    fn name(&self) -> &'static str {
        "abstract"
    }

    fn description(&self) -> &'static str {
        "Value objects cannot be abstract"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::TypeCannotBeAbstract
    }

    fn check(&self, input: &RuleInput<'_>) -> Vec<Finding> {
        if !input.facts.is_abstract {
            return Vec::new();
        }
        vec![Finding::for_type(&input.facts.type_name)]
    }
}
