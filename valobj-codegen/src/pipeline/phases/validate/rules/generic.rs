//! Rule rejecting generic declarations.

use super::super::{Finding, Rule, RuleInput};
use crate::pipeline::DiagnosticCode;

/// Rule that errors on types with type parameters.
pub struct GenericTypeRule;

impl Rule for GenericTypeRule {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn description(&self) -> &'static str {
        "Value objects cannot declare type parameters"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::TypeCannotBeGeneric
    }

    fn check(&self, input: &RuleInput<'_>) -> Vec<Finding> {
        let facts = input.facts;
        if facts.generic_arity == 0 {
            return Vec::new();
        }
        vec![Finding::for_type(&facts.type_name).with("arity", facts.generic_arity)]
    }
}
