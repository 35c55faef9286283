//! Rule rejecting hand-written constructors.

use super::super::{Finding, Rule, RuleInput};
use crate::pipeline::DiagnosticCode;

/// Rule that errors on user-defined constructors, which would bypass validation.
pub struct UserConstructorRule;

impl Rule for UserConstructorRule {
    fn name(&self) -> &'static str {
        "user-constructor"
    }

    fn description(&self) -> &'static str {
        "Instances may only be created through the generated factory"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::CannotHaveUserConstructors
    }

    fn check(&self, input: &RuleInput<'_>) -> Vec<Finding> {
        if input.facts.user_members.constructors == 0 {
            return Vec::new();
        }
        vec![Finding::for_type(&input.facts.type_name).with("factory", &input.config.factory_name)]
    }
}
