//! Rules on the configured underlying type.

use valobj_core::is_collection;

use super::super::{Finding, Rule, RuleInput};
use crate::pipeline::DiagnosticCode;

/// Rule that errors when a type wraps itself.
pub struct UnderlyingSelfRule;

impl Rule for UnderlyingSelfRule {
    fn name(&self) -> &'static str {
        "underlying-self"
    }

    fn description(&self) -> &'static str {
        "The underlying type cannot be the value object itself"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::UnderlyingTypeMustNotBeSameAsValueObject
    }

    fn check(&self, input: &RuleInput<'_>) -> Vec<Finding> {
        let underlying = &input.config.underlying;
        if underlying.is_generic() || underlying.simple_name() != input.facts.type_name {
            return Vec::new();
        }
        vec![Finding::for_type(&input.facts.type_name)]
    }
}

/// Rule that errors when the underlying type is an array or collection.
pub struct UnderlyingCollectionRule;

impl Rule for UnderlyingCollectionRule {
    fn name(&self) -> &'static str {
        "underlying-collection"
    }

    fn description(&self) -> &'static str {
        "The underlying type cannot be an array or collection"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::UnderlyingTypeCannotBeCollection
    }

    fn check(&self, input: &RuleInput<'_>) -> Vec<Finding> {
        if !is_collection(&input.config.underlying) {
            return Vec::new();
        }
        vec![Finding::for_type(&input.facts.type_name).with("underlying", &input.config.underlying)]
    }
}
