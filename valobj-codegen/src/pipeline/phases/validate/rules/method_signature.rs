//! Rules on the shape of user-supplied validation and normalization methods.

use valobj_ir::{MethodShape, TypeRef};

use super::super::{Finding, Rule, RuleInput};
use crate::pipeline::DiagnosticCode;

/// A configured method is well formed when it exists and has the expected shape.
fn misconfigured(method: Option<&MethodShape>, parameter: &TypeRef, returns: &str) -> bool {
    !method.is_some_and(|m| m.matches(parameter, returns))
}

/// Rule that checks the configured validation method.
pub struct ValidationSignatureRule;

impl Rule for ValidationSignatureRule {
    fn name(&self) -> &'static str {
        "validation-signature"
    }

    fn description(&self) -> &'static str {
        "The validation method must be static, take the underlying value and return Validation"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::ValidationMethodSignature
    }

    fn check(&self, input: &RuleInput<'_>) -> Vec<Finding> {
        let Some(name) = &input.config.validation else {
            return Vec::new();
        };
        let underlying = &input.config.underlying;
        if !misconfigured(input.facts.method(name), underlying, "Validation") {
            return Vec::new();
        }
        vec![
            Finding::default()
                .with("method", name)
                .with("type", &input.facts.type_name)
                .with("underlying", underlying),
        ]
    }
}

/// Rule that checks the configured input normalization method.
pub struct NormalizationSignatureRule;

impl Rule for NormalizationSignatureRule {
    fn name(&self) -> &'static str {
        "normalization-signature"
    }

    fn description(&self) -> &'static str {
        "The normalization method must be static and map the underlying value to itself"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::NormalizationMethodSignature
    }

    fn check(&self, input: &RuleInput<'_>) -> Vec<Finding> {
        let Some(name) = &input.config.normalize_input else {
            return Vec::new();
        };
        let underlying = &input.config.underlying;
        if !misconfigured(input.facts.method(name), underlying, underlying.simple_name()) {
            return Vec::new();
        }
        vec![
            Finding::default()
                .with("method", name)
                .with("type", &input.facts.type_name)
                .with("underlying", underlying),
        ]
    }
}
