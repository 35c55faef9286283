//! Rule checking customizations against the underlying category.

use valobj_ir::{PrimitiveCategory, TextComparison};

use super::super::{Finding, Rule, RuleInput};
use crate::pipeline::DiagnosticCode;

/// Rule that errors on customizations that do not apply to the underlying type.
pub struct CustomizationRule;

impl Rule for CustomizationRule {
    fn name(&self) -> &'static str {
        "customization"
    }

    fn description(&self) -> &'static str {
        "Customizations must apply to the underlying type"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::InvalidCustomization
    }

    fn check(&self, input: &RuleInput<'_>) -> Vec<Finding> {
        if input.config.text_comparison != TextComparison::OrdinalIgnoreCase
            || input.primitive.category == PrimitiveCategory::Text
        {
            return Vec::new();
        }
        vec![Finding::for_type(&input.facts.type_name).with("underlying", &input.config.underlying)]
    }
}
