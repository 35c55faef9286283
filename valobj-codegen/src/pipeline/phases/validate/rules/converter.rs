//! Rule checking requested converters against the underlying type.

use super::super::{Finding, Rule, RuleInput};
use crate::pipeline::DiagnosticCode;

/// Rule that errors when a converter target cannot carry the underlying type.
///
/// Reports one diagnostic per unsupported target, in configuration order.
pub struct ConverterCompatibilityRule;

impl Rule for ConverterCompatibilityRule {
    fn name(&self) -> &'static str {
        "converter-compatibility"
    }

    fn description(&self) -> &'static str {
        "Every requested converter must support the underlying type"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::UnsupportedConverter
    }

    fn check(&self, input: &RuleInput<'_>) -> Vec<Finding> {
        input
            .config
            .converters
            .iter()
            .filter(|target| {
                !input
                    .templates
                    .get(**target)
                    .is_some_and(|template| template.supports(&input.primitive))
            })
            .map(|target| {
                Finding::for_type(&input.facts.type_name)
                    .with("target", target)
                    .with("underlying", &input.config.underlying)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use valobj_ir::{CandidateDeclaration, Configuration, ConverterTarget, DeclaredKind};

    use super::*;
    use crate::pipeline::phases::validate::rules::testing::messages;

    fn decl() -> CandidateDeclaration {
        CandidateDeclaration::partial("Price", DeclaredKind::Struct)
    }

    #[test]
    fn test_scalars_supported_everywhere() {
        let mut config = Configuration::new("decimal");
        for target in ConverterTarget::ALL {
            config = config.with_converter(target);
        }
        assert!(messages(&ConverterCompatibilityRule, &decl(), &config).is_empty());
    }

    #[test]
    fn test_structured_only_for_document_formats() {
        let config = Configuration::new("Money")
            .with_converter(ConverterTarget::Json)
            .with_converter(ConverterTarget::RelationalMapping)
            .with_converter(ConverterTarget::Binary);
        assert_eq!(
            messages(&ConverterCompatibilityRule, &decl(), &config),
            vec![
                "Type 'Price' cannot use the relational-mapping converter with an underlying type of Money",
                "Type 'Price' cannot use the binary converter with an underlying type of Money",
            ]
        );
    }
}
