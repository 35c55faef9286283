//! Rule rejecting static declarations.

use super::super::{Finding, Rule, RuleInput};
use crate::pipeline::DiagnosticCode;

/// Rule that errors on static types, which can never be instantiated.
pub struct StaticTypeRule;

impl Rule for StaticTypeRule {
    fn name(&self) -> &'static str {
        "static"
    }

    fn description(&self) -> &'static str {
        "Value objects cannot be static"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::TypeCannotBeStatic
    }

    fn check(&self, input: &RuleInput<'_>) -> Vec<Finding> {
        if !input.facts.is_static {
            return Vec::new();
        }
        vec![Finding::for_type(&input.facts.type_name)]
    }
}

#[cfg(test)]
mod tests {
    use valobj_ir::{CandidateDeclaration, Configuration, DeclaredKind, Modifier};

    use super::*;
    use crate::pipeline::phases::validate::rules::testing::messages;

    #[test]
    fn test_static_class() {
        let decl = CandidateDeclaration::partial("Ids", DeclaredKind::Class)
            .with_modifier(Modifier::Static);
        assert_eq!(
            messages(&StaticTypeRule, &decl, &Configuration::default()),
            vec!["Type 'Ids' cannot be static"]
        );
    }
}
