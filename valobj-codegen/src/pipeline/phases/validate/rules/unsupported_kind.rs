//! Gate rejecting declaration kinds that can never be value objects.

use super::super::{Finding, Rule, RuleInput};
use crate::pipeline::DiagnosticCode;

/// Rule that rejects interfaces, enums and other non-candidate kinds.
pub struct UnsupportedKindRule;

impl Rule for UnsupportedKindRule {
    fn name(&self) -> &'static str {
        "unsupported-kind"
    }

    fn description(&self) -> &'static str {
        "Only classes, structs and records can be value objects"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::UnsupportedKind
    }

    fn check(&self, input: &RuleInput<'_>) -> Vec<Finding> {
        if input.facts.is_candidate_kind {
            return Vec::new();
        }
        vec![Finding::for_type(&input.facts.type_name).with("kind", input.facts.declared_kind)]
    }
}

#[cfg(test)]
mod tests {
    use valobj_ir::{CandidateDeclaration, Configuration, DeclaredKind};

    use super::*;
    use crate::pipeline::phases::validate::rules::testing::messages;

    #[test]
    fn test_interface_rejected() {
        let decl = CandidateDeclaration::new("ICustomerId", DeclaredKind::Interface);
        assert_eq!(
            messages(&UnsupportedKindRule, &decl, &Configuration::default()),
            vec!["Type 'ICustomerId' is a interface and cannot be a value object"]
        );
    }

    #[test]
    fn test_candidate_kinds_pass() {
        for kind in [
            DeclaredKind::Class,
            DeclaredKind::Struct,
            DeclaredKind::RecordClass,
            DeclaredKind::RecordStruct,
        ] {
            let decl = CandidateDeclaration::partial("CustomerId", kind);
            assert!(messages(&UnsupportedKindRule, &decl, &Configuration::default()).is_empty());
        }
    }
}
