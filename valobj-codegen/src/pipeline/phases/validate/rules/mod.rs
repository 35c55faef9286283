//! Built-in rules for declaration validation.
//!
//! [`builtin`] lists them in registry order; that order is the order in which
//! diagnostics are reported.

mod abstract_type;
mod converter;
mod customization;
mod generic;
mod member_collision;
mod method_signature;
mod nesting;
mod partial;
mod static_type;
mod underlying;
mod unsupported_kind;
mod user_constructor;

pub use abstract_type::AbstractTypeRule;
pub use converter::ConverterCompatibilityRule;
pub use customization::CustomizationRule;
pub use generic::GenericTypeRule;
pub use member_collision::MemberCollisionRule;
pub use method_signature::{NormalizationSignatureRule, ValidationSignatureRule};
pub use nesting::NestingRule;
pub use partial::PartialRule;
pub use static_type::StaticTypeRule;
pub use underlying::{UnderlyingCollectionRule, UnderlyingSelfRule};
pub use unsupported_kind::UnsupportedKindRule;
pub use user_constructor::UserConstructorRule;

use super::Rule;

/// The built-in rules, in registry order. The unsupported-kind gate is not
/// part of this list; the engine runs it before everything else.
pub fn builtin() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(AbstractTypeRule),
        Box::new(NestingRule),
        Box::new(StaticTypeRule),
        Box::new(GenericTypeRule),
        Box::new(PartialRule),
        Box::new(UnderlyingSelfRule),
        Box::new(UnderlyingCollectionRule),
        Box::new(UserConstructorRule),
        Box::new(ValidationSignatureRule),
        Box::new(NormalizationSignatureRule),
        Box::new(ConverterCompatibilityRule),
        Box::new(CustomizationRule),
        Box::new(MemberCollisionRule),
    ]
}

#[cfg(test)]
pub(crate) mod testing {
    use valobj_core::classify_type;
    use valobj_ir::{CandidateDeclaration, Configuration};

    use super::super::{Finding, Rule, RuleInput};
    use crate::{adapters::TemplateRegistry, analyze};

    /// Run a single rule against a declaration.
    pub fn check(
        rule: &dyn Rule,
        decl: &CandidateDeclaration,
        config: &Configuration,
    ) -> Vec<Finding> {
        let facts = analyze(decl);
        let templates = TemplateRegistry::default();
        let input = RuleInput {
            facts: &facts,
            config,
            primitive: classify_type(&config.underlying),
            templates: &templates,
        };
        rule.check(&input)
    }

    /// Message of each finding, rendered with the rule's template.
    pub fn messages(
        rule: &dyn Rule,
        decl: &CandidateDeclaration,
        config: &Configuration,
    ) -> Vec<String> {
        check(rule, decl, config)
            .iter()
            .map(|f| crate::pipeline::render(rule.code().template(), f.placeholders()))
            .collect()
    }
}
