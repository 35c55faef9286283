//! Rule engine: runs registered rules in order and stamps their diagnostics.

use std::sync::Arc;

use thiserror::Error;
use tracing::trace;
use valobj_core::classify_type;
use valobj_ir::{Configuration, ConverterTarget, DeclarationFacts, SourceLocation};

use super::{Rule, RuleInfo, RuleInput, rules};
use crate::{
    adapters::TemplateRegistry,
    pipeline::{Diagnostic, DiagnosticCode},
};

/// Error raised when building a rule engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleEngineError {
    #[error("rule '{second}' reuses diagnostic code {code} already owned by rule '{first}'")]
    DuplicateCode {
        code: DiagnosticCode,
        first: &'static str,
        second: &'static str,
    },
}

/// Ordered set of rules applied to every candidate declaration.
///
/// The engine is total: every rule runs and all findings are reported. The
/// only exception is the kind gate; a declaration whose kind can never be a
/// value object gets that single diagnostic and nothing else.
pub struct RuleEngine {
    gate: Box<dyn Rule>,
    rules: Vec<Box<dyn Rule>>,
    templates: Arc<TemplateRegistry>,
}

impl RuleEngine {
    /// Create an engine with the built-in rules and converter templates.
    pub fn new() -> Self {
        Self::with_templates(Arc::new(TemplateRegistry::default()))
    }

    /// Create an engine with the built-in rules, checking converters against `templates`.
    pub fn with_templates(templates: Arc<TemplateRegistry>) -> Self {
        Self {
            gate: Box::new(rules::UnsupportedKindRule),
            rules: rules::builtin(),
            templates,
        }
    }

    /// Start an engine with no rules besides the kind gate.
    pub fn builder() -> RuleEngineBuilder {
        RuleEngineBuilder::default()
    }

    /// The converter templates used by the converter-compatibility rule.
    pub fn templates(&self) -> &Arc<TemplateRegistry> {
        &self.templates
    }

    /// Validate one declaration.
    pub fn validate(&self, facts: &DeclarationFacts, config: &Configuration) -> Vec<Diagnostic> {
        let input = RuleInput {
            facts,
            config,
            primitive: classify_type(&config.underlying),
            templates: &self.templates,
        };

        if !facts.is_candidate_kind {
            return self.apply(self.gate.as_ref(), &input, &facts.location);
        }

        self.rules
            .iter()
            .flat_map(|rule| self.apply(rule.as_ref(), &input, &facts.location))
            .collect()
    }

    /// Check that every target in `targets` can carry the underlying type of
    /// an accepted value object. Diagnostics are reported at `location`.
    pub fn validate_converters(
        &self,
        facts: &DeclarationFacts,
        config: &Configuration,
        targets: &[ConverterTarget],
        location: &SourceLocation,
    ) -> Vec<Diagnostic> {
        let config = Configuration {
            converters: targets.to_vec(),
            ..config.clone()
        };
        let input = RuleInput {
            facts,
            config: &config,
            primitive: classify_type(&config.underlying),
            templates: &self.templates,
        };
        self.apply(&rules::ConverterCompatibilityRule, &input, location)
    }

    fn apply(
        &self,
        rule: &dyn Rule,
        input: &RuleInput<'_>,
        location: &SourceLocation,
    ) -> Vec<Diagnostic> {
        let findings = rule.check(input);
        trace!(rule = rule.name(), findings = findings.len(), "rule checked");
        findings
            .into_iter()
            .map(|finding| {
                Diagnostic::new(rule.code(), finding.into_placeholders(), location.clone())
            })
            .collect()
    }

    /// Get the names of all rules, gate first.
    pub fn rule_names(&self) -> Vec<&'static str> {
        std::iter::once(&self.gate)
            .chain(&self.rules)
            .map(|r| r.name())
            .collect()
    }

    /// Get information about all rules, gate first.
    pub fn rule_info(&self) -> Vec<RuleInfo> {
        std::iter::once(&self.gate)
            .chain(&self.rules)
            .map(|r| r.info())
            .collect()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder registering rules in an explicit order.
#[derive(Default)]
pub struct RuleEngineBuilder {
    rules: Vec<Box<dyn Rule>>,
    templates: Option<Arc<TemplateRegistry>>,
}

impl RuleEngineBuilder {
    /// Append a rule; rules run in registration order.
    pub fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Append all built-in rules.
    pub fn builtin_rules(mut self) -> Self {
        self.rules.extend(rules::builtin());
        self
    }

    /// Use a custom converter template registry.
    pub fn templates(mut self, templates: Arc<TemplateRegistry>) -> Self {
        self.templates = Some(templates);
        self
    }

    /// Build the engine, rejecting rules that share a diagnostic code.
    pub fn build(self) -> Result<RuleEngine, RuleEngineError> {
        let gate: Box<dyn Rule> = Box::new(rules::UnsupportedKindRule);
        let mut owners = vec![&gate];
        for rule in &self.rules {
            if let Some(first) = owners.iter().find(|r| r.code() == rule.code()) {
                return Err(RuleEngineError::DuplicateCode {
                    code: rule.code(),
                    first: first.name(),
                    second: rule.name(),
                });
            }
            owners.push(rule);
        }

        Ok(RuleEngine {
            gate,
            rules: self.rules,
            templates: self.templates.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use valobj_ir::{CandidateDeclaration, DeclaredKind, Modifier};

    use super::*;
    use crate::{
        analyze,
        pipeline::phases::validate::{Finding, rules::AbstractTypeRule},
    };

    fn validate(decl: &CandidateDeclaration, config: &Configuration) -> Vec<Diagnostic> {
        RuleEngine::new().validate(&analyze(decl), config)
    }

    fn codes(diagnostics: &[Diagnostic]) -> Vec<&'static str> {
        diagnostics.iter().map(|d| d.code.as_str()).collect()
    }

    #[test]
    fn test_valid_declaration_is_clean() {
        let decl = CandidateDeclaration::partial("CustomerId", DeclaredKind::Class);
        assert!(validate(&decl, &Configuration::default()).is_empty());
    }

    #[test]
    fn test_all_rules_run_in_registry_order() {
        let decl = CandidateDeclaration::new("CustomerId", DeclaredKind::Class)
            .with_modifier(Modifier::Abstract)
            .with_modifier(Modifier::Static)
            .nested_in("MyContainer")
            .with_type_parameter("T");
        let diagnostics = validate(&decl, &Configuration::default());
        assert_eq!(
            codes(&diagnostics),
            vec!["VOG017", "VOG001", "VOG020", "VOG021", "VOG016"]
        );
    }

    #[test]
    fn test_unsupported_kind_short_circuits() {
        let decl = CandidateDeclaration::new("IThing", DeclaredKind::Interface)
            .nested_in("Outer")
            .with_type_parameter("T");
        assert_eq!(codes(&validate(&decl, &Configuration::default())), vec!["VOG019"]);
    }

    #[test]
    fn test_engine_stamps_rule_code() {
        struct Sneaky;
        impl Rule for Sneaky {
            fn name(&self) -> &'static str {
                "sneaky"
            }
            fn description(&self) -> &'static str {
                "Always fires"
            }
            fn code(&self) -> DiagnosticCode {
                DiagnosticCode::TypeCannotBeStatic
            }
            fn check(&self, input: &RuleInput<'_>) -> Vec<Finding> {
                vec![Finding::for_type(&input.facts.type_name)]
            }
        }

        let engine = RuleEngine::builder().rule(Sneaky).build().unwrap();
        let decl = CandidateDeclaration::partial("Age", DeclaredKind::Struct);
        let diagnostics = engine.validate(&analyze(&decl), &Configuration::default());

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::TypeCannotBeStatic);
        assert_eq!(diagnostics[0].message, "Type 'Age' cannot be static");
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let result = RuleEngine::builder()
            .rule(AbstractTypeRule)
            .rule(AbstractTypeRule)
            .build();
        assert!(matches!(
            result,
            Err(RuleEngineError::DuplicateCode {
                code: DiagnosticCode::TypeCannotBeAbstract,
                ..
            })
        ));
    }

    #[test]
    fn test_builtin_rules_have_unique_codes() {
        assert!(RuleEngine::builder().builtin_rules().build().is_ok());
    }

    #[test]
    fn test_rule_info_lists_gate_first() {
        let names = RuleEngine::new().rule_names();
        assert_eq!(names.first(), Some(&"unsupported-kind"));
        assert_eq!(names.last(), Some(&"member-collision"));
        assert_eq!(names.len(), 14);
    }

    #[test]
    fn test_validate_converters_reports_at_given_location() {
        let decl = CandidateDeclaration::partial("Total", DeclaredKind::Struct);
        let config = Configuration::new("Money").with_converter(ConverterTarget::Binary);
        let location = SourceLocation::new(40, 2).with_position(9, 3);

        let diagnostics = RuleEngine::new().validate_converters(
            &analyze(&decl),
            &config,
            &[ConverterTarget::Json, ConverterTarget::RelationalMapping],
            &location,
        );

        assert_eq!(codes(&diagnostics), vec!["VOG011"]);
        assert_eq!(
            diagnostics[0].message,
            "Type 'Total' cannot use the relational-mapping converter with an underlying type of Money"
        );
        assert_eq!(diagnostics[0].location, location);
    }

    #[test]
    fn test_diagnostics_carry_declaration_location() {
        let location = valobj_ir::SourceLocation::new(10, 5).with_position(3, 8);
        let decl = CandidateDeclaration::new("Age", DeclaredKind::Struct).at(location.clone());
        let diagnostics = validate(&decl, &Configuration::default());
        assert_eq!(diagnostics[0].location, location);
    }
}
