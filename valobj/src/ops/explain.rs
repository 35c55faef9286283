//! Explain operation - pipeline and diagnostic code descriptions.

use valobj_codegen::pipeline::{DiagnosticCode, Pipeline};

use crate::reports::{CodeInfo, ExplainReport, PhaseInfo, RuleInfo, TemplateInfo};

/// Describe the default pipeline, or a single diagnostic code.
pub fn explain(code: Option<DiagnosticCode>) -> ExplainReport {
    let pipeline = Pipeline::new();
    let rules = pipeline.rule_info().into_iter().map(|rule| RuleInfo {
        name: rule.name.to_string(),
        code: rule.code.to_string(),
        severity: rule.severity.to_string(),
        description: rule.description.to_string(),
    });

    if let Some(code) = code {
        let id = code.to_string();
        return ExplainReport::Code(CodeInfo {
            severity: code.severity().to_string(),
            template: code.template().to_string(),
            rule: rules.into_iter().find(|rule| rule.code == id),
            code: id,
        });
    }

    ExplainReport::Overview {
        phases: pipeline
            .phase_info()
            .into_iter()
            .map(|p| PhaseInfo {
                name: p.name.to_string(),
                description: p.description.to_string(),
            })
            .collect(),
        rules: rules.collect(),
        templates: pipeline
            .templates()
            .iter()
            .map(|t| TemplateInfo {
                target: t.target().to_string(),
                description: t.description().to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{BufferOutput, Report};

    #[test]
    fn test_overview() {
        let ExplainReport::Overview {
            phases,
            rules,
            templates,
        } = explain(None)
        else {
            panic!("expected an overview");
        };

        let phases: Vec<_> = phases.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(phases, vec!["analyze", "validate", "plan"]);
        assert_eq!(rules.len(), 14);
        assert_eq!(rules[0].code, "VOG019");
        assert_eq!(rules[1].code, "VOG017");
        assert_eq!(templates.len(), 6);
    }

    #[test]
    fn test_single_code() {
        let report = explain(Some(DiagnosticCode::MemberCollision));
        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert_eq!(out.lines[0], "VOG022");
        assert_eq!(out.lines[1], "  Severity: warning");
        assert!(out.lines[2].starts_with("  Message: Type '{type}' already defines {member}"));
        assert!(out.lines.iter().any(|l| l.starts_with("  Rule: ")));
    }
}
