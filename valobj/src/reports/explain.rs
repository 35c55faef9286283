//! Explain command report data structures.

use super::output::{Output, Report};

/// Description of the pipeline, or of a single diagnostic code.
#[derive(Debug)]
pub enum ExplainReport {
    Overview {
        phases: Vec<PhaseInfo>,
        rules: Vec<RuleInfo>,
        templates: Vec<TemplateInfo>,
    },
    Code(CodeInfo),
}

#[derive(Debug)]
pub struct PhaseInfo {
    pub name: String,
    pub description: String,
}

/// A validation rule, in evaluation order.
#[derive(Debug)]
pub struct RuleInfo {
    pub name: String,
    pub code: String,
    pub severity: String,
    pub description: String,
}

/// A converter template.
#[derive(Debug)]
pub struct TemplateInfo {
    pub target: String,
    pub description: String,
}

/// A single diagnostic code.
#[derive(Debug)]
pub struct CodeInfo {
    pub code: String,
    pub severity: String,
    pub template: String,
    /// The rule reporting this code, if one is registered.
    pub rule: Option<RuleInfo>,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        match self {
            ExplainReport::Overview {
                phases,
                rules,
                templates,
            } => {
                out.title("valobj pipeline");
                out.newline();

                out.section("Phases");
                for (i, phase) in phases.iter().enumerate() {
                    out.numbered_item(i + 1, &format!("{} - {}", phase.name, phase.description));
                }
                out.newline();

                out.section("Rules");
                for (i, rule) in rules.iter().enumerate() {
                    out.numbered_item(
                        i + 1,
                        &format!(
                            "{} {} ({}): {}",
                            rule.code, rule.name, rule.severity, rule.description
                        ),
                    );
                }
                out.newline();

                out.section("Converter templates");
                for template in templates {
                    out.list_item(&format!("{}: {}", template.target, template.description));
                }
            }
            ExplainReport::Code(info) => {
                out.title(&info.code);
                out.key_value_indented("Severity", &info.severity);
                out.key_value_indented("Message", &info.template);
                if let Some(rule) = &info.rule {
                    out.key_value_indented("Rule", &rule.name);
                    out.key_value_indented("Checks", &rule.description);
                }
            }
        }
    }
}
