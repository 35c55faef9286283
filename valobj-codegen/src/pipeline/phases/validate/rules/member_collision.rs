//! Advisory rule for members the user already wrote by hand.

use super::super::{Finding, Rule, RuleInput};
use crate::{pipeline::DiagnosticCode, plan::collisions};

/// Rule that warns once per generated member the user already provides.
///
/// The planner omits exactly the members reported here.
pub struct MemberCollisionRule;

impl Rule for MemberCollisionRule {
    fn name(&self) -> &'static str {
        "member-collision"
    }

    fn description(&self) -> &'static str {
        "User-written members replace the generated ones"
    }

    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::MemberCollision
    }

    fn check(&self, input: &RuleInput<'_>) -> Vec<Finding> {
        collisions(input.facts, input.config, input.primitive)
            .into_iter()
            .map(|role| Finding::for_type(&input.facts.type_name).with("member", role.describe()))
            .collect()
    }
}
