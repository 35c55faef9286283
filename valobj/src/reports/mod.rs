//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check;
mod explain;
mod output;
mod plan;

pub use check::CheckReport;
pub use explain::{CodeInfo, ExplainReport, PhaseInfo, RuleInfo, TemplateInfo};
#[cfg(test)]
pub use output::BufferOutput;
pub use output::{Report, TerminalOutput};
pub use plan::{PlanReport, PlannedConverterSet, PlannedValueObject};
