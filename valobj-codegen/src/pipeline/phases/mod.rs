//! Built-in pipeline phases.
//!
//! This module provides the standard phases that run in every pipeline:
//!
//! - [`AnalyzePhase`] - derives declaration facts and the primitive category
//! - [`ValidatePhase`] - runs the rule engine and collects diagnostics
//! - [`PlanPhase`] - plans the augmentation of accepted declarations

mod analyze;
mod plan;
pub mod validate;

pub use analyze::AnalyzePhase;
pub use plan::PlanPhase;
pub use validate::{
    Finding, Rule, RuleEngine, RuleEngineBuilder, RuleEngineError, RuleInfo, RuleInput,
    ValidatePhase,
};
