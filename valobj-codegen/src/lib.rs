//! Semantic analysis and augmentation planning for value objects.
//!
//! This crate is the compiler pass of valobj: it turns a candidate
//! declaration and its configuration into diagnostics and, when nothing
//! blocks it, an [`AugmentationPlan`](valobj_ir::AugmentationPlan).
//!
//! # Module Organization
//!
//! - [`analyze`] - Declaration shape analyzer (declaration → facts)
//! - [`pipeline`] - Phases, rule engine, diagnostics and plugins
//! - [`plan`] - Augmentation planner
//! - [`adapters`] - Converter adapter templates per target framework
//! - [`runtime`] - Reference interpreter of plans, for checking generated behaviour

pub mod adapters;
pub mod analyze;
pub mod pipeline;
pub mod plan;
pub mod runtime;

pub use analyze::analyze;
pub use plan::{Planner, plan};
