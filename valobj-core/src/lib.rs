//! Core utilities and types for the valobj generator.
//!
//! This crate provides the primitive category classifier and the validation
//! outcome types shared by the planner and generated code.

mod classify;
mod validation;

pub use classify::{PrimitiveInfo, classify, classify_type, is_collection};
pub use validation::{ConstructionError, Validation};
// Re-exported so downstream crates need not depend on the IR for the category alone
pub use valobj_ir::PrimitiveCategory;
