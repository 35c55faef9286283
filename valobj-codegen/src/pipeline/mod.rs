//! Compilation pipeline for value objects.
//!
//! This module provides a [`Pipeline`] orchestrator that takes one candidate
//! declaration from its raw shape to an augmentation plan. The pipeline
//! provides:
//!
//! - Explicit phase boundaries (analyze → validate → plan)
//! - Plugin hooks for extensibility (before/after each phase)
//! - Unified diagnostics collection with stable codes
//! - Shared state via [`CompilationContext`]
//! - Converter sets resolved against the compiled value objects
//!
//! # Example
//!
//! ```ignore
//! use valobj_codegen::pipeline::Pipeline;
//!
//! let pipeline = Pipeline::new();
//! let ctx = pipeline.run(declaration, configuration)?;
//!
//! for diag in &ctx.diagnostics {
//!     eprintln!("{}", diag);
//! }
//! if let Some(plan) = &ctx.plan {
//!     println!("{}", plan);
//! }
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::{CompilationContext, ConverterSetContext};
pub use diagnostic::{Diagnostic, DiagnosticCode, Severity, render};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
