//! valobj.toml host adapter.
//!
//! Reads value-object declarations written in TOML and lowers them into the
//! [`CandidateDeclaration`](valobj_ir::CandidateDeclaration) and
//! [`Configuration`](valobj_ir::Configuration) pairs the pipeline consumes.
//! Parse and validation errors carry source spans for miette rendering.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod file;
mod manifest;
mod report;
mod validate;

pub use error::{Error, Result, SourceContext};
pub use file::ValobjToml;
pub use manifest::{
    ConverterSetTable, Defaults, Manifest, MemberEntry, ValueObject, ValueObjectEntry,
};
pub use report::DiagnosticReport;
