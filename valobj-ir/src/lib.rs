//! Intermediate representation types for the valobj generator.
//!
//! This crate provides the data model shared by every stage of the
//! value-object pipeline. The types are plain data: they carry no analysis
//! logic beyond constructors, accessors and type-reference parsing.
//!
//! # Architecture
//!
//! ```text
//! valobj.toml → valobj-manifest (host adapter) → CandidateDeclaration + Configuration
//!            → analyze → DeclarationFacts → rules → Diagnostics
//!            → plan → AugmentationPlan → emitters
//! valobj.toml → ConverterSetDeclaration → resolved against accepted plans → ConverterSetPlan
//! ```

mod config;
mod converter_set;
mod declaration;
mod facts;
mod location;
mod plan;
mod types;

pub use config::{
    ComparisonGeneration, Configuration, ConversionStyle, ConverterTarget, GenerationStrategy,
    TextComparison,
};
pub use converter_set::{
    ConverterSetDeclaration, ConverterSetEntry, ConverterSetMember, ConverterSetPlan,
};
pub use declaration::{
    Accessibility, CandidateDeclaration, DeclaredKind, DeclaredMemberKind, MemberSignature,
    Modifier,
};
pub use facts::{DeclarationFacts, MethodShape, UserConversion, UserMembers};
pub use location::SourceLocation;
pub use plan::{
    AugmentationPlan, ConversionDirection, ConverterAdapterSpec, Decode, Encode,
    EqualityStrategy, MemberRole, MemberSpec, OrderingStrategy, ReadExpr, Representation,
    WireKind, WriteExpr,
};
pub use types::{PrimitiveCategory, TypeRef};
