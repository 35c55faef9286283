//! Converter adapter templates.
//!
//! A [`ConverterTemplate`] describes how one serialization or persistence
//! framework reads and writes a value object. Templates never construct an
//! instance directly: the read path always ends in the generated factory and
//! the write path always starts from the accessor, so a stored value cannot
//! skip validation on its way back in.
//!
//! # Available Templates
//!
//! - [`JsonTemplate`] / [`BsonTemplate`] - document serialization
//! - [`RelationalMappingTemplate`] / [`MicroOrmTemplate`] - database persistence
//! - [`BinaryTemplate`] - compact binary serialization
//! - [`TypeConverterTemplate`] - string-based type conversion

mod binary;
mod document;
mod storage;
mod text;

pub use binary::BinaryTemplate;
pub use document::{BsonTemplate, JsonTemplate};
pub use storage::{MicroOrmTemplate, RelationalMappingTemplate};
pub use text::TypeConverterTemplate;
use valobj_core::PrimitiveInfo;
use valobj_ir::{
    Configuration, ConverterAdapterSpec, ConverterTarget, Decode, Encode, PrimitiveCategory,
    ReadExpr, Representation, WireKind, WriteExpr,
};

/// Trait for converter templates.
///
/// Implement this trait to support another serialization framework.
pub trait ConverterTemplate: Send + Sync {
    /// The target this template generates adapters for.
    fn target(&self) -> ConverterTarget;

    /// A human-readable description of the target framework.
    fn description(&self) -> &'static str;

    /// Whether the framework can carry values of this primitive.
    ///
    /// Most frameworks only store scalars natively.
    fn supports(&self, primitive: &PrimitiveInfo) -> bool {
        primitive.scalar
    }

    /// Shape of the framework-level value for this category.
    fn wire(&self, category: PrimitiveCategory) -> WireKind;

    /// Build the adapter specification for a value object.
    fn adapter(&self, config: &Configuration, category: PrimitiveCategory) -> ConverterAdapterSpec {
        let wire = self.wire(category);
        ConverterAdapterSpec {
            target: self.target(),
            wire,
            read: ReadExpr {
                decode: decode(wire, category),
                underlying: config.underlying.clone(),
                factory: config.factory_name.clone(),
            },
            write: WriteExpr {
                accessor: config.accessor_name.clone(),
                encode: encode(wire, category),
            },
            representation: representation(wire, category),
        }
    }
}

/// How a wire value becomes an underlying value.
pub fn decode(wire: WireKind, category: PrimitiveCategory) -> Decode {
    match wire {
        WireKind::Bytes => Decode::Bytes,
        WireKind::Text if category != PrimitiveCategory::Text => Decode::ParseText,
        WireKind::Text | WireKind::Number | WireKind::Native => Decode::Native,
    }
}

/// How an underlying value becomes a wire value.
pub fn encode(wire: WireKind, category: PrimitiveCategory) -> Encode {
    match wire {
        WireKind::Bytes => Encode::Bytes,
        WireKind::Text if category != PrimitiveCategory::Text => Encode::FormatText,
        WireKind::Text | WireKind::Number | WireKind::Native => Encode::Native,
    }
}

/// Representation convention for temporal and identifier-like values.
pub fn representation(wire: WireKind, category: PrimitiveCategory) -> Option<Representation> {
    match (category, wire) {
        (PrimitiveCategory::Temporal, WireKind::Bytes) => Some(Representation::Ticks64),
        (PrimitiveCategory::Temporal, _) => Some(Representation::Iso8601),
        (PrimitiveCategory::IdentifierLike, WireKind::Bytes) => Some(Representation::Bytes16),
        (PrimitiveCategory::IdentifierLike, _) => Some(Representation::Hyphenated),
        _ => None,
    }
}

/// Registry of converter templates, at most one per target.
pub struct TemplateRegistry {
    templates: Vec<Box<dyn ConverterTemplate>>,
}

impl TemplateRegistry {
    /// Create a registry with no templates.
    pub fn empty() -> Self {
        Self {
            templates: Vec::new(),
        }
    }

    /// Register a template, replacing any template for the same target.
    pub fn with(mut self, template: impl ConverterTemplate + 'static) -> Self {
        self.templates.retain(|t| t.target() != template.target());
        self.templates.push(Box::new(template));
        self
    }

    pub fn get(&self, target: ConverterTarget) -> Option<&dyn ConverterTemplate> {
        self.templates
            .iter()
            .find(|t| t.target() == target)
            .map(|t| t.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Box<dyn ConverterTemplate>> {
        self.templates.iter()
    }
}

impl Default for TemplateRegistry {
    /// A registry with every built-in template.
    fn default() -> Self {
        Self::empty()
            .with(JsonTemplate)
            .with(BsonTemplate)
            .with(RelationalMappingTemplate)
            .with(MicroOrmTemplate)
            .with(BinaryTemplate)
            .with(TypeConverterTemplate)
    }
}
