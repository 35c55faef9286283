//! Document serialization templates.

use valobj_core::PrimitiveInfo;
use valobj_ir::{ConverterTarget, PrimitiveCategory, WireKind};

use super::ConverterTemplate;

/// JSON serializer converters.
///
/// Numbers are written as JSON numbers; temporal and identifier values as
/// strings; structured values are delegated to the serializer.
pub struct JsonTemplate;

impl ConverterTemplate for JsonTemplate {
    fn target(&self) -> ConverterTarget {
        ConverterTarget::Json
    }

    fn description(&self) -> &'static str {
        "JSON serializer converter"
    }

    fn supports(&self, _primitive: &PrimitiveInfo) -> bool {
        true
    }

    fn wire(&self, category: PrimitiveCategory) -> WireKind {
        match category {
            PrimitiveCategory::Integral | PrimitiveCategory::FloatingPoint => WireKind::Number,
            PrimitiveCategory::Text
            | PrimitiveCategory::Temporal
            | PrimitiveCategory::IdentifierLike => WireKind::Text,
            PrimitiveCategory::Structured => WireKind::Native,
        }
    }
}

/// BSON serializer converters.
///
/// Dates use the native BSON datetime and identifiers the binary subtype, so
/// only numbers and text travel as plain values.
pub struct BsonTemplate;

impl ConverterTemplate for BsonTemplate {
    fn target(&self) -> ConverterTarget {
        ConverterTarget::Bson
    }

    fn description(&self) -> &'static str {
        "BSON document serializer"
    }

    fn supports(&self, _primitive: &PrimitiveInfo) -> bool {
        true
    }

    fn wire(&self, category: PrimitiveCategory) -> WireKind {
        match category {
            PrimitiveCategory::Integral | PrimitiveCategory::FloatingPoint => WireKind::Number,
            PrimitiveCategory::Text => WireKind::Text,
            PrimitiveCategory::IdentifierLike => WireKind::Bytes,
            PrimitiveCategory::Temporal | PrimitiveCategory::Structured => WireKind::Native,
        }
    }
}
