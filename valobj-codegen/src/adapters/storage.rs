//! Database persistence templates.
//!
//! Both frameworks hand the driver the underlying value unchanged, so only
//! scalars the driver understands are supported.

use valobj_ir::{ConverterTarget, PrimitiveCategory, WireKind};

use super::ConverterTemplate;

/// Relational mapper value converters.
pub struct RelationalMappingTemplate;

impl ConverterTemplate for RelationalMappingTemplate {
    fn target(&self) -> ConverterTarget {
        ConverterTarget::RelationalMapping
    }

    fn description(&self) -> &'static str {
        "Relational mapper value converter and comparer"
    }

    fn wire(&self, _category: PrimitiveCategory) -> WireKind {
        WireKind::Native
    }
}

/// Micro-ORM type handlers.
pub struct MicroOrmTemplate;

impl ConverterTemplate for MicroOrmTemplate {
    fn target(&self) -> ConverterTarget {
        ConverterTarget::MicroOrm
    }

    fn description(&self) -> &'static str {
        "Micro-ORM type handler"
    }

    fn wire(&self, _category: PrimitiveCategory) -> WireKind {
        WireKind::Native
    }
}
