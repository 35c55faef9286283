//! Compact binary serialization template.

use valobj_ir::{ConverterTarget, PrimitiveCategory, WireKind};

use super::ConverterTemplate;

/// Binary formatter.
///
/// Integers are little-endian 128-bit, floats little-endian 64-bit, temporal
/// values a 64-bit tick count and identifiers their 16 raw bytes.
pub struct BinaryTemplate;

impl ConverterTemplate for BinaryTemplate {
    fn target(&self) -> ConverterTarget {
        ConverterTarget::Binary
    }

    fn description(&self) -> &'static str {
        "Compact binary formatter"
    }

    fn wire(&self, _category: PrimitiveCategory) -> WireKind {
        WireKind::Bytes
    }
}
