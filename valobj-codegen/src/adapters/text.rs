//! String-based type converter template.

use valobj_ir::{ConverterTarget, PrimitiveCategory, WireKind};

use super::ConverterTemplate;

/// Type converter used by model binding and configuration binding.
pub struct TypeConverterTemplate;

impl ConverterTemplate for TypeConverterTemplate {
    fn target(&self) -> ConverterTarget {
        ConverterTarget::TypeConverter
    }

    fn description(&self) -> &'static str {
        "String-based type converter"
    }

    fn wire(&self, _category: PrimitiveCategory) -> WireKind {
        WireKind::Text
    }
}
