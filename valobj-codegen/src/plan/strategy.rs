//! Equality and ordering strategies per primitive category.

use valobj_core::PrimitiveInfo;
use valobj_ir::{Configuration, EqualityStrategy, OrderingStrategy, PrimitiveCategory, TextComparison};

/// How instances with this underlying category compare for equality.
pub fn equality(category: PrimitiveCategory, text: TextComparison) -> EqualityStrategy {
    match category {
        PrimitiveCategory::Integral
        | PrimitiveCategory::FloatingPoint
        | PrimitiveCategory::Temporal
        | PrimitiveCategory::IdentifierLike => EqualityStrategy::Exact,
        PrimitiveCategory::Text => match text {
            TextComparison::Ordinal => EqualityStrategy::Ordinal,
            TextComparison::OrdinalIgnoreCase => EqualityStrategy::OrdinalIgnoreCase,
        },
        PrimitiveCategory::Structured => EqualityStrategy::Structural,
    }
}

/// How instances are ordered, or `None` when the underlying type has no total order.
///
/// Identifier-like and structured types are unordered unless the host reports
/// the underlying type as comparable.
pub fn ordering(primitive: PrimitiveInfo, config: &Configuration) -> Option<OrderingStrategy> {
    match primitive.category {
        PrimitiveCategory::Integral | PrimitiveCategory::FloatingPoint => {
            Some(OrderingStrategy::Numeric)
        }
        PrimitiveCategory::Text => Some(match config.text_comparison {
            TextComparison::Ordinal => OrderingStrategy::Ordinal,
            TextComparison::OrdinalIgnoreCase => OrderingStrategy::OrdinalIgnoreCase,
        }),
        PrimitiveCategory::Temporal => Some(OrderingStrategy::Chronological),
        PrimitiveCategory::IdentifierLike | PrimitiveCategory::Structured => {
            (primitive.total_order || config.underlying_comparable)
                .then_some(OrderingStrategy::Underlying)
        }
    }
}
