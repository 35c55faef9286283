//! Primitive category classification of underlying types.

use valobj_ir::{PrimitiveCategory, TypeRef};

/// Classification details of an underlying type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimitiveInfo {
    pub category: PrimitiveCategory,
    /// The type has a total order usable for comparison members.
    pub total_order: bool,
    /// The type is a single well-known scalar that frameworks store natively.
    pub scalar: bool,
}

impl PrimitiveInfo {
    const fn new(category: PrimitiveCategory) -> Self {
        let total_order = matches!(
            category,
            PrimitiveCategory::Integral
                | PrimitiveCategory::FloatingPoint
                | PrimitiveCategory::Text
                | PrimitiveCategory::Temporal
        );
        Self {
            category,
            total_order,
            scalar: !matches!(category, PrimitiveCategory::Structured),
        }
    }

    const fn structured() -> Self {
        Self::new(PrimitiveCategory::Structured)
    }
}

/// Well-known primitive names, matched against the simple type name.
const TABLE: &[(&[&str], PrimitiveCategory)] = &[
    (
        &[
            "int", "long", "short", "byte", "sbyte", "uint", "ulong", "ushort", "nint", "nuint",
            "Int16", "Int32", "Int64", "Int128", "UInt16", "UInt32", "UInt64", "UInt128", "Byte",
            "SByte", "BigInteger", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32",
            "u64", "u128", "usize",
        ],
        PrimitiveCategory::Integral,
    ),
    (
        &[
            "float", "double", "decimal", "Single", "Double", "Decimal", "Half", "f32", "f64",
        ],
        PrimitiveCategory::FloatingPoint,
    ),
    (
        &["string", "String", "char", "Char", "str"],
        PrimitiveCategory::Text,
    ),
    (
        &[
            "DateTime",
            "DateTimeOffset",
            "DateOnly",
            "TimeOnly",
            "TimeSpan",
            "NaiveDate",
            "NaiveDateTime",
            "NaiveTime",
            "OffsetDateTime",
            "PrimitiveDateTime",
            "Date",
            "Time",
        ],
        PrimitiveCategory::Temporal,
    ),
    (
        &["Guid", "Uuid", "Ulid"],
        PrimitiveCategory::IdentifierLike,
    ),
];

/// Structured scalars that still carry a total order.
const ORDERED_SCALARS: &[&str] = &["bool", "Boolean"];

/// Collection type names that can never be wrapped.
const COLLECTIONS: &[&str] = &[
    "List",
    "IList",
    "IReadOnlyList",
    "ICollection",
    "IReadOnlyCollection",
    "IEnumerable",
    "Dictionary",
    "IDictionary",
    "IReadOnlyDictionary",
    "HashSet",
    "ISet",
    "ImmutableArray",
    "ImmutableList",
    "Vec",
    "VecDeque",
    "HashMap",
    "BTreeMap",
    "BTreeSet",
];

/// Classify an underlying type into its primitive category.
pub fn classify(ty: &TypeRef) -> PrimitiveCategory {
    classify_type(ty).category
}

/// Classify an underlying type with ordering and scalar details.
///
/// Unknown, generic and array types are `Structured`.
pub fn classify_type(ty: &TypeRef) -> PrimitiveInfo {
    if ty.is_generic() || ty.is_array() {
        return PrimitiveInfo::structured();
    }

    let name = ty.simple_name();
    if ORDERED_SCALARS.contains(&name) {
        return PrimitiveInfo {
            category: PrimitiveCategory::Structured,
            total_order: true,
            scalar: true,
        };
    }

    TABLE
        .iter()
        .find(|(names, _)| names.contains(&name))
        .map(|(_, category)| PrimitiveInfo::new(*category))
        .unwrap_or_else(PrimitiveInfo::structured)
}

/// Returns true if the type is an array or a well-known collection.
pub fn is_collection(ty: &TypeRef) -> bool {
    ty.is_array() || (ty.is_generic() && COLLECTIONS.contains(&ty.simple_name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str) -> PrimitiveCategory {
        classify(&TypeRef::parse(name))
    }

    #[test]
    fn test_integral() {
        assert_eq!(category("int"), PrimitiveCategory::Integral);
        assert_eq!(category("System.Int64"), PrimitiveCategory::Integral);
        assert_eq!(category("u8"), PrimitiveCategory::Integral);
    }

    #[test]
    fn test_floating_point() {
        assert_eq!(category("decimal"), PrimitiveCategory::FloatingPoint);
        assert_eq!(category("f64"), PrimitiveCategory::FloatingPoint);
    }

    #[test]
    fn test_text_temporal_identifier() {
        assert_eq!(category("string"), PrimitiveCategory::Text);
        assert_eq!(category("System.DateOnly"), PrimitiveCategory::Temporal);
        assert_eq!(category("chrono::NaiveDate"), PrimitiveCategory::Temporal);
        assert_eq!(category("System.Guid"), PrimitiveCategory::IdentifierLike);
        assert_eq!(category("uuid::Uuid"), PrimitiveCategory::IdentifierLike);
    }

    #[test]
    fn test_unknown_and_composite_are_structured() {
        assert_eq!(category("Money"), PrimitiveCategory::Structured);
        assert_eq!(category("Nullable<int>"), PrimitiveCategory::Structured);
        assert_eq!(category("int[]"), PrimitiveCategory::Structured);
    }

    #[test]
    fn test_ordering_details() {
        assert!(classify_type(&TypeRef::new("int")).total_order);
        assert!(classify_type(&TypeRef::new("DateTime")).total_order);
        assert!(!classify_type(&TypeRef::new("Guid")).total_order);
        assert!(!classify_type(&TypeRef::new("Money")).total_order);

        let boolean = classify_type(&TypeRef::new("bool"));
        assert_eq!(boolean.category, PrimitiveCategory::Structured);
        assert!(boolean.total_order);
        assert!(boolean.scalar);
    }

    #[test]
    fn test_collections() {
        assert!(is_collection(&TypeRef::parse("List<int>")));
        assert!(is_collection(&TypeRef::parse("Dictionary<string, int>")));
        assert!(is_collection(&TypeRef::parse("byte[]")));
        assert!(!is_collection(&TypeRef::parse("Nullable<int>")));
        assert!(!is_collection(&TypeRef::parse("int")));
    }

    #[test]
    fn test_classification_is_deterministic() {
        let ty = TypeRef::parse("System.DateTimeOffset");
        assert_eq!(classify_type(&ty), classify_type(&ty.clone()));
    }
}
