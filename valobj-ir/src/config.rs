//! Generation configuration attached to a candidate declaration.
//!
//! A [`Configuration`] is built once by the host adapter from whatever
//! declarative syntax the host exposes; the pipeline never inspects that
//! syntax directly.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::TypeRef;

/// Style of the wrapper → underlying conversion operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionStyle {
    Implicit,
    #[default]
    Explicit,
}

impl ConversionStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionStyle::Implicit => "implicit",
            ConversionStyle::Explicit => "explicit",
        }
    }
}

/// A serialization or persistence framework to generate an adapter for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConverterTarget {
    /// Plain JSON serialization.
    Json,
    /// BSON document serialization.
    Bson,
    /// Relational mapper value converters.
    RelationalMapping,
    /// Micro-ORM type handlers.
    MicroOrm,
    /// Compact binary serialization.
    Binary,
    /// String-based type converters (model binding, configuration).
    TypeConverter,
}

impl ConverterTarget {
    /// All known targets, in registry order.
    pub const ALL: [ConverterTarget; 6] = [
        ConverterTarget::Json,
        ConverterTarget::Bson,
        ConverterTarget::RelationalMapping,
        ConverterTarget::MicroOrm,
        ConverterTarget::Binary,
        ConverterTarget::TypeConverter,
    ];

    /// The stable identifier of this target.
    pub fn id(&self) -> &'static str {
        match self {
            ConverterTarget::Json => "json",
            ConverterTarget::Bson => "bson",
            ConverterTarget::RelationalMapping => "relational-mapping",
            ConverterTarget::MicroOrm => "micro-orm",
            ConverterTarget::Binary => "binary",
            ConverterTarget::TypeConverter => "type-converter",
        }
    }
}

impl fmt::Display for ConverterTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ConverterTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConverterTarget::ALL
            .into_iter()
            .find(|target| target.id() == s)
            .ok_or_else(|| {
                let known: Vec<_> = ConverterTarget::ALL.iter().map(|t| t.id()).collect();
                format!(
                    "unknown converter '{}', expected one of: {}",
                    s,
                    known.join(", ")
                )
            })
    }
}

/// How text underlying values are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextComparison {
    #[default]
    Ordinal,
    OrdinalIgnoreCase,
}

/// Whether ordering members are generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonGeneration {
    #[default]
    UseUnderlying,
    Omit,
}

/// How generated members reach the declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationStrategy {
    /// Members are added to the user's declaration, which must be open to it.
    #[default]
    Augment,
    /// A complete companion type is emitted; the declaration is only a marker.
    Standalone,
}

impl GenerationStrategy {
    /// Returns true if the declaration must be `partial`.
    pub fn requires_partial(&self) -> bool {
        matches!(self, GenerationStrategy::Augment)
    }
}

/// Configuration of one value object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub underlying: TypeRef,
    /// The host determined that the underlying type has a total order.
    pub underlying_comparable: bool,
    /// Name of the validation method, if any.
    pub validation: Option<String>,
    /// Name of the input normalization method, if any.
    pub normalize_input: Option<String>,
    pub conversion: ConversionStyle,
    /// Requested converter targets; an ordered set.
    pub converters: Vec<ConverterTarget>,
    pub factory_name: String,
    pub accessor_name: String,
    pub text_comparison: TextComparison,
    pub comparison: ComparisonGeneration,
    pub strategy: GenerationStrategy,
}

impl Configuration {
    pub const DEFAULT_UNDERLYING: &'static str = "int";
    pub const DEFAULT_FACTORY: &'static str = "From";
    pub const DEFAULT_ACCESSOR: &'static str = "Value";

    /// Create a configuration wrapping `underlying` with all defaults.
    pub fn new(underlying: impl Into<TypeRef>) -> Self {
        Self {
            underlying: underlying.into(),
            ..Self::default()
        }
    }

    pub fn with_validation(mut self, method: impl Into<String>) -> Self {
        self.validation = Some(method.into());
        self
    }

    pub fn with_normalization(mut self, method: impl Into<String>) -> Self {
        self.normalize_input = Some(method.into());
        self
    }

    pub fn with_conversion(mut self, style: ConversionStyle) -> Self {
        self.conversion = style;
        self
    }

    /// Request a converter target. Repeated targets are ignored.
    pub fn with_converter(mut self, target: ConverterTarget) -> Self {
        if !self.converters.contains(&target) {
            self.converters.push(target);
        }
        self
    }

    pub fn with_text_comparison(mut self, comparison: TextComparison) -> Self {
        self.text_comparison = comparison;
        self
    }

    pub fn with_comparison(mut self, comparison: ComparisonGeneration) -> Self {
        self.comparison = comparison;
        self
    }

    pub fn with_strategy(mut self, strategy: GenerationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_comparable_underlying(mut self, comparable: bool) -> Self {
        self.underlying_comparable = comparable;
        self
    }

    pub fn with_factory_name(mut self, name: impl Into<String>) -> Self {
        self.factory_name = name.into();
        self
    }

    pub fn with_accessor_name(mut self, name: impl Into<String>) -> Self {
        self.accessor_name = name.into();
        self
    }

    /// Name of the non-failing factory companion (`TryFrom` for `From`).
    pub fn try_factory_name(&self) -> String {
        format!("Try{}", self.factory_name)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            underlying: TypeRef::new(Self::DEFAULT_UNDERLYING),
            underlying_comparable: false,
            validation: None,
            normalize_input: None,
            conversion: ConversionStyle::default(),
            converters: Vec::new(),
            factory_name: Self::DEFAULT_FACTORY.to_string(),
            accessor_name: Self::DEFAULT_ACCESSOR.to_string(),
            text_comparison: TextComparison::default(),
            comparison: ComparisonGeneration::default(),
            strategy: GenerationStrategy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Configuration::default();
        assert_eq!(config.underlying, TypeRef::new("int"));
        assert_eq!(config.factory_name, "From");
        assert_eq!(config.accessor_name, "Value");
        assert_eq!(config.conversion, ConversionStyle::Explicit);
        assert_eq!(config.try_factory_name(), "TryFrom");
        assert!(config.strategy.requires_partial());
    }

    #[test]
    fn test_converters_are_an_ordered_set() {
        let config = Configuration::new("string")
            .with_converter(ConverterTarget::MicroOrm)
            .with_converter(ConverterTarget::Json)
            .with_converter(ConverterTarget::MicroOrm);
        assert_eq!(
            config.converters,
            vec![ConverterTarget::MicroOrm, ConverterTarget::Json]
        );
    }

    #[test]
    fn test_converter_target_ids() {
        for target in ConverterTarget::ALL {
            assert_eq!(target.id().parse::<ConverterTarget>(), Ok(target));
        }
        assert!("protobuf".parse::<ConverterTarget>().is_err());
    }

    #[test]
    fn test_converter_target_serde() {
        let json = serde_json::to_string(&ConverterTarget::RelationalMapping).unwrap();
        assert_eq!(json, r#""relational-mapping""#);
    }
}
