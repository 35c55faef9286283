//! Augmentation plans: the generated members and converter adapters of an
//! accepted value object.
//!
//! A plan is pure data. Emitters outside the pipeline interpret it to produce
//! host-specific source; adding a new emitter never touches the planner.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ConversionStyle, ConverterTarget, PrimitiveCategory, TypeRef};

/// How two instances are compared for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EqualityStrategy {
    /// Exact equality of the underlying values.
    Exact,
    /// Case-sensitive text equality.
    Ordinal,
    /// Case-insensitive text equality.
    OrdinalIgnoreCase,
    /// Delegates to the underlying type's own equality.
    Structural,
}

/// How two instances are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderingStrategy {
    Numeric,
    Ordinal,
    OrdinalIgnoreCase,
    Chronological,
    /// Delegates to the underlying type's own total order.
    Underlying,
}

/// Direction of a conversion operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionDirection {
    /// Wrapper → underlying. Never fails.
    ToUnderlying,
    /// Underlying → wrapper. Re-runs validation.
    FromUnderlying,
}

/// The role a generated member plays; one member per role at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberRole {
    Factory,
    TryFactory,
    Accessor,
    Equality,
    Comparison,
    ConversionToUnderlying,
    ConversionFromUnderlying,
    Formatting,
}

impl MemberRole {
    /// Human-readable description used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            MemberRole::Factory => "a factory method",
            MemberRole::TryFactory => "a non-throwing factory method",
            MemberRole::Accessor => "a value accessor",
            MemberRole::Equality => "equality members",
            MemberRole::Comparison => "comparison members",
            MemberRole::ConversionToUnderlying => "a conversion to the underlying type",
            MemberRole::ConversionFromUnderlying => "a conversion from the underlying type",
            MemberRole::Formatting => "ToString",
        }
    }
}

/// A member to synthesize.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MemberSpec {
    /// Validated factory; fails with a construction error on invalid input.
    Factory {
        name: String,
        validation: Option<String>,
        normalization: Option<String>,
    },
    /// Factory that reports invalid input instead of failing.
    TryFactory { name: String },
    Accessor { name: String, underlying: TypeRef },
    Equality { strategy: EqualityStrategy },
    Comparison { strategy: OrderingStrategy },
    Conversion {
        direction: ConversionDirection,
        style: ConversionStyle,
        validates: bool,
    },
    Formatting,
}

impl MemberSpec {
    pub fn role(&self) -> MemberRole {
        match self {
            MemberSpec::Factory { .. } => MemberRole::Factory,
            MemberSpec::TryFactory { .. } => MemberRole::TryFactory,
            MemberSpec::Accessor { .. } => MemberRole::Accessor,
            MemberSpec::Equality { .. } => MemberRole::Equality,
            MemberSpec::Comparison { .. } => MemberRole::Comparison,
            MemberSpec::Conversion {
                direction: ConversionDirection::ToUnderlying,
                ..
            } => MemberRole::ConversionToUnderlying,
            MemberSpec::Conversion {
                direction: ConversionDirection::FromUnderlying,
                ..
            } => MemberRole::ConversionFromUnderlying,
            MemberSpec::Formatting => MemberRole::Formatting,
        }
    }
}

impl fmt::Display for MemberSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberSpec::Factory {
                name,
                validation,
                normalization,
            } => {
                write!(f, "factory {}", name)?;
                if let Some(method) = normalization {
                    write!(f, " (normalizes with {})", method)?;
                }
                if let Some(method) = validation {
                    write!(f, " (validates with {})", method)?;
                }
                Ok(())
            }
            MemberSpec::TryFactory { name } => write!(f, "try-factory {}", name),
            MemberSpec::Accessor { name, underlying } => {
                write!(f, "accessor {}: {}", name, underlying)
            }
            MemberSpec::Equality { strategy } => write!(f, "equality ({:?})", strategy),
            MemberSpec::Comparison { strategy } => write!(f, "comparison ({:?})", strategy),
            MemberSpec::Conversion {
                direction,
                style,
                validates,
            } => {
                let arrow = match direction {
                    ConversionDirection::ToUnderlying => "wrapper -> underlying",
                    ConversionDirection::FromUnderlying => "underlying -> wrapper",
                };
                write!(f, "{} conversion {}", style.as_str(), arrow)?;
                if *validates {
                    write!(f, " (validates)")?;
                }
                Ok(())
            }
            MemberSpec::Formatting => write!(f, "formatting ToString"),
        }
    }
}

/// Shape of the framework-level value an adapter reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WireKind {
    Number,
    Text,
    Bytes,
    /// The framework handles the underlying type natively.
    Native,
}

/// Representation convention for temporal and identifier-like values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Representation {
    /// ISO-8601 text.
    #[serde(rename = "iso-8601")]
    Iso8601,
    /// 36-character hyphenated identifier text.
    Hyphenated,
    /// 64-bit tick count.
    #[serde(rename = "ticks-64")]
    Ticks64,
    /// 16 raw bytes.
    #[serde(rename = "bytes-16")]
    Bytes16,
}

impl Representation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Representation::Iso8601 => "iso-8601",
            Representation::Hyphenated => "hyphenated",
            Representation::Ticks64 => "ticks-64",
            Representation::Bytes16 => "bytes-16",
        }
    }
}

/// How the wire value is turned into an underlying value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decode {
    /// Cast the framework's native value.
    Native,
    /// Parse text.
    ParseText,
    /// Decode raw bytes.
    Bytes,
}

/// How an underlying value is turned into the wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encode {
    Native,
    FormatText,
    Bytes,
}

/// Read path of an adapter. It always ends by invoking the factory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReadExpr {
    pub decode: Decode,
    pub underlying: TypeRef,
    pub factory: String,
}

/// Write path of an adapter. It always starts from the accessor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WriteExpr {
    pub accessor: String,
    pub encode: Encode,
}

/// Specification of one converter adapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConverterAdapterSpec {
    pub target: ConverterTarget,
    pub wire: WireKind,
    pub read: ReadExpr,
    pub write: WriteExpr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representation: Option<Representation>,
}

impl fmt::Display for ConverterAdapterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: read {:?} {:?} -> {}({}), write {}.{:?} -> {:?}",
            self.target,
            self.wire,
            self.read.decode,
            self.read.factory,
            self.read.underlying,
            self.write.accessor,
            self.write.encode,
            self.wire,
        )?;
        if let Some(repr) = self.representation {
            write!(f, " [{}]", repr.as_str())?;
        }
        Ok(())
    }
}

/// The complete, deterministic augmentation of one accepted value object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AugmentationPlan {
    pub type_name: String,
    pub qualified_name: String,
    pub underlying: TypeRef,
    pub category: PrimitiveCategory,
    pub members: Vec<MemberSpec>,
    pub converters: Vec<ConverterAdapterSpec>,
}

impl AugmentationPlan {
    /// Find the member playing `role`.
    pub fn member(&self, role: MemberRole) -> Option<&MemberSpec> {
        self.members.iter().find(|m| m.role() == role)
    }

    pub fn has(&self, role: MemberRole) -> bool {
        self.member(role).is_some()
    }

    /// Roles of all planned members, in plan order.
    pub fn roles(&self) -> Vec<MemberRole> {
        self.members.iter().map(MemberSpec::role).collect()
    }

    pub fn converter(&self, target: ConverterTarget) -> Option<&ConverterAdapterSpec> {
        self.converters.iter().find(|c| c.target == target)
    }
}

impl fmt::Display for AugmentationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({}, {})",
            self.qualified_name, self.underlying, self.category
        )?;
        writeln!(f, "  members:")?;
        for member in &self.members {
            writeln!(f, "    {}", member)?;
        }
        if !self.converters.is_empty() {
            writeln!(f, "  converters:")?;
            for converter in &self.converters {
                writeln!(f, "    {}", converter)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_roles() {
        let to = MemberSpec::Conversion {
            direction: ConversionDirection::ToUnderlying,
            style: ConversionStyle::Implicit,
            validates: false,
        };
        let from = MemberSpec::Conversion {
            direction: ConversionDirection::FromUnderlying,
            style: ConversionStyle::Explicit,
            validates: true,
        };
        assert_eq!(to.role(), MemberRole::ConversionToUnderlying);
        assert_eq!(from.role(), MemberRole::ConversionFromUnderlying);
        assert_eq!(from.to_string(), "explicit conversion underlying -> wrapper (validates)");
    }

    #[test]
    fn test_member_spec_serializes_tagged() {
        let spec = MemberSpec::Equality {
            strategy: EqualityStrategy::OrdinalIgnoreCase,
        };
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"kind":"equality","strategy":"ordinal-ignore-case"}"#);
    }

    #[test]
    fn test_representation_serde() {
        let json = serde_json::to_string(&Representation::Iso8601).unwrap();
        assert_eq!(json, r#""iso-8601""#);
    }
}
