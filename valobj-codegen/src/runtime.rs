//! Reference interpreter of augmentation plans.
//!
//! [`Simulator`] executes a plan the way generated code would: instances only
//! come out of the factory, conversions back to the underlying value never
//! fail, and every adapter read ends in the factory. Emitters can check their
//! output against it, and the behavioural laws of value objects are tested
//! against it.
//!
//! Temporal values are simulated as calendar dates. Their binary form is a
//! 64-bit count of days since 1970-01-01.

use std::{cmp::Ordering, fmt};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use valobj_core::{ConstructionError, Validation};
use valobj_ir::{
    AugmentationPlan, ConverterTarget, EqualityStrategy, MemberRole, MemberSpec, OrderingStrategy,
    PrimitiveCategory, WireKind,
};

/// A dynamically typed underlying value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Primitive {
    Integer(i128),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Identifier(Uuid),
    Structured(serde_json::Value),
}

impl Primitive {
    pub fn category(&self) -> PrimitiveCategory {
        match self {
            Primitive::Integer(_) => PrimitiveCategory::Integral,
            Primitive::Float(_) => PrimitiveCategory::FloatingPoint,
            Primitive::Text(_) => PrimitiveCategory::Text,
            Primitive::Date(_) => PrimitiveCategory::Temporal,
            Primitive::Identifier(_) => PrimitiveCategory::IdentifierLike,
            Primitive::Structured(_) => PrimitiveCategory::Structured,
        }
    }

    /// Textual form: ISO-8601 dates, hyphenated identifiers, JSON for structured values.
    pub fn format_text(&self) -> String {
        match self {
            Primitive::Integer(i) => i.to_string(),
            Primitive::Float(f) => f.to_string(),
            Primitive::Text(s) => s.clone(),
            Primitive::Date(date) => date.to_string(),
            Primitive::Identifier(id) => id.hyphenated().to_string(),
            Primitive::Structured(value) => value.to_string(),
        }
    }

    /// Parse the textual form of a value of `category`.
    pub fn parse_text(category: PrimitiveCategory, text: &str) -> Result<Self, String> {
        match category {
            PrimitiveCategory::Integral => text
                .parse()
                .map(Primitive::Integer)
                .map_err(|e| format!("invalid integer '{}': {}", text, e)),
            PrimitiveCategory::FloatingPoint => text
                .parse()
                .map(Primitive::Float)
                .map_err(|e| format!("invalid number '{}': {}", text, e)),
            PrimitiveCategory::Text => Ok(Primitive::Text(text.to_string())),
            PrimitiveCategory::Temporal => text
                .parse()
                .map(Primitive::Date)
                .map_err(|e| format!("invalid ISO-8601 date '{}': {}", text, e)),
            PrimitiveCategory::IdentifierLike => Uuid::parse_str(text)
                .map(Primitive::Identifier)
                .map_err(|e| format!("invalid identifier '{}': {}", text, e)),
            PrimitiveCategory::Structured => serde_json::from_str(text)
                .map(Primitive::Structured)
                .map_err(|e| e.to_string()),
        }
    }

    /// Binary form: little-endian integers, 64-bit day ticks, raw identifier bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Primitive::Integer(i) => i.to_le_bytes().to_vec(),
            Primitive::Float(f) => f.to_le_bytes().to_vec(),
            Primitive::Text(s) => s.as_bytes().to_vec(),
            Primitive::Date(date) => date_to_ticks(*date).to_le_bytes().to_vec(),
            Primitive::Identifier(id) => id.as_bytes().to_vec(),
            Primitive::Structured(value) => value.to_string().into_bytes(),
        }
    }

    /// Decode the binary form of a value of `category`.
    pub fn from_bytes(category: PrimitiveCategory, bytes: &[u8]) -> Result<Self, String> {
        let width = |n: usize| format!("expected {} bytes, got {}", n, bytes.len());
        match category {
            PrimitiveCategory::Integral => bytes
                .try_into()
                .map(|b| Primitive::Integer(i128::from_le_bytes(b)))
                .map_err(|_| width(16)),
            PrimitiveCategory::FloatingPoint => bytes
                .try_into()
                .map(|b| Primitive::Float(f64::from_le_bytes(b)))
                .map_err(|_| width(8)),
            PrimitiveCategory::Text => String::from_utf8(bytes.to_vec())
                .map(Primitive::Text)
                .map_err(|e| e.to_string()),
            PrimitiveCategory::Temporal => {
                let ticks = bytes
                    .try_into()
                    .map(i64::from_le_bytes)
                    .map_err(|_| width(8))?;
                date_from_ticks(ticks).map(Primitive::Date).ok_or_else(|| {
                    format!("day tick {} is outside the supported calendar", ticks)
                })
            }
            PrimitiveCategory::IdentifierLike => Uuid::from_slice(bytes)
                .map(Primitive::Identifier)
                .map_err(|_| width(16)),
            PrimitiveCategory::Structured => serde_json::from_slice(bytes)
                .map(Primitive::Structured)
                .map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_text())
    }
}

/// A framework-level value, as an adapter reads or writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Wire {
    Integer(i128),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Native(Primitive),
}

fn encode(wire: WireKind, value: &Primitive) -> Wire {
    match (wire, value) {
        (WireKind::Number, Primitive::Integer(i)) => Wire::Integer(*i),
        (WireKind::Number, Primitive::Float(f)) => Wire::Float(*f),
        (WireKind::Text, value) => Wire::Text(value.format_text()),
        (WireKind::Bytes, value) => Wire::Bytes(value.to_bytes()),
        (_, value) => Wire::Native(value.clone()),
    }
}

fn decode(wire: WireKind, category: PrimitiveCategory, raw: Wire) -> Result<Primitive, String> {
    match (wire, raw) {
        (WireKind::Number, Wire::Integer(i)) if category == PrimitiveCategory::Integral => {
            Ok(Primitive::Integer(i))
        }
        (WireKind::Number, Wire::Integer(i)) if category == PrimitiveCategory::FloatingPoint => {
            Ok(Primitive::Float(i as f64))
        }
        (WireKind::Number, Wire::Float(f)) if category == PrimitiveCategory::FloatingPoint => {
            Ok(Primitive::Float(f))
        }
        (WireKind::Text, Wire::Text(text)) => Primitive::parse_text(category, &text),
        (WireKind::Bytes, Wire::Bytes(bytes)) => Primitive::from_bytes(category, &bytes),
        (WireKind::Native, Wire::Native(value)) if value.category() == category => Ok(value),
        (wire, raw) => Err(format!("expected a {:?} value, got {:?}", wire, raw)),
    }
}

/// An instance of a value object. Only a [`Simulator`] can create one.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    type_name: String,
    value: Primitive,
}

impl Instance {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn value(&self) -> &Primitive {
        &self.value
    }
}

type Validator<'p> = Box<dyn Fn(&Primitive) -> Validation + 'p>;
type Normalizer<'p> = Box<dyn Fn(Primitive) -> Primitive + 'p>;

/// Executes the members and adapters of one plan.
pub struct Simulator<'p> {
    plan: &'p AugmentationPlan,
    validate: Validator<'p>,
    normalize: Normalizer<'p>,
}

impl<'p> Simulator<'p> {
    /// Simulate `plan` with a validation method that accepts everything.
    pub fn new(plan: &'p AugmentationPlan) -> Self {
        Self {
            plan,
            validate: Box::new(|_| Validation::Ok),
            normalize: Box::new(|value| value),
        }
    }

    /// The body of the configured validation method.
    pub fn with_validation(mut self, validate: impl Fn(&Primitive) -> Validation + 'p) -> Self {
        self.validate = Box::new(validate);
        self
    }

    /// The body of the configured normalization method.
    pub fn with_normalization(mut self, normalize: impl Fn(Primitive) -> Primitive + 'p) -> Self {
        self.normalize = Box::new(normalize);
        self
    }

    pub fn plan(&self) -> &AugmentationPlan {
        self.plan
    }

    /// The factory: normalizes, validates, then constructs.
    pub fn create(&self, value: Primitive) -> Result<Instance, ConstructionError> {
        let (validates, normalizes) = match self.plan.member(MemberRole::Factory) {
            Some(MemberSpec::Factory {
                validation,
                normalization,
                ..
            }) => (validation.is_some(), normalization.is_some()),
            _ => (false, false),
        };

        let value = if normalizes {
            (self.normalize)(value)
        } else {
            value
        };
        if validates {
            (self.validate)(&value).into_result(&self.plan.type_name)?;
        }

        Ok(Instance {
            type_name: self.plan.type_name.clone(),
            value,
        })
    }

    /// The non-failing factory: `None` where [`create`](Self::create) fails.
    pub fn try_create(&self, value: Primitive) -> Option<Instance> {
        self.create(value).ok()
    }

    /// The accessor.
    pub fn value<'i>(&self, instance: &'i Instance) -> &'i Primitive {
        &instance.value
    }

    /// Wrapper → underlying conversion, if generated. Never fails.
    pub fn to_underlying(&self, instance: &Instance) -> Option<Primitive> {
        self.plan
            .has(MemberRole::ConversionToUnderlying)
            .then(|| instance.value.clone())
    }

    /// Underlying → wrapper conversion, if generated. Validates like the factory.
    pub fn from_underlying(&self, value: Primitive) -> Option<Result<Instance, ConstructionError>> {
        match self.plan.member(MemberRole::ConversionFromUnderlying) {
            Some(MemberSpec::Conversion { validates: true, .. }) => Some(self.create(value)),
            Some(_) => Some(Ok(Instance {
                type_name: self.plan.type_name.clone(),
                value,
            })),
            None => None,
        }
    }

    /// Generated equality, if any.
    pub fn equals(&self, a: &Instance, b: &Instance) -> Option<bool> {
        let Some(MemberSpec::Equality { strategy }) = self.plan.member(MemberRole::Equality) else {
            return None;
        };
        Some(match (strategy, &a.value, &b.value) {
            (EqualityStrategy::OrdinalIgnoreCase, Primitive::Text(x), Primitive::Text(y)) => {
                x.to_lowercase() == y.to_lowercase()
            }
            _ => a.value == b.value,
        })
    }

    /// Generated ordering, if any.
    pub fn compare(&self, a: &Instance, b: &Instance) -> Option<Ordering> {
        let Some(MemberSpec::Comparison { strategy }) = self.plan.member(MemberRole::Comparison)
        else {
            return None;
        };
        match (strategy, &a.value, &b.value) {
            (OrderingStrategy::OrdinalIgnoreCase, Primitive::Text(x), Primitive::Text(y)) => {
                Some(x.to_lowercase().cmp(&y.to_lowercase()))
            }
            (_, x, y) => compare_values(x, y),
        }
    }

    /// Generated `ToString`, if any.
    pub fn format(&self, instance: &Instance) -> Option<String> {
        self.plan
            .has(MemberRole::Formatting)
            .then(|| instance.value.format_text())
    }

    /// Encode a raw underlying value the way the adapter for `target` stores it.
    ///
    /// Useful for simulating stored data that was never validated.
    pub fn encode(&self, target: ConverterTarget, value: &Primitive) -> Option<Wire> {
        let spec = self.plan.converter(target)?;
        Some(encode(spec.wire, value))
    }

    /// Adapter write path: starts from the accessor.
    pub fn write(&self, target: ConverterTarget, instance: &Instance) -> Option<Wire> {
        self.encode(target, self.value(instance))
    }

    /// Adapter read path: decodes, then always goes through the factory.
    pub fn read(&self, target: ConverterTarget, raw: Wire) -> Result<Instance, ConstructionError> {
        let decode_error = |reason: String| ConstructionError::Decode {
            type_name: self.plan.type_name.clone(),
            target: target.id().to_string(),
            reason,
        };

        let spec = self
            .plan
            .converter(target)
            .ok_or_else(|| decode_error("no adapter is generated for this target".to_string()))?;
        let value = decode(spec.wire, self.plan.category, raw).map_err(decode_error)?;
        self.create(value)
    }
}

fn compare_values(a: &Primitive, b: &Primitive) -> Option<Ordering> {
    match (a, b) {
        (Primitive::Integer(x), Primitive::Integer(y)) => Some(x.cmp(y)),
        (Primitive::Float(x), Primitive::Float(y)) => x.partial_cmp(y),
        (Primitive::Text(x), Primitive::Text(y)) => Some(x.cmp(y)),
        (Primitive::Date(x), Primitive::Date(y)) => Some(x.cmp(y)),
        (Primitive::Identifier(x), Primitive::Identifier(y)) => Some(x.cmp(y)),
        (Primitive::Structured(x), Primitive::Structured(y)) => match (x, y) {
            (serde_json::Value::Bool(x), serde_json::Value::Bool(y)) => Some(x.cmp(y)),
            (serde_json::Value::String(x), serde_json::Value::String(y)) => Some(x.cmp(y)),
            _ => None,
        },
        _ => None,
    }
}

/// Days from 0001-01-01, day one of the common era, to 1970-01-01.
const UNIX_EPOCH_FROM_CE: i64 = 719_163;

fn date_to_ticks(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - UNIX_EPOCH_FROM_CE
}

fn date_from_ticks(ticks: i64) -> Option<NaiveDate> {
    let days = ticks.checked_add(UNIX_EPOCH_FROM_CE)?;
    NaiveDate::from_num_days_from_ce_opt(i32::try_from(days).ok()?)
}

#[cfg(test)]
mod tests {
    use valobj_ir::{
        CandidateDeclaration, ComparisonGeneration, Configuration, DeclaredKind, TextComparison,
    };

    use super::*;
    use crate::{analyze, plan::plan};

    fn plan_for(config: &Configuration) -> AugmentationPlan {
        let decl = CandidateDeclaration::partial("Subject", DeclaredKind::Struct);
        let category = valobj_core::classify(&config.underlying);
        plan(&analyze(&decl), config, category)
    }

    fn non_negative(value: &Primitive) -> Validation {
        match value {
            Primitive::Integer(i) if *i < 0 => Validation::invalid("must not be negative"),
            _ => Validation::Ok,
        }
    }

    #[test]
    fn test_factory_validates() {
        let plan = plan_for(&Configuration::new("int").with_validation("Validate"));
        let sim = Simulator::new(&plan).with_validation(non_negative);

        assert!(sim.create(Primitive::Integer(5)).is_ok());
        let err = sim.create(Primitive::Integer(-1)).unwrap_err();
        assert_eq!(
            err,
            ConstructionError::Invalid {
                type_name: "Subject".into(),
                message: "must not be negative".into(),
            }
        );
        assert!(sim.try_create(Primitive::Integer(-1)).is_none());
    }

    #[test]
    fn test_validation_ignored_without_method() {
        let plan = plan_for(&Configuration::new("int"));
        let sim = Simulator::new(&plan).with_validation(non_negative);
        assert!(sim.create(Primitive::Integer(-1)).is_ok());
    }

    #[test]
    fn test_normalization_runs_before_validation() {
        let config = Configuration::new("string")
            .with_validation("Validate")
            .with_normalization("Trim");
        let plan = plan_for(&config);
        let sim = Simulator::new(&plan)
            .with_normalization(|v| match v {
                Primitive::Text(s) => Primitive::Text(s.trim().to_string()),
                other => other,
            })
            .with_validation(|v| match v {
                Primitive::Text(s) if s.is_empty() => Validation::invalid("empty"),
                _ => Validation::Ok,
            });

        let instance = sim.create(Primitive::Text("  ada ".into())).unwrap();
        assert_eq!(sim.value(&instance), &Primitive::Text("ada".into()));
        assert!(sim.create(Primitive::Text("   ".into())).is_err());
    }

    #[test]
    fn test_case_insensitive_text() {
        let config =
            Configuration::new("string").with_text_comparison(TextComparison::OrdinalIgnoreCase);
        let plan = plan_for(&config);
        let sim = Simulator::new(&plan);
        let a = sim.create(Primitive::Text("Ada".into())).unwrap();
        let b = sim.create(Primitive::Text("ADA".into())).unwrap();

        assert_eq!(sim.equals(&a, &b), Some(true));
        assert_eq!(sim.compare(&a, &b), Some(Ordering::Equal));
    }

    #[test]
    fn test_text_is_case_sensitive_by_default() {
        let plan = plan_for(&Configuration::new("string"));
        let sim = Simulator::new(&plan);
        let a = sim.create(Primitive::Text("Ada".into())).unwrap();
        let b = sim.create(Primitive::Text("ADA".into())).unwrap();
        assert_eq!(sim.equals(&a, &b), Some(false));
    }

    #[test]
    fn test_no_comparison_when_omitted() {
        let plan = plan_for(&Configuration::new("int").with_comparison(ComparisonGeneration::Omit));
        let sim = Simulator::new(&plan);
        let a = sim.create(Primitive::Integer(1)).unwrap();
        assert_eq!(sim.compare(&a, &a), None);
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_date_text_and_ticks() {
        let epoch = Primitive::Date(date(1970, 1, 1));
        assert_eq!(epoch.format_text(), "1970-01-01");
        assert_eq!(epoch.to_bytes(), 0i64.to_le_bytes().to_vec());
        assert_eq!(
            Primitive::Date(date(2000, 3, 1)).to_bytes(),
            11_017i64.to_le_bytes().to_vec()
        );
        assert_eq!(
            Primitive::from_bytes(PrimitiveCategory::Temporal, &(-1i64).to_le_bytes()),
            Ok(Primitive::Date(date(1969, 12, 31)))
        );

        let parse = |text| Primitive::parse_text(PrimitiveCategory::Temporal, text);
        assert_eq!(parse("2024-02-29"), Ok(Primitive::Date(date(2024, 2, 29))));
        assert!(parse("2023-02-29").is_err());
        assert!(parse("2024-13-01").is_err());
        assert!(parse("yesterday").is_err());
    }

    #[test]
    fn test_dates_beyond_four_digit_years_round_trip() {
        for value in [date(10_000, 1, 1), date(-44, 3, 15)] {
            let value = Primitive::Date(value);
            let text = value.format_text();
            assert_eq!(
                Primitive::parse_text(PrimitiveCategory::Temporal, &text),
                Ok(value.clone())
            );
            assert_eq!(
                Primitive::from_bytes(PrimitiveCategory::Temporal, &value.to_bytes()),
                Ok(value)
            );
        }
    }

    #[test]
    fn test_read_rejects_ticks_outside_the_calendar() {
        use valobj_ir::ConverterTarget;

        let config = Configuration::new("DateOnly")
            .with_converter(ConverterTarget::Binary)
            .with_converter(ConverterTarget::Json);
        let plan = plan_for(&config);
        let sim = Simulator::new(&plan);

        for ticks in [i64::MAX, i64::MIN, i64::from(i32::MAX)] {
            let err = sim
                .read(ConverterTarget::Binary, Wire::Bytes(ticks.to_le_bytes().to_vec()))
                .unwrap_err();
            let ConstructionError::Decode { reason, .. } = err else {
                panic!("expected a decode error, got {:?}", err);
            };
            assert!(reason.contains("outside"), "{}", reason);
        }

        let last = sim.create(Primitive::Date(NaiveDate::MAX)).unwrap();
        let written = sim.write(ConverterTarget::Json, &last).unwrap();
        assert_eq!(sim.read(ConverterTarget::Json, written).unwrap(), last);
    }

    #[test]
    fn test_identifier_text_and_bytes() {
        let bytes: [u8; 16] = std::array::from_fn(|i| (i * 17) as u8);
        let id = Primitive::Identifier(Uuid::from_bytes(bytes));
        assert_eq!(id.format_text(), "00112233-4455-6677-8899-aabbccddeeff");
        assert_eq!(id.to_bytes(), bytes.to_vec());
        assert_eq!(
            Primitive::parse_text(PrimitiveCategory::IdentifierLike, &id.format_text()),
            Ok(id.clone())
        );
        assert_eq!(
            Primitive::from_bytes(PrimitiveCategory::IdentifierLike, &bytes),
            Ok(id)
        );
        assert!(
            Primitive::parse_text(
                PrimitiveCategory::IdentifierLike,
                "0011223z-4455-6677-8899-aabbccddeeff"
            )
            .is_err()
        );
        assert!(Primitive::from_bytes(PrimitiveCategory::IdentifierLike, &bytes[..15]).is_err());
    }

    #[test]
    fn test_read_rejects_wrong_wire_shape() {
        use valobj_ir::ConverterTarget;

        let plan = plan_for(&Configuration::new("int").with_converter(ConverterTarget::Json));
        let sim = Simulator::new(&plan);
        let err = sim
            .read(ConverterTarget::Json, Wire::Text("12".into()))
            .unwrap_err();
        assert!(matches!(err, ConstructionError::Decode { .. }));
    }

    #[test]
    fn test_read_without_adapter() {
        use valobj_ir::ConverterTarget;

        let plan = plan_for(&Configuration::new("int"));
        let sim = Simulator::new(&plan);
        assert!(sim.read(ConverterTarget::Json, Wire::Integer(1)).is_err());
        let instance = sim.create(Primitive::Integer(1)).unwrap();
        assert_eq!(sim.write(ConverterTarget::Json, &instance), None);
    }
}
