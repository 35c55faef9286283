//! Diagnostic types for the compilation pipeline.
//!
//! Every diagnostic carries a stable [`DiagnosticCode`]. The code fixes the
//! severity and the message template, so the registry below is the single
//! place where user-visible wording lives.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use valobj_ir::SourceLocation;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks plan generation.
    Error,
    /// Advisory; the plan is still produced.
    Warning,
}

impl Severity {
    /// Returns true if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns true if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Stable identifier of a diagnostic.
///
/// Codes are part of the public contract: tooling matches on them, so they
/// never change meaning once published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticCode {
    TypeCannotBeNested,
    UnderlyingTypeMustNotBeSameAsValueObject,
    UnderlyingTypeCannotBeCollection,
    ValidationMethodSignature,
    CannotHaveUserConstructors,
    UnsupportedConverter,
    InvalidCustomization,
    TypeShouldBePartial,
    TypeCannotBeAbstract,
    UnsupportedKind,
    TypeCannotBeStatic,
    TypeCannotBeGeneric,
    MemberCollision,
    NormalizationMethodSignature,
    UnknownConverterSetEntry,
}

impl DiagnosticCode {
    /// All codes, in ascending id order.
    pub const ALL: [DiagnosticCode; 15] = [
        DiagnosticCode::TypeCannotBeNested,
        DiagnosticCode::UnderlyingTypeMustNotBeSameAsValueObject,
        DiagnosticCode::UnderlyingTypeCannotBeCollection,
        DiagnosticCode::ValidationMethodSignature,
        DiagnosticCode::CannotHaveUserConstructors,
        DiagnosticCode::UnsupportedConverter,
        DiagnosticCode::InvalidCustomization,
        DiagnosticCode::TypeShouldBePartial,
        DiagnosticCode::TypeCannotBeAbstract,
        DiagnosticCode::UnsupportedKind,
        DiagnosticCode::TypeCannotBeStatic,
        DiagnosticCode::TypeCannotBeGeneric,
        DiagnosticCode::MemberCollision,
        DiagnosticCode::NormalizationMethodSignature,
        DiagnosticCode::UnknownConverterSetEntry,
    ];

    /// The stable textual id, e.g. `VOG001`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::TypeCannotBeNested => "VOG001",
            DiagnosticCode::UnderlyingTypeMustNotBeSameAsValueObject => "VOG002",
            DiagnosticCode::UnderlyingTypeCannotBeCollection => "VOG003",
            DiagnosticCode::ValidationMethodSignature => "VOG004",
            DiagnosticCode::CannotHaveUserConstructors => "VOG008",
            DiagnosticCode::UnsupportedConverter => "VOG011",
            DiagnosticCode::InvalidCustomization => "VOG012",
            DiagnosticCode::TypeShouldBePartial => "VOG016",
            DiagnosticCode::TypeCannotBeAbstract => "VOG017",
            DiagnosticCode::UnsupportedKind => "VOG019",
            DiagnosticCode::TypeCannotBeStatic => "VOG020",
            DiagnosticCode::TypeCannotBeGeneric => "VOG021",
            DiagnosticCode::MemberCollision => "VOG022",
            DiagnosticCode::NormalizationMethodSignature => "VOG023",
            DiagnosticCode::UnknownConverterSetEntry => "VOG024",
        }
    }

    /// Severity attached to every diagnostic with this code.
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticCode::MemberCollision => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Message template with `{placeholder}` slots.
    pub fn template(&self) -> &'static str {
        match self {
            DiagnosticCode::TypeCannotBeNested => {
                "Type '{type}' cannot be nested - remove it from inside {container}"
            }
            DiagnosticCode::UnderlyingTypeMustNotBeSameAsValueObject => {
                "Type '{type}' has the same underlying type - must specify a primitive underlying type"
            }
            DiagnosticCode::UnderlyingTypeCannotBeCollection => {
                "Type '{type}' has an underlying type of {underlying} which is not valid"
            }
            DiagnosticCode::ValidationMethodSignature => {
                "Validation method '{method}' of type '{type}' must be static, take a single {underlying} parameter and return Validation"
            }
            DiagnosticCode::CannotHaveUserConstructors => {
                "Type '{type}' cannot have user defined constructors - use the {factory} method for creation"
            }
            DiagnosticCode::UnsupportedConverter => {
                "Type '{type}' cannot use the {target} converter with an underlying type of {underlying}"
            }
            DiagnosticCode::InvalidCustomization => {
                "Type '{type}' requests case-insensitive comparison but its underlying type {underlying} is not text"
            }
            DiagnosticCode::TypeShouldBePartial => "Type '{type}' should be partial",
            DiagnosticCode::TypeCannotBeAbstract => "Type '{type}' cannot be abstract",
            DiagnosticCode::UnsupportedKind => {
                "Type '{type}' is a {kind} and cannot be a value object"
            }
            DiagnosticCode::TypeCannotBeStatic => "Type '{type}' cannot be static",
            DiagnosticCode::TypeCannotBeGeneric => {
                "Type '{type}' cannot be generic - remove its {arity} type parameter(s)"
            }
            DiagnosticCode::MemberCollision => {
                "Type '{type}' already defines {member} - it will not be generated"
            }
            DiagnosticCode::NormalizationMethodSignature => {
                "Normalization method '{method}' of type '{type}' must be static, take a single {underlying} parameter and return {underlying}"
            }
            DiagnosticCode::UnknownConverterSetEntry => {
                "Converter set '{type}' lists '{value_object}', which is not a declared value object"
            }
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiagnosticCode {
    type Err = String;

    /// Parses `VOG017`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiagnosticCode::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown diagnostic code '{}'", s))
    }
}

impl Serialize for DiagnosticCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Fill `{name}` slots in a template. Unknown slots are left as written.
///
/// The template is scanned once, so braces inside a substituted value are
/// copied verbatim.
pub fn render(template: &str, placeholders: &IndexMap<String, String>) -> String {
    let mut message = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        message.push_str(&rest[..open]);
        let slot = &rest[open..];
        match slot.find('}') {
            Some(close) => {
                match placeholders.get(&slot[1..close]) {
                    Some(value) => message.push_str(value),
                    None => message.push_str(&slot[..=close]),
                }
                rest = &slot[close + 1..];
            }
            None => {
                rest = slot;
                break;
            }
        }
    }

    message.push_str(rest);
    message
}

/// A diagnostic reported against a candidate declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub template: &'static str,
    /// Placeholder values, in insertion order.
    pub placeholders: IndexMap<String, String>,
    /// The rendered message.
    pub message: String,
    pub location: SourceLocation,
}

impl Diagnostic {
    /// Create a diagnostic, rendering the code's template with `placeholders`.
    pub fn new(
        code: DiagnosticCode,
        placeholders: IndexMap<String, String>,
        location: SourceLocation,
    ) -> Self {
        let template = code.template();
        Self {
            code,
            severity: code.severity(),
            template,
            message: render(template, &placeholders),
            placeholders,
            location,
        }
    }

    /// Returns true if this diagnostic prevents plan generation.
    pub fn is_blocking(&self) -> bool {
        self.severity.is_error()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}: {}",
            self.location, self.severity, self.code, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn placeholders(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_codes_are_unique() {
        let ids: HashSet<_> = DiagnosticCode::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(ids.len(), DiagnosticCode::ALL.len());
    }

    #[test]
    fn test_only_collision_is_advisory() {
        for code in DiagnosticCode::ALL {
            let expected = code == DiagnosticCode::MemberCollision;
            assert_eq!(code.severity().is_warning(), expected, "{}", code);
        }
    }

    #[test]
    fn test_render() {
        let diag = Diagnostic::new(
            DiagnosticCode::TypeCannotBeNested,
            placeholders(&[("type", "CustomerId"), ("container", "MyContainer")]),
            SourceLocation::new(0, 10).with_position(6, 5),
        );
        assert_eq!(
            diag.message,
            "Type 'CustomerId' cannot be nested - remove it from inside MyContainer"
        );
        assert!(diag.is_blocking());
        assert_eq!(
            diag.to_string(),
            "(6,5): error VOG001: Type 'CustomerId' cannot be nested - remove it from inside MyContainer"
        );
    }

    #[test]
    fn test_render_repeated_placeholder() {
        let message = render(
            DiagnosticCode::NormalizationMethodSignature.template(),
            &placeholders(&[("method", "Trim"), ("type", "Name"), ("underlying", "string")]),
        );
        assert_eq!(
            message,
            "Normalization method 'Trim' of type 'Name' must be static, take a single string parameter and return string"
        );
    }

    #[test]
    fn test_render_does_not_expand_values() {
        let message = render(
            DiagnosticCode::ValidationMethodSignature.template(),
            &placeholders(&[
                ("method", "{type}"),
                ("type", "Age"),
                ("underlying", "{method}"),
            ]),
        );
        assert_eq!(
            message,
            "Validation method '{type}' of type 'Age' must be static, take a single {method} parameter and return Validation"
        );
    }

    #[test]
    fn test_render_keeps_unknown_and_unclosed_slots() {
        let message = render("{type} {missing} {type", &placeholders(&[("type", "Age")]));
        assert_eq!(message, "Age {missing} {type");
    }

    #[test]
    fn test_parse_code() {
        assert_eq!(
            "vog017".parse::<DiagnosticCode>(),
            Ok(DiagnosticCode::TypeCannotBeAbstract)
        );
        assert!("VOG999".parse::<DiagnosticCode>().is_err());
    }

    #[test]
    fn test_serializes_as_id() {
        let json = serde_json::to_string(&DiagnosticCode::MemberCollision).unwrap();
        assert_eq!(json, r#""VOG022""#);
    }
}
