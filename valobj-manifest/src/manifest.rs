//! The valobj.toml model and its lowering into pipeline inputs.
//!
//! ```toml
//! [defaults]
//! underlying = "int"
//! converters = ["json"]
//!
//! [[value-object]]
//! name = "CustomerId"
//! kind = "class"
//! modifiers = ["partial"]
//! validation = "Validate"
//!
//! [[value-object.members]]
//! kind = "method"
//! name = "Validate"
//! static = true
//! parameters = ["int"]
//! returns = "Validation"
//!
//! [[converter-set]]
//! name = "PersistenceConverters"
//! targets = ["relational-mapping"]
//! value-objects = ["CustomerId"]
//! ```
//!
//! Keys set on a value object override `[defaults]`, which override the
//! built-in configuration defaults. A converter set requests adapters for
//! value objects declared elsewhere; `targets` defaults to
//! `relational-mapping`.

use std::{collections::HashMap, path::Path, str::FromStr};

use serde::Deserialize;
use toml::Spanned;
use valobj_ir::{
    Accessibility, CandidateDeclaration, ComparisonGeneration, Configuration, ConversionStyle,
    ConverterSetDeclaration, ConverterSetEntry, ConverterTarget, DeclaredKind,
    DeclaredMemberKind, GenerationStrategy, MemberSignature, Modifier, SourceLocation,
    TextComparison, TypeRef,
};

use crate::{
    Error, Result, SourceContext,
    validate::{unquoted, validate_name},
};

/// Configuration keys accepted both in `[defaults]` and on a value object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Defaults {
    pub underlying: Option<String>,
    pub underlying_comparable: Option<bool>,
    pub conversion: Option<ConversionStyle>,
    pub converters: Option<Vec<ConverterTarget>>,
    pub factory_name: Option<String>,
    pub accessor_name: Option<String>,
    pub text_comparison: Option<TextComparison>,
    pub comparison: Option<ComparisonGeneration>,
    pub strategy: Option<GenerationStrategy>,
}

impl Defaults {
    /// Layer `self` over `base`: keys set here win.
    pub fn or(&self, base: &Defaults) -> Defaults {
        Defaults {
            underlying: self.underlying.clone().or_else(|| base.underlying.clone()),
            underlying_comparable: self.underlying_comparable.or(base.underlying_comparable),
            conversion: self.conversion.or(base.conversion),
            converters: self.converters.clone().or_else(|| base.converters.clone()),
            factory_name: self.factory_name.clone().or_else(|| base.factory_name.clone()),
            accessor_name: self.accessor_name.clone().or_else(|| base.accessor_name.clone()),
            text_comparison: self.text_comparison.or(base.text_comparison),
            comparison: self.comparison.or(base.comparison),
            strategy: self.strategy.or(base.strategy),
        }
    }

    /// Apply the keys that are set on top of `config`.
    pub fn apply(&self, mut config: Configuration) -> Configuration {
        if let Some(underlying) = &self.underlying {
            config.underlying = TypeRef::parse(underlying);
        }
        if let Some(comparable) = self.underlying_comparable {
            config.underlying_comparable = comparable;
        }
        if let Some(conversion) = self.conversion {
            config.conversion = conversion;
        }
        if let Some(converters) = &self.converters {
            config.converters.clear();
            config = converters
                .iter()
                .fold(config, |config, target| config.with_converter(*target));
        }
        if let Some(name) = &self.factory_name {
            config.factory_name = name.clone();
        }
        if let Some(name) = &self.accessor_name {
            config.accessor_name = name.clone();
        }
        if let Some(comparison) = self.text_comparison {
            config.text_comparison = comparison;
        }
        if let Some(comparison) = self.comparison {
            config.comparison = comparison;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        config
    }
}

/// A hand-written member of a value object.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MemberEntry {
    pub kind: Spanned<DeclaredMemberKind>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Conversion operators only.
    #[serde(default)]
    pub implicit: bool,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub returns: Option<String>,
}

impl MemberEntry {
    /// The member name, falling back to the conventional name of its kind.
    fn resolved_name(&self) -> Option<String> {
        if let Some(name) = &self.name {
            return Some(name.clone());
        }
        let name = match self.kind.get_ref() {
            DeclaredMemberKind::Constructor => ".ctor",
            DeclaredMemberKind::ConversionOperator if self.implicit => "op_Implicit",
            DeclaredMemberKind::ConversionOperator => "op_Explicit",
            DeclaredMemberKind::EqualityOperator => "op_Equality",
            DeclaredMemberKind::ComparisonOperator => "op_LessThan",
            DeclaredMemberKind::Equals => "Equals",
            DeclaredMemberKind::CompareTo => "CompareTo",
            DeclaredMemberKind::ToString => "ToString",
            DeclaredMemberKind::GetHashCode => "GetHashCode",
            DeclaredMemberKind::Method
            | DeclaredMemberKind::Property
            | DeclaredMemberKind::Field => return None,
        };
        Some(name.to_string())
    }

    fn lower(&self, ctx: &SourceContext) -> Result<MemberSignature> {
        let kind = *self.kind.get_ref();
        let name = self.resolved_name().ok_or_else(|| {
            ctx.validation_error_at(
                format!("a member of kind '{}' needs a name", kind_name(kind)),
                self.kind.span(),
            )
        })?;

        let mut member = MemberSignature::new(kind, name)
            .with_parameters(self.parameters.iter().map(|p| TypeRef::parse(p)).collect());
        member.is_static = self.is_static;
        member.is_abstract = self.is_abstract;
        member.is_implicit = self.implicit;
        member.return_type = self.returns.as_deref().map(TypeRef::parse);
        Ok(member)
    }
}

fn kind_name(kind: DeclaredMemberKind) -> &'static str {
    match kind {
        DeclaredMemberKind::Method => "method",
        DeclaredMemberKind::Property => "property",
        DeclaredMemberKind::Field => "field",
        _ => "member",
    }
}

fn default_kind() -> DeclaredKind {
    DeclaredKind::Struct
}

/// One `[[value-object]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ValueObjectEntry {
    pub name: Spanned<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default = "default_kind")]
    pub kind: DeclaredKind,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub accessibility: Accessibility,
    /// Containing types, outermost first.
    #[serde(default)]
    pub containers: Vec<Spanned<String>>,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberEntry>,

    pub validation: Option<String>,
    pub normalize_input: Option<String>,

    // Overrides of [defaults]
    pub underlying: Option<String>,
    pub underlying_comparable: Option<bool>,
    pub conversion: Option<ConversionStyle>,
    pub converters: Option<Vec<ConverterTarget>>,
    pub factory_name: Option<String>,
    pub accessor_name: Option<String>,
    pub text_comparison: Option<TextComparison>,
    pub comparison: Option<ComparisonGeneration>,
    pub strategy: Option<GenerationStrategy>,
}

impl ValueObjectEntry {
    /// The configuration keys set on this entry.
    pub fn overrides(&self) -> Defaults {
        Defaults {
            underlying: self.underlying.clone(),
            underlying_comparable: self.underlying_comparable,
            conversion: self.conversion,
            converters: self.converters.clone(),
            factory_name: self.factory_name.clone(),
            accessor_name: self.accessor_name.clone(),
            text_comparison: self.text_comparison,
            comparison: self.comparison,
            strategy: self.strategy,
        }
    }

    fn name_span(&self, src: &str) -> std::ops::Range<usize> {
        unquoted(src, self.name.span())
    }

    fn qualified_name(&self) -> String {
        self.namespace
            .iter()
            .map(String::as_str)
            .chain(self.containers.iter().map(|c| c.get_ref().as_str()))
            .chain(std::iter::once(self.name.get_ref().as_str()))
            .collect::<Vec<_>>()
            .join(".")
    }

    fn lower(&self, defaults: &Defaults, ctx: &SourceContext) -> Result<ValueObject> {
        let span = self.name_span(ctx.src());
        let location = SourceLocation::from_span(ctx.src(), span.start, span.len())
            .in_file(ctx.filename());

        let mut declaration = CandidateDeclaration::new(self.name.get_ref().clone(), self.kind)
            .with_accessibility(self.accessibility)
            .at(location);
        declaration.namespace = self.namespace.clone();
        declaration.modifiers = self.modifiers.iter().copied().collect();
        declaration.containers = self
            .containers
            .iter()
            .map(|c| c.get_ref().clone())
            .collect();
        declaration.type_parameters = self.type_parameters.clone();
        declaration.members = self
            .members
            .iter()
            .map(|m| m.lower(ctx))
            .collect::<Result<_>>()?;

        let mut configuration = self.overrides().or(defaults).apply(Configuration::default());
        configuration.validation = self.validation.clone();
        configuration.normalize_input = self.normalize_input.clone();

        Ok(ValueObject {
            declaration,
            configuration,
        })
    }
}

/// One `[[converter-set]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConverterSetTable {
    pub name: Spanned<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    pub targets: Option<Vec<ConverterTarget>>,
    /// Simple or qualified names of the listed value objects.
    pub value_objects: Vec<Spanned<String>>,
}

impl ConverterSetTable {
    fn name_span(&self, src: &str) -> std::ops::Range<usize> {
        unquoted(src, self.name.span())
    }

    fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{}.{}", namespace, self.name.get_ref()),
            None => self.name.get_ref().clone(),
        }
    }

    fn lower(&self, ctx: &SourceContext) -> ConverterSetDeclaration {
        let locate = |span: std::ops::Range<usize>| {
            SourceLocation::from_span(ctx.src(), span.start, span.len()).in_file(ctx.filename())
        };

        let mut set = ConverterSetDeclaration::new(self.name.get_ref().clone())
            .at(locate(self.name_span(ctx.src())));
        set.namespace = self.namespace.clone();
        if let Some(targets) = &self.targets {
            set = set.with_targets(targets.iter().copied());
        }
        for value_object in &self.value_objects {
            let entry = ConverterSetEntry::new(value_object.get_ref().clone())
                .at(locate(unquoted(ctx.src(), value_object.span())));
            set = set.with_entry(entry);
        }
        set
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawManifest {
    #[serde(default)]
    defaults: Defaults,
    #[serde(default, rename = "value-object")]
    value_objects: Vec<ValueObjectEntry>,
    #[serde(default, rename = "converter-set")]
    converter_sets: Vec<ConverterSetTable>,
}

/// A declared value object, ready for the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueObject {
    pub declaration: CandidateDeclaration,
    pub configuration: Configuration,
}

/// A parsed and lowered valobj.toml.
#[derive(Debug, Clone)]
pub struct Manifest {
    defaults: Defaults,
    value_objects: Vec<ValueObject>,
    converter_sets: Vec<ConverterSetDeclaration>,
    source: SourceContext,
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "valobj.toml")
    }
}

impl Manifest {
    /// Parse a valobj.toml file from the given path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a valobj.toml from a string with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let raw: RawManifest = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
        validate(&raw, &ctx)?;

        let value_objects = raw
            .value_objects
            .iter()
            .map(|entry| entry.lower(&raw.defaults, &ctx))
            .collect::<Result<_>>()?;
        let converter_sets = raw
            .converter_sets
            .iter()
            .map(|table| table.lower(&ctx))
            .collect();

        Ok(Self {
            defaults: raw.defaults,
            value_objects,
            converter_sets,
            source: ctx,
        })
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Declared value objects, in file order.
    pub fn value_objects(&self) -> &[ValueObject] {
        &self.value_objects
    }

    /// Declared converter sets, in file order.
    pub fn converter_sets(&self) -> &[ConverterSetDeclaration] {
        &self.converter_sets
    }

    /// Find a value object by simple or qualified name.
    pub fn get(&self, name: &str) -> Option<&ValueObject> {
        self.value_objects.iter().find(|vo| {
            vo.declaration.name == name || vo.declaration.qualified_name() == name
        })
    }

    /// The source the manifest was parsed from.
    pub fn source(&self) -> &SourceContext {
        &self.source
    }

    /// Declaration and configuration pairs, in file order.
    pub fn inputs(&self) -> Vec<(CandidateDeclaration, Configuration)> {
        self.value_objects
            .iter()
            .map(|vo| (vo.declaration.clone(), vo.configuration.clone()))
            .collect()
    }
}

fn validate(raw: &RawManifest, ctx: &SourceContext) -> Result<()> {
    let mut seen: HashMap<String, std::ops::Range<usize>> = HashMap::new();

    for entry in &raw.value_objects {
        let span = entry.name_span(ctx.src());
        validate_name(ctx, entry.name.get_ref(), "value object", span.clone())?;
        for container in &entry.containers {
            let span = unquoted(ctx.src(), container.span());
            validate_name(ctx, container.get_ref(), "container", span)?;
        }

        let qualified = entry.qualified_name();
        if let Some(first) = seen.get(&qualified) {
            return Err(ctx.duplicate_declaration_error(
                "value object",
                qualified,
                first.clone(),
                span,
            ));
        }
        seen.insert(qualified, span);
    }

    for table in &raw.converter_sets {
        let span = table.name_span(ctx.src());
        validate_name(ctx, table.name.get_ref(), "converter set", span.clone())?;

        let qualified = table.qualified_name();
        if let Some(first) = seen.get(&qualified) {
            return Err(ctx.duplicate_declaration_error(
                "converter set",
                qualified,
                first.clone(),
                span,
            ));
        }
        seen.insert(qualified, span);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Manifest {
        src.parse().unwrap()
    }

    fn parse_err(src: &str) -> String {
        Manifest::from_str(src).unwrap_err().to_string()
    }

    #[test]
    fn test_minimal() {
        let manifest = parse(
            r#"
[[value-object]]
name = "CustomerId"
"#,
        );

        let vo = &manifest.value_objects()[0];
        assert_eq!(vo.declaration.name, "CustomerId");
        assert_eq!(vo.declaration.kind, DeclaredKind::Struct);
        assert!(vo.declaration.modifiers.is_empty());
        assert_eq!(vo.configuration, Configuration::default());
    }

    #[test]
    fn test_location_points_at_name() {
        let src = "[[value-object]]\nname = \"CustomerId\"\n";
        let manifest = parse(src);
        let location = &manifest.value_objects()[0].declaration.location;

        assert_eq!((location.line, location.column), (2, 9));
        assert_eq!(&src[location.offset..location.offset + location.length], "CustomerId");
        assert_eq!(location.file.as_deref(), Some("valobj.toml"));
    }

    #[test]
    fn test_defaults_are_layered() {
        let manifest = parse(
            r#"
[defaults]
underlying = "string"
conversion = "implicit"
converters = ["json"]

[[value-object]]
name = "Email"

[[value-object]]
name = "Age"
underlying = "int"
converters = ["binary", "json"]
"#,
        );

        let email = &manifest.get("Email").unwrap().configuration;
        assert_eq!(email.underlying, TypeRef::new("string"));
        assert_eq!(email.conversion, ConversionStyle::Implicit);
        assert_eq!(email.converters, vec![ConverterTarget::Json]);

        let age = &manifest.get("Age").unwrap().configuration;
        assert_eq!(age.underlying, TypeRef::new("int"));
        assert_eq!(age.conversion, ConversionStyle::Implicit);
        assert_eq!(
            age.converters,
            vec![ConverterTarget::Binary, ConverterTarget::Json]
        );
    }

    #[test]
    fn test_full_declaration() {
        let manifest = parse(
            r#"
[[value-object]]
name = "CustomerId"
namespace = "Whatever"
kind = "record-class"
modifiers = ["partial", "sealed"]
containers = ["Outer", "MyContainer"]
type-parameters = ["T"]
underlying = "List<string>"
validation = "Validate"
normalize-input = "Trim"
factory-name = "Create"
text-comparison = "ordinal-ignore-case"
comparison = "omit"

[[value-object.members]]
kind = "method"
name = "Validate"
static = true
parameters = ["List<string>"]
returns = "Validation"

[[value-object.members]]
kind = "conversion-operator"
implicit = true
parameters = ["CustomerId"]
returns = "int"

[[value-object.members]]
kind = "constructor"
"#,
        );

        let vo = manifest.get("Whatever.Outer.MyContainer.CustomerId").unwrap();
        let decl = &vo.declaration;
        assert_eq!(decl.kind, DeclaredKind::RecordClass);
        assert!(decl.has_modifier(Modifier::Partial));
        assert!(decl.has_modifier(Modifier::Sealed));
        assert_eq!(decl.containers, vec!["Outer", "MyContainer"]);
        assert_eq!(decl.type_parameters, vec!["T"]);

        assert_eq!(decl.members.len(), 3);
        assert_eq!(decl.members[0].name, "Validate");
        assert!(decl.members[0].is_static);
        assert_eq!(decl.members[0].parameters[0].args.len(), 1);
        assert_eq!(decl.members[1].name, "op_Implicit");
        assert!(decl.members[1].is_implicit);
        assert_eq!(decl.members[2].name, ".ctor");

        let config = &vo.configuration;
        assert!(config.underlying.is_generic());
        assert_eq!(config.validation.as_deref(), Some("Validate"));
        assert_eq!(config.normalize_input.as_deref(), Some("Trim"));
        assert_eq!(config.factory_name, "Create");
        assert_eq!(config.text_comparison, TextComparison::OrdinalIgnoreCase);
        assert_eq!(config.comparison, ComparisonGeneration::Omit);
    }

    #[test]
    fn test_unknown_converter_is_parse_error() {
        let err = Manifest::from_str(
            r#"
[[value-object]]
name = "Age"
converters = ["xml"]
"#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Parse { span: Some(_), .. }));
    }

    #[test]
    fn test_unknown_key_is_parse_error() {
        assert_eq!(
            parse_err("[[value-object]]\nname = \"Age\"\ncolour = \"red\"\n"),
            "failed to parse valobj.toml"
        );
        assert_eq!(
            parse_err("[defaults]\nvalidation = \"Validate\"\n"),
            "failed to parse valobj.toml"
        );
    }

    #[test]
    fn test_method_without_name() {
        assert_eq!(
            parse_err("[[value-object]]\nname = \"Age\"\n[[value-object.members]]\nkind = \"method\"\n"),
            "a member of kind 'method' needs a name"
        );
    }

    #[test]
    fn test_invalid_name() {
        assert_eq!(
            parse_err("[[value-object]]\nname = \"Customer-Id\"\n"),
            "invalid value object name 'Customer-Id'"
        );
        assert_eq!(
            parse_err("[[value-object]]\nname = \"Id\"\ncontainers = [\"1Outer\"]\n"),
            "invalid container name '1Outer'"
        );
    }

    #[test]
    fn test_duplicate_value_object() {
        let src = "[[value-object]]\nname = \"Age\"\n\n[[value-object]]\nname = \"Age\"\n";
        let err = Manifest::from_str(src).unwrap_err();
        match *err {
            Error::DuplicateDeclaration {
                kind: "value object",
                first_span,
                second_span,
                ..
            } => {
                assert_eq!(first_span.offset(), 25);
                assert_eq!(second_span.offset(), 56);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_same_name_in_different_namespaces() {
        let manifest = parse(
            r#"
[[value-object]]
name = "Id"
namespace = "Orders"

[[value-object]]
name = "Id"
namespace = "Customers"
"#,
        );
        assert_eq!(manifest.inputs().len(), 2);
    }

    #[test]
    fn test_converter_set() {
        let src = r#"
[[value-object]]
name = "Id"
namespace = "Domain"

[[converter-set]]
name = "PersistenceConverters"
namespace = "Infra"
value-objects = ["Id", "Domain.HireDate"]

[[converter-set]]
name = "DocumentConverters"
targets = ["json", "bson", "json"]
value-objects = []
"#;
        let manifest = parse(src);
        let sets = manifest.converter_sets();
        assert_eq!(sets.len(), 2);

        let persistence = &sets[0];
        assert_eq!(persistence.qualified_name(), "Infra.PersistenceConverters");
        assert_eq!(persistence.targets, vec![ConverterTarget::RelationalMapping]);
        let entries: Vec<_> = persistence
            .entries
            .iter()
            .map(|e| e.value_object.as_str())
            .collect();
        assert_eq!(entries, vec!["Id", "Domain.HireDate"]);

        let location = &persistence.entries[1].location;
        assert_eq!(
            &src[location.offset..location.offset + location.length],
            "Domain.HireDate"
        );
        assert_eq!(location.line, 9);

        assert_eq!(
            sets[1].targets,
            vec![ConverterTarget::Json, ConverterTarget::Bson]
        );
        assert!(sets[1].entries.is_empty());
    }

    #[test]
    fn test_converter_set_name_clashes_with_value_object() {
        let src = "[[value-object]]\nname = \"Age\"\n\n[[converter-set]]\nname = \"Age\"\nvalue-objects = [\"Age\"]\n";
        assert_eq!(
            Manifest::from_str(src).unwrap_err().to_string(),
            "converter set 'Age' is declared twice"
        );
        assert_eq!(
            parse_err("[[converter-set]]\nname = \"Bad Name\"\nvalue-objects = []\n"),
            "invalid converter set name 'Bad Name'"
        );
    }
}
