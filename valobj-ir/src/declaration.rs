//! Candidate declarations as handed over by the host.

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::{SourceLocation, TypeRef};

/// Declared kind of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclaredKind {
    Class,
    Struct,
    RecordClass,
    RecordStruct,
    Interface,
    Enum,
}

impl DeclaredKind {
    /// Get the kebab-case name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclaredKind::Class => "class",
            DeclaredKind::Struct => "struct",
            DeclaredKind::RecordClass => "record-class",
            DeclaredKind::RecordStruct => "record-struct",
            DeclaredKind::Interface => "interface",
            DeclaredKind::Enum => "enum",
        }
    }

    /// Returns true if a type of this kind can hold a wrapped value at all.
    pub fn is_candidate(&self) -> bool {
        matches!(
            self,
            DeclaredKind::Class
                | DeclaredKind::Struct
                | DeclaredKind::RecordClass
                | DeclaredKind::RecordStruct
        )
    }

    /// Returns true for struct-like kinds (copied by value).
    pub fn is_value_type(&self) -> bool {
        matches!(self, DeclaredKind::Struct | DeclaredKind::RecordStruct)
    }
}

impl fmt::Display for DeclaredKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declaration modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Modifier {
    Partial,
    Abstract,
    Sealed,
    Static,
    Readonly,
}

/// Declared accessibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accessibility {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
}

/// Kind of a member the user declared by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclaredMemberKind {
    Constructor,
    Method,
    Property,
    Field,
    EqualityOperator,
    ComparisonOperator,
    ConversionOperator,
    Equals,
    CompareTo,
    ToString,
    GetHashCode,
}

/// Signature of a member the user declared by hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberSignature {
    pub kind: DeclaredMemberKind,
    pub name: String,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_abstract: bool,
    /// For conversion operators: implicit (true) or explicit (false).
    #[serde(default)]
    pub is_implicit: bool,
    #[serde(default)]
    pub parameters: Vec<TypeRef>,
    #[serde(default)]
    pub return_type: Option<TypeRef>,
}

impl MemberSignature {
    /// Create a member signature of the given kind.
    pub fn new(kind: DeclaredMemberKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            is_static: false,
            is_abstract: false,
            is_implicit: false,
            parameters: Vec::new(),
            return_type: None,
        }
    }

    /// Create a method signature.
    pub fn method(name: impl Into<String>) -> Self {
        Self::new(DeclaredMemberKind::Method, name)
    }

    /// Create a constructor signature.
    pub fn constructor(parameters: Vec<TypeRef>) -> Self {
        Self::new(DeclaredMemberKind::Constructor, ".ctor").with_parameters(parameters)
    }

    /// Create a conversion operator from `from` to `to`.
    pub fn conversion(implicit: bool, from: TypeRef, to: TypeRef) -> Self {
        let mut member = Self::new(
            DeclaredMemberKind::ConversionOperator,
            if implicit { "op_Implicit" } else { "op_Explicit" },
        )
        .with_parameters(vec![from])
        .returning(to)
        .as_static();
        member.is_implicit = implicit;
        member
    }

    /// Mark the member as static.
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Mark the member as abstract.
    pub fn as_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Set the parameter types.
    pub fn with_parameters(mut self, parameters: Vec<TypeRef>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Set the return type.
    pub fn returning(mut self, ty: impl Into<TypeRef>) -> Self {
        self.return_type = Some(ty.into());
        self
    }
}

/// A type declaration considered for augmentation.
///
/// This is an immutable snapshot taken once per generation cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDeclaration {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    /// Containing types, outermost first.
    #[serde(default)]
    pub containers: Vec<String>,
    pub kind: DeclaredKind,
    #[serde(default)]
    pub modifiers: BTreeSet<Modifier>,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberSignature>,
    #[serde(default)]
    pub location: SourceLocation,
}

impl CandidateDeclaration {
    /// Create a top-level declaration with no modifiers or members.
    pub fn new(name: impl Into<String>, kind: DeclaredKind) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            containers: Vec::new(),
            kind,
            modifiers: BTreeSet::new(),
            accessibility: Accessibility::Public,
            type_parameters: Vec::new(),
            members: Vec::new(),
            location: SourceLocation::default(),
        }
    }

    /// Shorthand for a `partial` declaration, the usual starting point.
    pub fn partial(name: impl Into<String>, kind: DeclaredKind) -> Self {
        Self::new(name, kind).with_modifier(Modifier::Partial)
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Nest the declaration inside another container (appended innermost).
    pub fn nested_in(mut self, container: impl Into<String>) -> Self {
        self.containers.push(container.into());
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn with_type_parameter(mut self, name: impl Into<String>) -> Self {
        self.type_parameters.push(name.into());
        self
    }

    pub fn with_member(mut self, member: MemberSignature) -> Self {
        self.members.push(member);
        self
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    /// Returns true if the modifier is present.
    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Fully qualified name: namespace, containers and name joined with dots.
    pub fn qualified_name(&self) -> String {
        self.namespace
            .iter()
            .chain(self.containers.iter())
            .chain(std::iter::once(&self.name))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(".")
    }
}
