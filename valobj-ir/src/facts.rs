//! Normalized facts derived from a candidate declaration.

use serde::{Deserialize, Serialize};

use crate::{Accessibility, DeclaredKind, SourceLocation, TypeRef};

/// A user-authored conversion operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserConversion {
    pub from: TypeRef,
    pub to: TypeRef,
    pub implicit: bool,
}

/// Shape of a user-authored method, as far as the rules care.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodShape {
    pub name: String,
    pub is_static: bool,
    pub parameters: Vec<TypeRef>,
    pub return_type: Option<TypeRef>,
}

impl MethodShape {
    /// Returns true if the method is static, takes exactly `parameter` and returns `returns`.
    pub fn matches(&self, parameter: &TypeRef, returns: &str) -> bool {
        self.is_static
            && self.parameters.len() == 1
            && self.parameters[0].simple_name() == parameter.simple_name()
            && self.parameters[0].args == parameter.args
            && self
                .return_type
                .as_ref()
                .is_some_and(|ty| ty.simple_name() == returns)
    }
}

/// Members the user wrote by hand that overlap with generated ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserMembers {
    /// Equality operators, `Equals` or `GetHashCode`.
    pub equality: bool,
    /// Comparison operators or `CompareTo`.
    pub comparison: bool,
    /// `ToString`.
    pub formatting: bool,
    /// Number of user-declared constructors.
    pub constructors: usize,
    pub conversions: Vec<UserConversion>,
}

/// Structural facts about a declaration.
///
/// Facts are derived, never mutated: if the declaration changes, they are
/// recomputed from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclarationFacts {
    pub type_name: String,
    pub qualified_name: String,
    pub declared_kind: DeclaredKind,
    pub is_candidate_kind: bool,
    pub accessibility: Accessibility,
    pub is_partial: bool,
    pub is_abstract: bool,
    pub is_static: bool,
    pub is_nested: bool,
    /// Name of the immediate containing type, when nested.
    pub nesting_container_name: Option<String>,
    pub generic_arity: usize,
    pub user_members: UserMembers,
    pub methods: Vec<MethodShape>,
    pub location: SourceLocation,
}

impl DeclarationFacts {
    pub fn has_user_defined_equality(&self) -> bool {
        self.user_members.equality
    }

    pub fn has_user_defined_conversions(&self) -> bool {
        !self.user_members.conversions.is_empty()
    }

    /// Returns true if the user wrote a conversion operator from `from` to `to`.
    ///
    /// Type names are compared by their simple name so that `System.Int32`
    /// written in one place and `Int32` in another still match.
    pub fn has_user_conversion(&self, from: &str, to: &str) -> bool {
        self.user_members
            .conversions
            .iter()
            .any(|c| c.from.simple_name() == from && c.to.simple_name() == to)
    }

    /// Look up a method by name. Overloads resolve to the first declared.
    pub fn method(&self, name: &str) -> Option<&MethodShape> {
        self.methods.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(is_static: bool, params: &[&str], returns: Option<&str>) -> MethodShape {
        MethodShape {
            name: "Validate".into(),
            is_static,
            parameters: params.iter().map(|p| TypeRef::parse(p)).collect(),
            return_type: returns.map(TypeRef::parse),
        }
    }

    #[test]
    fn test_method_shape_matches() {
        let int = TypeRef::new("int");
        assert!(shape(true, &["int"], Some("Validation")).matches(&int, "Validation"));
        assert!(shape(true, &["int"], Some("Valobj.Validation")).matches(&int, "Validation"));
        assert!(!shape(false, &["int"], Some("Validation")).matches(&int, "Validation"));
        assert!(!shape(true, &["string"], Some("Validation")).matches(&int, "Validation"));
        assert!(!shape(true, &["int", "int"], Some("Validation")).matches(&int, "Validation"));
        assert!(!shape(true, &["int"], Some("bool")).matches(&int, "Validation"));
        assert!(!shape(true, &["int"], None).matches(&int, "Validation"));
    }
}
