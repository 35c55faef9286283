//! Declaration shape analyzer.
//!
//! Turns a [`CandidateDeclaration`] into normalized [`DeclarationFacts`].
//! The analysis is pure and total: a malformed declaration simply produces
//! facts that the rule engine rejects.

use valobj_ir::{
    CandidateDeclaration, DeclarationFacts, DeclaredMemberKind, MemberSignature, MethodShape,
    Modifier, UserConversion, UserMembers,
};

/// Analyze the structural shape of a declaration.
pub fn analyze(decl: &CandidateDeclaration) -> DeclarationFacts {
    // A type that declares abstract members is abstract even without the modifier
    let is_abstract =
        decl.has_modifier(Modifier::Abstract) || decl.members.iter().any(|m| m.is_abstract);

    DeclarationFacts {
        type_name: decl.name.clone(),
        qualified_name: decl.qualified_name(),
        declared_kind: decl.kind,
        is_candidate_kind: decl.kind.is_candidate(),
        accessibility: decl.accessibility,
        is_partial: decl.has_modifier(Modifier::Partial),
        is_abstract,
        is_static: decl.has_modifier(Modifier::Static),
        is_nested: !decl.containers.is_empty(),
        nesting_container_name: decl.containers.last().cloned(),
        generic_arity: decl.type_parameters.len(),
        user_members: user_members(&decl.members),
        methods: decl
            .members
            .iter()
            .filter(|m| m.kind == DeclaredMemberKind::Method)
            .map(method_shape)
            .collect(),
        location: decl.location.clone(),
    }
}

fn user_members(members: &[MemberSignature]) -> UserMembers {
    let has = |kinds: &[DeclaredMemberKind]| members.iter().any(|m| kinds.contains(&m.kind));

    UserMembers {
        equality: has(&[
            DeclaredMemberKind::EqualityOperator,
            DeclaredMemberKind::Equals,
            DeclaredMemberKind::GetHashCode,
        ]),
        comparison: has(&[
            DeclaredMemberKind::ComparisonOperator,
            DeclaredMemberKind::CompareTo,
        ]),
        formatting: has(&[DeclaredMemberKind::ToString]),
        constructors: members
            .iter()
            .filter(|m| m.kind == DeclaredMemberKind::Constructor)
            .count(),
        conversions: members
            .iter()
            .filter(|m| m.kind == DeclaredMemberKind::ConversionOperator)
            .filter_map(user_conversion)
            .collect(),
    }
}

/// Conversion operators without a source or target type are ignored.
fn user_conversion(member: &MemberSignature) -> Option<UserConversion> {
    Some(UserConversion {
        from: member.parameters.first()?.clone(),
        to: member.return_type.clone()?,
        implicit: member.is_implicit,
    })
}

fn method_shape(member: &MemberSignature) -> MethodShape {
    MethodShape {
        name: member.name.clone(),
        is_static: member.is_static,
        parameters: member.parameters.clone(),
        return_type: member.return_type.clone(),
    }
}
