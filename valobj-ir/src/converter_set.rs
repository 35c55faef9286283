//! Converter sets: adapters requested from outside the value objects.
//!
//! A converter set names value objects declared elsewhere and asks for
//! adapters for them, typically so a persistence layer can register every
//! relational-mapping converter from one place without touching the domain
//! types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ConverterAdapterSpec, ConverterTarget, SourceLocation};

/// One value object listed by a converter set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterSetEntry {
    /// Simple or qualified name of the value object.
    pub value_object: String,
    #[serde(default)]
    pub location: SourceLocation,
}

impl ConverterSetEntry {
    pub fn new(value_object: impl Into<String>) -> Self {
        Self {
            value_object: value_object.into(),
            location: SourceLocation::default(),
        }
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }
}

/// A declaration requesting adapters for value objects declared elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterSetDeclaration {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    /// Targets to build for every entry; an ordered set.
    pub targets: Vec<ConverterTarget>,
    pub entries: Vec<ConverterSetEntry>,
    #[serde(default)]
    pub location: SourceLocation,
}

impl ConverterSetDeclaration {
    /// Create an empty set producing relational-mapping adapters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            targets: vec![ConverterTarget::RelationalMapping],
            entries: Vec::new(),
            location: SourceLocation::default(),
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Replace the targets. Repeated targets are kept once.
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = ConverterTarget>) -> Self {
        self.targets.clear();
        for target in targets {
            if !self.targets.contains(&target) {
                self.targets.push(target);
            }
        }
        self
    }

    pub fn with_entry(mut self, entry: ConverterSetEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// List a value object by name.
    pub fn listing(self, value_object: impl Into<String>) -> Self {
        self.with_entry(ConverterSetEntry::new(value_object))
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{}.{}", namespace, self.name),
            None => self.name.clone(),
        }
    }
}

/// The adapters planned for one listed value object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConverterSetMember {
    /// Qualified name of the value object.
    pub value_object: String,
    pub adapters: Vec<ConverterAdapterSpec>,
}

/// The plan of an accepted converter set, entries in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConverterSetPlan {
    pub name: String,
    pub qualified_name: String,
    pub members: Vec<ConverterSetMember>,
}

impl ConverterSetPlan {
    /// The adapters planned for `value_object`, by qualified name.
    pub fn member(&self, value_object: &str) -> Option<&ConverterSetMember> {
        self.members.iter().find(|m| m.value_object == value_object)
    }
}

impl fmt::Display for ConverterSetPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (converter set)", self.qualified_name)?;
        for member in &self.members {
            writeln!(f, "  {}:", member.value_object)?;
            for adapter in &member.adapters {
                writeln!(f, "    {}", adapter)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_relational_mapping() {
        let set = ConverterSetDeclaration::new("PersistenceConverters")
            .in_namespace("Infra")
            .listing("Id")
            .listing("Domain.HireDate");

        assert_eq!(set.targets, vec![ConverterTarget::RelationalMapping]);
        assert_eq!(set.qualified_name(), "Infra.PersistenceConverters");
        let names: Vec<_> = set.entries.iter().map(|e| e.value_object.as_str()).collect();
        assert_eq!(names, vec!["Id", "Domain.HireDate"]);
    }

    #[test]
    fn test_targets_are_an_ordered_set() {
        let set = ConverterSetDeclaration::new("Converters").with_targets([
            ConverterTarget::MicroOrm,
            ConverterTarget::Json,
            ConverterTarget::MicroOrm,
        ]);
        assert_eq!(
            set.targets,
            vec![ConverterTarget::MicroOrm, ConverterTarget::Json]
        );
    }
}
