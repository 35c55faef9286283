//! Core operations.
//!
//! This module contains the business logic for valobj commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod explain;
pub mod plan;

pub use check::check;
pub use explain::explain;
pub use plan::plan;

#[cfg(test)]
pub(crate) mod fixtures {
    use valobj_manifest::Manifest;

    pub const MANIFEST: &str = r#"
[defaults]
converters = ["json"]

[[value-object]]
name = "CustomerId"
modifiers = ["partial"]

[[value-object]]
name = "Email"
kind = "class"
modifiers = ["partial"]
underlying = "string"
validation = "Validate"

[[value-object.members]]
kind = "method"
name = "Validate"
static = true
parameters = ["string"]
returns = "Validation"

[[value-object.members]]
kind = "to-string"

[[value-object]]
name = "Tags"
kind = "class"
underlying = "List<string>"

[[converter-set]]
name = "PersistenceConverters"
value-objects = ["CustomerId", "Email"]
"#;

    pub fn manifest() -> Manifest {
        MANIFEST.parse().unwrap()
    }
}
