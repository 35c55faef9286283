//! Type references and primitive categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A reference to a type as written in a declaration.
///
/// Generic arguments are kept structurally (`List<string>` has name `List`
/// and one argument). Array types keep their brackets in the name (`int[]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TypeRef {
    pub name: String,
    pub args: Vec<TypeRef>,
}

impl TypeRef {
    /// Create a non-generic type reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Create a generic type reference.
    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Parse a type reference from source text.
    ///
    /// Parsing never fails: text that does not look like `Name<Args>` is kept
    /// verbatim as the type name.
    pub fn parse(src: &str) -> Self {
        let src = src.trim();
        if src.ends_with("[]") {
            return Self::new(src);
        }

        let (Some(open), true) = (src.find('<'), src.ends_with('>')) else {
            return Self::new(src);
        };

        let name = src[..open].trim();
        let inner = &src[open + 1..src.len() - 1];
        match split_top_level(inner) {
            Some(parts) if !name.is_empty() => {
                Self::generic(name, parts.into_iter().map(Self::parse).collect())
            }
            _ => Self::new(src),
        }
    }

    /// The name without any namespace or path qualification.
    pub fn simple_name(&self) -> &str {
        let after_path = self.name.rsplit("::").next().unwrap_or(&self.name);
        after_path.rsplit('.').next().unwrap_or(after_path)
    }

    /// Returns true if this is an array type (`T[]`).
    pub fn is_array(&self) -> bool {
        self.name.ends_with("[]")
    }

    /// Returns true if this reference carries generic arguments.
    pub fn is_generic(&self) -> bool {
        !self.args.is_empty()
    }
}

/// Split generic arguments on commas that are not nested in angle brackets.
fn split_top_level(inner: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in inner.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(inner[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return None;
    }
    parts.push(inner[start..].trim());

    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    Some(parts)
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl From<String> for TypeRef {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for TypeRef {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

/// Category of an underlying primitive type.
///
/// The category drives the default equality, ordering and converter
/// representation of a value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimitiveCategory {
    Integral,
    FloatingPoint,
    Text,
    Temporal,
    IdentifierLike,
    Structured,
}

impl PrimitiveCategory {
    /// Get the kebab-case name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveCategory::Integral => "integral",
            PrimitiveCategory::FloatingPoint => "floating-point",
            PrimitiveCategory::Text => "text",
            PrimitiveCategory::Temporal => "temporal",
            PrimitiveCategory::IdentifierLike => "identifier-like",
            PrimitiveCategory::Structured => "structured",
        }
    }

    /// Returns true for integral and floating-point categories.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            PrimitiveCategory::Integral | PrimitiveCategory::FloatingPoint
        )
    }
}

impl fmt::Display for PrimitiveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
