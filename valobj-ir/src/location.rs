//! Source locations attached to declarations and diagnostics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Location of a declaration in the host's source.
///
/// `offset` and `length` are byte positions used for labelled reports;
/// `line` and `column` are 1-based and used for the textual rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub offset: usize,
    pub length: usize,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    /// Create a location from a byte span, positioned at line 1, column 1.
    pub fn new(offset: usize, length: usize) -> Self {
        Self {
            file: None,
            offset,
            length,
            line: 1,
            column: 1,
        }
    }

    /// Set the 1-based line and column.
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    /// Attach a file name.
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Compute a location for a byte span within `src`, deriving line and column.
    pub fn from_span(src: &str, offset: usize, length: usize) -> Self {
        let prefix = &src[..offset.min(src.len())];
        let line = prefix.matches('\n').count() + 1;
        let column = match prefix.rfind('\n') {
            Some(newline) => prefix[newline + 1..].chars().count() + 1,
            None => prefix.chars().count() + 1,
        };
        Self::new(offset, length).with_position(line, column)
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}", file)?;
        }
        write!(f, "({},{})", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_span() {
        let src = "[[value-object]]\nname = \"CustomerId\"\n";
        let offset = src.find("CustomerId").unwrap();
        let loc = SourceLocation::from_span(src, offset, "CustomerId".len());
        assert_eq!(loc.line, 2);
        assert_eq!(loc.column, 9);
    }

    #[test]
    fn test_display() {
        let loc = SourceLocation::new(0, 3).with_position(6, 1);
        assert_eq!(loc.to_string(), "(6,1)");
        assert_eq!(loc.in_file("valobj.toml").to_string(), "valobj.toml(6,1)");
    }
}
