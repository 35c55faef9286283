//! Identifier checks for names taken from valobj.toml.

use std::ops::Range;

use crate::{Result, SourceContext};

/// Check that `name` is a valid type identifier, reporting at `span`.
pub(crate) fn validate_name(
    ctx: &SourceContext,
    name: &str,
    context: &str,
    span: Range<usize>,
) -> Result<()> {
    match validate_identifier(name) {
        Some(reason) => Err(ctx.invalid_identifier_error(name, context, reason, span)),
        None => Ok(()),
    }
}

/// Returns None if `name` is a valid identifier, Some(reason) otherwise.
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if !chars.all(|c| c.is_alphanumeric() || c == '_') {
        return Some("name must contain only letters, numbers and underscores");
    }

    None
}

/// Narrow the span of a quoted string value to its contents.
pub(crate) fn unquoted(src: &str, span: Range<usize>) -> Range<usize> {
    match src.get(span.clone()) {
        Some(text) if text.len() >= 2 && (text.starts_with('"') || text.starts_with('\'')) => {
            span.start + 1..span.end - 1
        }
        _ => span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("CustomerId").is_none());
        assert!(validate_identifier("_private").is_none());
        assert!(validate_identifier("Id2").is_none());
        assert!(validate_identifier("Größe").is_none());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(validate_identifier("").is_some());
        assert!(validate_identifier("1st").is_some());
        assert!(validate_identifier("Customer-Id").is_some());
        assert!(validate_identifier("Customer Id").is_some());
        assert!(validate_identifier("Customer.Id").is_some());
    }

    #[test]
    fn test_unquoted() {
        let src = r#"name = "Age""#;
        assert_eq!(unquoted(src, 7..12), 8..11);
        assert_eq!(&src[unquoted(src, 7..12)], "Age");
        assert_eq!(unquoted(src, 0..4), 0..4);
    }
}
