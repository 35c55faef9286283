use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source content and filename of a manifest, for error reporting.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error with a span.
    pub fn validation_error_at(
        &self,
        message: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: Some(span.into()),
            message: message.into(),
        })
    }

    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span: span.into(),
            name: name.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }

    pub fn duplicate_declaration_error(
        &self,
        kind: &'static str,
        name: impl Into<String>,
        first_span: impl Into<SourceSpan>,
        second_span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::DuplicateDeclaration {
            kind,
            src: self.named_source(),
            first_span: first_span.into(),
            second_span: second_span.into(),
            name: name.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create a valobj.toml with at least one [[value-object]] table"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse valobj.toml")]
    #[diagnostic(code(valobj::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{kind} '{name}' is declared twice")]
    #[diagnostic(
        code(valobj::duplicate_declaration),
        help("give the second declaration a different name or namespace")
    )]
    DuplicateDeclaration {
        kind: &'static str,
        #[source_code]
        src: NamedSource<String>,
        #[label("first declared here")]
        first_span: SourceSpan,
        #[label("declared again here")]
        second_span: SourceSpan,
        name: String,
    },

    #[error("{message}")]
    #[diagnostic(code(valobj::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(valobj::invalid_identifier),
        help("{reason}. Use only letters, numbers and underscores, starting with a letter or underscore.")
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: SourceSpan,
        name: String,
        context: String,
        reason: String,
    },
}
