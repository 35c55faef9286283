//! Validation outcomes and construction errors.
//!
//! These are the runtime-facing halves of the generated factory contract: a
//! validation method returns a [`Validation`], and a factory that receives an
//! invalid value fails with a [`ConstructionError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of a validation method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum Validation {
    Ok,
    Invalid { message: String },
}

impl Validation {
    /// Create an invalid outcome with a message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Validation::Invalid {
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Validation::Ok)
    }

    /// Turn the outcome into a construction result for `type_name`.
    pub fn into_result(self, type_name: &str) -> Result<(), ConstructionError> {
        match self {
            Validation::Ok => Ok(()),
            Validation::Invalid { message } => Err(ConstructionError::Invalid {
                type_name: type_name.to_string(),
                message,
            }),
        }
    }
}

/// Failure to construct a value object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("cannot create a value object '{type_name}': {message}")]
    Invalid { type_name: String, message: String },

    #[error("cannot read a '{type_name}' from the {target} representation: {reason}")]
    Decode {
        type_name: String,
        target: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result() {
        assert!(Validation::Ok.into_result("Age").is_ok());

        let err = Validation::invalid("must be positive")
            .into_result("Age")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot create a value object 'Age': must be positive"
        );
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&Validation::invalid("nope")).unwrap();
        assert_eq!(json, r#"{"outcome":"invalid","message":"nope"}"#);
    }
}
