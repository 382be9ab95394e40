//! Error types for Centinela operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for Centinela operations.
///
/// Covers configuration validation and misuse of the two-phase
/// fit/score contract. Degenerate splits and zero/one-sample leaves
/// are handled locally by the tree builder and never surface here.
///
/// # Examples
///
/// ```
/// use centinela::error::CentinelaError;
///
/// let err = CentinelaError::InvalidHyperparameter {
///     param: "contamination".to_string(),
///     value: "1.5".to_string(),
///     constraint: "in (0, 1)".to_string(),
/// };
/// assert!(err.to_string().contains("contamination"));
/// ```
#[derive(Debug)]
pub enum CentinelaError {
    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A model method was called before `fit`.
    NotFitted {
        /// Model name
        model: String,
    },

    /// Serialization/deserialization error.
    Serialization(String),

    /// Generic error with string message.
    Other(String),
}

impl CentinelaError {
    /// Convenience constructor for hyperparameter violations.
    pub fn invalid_hyperparameter(
        param: impl Into<String>,
        value: impl fmt::Display,
        constraint: impl Into<String>,
    ) -> Self {
        CentinelaError::InvalidHyperparameter {
            param: param.into(),
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }

    /// Convenience constructor for fit-before-use violations.
    pub fn not_fitted(model: impl Into<String>) -> Self {
        CentinelaError::NotFitted {
            model: model.into(),
        }
    }
}

impl fmt::Display for CentinelaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CentinelaError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            CentinelaError::NotFitted { model } => {
                write!(f, "{model} has not been fitted; call fit() first")
            }
            CentinelaError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            CentinelaError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CentinelaError {}

impl From<&str> for CentinelaError {
    fn from(msg: &str) -> Self {
        CentinelaError::Other(msg.to_string())
    }
}

impl From<String> for CentinelaError {
    fn from(msg: String) -> Self {
        CentinelaError::Other(msg)
    }
}

impl From<serde_json::Error> for CentinelaError {
    fn from(err: serde_json::Error) -> Self {
        CentinelaError::Serialization(err.to_string())
    }
}

/// Result type alias using [`CentinelaError`].
pub type Result<T> = std::result::Result<T, CentinelaError>;
