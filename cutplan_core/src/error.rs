//! Error types for the cutplan_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for cutplan_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A simulation request field is out of range.
    ///
    /// Raised before any simulation work happens.
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Energy model precondition failed (e.g. non-positive body mass)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's request rather than the environment
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. } | Error::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_validation() {
        assert!(Error::validation("age", "must be between 18 and 75").is_validation());
        assert!(Error::InvalidInput("weight must be positive".into()).is_validation());
        assert!(!Error::Config("model.beta must be in [0, 1)".into()).is_validation());

        let io = io::Error::new(io::ErrorKind::NotFound, "missing");
        assert!(!Error::from(io).is_validation());
    }

    #[test]
    fn test_validation_display_names_field() {
        let err = Error::validation("deficit_value", "must be negative");
        assert_eq!(err.to_string(), "Invalid deficit_value: must be negative");
    }
}
