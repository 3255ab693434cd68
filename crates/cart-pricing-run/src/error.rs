//! # Runner Error Types
//!
//! Only the runner's own I/O and configuration can fail. Pricing problems
//! never surface here; they end up as an empty operation list.

use std::path::PathBuf;

use cart_pricing_core::ValidationError;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the expected schema.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is present but breaks a rule.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

/// Runner errors.
#[derive(Debug, Error)]
pub enum RunError {
    /// Reading the input document or writing the result failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The result document could not be serialised.
    #[error("Failed to write result: {0}")]
    Output(#[from] serde_json::Error),
}

/// Convenience type alias for Results with RunError.
pub type RunResult<T> = Result<T, RunError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err: RunError = ConfigError::Invalid(ValidationError::Required {
            field: "attribute key".to_string(),
        })
        .into();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: attribute key is required"
        );
    }
}
