//! Error types for launch input and game configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Malformed numeric input at the launch boundary.
///
/// This is the only error a launch can produce; once parameters are valid
/// the simulation itself is total.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} is missing")]
    Missing { field: &'static str },

    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
}

impl InputError {
    /// Name of the field that failed validation
    pub fn field(&self) -> &'static str {
        match self {
            InputError::Missing { field }
            | InputError::NotANumber { field, .. }
            | InputError::NotFinite { field, .. } => field,
        }
    }
}

/// Failure to load or validate a `GameConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
