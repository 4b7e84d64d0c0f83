//! Error types for rack
//!
//! All modules use `RackResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rack operations
pub type RackResult<T> = Result<T, RackError>;

/// All errors that can occur in rack
#[derive(Error, Debug)]
pub enum RackError {
    // Request errors
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Allocation errors
    #[error("Plate accounting mismatch: counted {counted} lb but achieved {achieved} lb")]
    CatalogMismatch { counted: f64, achieved: f64 },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // HTTP errors
    #[error("Malformed HTTP request: {0}")]
    Http(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RackError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a validation error
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidRequest(reason.into())
    }

    /// Whether the error was caused by the caller's input rather than by rack
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_) | Self::Http(_) | Self::Json(_))
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ConfigInvalid { .. } | Self::TomlParse(_) => {
                Some("Run: rack config init --force to regenerate a default config")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RackError::invalid("a valid desired weight must be provided");
        assert_eq!(
            err.to_string(),
            "Invalid request: a valid desired weight must be provided"
        );
    }

    #[test]
    fn error_hint() {
        let err = RackError::ConfigInvalid {
            path: PathBuf::from("/tmp/config.toml"),
            reason: "bad".to_string(),
        };
        assert!(err.hint().unwrap().contains("config init"));
        assert_eq!(RackError::Internal("x".to_string()).hint(), None);
    }

    #[test]
    fn client_errors() {
        assert!(RackError::invalid("nope").is_client_error());
        assert!(RackError::Http("truncated".to_string()).is_client_error());
        assert!(!RackError::CatalogMismatch {
            counted: 1.0,
            achieved: 2.0
        }
        .is_client_error());
    }
}
