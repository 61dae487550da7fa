//! Error types and error handling

use std::path::PathBuf;
use thiserror::Error;

/// Library error type
#[derive(Debug, Error)]
pub enum DbWebFormError {
    /// The configuration file does not exist
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The configuration file could not be parsed or merged
    #[error("Configuration error: {0}")]
    ConfigParse(#[from] Box<figment::Error>),

    /// The database URL uses a scheme no reader exists for
    #[error("Unsupported database URL: '{0}' (expected sqlite: or postgres:)")]
    UnsupportedDatabase(String),

    /// Reflection returned no columns for the table
    #[error("Table not found: '{0}'")]
    TableNotFound(String),

    /// Connection or catalog query failure
    #[error("Schema reflection failed: {0}")]
    Reflection(#[from] sqlx::Error),

    /// Template rendering failure
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Generated output could not be written
    #[error("Failed to write {}: {source}", path.display())]
    OutputWrite {
        /// Target file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A global tracing subscriber was already installed
    #[error("Logging setup failed: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    /// The web server could not bind or serve
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

impl From<figment::Error> for DbWebFormError {
    fn from(err: figment::Error) -> Self {
        Self::ConfigParse(Box::new(err))
    }
}

/// Convenience alias used across the crate
pub type Result<T, E = DbWebFormError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_message() {
        let err = DbWebFormError::ConfigNotFound(PathBuf::from("missing.json"));
        assert_eq!(err.to_string(), "Configuration file not found: missing.json");
    }

    #[test]
    fn test_output_write_message() {
        let err = DbWebFormError::OutputWrite {
            path: PathBuf::from("out/users.py"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().starts_with("Failed to write out/users.py"));
    }
}
