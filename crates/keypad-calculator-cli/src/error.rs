//! Error types for the CLI

use std::path::PathBuf;

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Config file could not be read
    #[error("Cannot read config {}: {source}", path.display())]
    ConfigRead {
        /// Path given with `--config`
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid configuration JSON
    #[error("Invalid config {}: {source}", path.display())]
    ConfigParse {
        /// Path given with `--config`
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Key name with no calculator action
    #[error("Unknown key: {key:?}")]
    UnknownKey {
        /// The rejected key
        key: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create an unknown key error
    #[must_use]
    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::UnknownKey { key: key.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_message() {
        assert_eq!(CliError::unknown_key("F5").to_string(), r#"Unknown key: "F5""#);
    }

    #[test]
    fn test_config_read_message() {
        let err = CliError::ConfigRead {
            path: PathBuf::from("calc.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "Cannot read config calc.json: missing");
    }

    #[test]
    fn test_io_from() {
        let err: CliError = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe").into();
        assert!(matches!(err, CliError::Io(_)));
    }
}
