//! Error types for the debserver service.

use apt_repository::ScanError;
use thiserror::Error;

/// Errors that can stop the service.
#[derive(Error, Debug)]
pub enum DebserverError {
    /// An indexing cycle failed.
    #[error("Indexing failed: {0}")]
    Scan(#[from] ScanError),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration values are invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The configuration file could not be parsed.
    #[error("Invalid configuration file: {0}")]
    Json(#[from] serde_json::Error),

    /// The filesystem watcher failed.
    #[error("Watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// The tracing subscriber could not be installed.
    #[error("Failed to initialise logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}

impl DebserverError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }
}

/// Result type for debserver operations.
pub type Result<T> = std::result::Result<T, DebserverError>;

#[cfg(test)]
mod tests {
    use super::*;
    use apt_repository::AptRepositoryError;
    use std::path::PathBuf;

    #[test]
    fn test_scan_error_message() {
        let err: DebserverError = ScanError::new(
            3,
            AptRepositoryError::control_not_found(PathBuf::from("/srv/debs/x.deb")),
        )
        .into();
        assert_eq!(
            err.to_string(),
            "Indexing failed: indexing stopped after 3 package(s): control file not found in /srv/debs/x.deb"
        );
    }

    #[test]
    fn test_config_error_message() {
        let err = DebserverError::config("listen address must not be empty");
        assert_eq!(
            err.to_string(),
            "Configuration error: listen address must not be empty"
        );
    }
}
