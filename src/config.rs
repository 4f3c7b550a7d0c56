//! Service configuration.

use crate::error::{DebserverError, Result};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Depth bound used for `--recursive` when no explicit bound is given.
pub const RECURSIVE_MAX_DEPTH: usize = 5000;

/// Default listen address.
pub const DEFAULT_LISTEN: &str = "localhost:8080";

/// Configuration for one debserver process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory to index and serve.
    pub folder: PathBuf,

    /// Address the HTTP server binds to.
    pub listen: String,

    /// Re-index when the folder changes.
    pub watch: bool,

    /// Deepest level below `folder` searched for packages.
    pub max_depth: usize,

    /// Logging settings.
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("."),
            listen: DEFAULT_LISTEN.to_string(),
            watch: false,
            max_depth: 1,
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DebserverError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Check that the configuration can be run.
    pub fn validate(&self) -> Result<()> {
        if self.listen.trim().is_empty() {
            return Err(DebserverError::config("listen address must not be empty"));
        }
        if self.max_depth == 0 {
            return Err(DebserverError::config("max_depth must be at least 1"));
        }
        if !self.folder.is_dir() {
            return Err(DebserverError::config(format!(
                "{} is not a directory",
                self.folder.display()
            )));
        }
        Ok(())
    }

    /// Whether packages below the top level of `folder` are indexed.
    pub fn is_recursive(&self) -> bool {
        self.max_depth > 1
    }
}
