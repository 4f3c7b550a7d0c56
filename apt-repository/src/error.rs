//! Error types for the APT repository library.

use std::path::PathBuf;

/// Result type for APT repository operations.
pub type Result<T> = std::result::Result<T, AptRepositoryError>;

/// Errors that can occur when indexing packages.
#[derive(Debug, thiserror::Error)]
pub enum AptRepositoryError {
    /// I/O error occurred during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading or decoding a package archive failed.
    #[error("Failed to read {}: {source}", .path.display())]
    Archive {
        /// The archive being read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The archive has no `control.tar*` member.
    #[error("control file not found in {}", .0.display())]
    ControlNotFound(PathBuf),

    /// The control member uses a compression we do not know about.
    #[error("unsupported control archive format: {0}")]
    UnsupportedControlFormat(String),

    /// Walking the package directory failed.
    #[error("Directory traversal failed: {0}")]
    Walk(#[from] walkdir::Error),
}

impl AptRepositoryError {
    /// Attach an archive path to an I/O error.
    pub fn archive<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Archive {
            path: path.into(),
            source,
        }
    }

    /// Attach an archive path to a bare I/O error, leaving other errors alone.
    pub fn in_archive<P: Into<PathBuf>>(self, path: P) -> Self {
        match self {
            Self::Io(source) => Self::archive(path, source),
            other => other,
        }
    }

    /// Create a new missing control member error.
    pub fn control_not_found<P: Into<PathBuf>>(path: P) -> Self {
        Self::ControlNotFound(path.into())
    }

    /// Create a new unsupported control format error.
    pub fn unsupported_control<S: Into<String>>(name: S) -> Self {
        Self::UnsupportedControlFormat(name.into())
    }
}

/// A scan that stopped at the first error.
///
/// `indexed` is the number of packages written to the sink before the
/// failure; their stanzas are already in the output.
#[derive(Debug, thiserror::Error)]
#[error("indexing stopped after {indexed} package(s): {source}")]
pub struct ScanError {
    /// Packages successfully indexed before the failure.
    pub indexed: usize,
    /// The error that aborted the scan.
    #[source]
    pub source: AptRepositoryError,
}

impl ScanError {
    /// Create a new scan error.
    pub fn new<E: Into<AptRepositoryError>>(indexed: usize, source: E) -> Self {
        Self {
            indexed,
            source: source.into(),
        }
    }
}
