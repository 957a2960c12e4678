//! CB-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, CleanError>;

/// Top-level error type for the artifact cleaner.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("[CB-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[CB-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[CB-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[CB-1004] invalid artifact pattern {pattern:?}: {details}")]
    InvalidPattern { pattern: String, details: String },

    #[error("[CB-2001] target directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("[CB-2002] failed to list {path}: {source}")]
    Listing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[CB-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[CB-3001] permission denied for {path}")]
    PermissionDenied { path: PathBuf },

    #[error("[CB-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CleanError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "CB-1001",
            Self::MissingConfig { .. } => "CB-1002",
            Self::ConfigParse { .. } => "CB-1003",
            Self::InvalidPattern { .. } => "CB-1004",
            Self::DirectoryNotFound { .. } => "CB-2001",
            Self::Listing { .. } => "CB-2002",
            Self::Serialization { .. } => "CB-2101",
            Self::PermissionDenied { .. } => "CB-3001",
            Self::Io { .. } => "CB-3002",
        }
    }

    /// Convenience constructor for IO errors with a known path.
    ///
    /// Permission failures are lifted into [`CleanError::PermissionDenied`].
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            return Self::PermissionDenied { path };
        }
        Self::Io { path, source }
    }

    /// Error raised when a directory cannot be listed.
    #[must_use]
    pub fn listing(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::DirectoryNotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Listing { path, source },
        }
    }
}

impl From<serde_json::Error> for CleanError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for CleanError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
