//! Error types for packstage
//!
//! All modules use `StageResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for packstage operations
pub type StageResult<T> = Result<T, StageError>;

/// All errors that can occur while staging buildpacks
#[derive(Error, Debug)]
pub enum StageError {
    // Transport errors
    #[error("Failed to fetch {reference}: {reason}")]
    Fetch { reference: String, reason: String },

    #[error("Unsupported reference scheme for {0}")]
    UnsupportedReference(String),

    // Cache errors
    #[error("Cache entry {} is not a directory", .0.display())]
    CacheInconsistent(PathBuf),

    // Extraction errors
    #[error("Failed to extract {reference} into {}: {source}", .path.display())]
    Extract {
        reference: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Descriptor errors
    #[error("Buildpack descriptor not found: {}", .0.display())]
    DescriptorMissing(PathBuf),

    #[error("Invalid buildpack descriptor {}: {reason}", .path.display())]
    DescriptorInvalid { path: PathBuf, reason: String },

    // Archive errors
    #[error("Failed to archive {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Order file errors
    #[error("Failed to write order file {}: {source}", .path.display())]
    OrderWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

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

impl StageError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a transport error for a reference
    pub fn fetch(reference: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            reference: reference.into(),
            reason: reason.to_string(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::CacheInconsistent(_) => {
                Some("Remove the offending path from the cache directory and rerun")
            }
            Self::UnsupportedReference(_) => {
                Some("Use a local path, a file:// URI, or an http(s):// URL")
            }
            Self::DescriptorMissing(_) => {
                Some("A buildpack bundle must contain buildpack.toml at its root")
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
        let err = StageError::CacheInconsistent(PathBuf::from("/cache/0123456789abcdef"));
        assert_eq!(
            err.to_string(),
            "Cache entry /cache/0123456789abcdef is not a directory"
        );
    }

    #[test]
    fn fetch_error_names_reference() {
        let err = StageError::fetch("https://example.com/bp.tgz", "404 Not Found");
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/bp.tgz"));
        assert!(msg.contains("404"));
    }

    #[test]
    fn error_hint() {
        let err = StageError::CacheInconsistent(PathBuf::from("/x"));
        assert!(err.hint().is_some());
        assert_eq!(StageError::Internal("x".into()).hint(), None);
    }
}
