//! Persistence error types.
//!
//! Backend and codec failures carry enough context for a log line, plus
//! user-facing wording for front ends that want to show them.

use std::path::PathBuf;
use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backend refused or could not service the request.
    #[error("Storage backend unavailable for key {key}: {reason}")]
    Backend { key: String, reason: String },

    /// Key cannot be mapped onto the backend's namespace.
    #[error("Invalid storage key: {key:?}")]
    InvalidKey { key: String },

    /// Serialization error.
    #[error("Failed to serialize reader state")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Stored value exists but does not decode into a reader state.
    #[error("Failed to deserialize reader state stored under {key}")]
    Deserialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A background persistence task panicked or was cancelled.
    #[error("Persistence task did not complete")]
    TaskFailed {
        #[source]
        source: tokio::task::JoinError,
    },
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::Backend { .. } => "Your library could not be reached right now.".to_string(),
            Self::InvalidKey { key } => format!("'{key}' cannot be used as a storage key."),
            Self::Serialization { .. } => {
                "An error occurred while saving your library.".to_string()
            }
            Self::Deserialization { .. } => {
                "Your saved library could not be read and was reset to the defaults.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::TaskFailed { .. } => "A background save was interrupted.".to_string(),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the data directory exists and is readable.".into())
                } else {
                    Some("Check that you have permission to write to the data directory.".into())
                }
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or choose a different data directory.".into())
            }
            Self::InvalidKey { .. } => {
                Some("Use only letters, digits, '-' and '_' in storage keys.".into())
            }
            Self::Backend { .. }
            | Self::Serialization { .. }
            | Self::Deserialization { .. }
            | Self::TaskFailed { .. } => None,
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_and_write_io_errors_suggest_different_fixes() {
        let read = PersistenceError::Io {
            operation: "read",
            path: PathBuf::from("/data/state.json"),
            source: std::io::Error::other("boom"),
        };
        let write = PersistenceError::Io {
            operation: "write",
            path: PathBuf::from("/data/state.json"),
            source: std::io::Error::other("boom"),
        };
        assert!(read.user_message().contains("/data/state.json"));
        assert_ne!(read.suggestion(), write.suggestion());
    }

    #[test]
    fn backend_error_has_no_suggestion() {
        let error = PersistenceError::Backend {
            key: "k".to_string(),
            reason: "offline".to_string(),
        };
        assert!(error.suggestion().is_none());
        assert!(error.to_string().contains("offline"));
    }
}
