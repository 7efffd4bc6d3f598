//! Error types raised by storage implementations.

use super::RecordKey;
use thiserror::Error;

/// Errors surfaced by storage implementations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{0} not found")]
    NotFound(RecordKey),

    #[error("{0} already exists")]
    AlreadyExists(RecordKey),

    #[error("version conflict on {key}: expected {expected}, found {}", describe(Option::as_ref(.found)))]
    Conflict {
        key: RecordKey,
        expected: u64,
        found: Option<u64>,
    },

    #[error("batch writes {0} more than once")]
    DuplicateWrite(RecordKey),

    #[error("storage lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    /// Whether the failure came from a competing writer rather than a fault
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. } | Self::AlreadyExists(_))
    }
}

fn describe(version: Option<&u64>) -> String {
    version.map_or_else(|| "no record".to_string(), ToString::to_string)
}

pub type Result<T> = std::result::Result<T, StorageError>;
