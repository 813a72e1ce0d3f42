//! Errors raised by storage adapters.

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors that can occur inside a storage adapter.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to serialize {entity}: {reason}")]
    SerializationFailed { entity: String, reason: String },

    #[error("Failed to deserialize {entity}: {reason}")]
    DeserializationFailed { entity: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store lock poisoned: {0}")]
    LockPoisoned(String),
}

impl StorageError {
    pub fn serialization(entity: impl Into<String>, reason: impl ToString) -> Self {
        Self::SerializationFailed {
            entity: entity.into(),
            reason: reason.to_string(),
        }
    }

    pub fn deserialization(entity: impl Into<String>, reason: impl ToString) -> Self {
        Self::DeserializationFailed {
            entity: entity.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        DomainError::new(ErrorCode::StorageError, err.to_string())
    }
}
