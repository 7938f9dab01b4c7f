//! Engine Error Types
//!
//! Typed failures for spatial store operations. Every persistence-touching
//! operation maps gateway failures into one of these variants and mirrors
//! the message into the store's `last_error` field before returning, so
//! presentation code can either match on the variant or poll the field.

use thiserror::Error;

/// Spatial store operation errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// A read from the persistence gateway failed
    #[error("Failed to load {what}: {source}")]
    LoadFailed {
        what: String,
        #[source]
        source: anyhow::Error,
    },

    /// A create/update/delete write failed
    #[error("Failed to write {what}: {source}")]
    WriteFailed {
        what: String,
        #[source]
        source: anyhow::Error,
    },

    /// The batch geometry flush failed; the dirty set is left intact
    #[error("Failed to save note layout: {0}")]
    BatchSaveFailed(#[source] anyhow::Error),

    /// A cross-board note transfer failed
    #[error("Failed to move note {note_id}: {source}")]
    TransferFailed {
        note_id: String,
        #[source]
        source: anyhow::Error,
    },

    /// The operation's precondition does not hold (e.g. no active board)
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),
}

impl StoreError {
    /// Create a load failure with context
    pub fn load_failed(what: impl Into<String>, source: anyhow::Error) -> Self {
        Self::LoadFailed {
            what: what.into(),
            source,
        }
    }

    /// Create a write failure with context
    pub fn write_failed(what: impl Into<String>, source: anyhow::Error) -> Self {
        Self::WriteFailed {
            what: what.into(),
            source,
        }
    }

    /// Create a transfer failure for a note
    pub fn transfer_failed(note_id: impl Into<String>, source: anyhow::Error) -> Self {
        Self::TransferFailed {
            note_id: note_id.into(),
            source,
        }
    }

    /// Create a precondition violation
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::PreconditionViolation(msg.into())
    }
}
