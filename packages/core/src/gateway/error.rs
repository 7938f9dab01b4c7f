//! Gateway Error Types
//!
//! Error vocabulary spoken by persistence gateway implementations. The
//! gateway trait itself returns `anyhow::Result` so backends can attach
//! context freely; these variants are what the bundled in-memory backend
//! reports through that channel.

use thiserror::Error;

/// Persistence backend errors
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Referenced record does not exist
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Operation conflicts with stored state
    #[error("Constraint violated: {0}")]
    Conflict(String),

    /// Backend infrastructure failure
    #[error("Backend failure: {0}")]
    Backend(String),
}

impl GatewayError {
    /// Create a not-found error
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a backend failure error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
