//! Error handling module for partplan
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Session state machine errors live in `session::SessionError` and convert
//! into `PartPlanError` at the crate boundary.

use crate::session::SessionError;
use thiserror::Error;

/// Main error type for partplan
#[derive(Error, Debug)]
pub enum PartPlanError {
    /// IO errors (terminal, spawning commands, files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Device enumeration failed; the session cannot start
    #[error("Device enumeration failed: {0}")]
    Enumeration(String),

    /// Plan session rejected an operation
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Result type alias for partplan operations
pub type Result<T> = std::result::Result<T, PartPlanError>;

impl PartPlanError {
    /// Create a device enumeration error
    pub fn enumeration(msg: impl Into<String>) -> Self {
        Self::Enumeration(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }
}
