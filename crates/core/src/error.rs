//! Engine error model.
//!
//! Degenerate data (empty movement history, zero variance, zero cost) is
//! **not** an error: the engine degrades to documented fallback constants.
//! Errors are reserved for contract violations and collaborator failures.

use thiserror::Error;

/// Result type used across the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine-level error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// An input violated the engine contract (unknown item, negative
    /// quantity, non-positive horizon or lead time). Rejected synchronously;
    /// never corrupts partial batch state.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A downstream collaborator (e.g. procurement-request creation) failed.
    /// Recorded on the specific item's outcome; must not abort other items.
    #[error("collaborator failure: {0}")]
    Collaborator(String),

    /// The batch run was cancelled before this item was processed.
    #[error("run cancelled")]
    Cancelled,
}

impl EngineError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn collaborator(msg: impl Into<String>) -> Self {
        Self::Collaborator(msg.into())
    }
}
