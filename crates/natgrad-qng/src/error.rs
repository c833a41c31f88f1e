//! Error types for the natural-gradient crate.

use thiserror::Error;

/// Errors produced while layering a circuit or driving a gradient strategy.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QngError {
    /// The input circuit cannot be layered (e.g. it declares no variables).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The layering engine broke one of its own invariants.
    ///
    /// This is a defect in the engine, never a problem with the input.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Strategy options could not be loaded or failed validation.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Measurement results do not line up with the layers they claim to cover.
    #[error("Result mismatch: {0}")]
    ResultMismatch(String),

    /// Circuit model error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] natgrad_ir::IrError),
}

impl QngError {
    /// Check if this error signals an engine defect.
    pub fn is_internal(&self) -> bool {
        matches!(self, QngError::Internal(_))
    }
}

/// Result type for natural-gradient operations.
pub type QngResult<T> = Result<T, QngError>;
