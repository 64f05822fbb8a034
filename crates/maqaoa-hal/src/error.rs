//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur while validating or executing a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Executor is not available.
    #[error("Executor not available: {0}")]
    Unavailable(String),

    /// Invalid circuit.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Circuit exceeds executor capabilities.
    #[error("Circuit exceeds executor capabilities: {0}")]
    CircuitTooLarge(String),

    /// Unsupported feature.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Invalid number of shots.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Circuit IR error raised during execution.
    #[error("Circuit error: {0}")]
    Ir(#[from] maqaoa_ir::IrError),

    /// Generic executor error.
    #[error("Executor error: {0}")]
    Backend(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
