//! Error types for multi-angle QAOA.

use thiserror::Error;

use maqaoa_hal::HalError;
use maqaoa_ir::IrError;

/// Errors raised while building, evaluating or optimizing an ansatz.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QaoaError {
    /// Angle lengths, layer count, graph shape or option values are wrong.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The estimator received no samples.
    #[error("Empty distribution: no samples to estimate from")]
    EmptyDistribution,

    /// A bitstring or weight in the distribution is unusable.
    #[error("Malformed distribution: {0}")]
    MalformedDistribution(String),

    /// The executor failed to validate or run a circuit.
    #[error("Execution failure: {0}")]
    ExecutionFailure(#[from] HalError),

    /// Circuit construction or binding failed.
    #[error("Circuit error: {0}")]
    Ir(#[from] IrError),

    /// The minimizer could not be set up or aborted.
    #[error("Optimizer error: {0}")]
    Optimizer(String),
}

/// Result type for multi-angle QAOA operations.
pub type QaoaResult<T> = Result<T, QaoaError>;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// The configuration file is not valid YAML for this schema.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml_ng::Error),

    /// A value is outside its accepted range.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}
