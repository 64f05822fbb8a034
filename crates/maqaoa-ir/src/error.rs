//! IR errors.

use thiserror::Error;

use crate::qubit::{ClbitId, QubitId};

/// Failures while building or binding a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// An operand names a qubit the circuit does not have.
    #[error("{op}: qubit {qubit} is not part of the circuit")]
    UnknownQubit { op: &'static str, qubit: QubitId },

    /// An operand names a classical bit the circuit does not have.
    #[error("{op}: classical bit {clbit} is not part of the circuit")]
    UnknownClbit { op: &'static str, clbit: ClbitId },

    /// The same qubit appears twice in one operation.
    #[error("{op}: qubit {qubit} used more than once")]
    RepeatedQubit { op: &'static str, qubit: QubitId },

    /// Wrong number of qubit operands for a gate.
    #[error("{op} acts on {expected} qubit(s), got {got}")]
    Arity {
        op: &'static str,
        expected: u32,
        got: u32,
    },

    /// The operation graph is not acyclic.
    #[error("operation graph contains a cycle")]
    Cycle,

    /// A symbol survived binding.
    #[error("parameter '{0}' is unbound")]
    UnboundParameter(String),

    /// Slot past the end of a parameter vector.
    #[error("{name}[{index}] is out of range for a vector of length {len}")]
    ParameterIndexOutOfRange {
        name: String,
        index: usize,
        len: usize,
    },

    /// Value count differs from the parameter vector length.
    #[error("'{name}' takes {expected} values, got {got}")]
    ParameterCountMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    /// NaN or infinite angle.
    #[error("non-finite value {value} for '{symbol}'")]
    NonFiniteValue { symbol: String, value: f64 },

    /// Wire index past `u32::MAX`.
    #[error("wire index {0} does not fit in 32 bits")]
    IdOverflow(usize),
}

/// Result alias for IR operations.
pub type IrResult<T> = Result<T, IrError>;
