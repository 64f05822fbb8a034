//! Circuit Intermediate Representation
//!
//! Core data structures for describing the parameterized circuits built by
//! the multi-angle QAOA ansatz and consumed by executors.
//!
//! # Overview
//!
//! Circuits are stored as a DAG (Directed Acyclic Graph) of instructions over
//! qubit and classical wires. The high-level [`Circuit`] API wraps the DAG
//! with a fluent builder, and a [`ParameterVector`] provides the named,
//! positionally indexed symbols that a template is later bound against.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`]
//! - **Gates**: [`StandardGate`]
//! - **Parameters**: [`ParameterExpression`] and [`ParameterVector`]
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **DAG**: [`CircuitDag`] for the internal graph representation
//! - **Circuit**: [`Circuit`] high-level builder API
//!
//! # Example: Binding a Parameterized Circuit
//!
//! ```rust
//! use maqaoa_ir::{Circuit, ParameterVector, QubitId};
//!
//! let params = ParameterVector::new("params", 2);
//! let mut circuit = Circuit::with_size("template", 1, 1);
//! circuit
//!     .h(QubitId(0))?
//!     .rx(params.get(0)?, QubitId(0))?
//!     .rz(params.get(1)?, QubitId(0))?
//!     .measure_all()?;
//!
//! assert_eq!(circuit.num_parameters(), 2);
//!
//! let bound = circuit.assign_parameters(&params, &[0.25, 0.5])?;
//! assert!(!bound.is_parameterized());
//! # Ok::<(), maqaoa_ir::IrError>(())
//! ```
//!
//! # Gates
//!
//! | Gate | Qubits | Role |
//! |------|--------|------|
//! | `H` | 1 | Uniform superposition |
//! | `X` | 1 | Basis-state preparation in tests |
//! | `Rx` | 1 | Mixer rotation |
//! | `Rz` | 1 | Edge phase inside a `cx` ladder |
//! | `CX` | 2 | Parity ladder |
//! | `RZZ` | 2 | Native form of the edge phase |

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use parameter::{ParameterExpression, ParameterVector};
pub use qubit::{ClbitId, QubitId};
