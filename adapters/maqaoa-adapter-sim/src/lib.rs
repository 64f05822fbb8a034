//! Local statevector executor.
//!
//! [`SimulatorBackend`] evolves the full statevector of a bound circuit
//! once per execution and samples measurement outcomes from the exact
//! probabilities with a seeded [`rand::rngs::StdRng`]. It is the default
//! executor for multi-angle QAOA runs.
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//!
//! # Example
//!
//! ```
//! use maqaoa_adapter_sim::SimulatorBackend;
//! use maqaoa_hal::Executor;
//! use maqaoa_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2, 2);
//! circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
//! circuit.measure_all()?;
//!
//! let mut backend = SimulatorBackend::with_seed(42);
//! let result = backend.execute(&circuit, 1000)?;
//! assert_eq!(result.counts.get("00") + result.counts.get("11"), 1000);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod simulator;
mod statevector;

pub use simulator::SimulatorBackend;
