//! Circuit executor abstraction for multi-angle QAOA.
//!
//! This crate defines the seam between circuit construction and circuit
//! execution:
//! - the synchronous [`Executor`] trait,
//! - [`Capabilities`] describing what an executor accepts,
//! - [`Counts`] and [`ExecutionResult`] for measurement histograms.
//!
//! # Readout convention
//!
//! Count keys are strings over `{'0', '1'}` of length equal to the
//! circuit's classical register, with classical bit 0 as the
//! **rightmost** character. Consumers that index bits by qubit must
//! reverse the string.
//!
//! # Implementing an Executor
//!
//! ```ignore
//! use maqaoa_hal::{Capabilities, Executor, ExecutionResult, HalResult};
//! use maqaoa_ir::Circuit;
//!
//! struct MyExecutor {
//!     capabilities: Capabilities,
//! }
//!
//! impl Executor for MyExecutor {
//!     fn name(&self) -> &str { "my_executor" }
//!
//!     fn capabilities(&self) -> &Capabilities {
//!         &self.capabilities
//!     }
//!
//!     fn validate(&self, circuit: &Circuit) -> HalResult<()> {
//!         Ok(())
//!     }
//!
//!     fn execute(&mut self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
//!         // Run the circuit
//!         # todo!()
//!     }
//! }
//! ```

pub mod capability;
pub mod error;
pub mod executor;
pub mod result;

pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use executor::{Executor, ExecutorConfig, ExecutorFactory};
pub use result::{Counts, ExecutionResult};
