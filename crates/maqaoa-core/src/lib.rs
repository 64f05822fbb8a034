//! Multi-Angle QAOA for MaxCut
//!
//! Builds layered QAOA circuits in which every node and every edge carries
//! its own angle per layer, estimates the expected cut from sampled
//! bitstrings and tunes the angles with a classical minimizer.
//!
//! # Pipeline
//!
//! ```text
//! OptimizationDriver ─▶ Minimizer ─▶ Objective ─▶ CircuitTemplate::bind
//!                                        │
//!                                        ├─▶ Executor::execute (Counts)
//!                                        └─▶ energy::estimate ─▶ -cut
//! ```
//!
//! - [`graph`]: [`MaxCutGraph`], the only graph type the builder accepts
//! - [`catalog`]: sixteen fixed instances selectable by index
//! - [`ansatz`]: [`AngleInit`], [`build`](ansatz::build), [`CircuitTemplate`], [`MaQaoa`]
//! - [`energy`]: expected cut over a bitstring distribution
//! - [`objective`]: [`Objective`], negated expected cut for minimization
//! - [`minimizer`]: COBYLA, Nelder-Mead, L-BFGS and SPSA
//! - [`driver`]: [`OptimizationDriver`]
//! - [`config`]: [`QaoaConfig`] from YAML and `MAQAOA_*` variables
//! - [`diagnostics`]: [`AnsatzReport`]
//!
//! # Example
//!
//! ```rust
//! use maqaoa_adapter_sim::SimulatorBackend;
//! use maqaoa_core::{catalog, AngleInit, MaQaoa, Method, OptimizationDriver};
//!
//! let graph = catalog::instance(0)?;
//! let qaoa = MaQaoa::new(graph, 1, AngleInit::seeded(121), true)?;
//!
//! let mut backend = SimulatorBackend::with_seed(121);
//! let mut driver = OptimizationDriver::new(Method::Cobyla, Some(121))
//!     .with_maxiter(10)
//!     .with_shots(256);
//! let outcome = driver.optimize(&qaoa, &mut backend)?;
//!
//! assert!(outcome.best_value >= outcome.initial_value);
//! assert_eq!(outcome.betas.len(), 4);
//! assert_eq!(outcome.gammas.len(), 4);
//! # Ok::<(), maqaoa_core::QaoaError>(())
//! ```

pub mod ansatz;
pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod energy;
pub mod error;
pub mod graph;
pub mod minimizer;
pub mod objective;

pub use ansatz::{AngleInit, CircuitTemplate, MaQaoa};
pub use config::QaoaConfig;
pub use diagnostics::AnsatzReport;
pub use driver::{OptimizationDriver, OptimizationOutcome, SampledCut};
pub use energy::{BitOrder, OutcomeDistribution, estimate, estimate_with};
pub use error::{ConfigError, QaoaError, QaoaResult};
pub use graph::MaxCutGraph;
pub use minimizer::{IterationReport, Method, Minimizer, OptimizationResult};
pub use objective::Objective;
