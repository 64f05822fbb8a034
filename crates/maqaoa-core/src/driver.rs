//! Optimization driver.
//!
//! Runs a [`Minimizer`](crate::minimizer::Minimizer) over the [`Objective`] of a [`MaQaoa`] instance,
//! starting from its flat initial point, and reports the best angles with
//! the cut value restored to its maximized sign.

use tracing::{debug, info};

use maqaoa_hal::Executor;

use crate::ansatz::MaQaoa;
use crate::energy::{self, BitOrder};
use crate::error::{QaoaError, QaoaResult};
use crate::minimizer::{IterationReport, Method};
use crate::objective::{DEFAULT_SHOTS, Objective};

/// Outcomes below this share of the shots are ignored by [`OptimizationDriver::sample_best_cut`].
pub const SAMPLE_THRESHOLD: f64 = 0.01;

/// Result of one driver run.
#[derive(Debug, Clone)]
pub struct OptimizationOutcome {
    /// Method used.
    pub method: Method,
    /// Best flat angle vector found.
    pub best_angles: Vec<f64>,
    /// Expected cut at `best_angles`.
    pub best_value: f64,
    /// Mixer angles of `best_angles`.
    pub betas: Vec<f64>,
    /// Cost angles of `best_angles`.
    pub gammas: Vec<f64>,
    /// Expected cut at the initial point.
    pub initial_value: f64,
    /// Objective evaluations, including the initial one.
    pub evaluations: usize,
    /// Minimizer iterations.
    pub iterations: usize,
    /// Whether the minimizer met its tolerance.
    pub converged: bool,
    /// Best expected cut after each iteration.
    pub history: Vec<f64>,
}

/// Best assignment observed when sampling at fixed angles.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledCut {
    /// Readout bitstring as reported by the executor.
    pub bitstring: String,
    /// Assignment with bit i holding node i.
    pub assignment: usize,
    /// Cut value of the assignment.
    pub cut_value: f64,
    /// Times the bitstring was observed.
    pub count: u64,
    /// Total shots taken.
    pub shots: u64,
}

/// Drives a minimizer over the multi-angle objective.
#[derive(Debug, Clone)]
pub struct OptimizationDriver {
    method: Method,
    seed: Option<u64>,
    maxiter: usize,
    tol: f64,
    shots: u32,
    order: BitOrder,
    iterations: usize,
}

impl OptimizationDriver {
    /// Create a driver for `method`. `seed` feeds stochastic minimizers.
    pub fn new(method: Method, seed: Option<u64>) -> Self {
        Self {
            method,
            seed,
            maxiter: 100,
            tol: 1e-6,
            shots: DEFAULT_SHOTS,
            order: BitOrder::Readout,
            iterations: 0,
        }
    }

    /// Set the minimizer iteration cap.
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    /// Set the minimizer tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the shot count per evaluation.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Set how bitstrings map to nodes.
    pub fn with_bit_order(mut self, order: BitOrder) -> Self {
        self.order = order;
        self
    }

    /// Method in use.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Iterations counted during the most recent run.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Optimize from the instance's current angles.
    pub fn optimize<E: Executor>(
        &mut self,
        ansatz: &MaQaoa,
        executor: E,
    ) -> QaoaResult<OptimizationOutcome> {
        self.optimize_from(ansatz, executor, &ansatz.initial_point(), &mut |_| {})
    }

    /// Optimize from `initial`, reporting each iteration to `on_iteration`.
    ///
    /// The initial point is evaluated first and kept as a candidate, so the
    /// returned `best_value` is never below `initial_value`.
    pub fn optimize_from<E: Executor>(
        &mut self,
        ansatz: &MaQaoa,
        executor: E,
        initial: &[f64],
        on_iteration: &mut dyn FnMut(&IterationReport),
    ) -> QaoaResult<OptimizationOutcome> {
        let mut objective = Objective::new(ansatz, executor)?
            .with_shots(self.shots)
            .with_bit_order(self.order);

        let initial_min = objective.evaluate(initial)?;
        let minimizer = self.method.minimizer(self.maxiter, self.tol, self.seed);
        info!(
            method = minimizer.name(),
            parameters = initial.len(),
            initial_value = -initial_min,
            "starting optimization"
        );

        self.iterations = 0;
        let iterations = &mut self.iterations;
        let mut best_cut = -initial_min;
        let mut history = Vec::new();

        let result = minimizer.minimize(
            &mut |angles: &[f64]| objective.evaluate(angles),
            initial,
            &mut |report: &IterationReport| {
                *iterations += 1;
                best_cut = best_cut.max(-report.value);
                history.push(best_cut);
                debug!(iteration = *iterations, value = -report.value, best = best_cut, "iteration");
                on_iteration(report);
            },
        )?;

        let (best_angles, best_min) = if result.optimal_value <= initial_min {
            (result.optimal_params, result.optimal_value)
        } else {
            (initial.to_vec(), initial_min)
        };
        let (betas, gammas) = ansatz.split_point(&best_angles)?;

        info!(
            best_value = -best_min,
            evaluations = result.num_evaluations + 1,
            iterations = self.iterations,
            converged = result.converged,
            "optimization finished"
        );

        Ok(OptimizationOutcome {
            method: self.method,
            best_angles,
            best_value: -best_min,
            betas,
            gammas,
            initial_value: -initial_min,
            evaluations: result.num_evaluations + 1,
            iterations: self.iterations,
            converged: result.converged,
            history,
        })
    }

    /// Execute the circuit at `angles` once and return the best-cut
    /// outcome among those observed in at least [`SAMPLE_THRESHOLD`] of
    /// the shots. Falls back to the most frequent outcome.
    pub fn sample_best_cut<E: Executor>(
        &self,
        ansatz: &MaQaoa,
        executor: E,
        angles: &[f64],
    ) -> QaoaResult<SampledCut> {
        let mut objective = Objective::new(ansatz, executor)?.with_shots(self.shots);
        let counts = objective.distribution(angles)?;
        let shots = counts.total_shots();
        let graph = ansatz.graph();

        let mut best: Option<(&str, f64, u64)> = None;
        for (bitstring, count) in counts.sorted() {
            if (count as f64) < SAMPLE_THRESHOLD * shots as f64 {
                continue;
            }
            let cut = energy::cut_of(graph, bitstring, self.order)?;
            if best.is_none_or(|(_, best_cut, _)| cut > best_cut) {
                best = Some((bitstring, cut, count));
            }
        }
        let (bitstring, cut_value, count) = match best {
            Some(found) => found,
            None => {
                let (bitstring, count) = counts
                    .most_frequent()
                    .ok_or(QaoaError::EmptyDistribution)?;
                (bitstring, energy::cut_of(graph, bitstring, self.order)?, count)
            }
        };

        let assignment = energy::decode(bitstring, graph.num_nodes(), self.order)?
            .iter()
            .enumerate()
            .filter(|&(_, &in_s)| in_s)
            .fold(0usize, |acc, (i, _)| acc | (1 << i));

        Ok(SampledCut {
            bitstring: bitstring.to_string(),
            assignment,
            cut_value,
            count,
            shots,
        })
    }
}
