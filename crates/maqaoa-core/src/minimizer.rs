//! Minimizers for the multi-angle objective.
//!
//! All minimizers work on a fallible objective: the first error it
//! returns aborts the run and is passed through unchanged. Non-finite
//! objective values abort with [`QaoaError::Optimizer`].
//!
//! COBYLA and SPSA are implemented here. Nelder-Mead and L-BFGS run on
//! `argmin`; their per-iteration reports are recorded by an observer and
//! replayed to the callback once the solver returns.

use std::cell::RefCell;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use argmin::core::observers::{Observe, ObserverMode};
use argmin::core::{CostFunction, Error as ArgminError, Gradient, State, TerminationReason, KV};
use argmin::solver::linesearch::MoreThuenteLineSearch;
use argmin::solver::neldermead::NelderMead as ArgminNelderMead;
use argmin::solver::quasinewton::LBFGS;
use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::error::{QaoaError, QaoaResult};

/// A fallible scalar objective over a flat parameter vector.
pub type ObjectiveFn<'a> = dyn FnMut(&[f64]) -> QaoaResult<f64> + 'a;

/// Progress report passed to the iteration callback.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationReport {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Best point known after this iteration.
    pub point: Vec<f64>,
    /// Objective value at `point`.
    pub value: f64,
}

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Best parameters seen over all evaluations.
    pub optimal_params: Vec<f64>,
    /// Objective value at `optimal_params`.
    pub optimal_value: f64,
    /// Number of objective evaluations.
    pub num_evaluations: usize,
    /// Number of iterations.
    pub num_iterations: usize,
    /// Best objective value after each iteration.
    pub history: Vec<f64>,
    /// Whether the stopping tolerance was met before the iteration cap.
    pub converged: bool,
}

/// A local minimizer.
pub trait Minimizer {
    /// Display name.
    fn name(&self) -> &'static str;

    /// Minimize `objective` starting from `initial`.
    ///
    /// `callback` is invoked once per iteration.
    fn minimize(
        &self,
        objective: &mut ObjectiveFn<'_>,
        initial: &[f64],
        callback: &mut dyn FnMut(&IterationReport),
    ) -> QaoaResult<OptimizationResult>;
}

/// Supported optimization methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Trust-region simplex search.
    Cobyla,
    /// Nelder-Mead simplex.
    NelderMead,
    /// Limited-memory BFGS with finite-difference gradients.
    Lbfgs,
    /// Simultaneous perturbation stochastic approximation.
    Spsa,
}

impl Method {
    /// Build a boxed minimizer for this method.
    pub fn minimizer(self, maxiter: usize, tol: f64, seed: Option<u64>) -> Box<dyn Minimizer> {
        match self {
            Method::Cobyla => Box::new(Cobyla::new().with_maxiter(maxiter).with_tol(tol)),
            Method::NelderMead => Box::new(NelderMead::new().with_maxiter(maxiter).with_tol(tol)),
            Method::Lbfgs => Box::new(Lbfgs::new().with_maxiter(maxiter).with_tol(tol)),
            Method::Spsa => Box::new(
                Spsa::new()
                    .with_maxiter(maxiter)
                    .with_tol(tol)
                    .with_seed(seed),
            ),
        }
    }
}

impl FromStr for Method {
    type Err = QaoaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "COBYLA" => Ok(Method::Cobyla),
            "NELDER-MEAD" | "NELDER_MEAD" | "NELDERMEAD" => Ok(Method::NelderMead),
            // Without constraints SLSQP is a quasi-Newton line search.
            "BFGS" | "L-BFGS" | "L-BFGS-B" | "LBFGS" | "SLSQP" => Ok(Method::Lbfgs),
            "SPSA" => Ok(Method::Spsa),
            _ => Err(QaoaError::InvalidParameters(format!(
                "unknown optimization method '{s}'"
            ))),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Cobyla => "COBYLA",
            Method::NelderMead => "Nelder-Mead",
            Method::Lbfgs => "L-BFGS",
            Method::Spsa => "SPSA",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Evaluation bookkeeping
// =============================================================================

/// Counts evaluations, rejects non-finite values and keeps the best point.
struct Tracked<'o, 'f> {
    objective: &'o mut ObjectiveFn<'f>,
    evaluations: usize,
    best: Option<(Vec<f64>, f64)>,
}

impl<'o, 'f> Tracked<'o, 'f> {
    fn new(objective: &'o mut ObjectiveFn<'f>) -> Self {
        Self {
            objective,
            evaluations: 0,
            best: None,
        }
    }

    fn eval(&mut self, x: &[f64]) -> QaoaResult<f64> {
        let value = (self.objective)(x)?;
        self.evaluations += 1;
        if !value.is_finite() {
            return Err(QaoaError::Optimizer(format!(
                "objective returned non-finite value {value}"
            )));
        }
        trace!(evaluation = self.evaluations, value, "objective evaluated");
        if self.best.as_ref().is_none_or(|(_, best)| value < *best) {
            self.best = Some((x.to_vec(), value));
        }
        Ok(value)
    }

    fn finish(
        self,
        num_iterations: usize,
        history: Vec<f64>,
        converged: bool,
    ) -> QaoaResult<OptimizationResult> {
        let (optimal_params, optimal_value) = self
            .best
            .ok_or_else(|| QaoaError::Optimizer("no objective evaluations were made".into()))?;
        Ok(OptimizationResult {
            optimal_params,
            optimal_value,
            num_evaluations: self.evaluations,
            num_iterations,
            history,
            converged,
        })
    }
}

fn check_initial(initial: &[f64]) -> QaoaResult<usize> {
    if initial.is_empty() {
        return Err(QaoaError::InvalidParameters(
            "initial point must not be empty".into(),
        ));
    }
    if let Some(v) = initial.iter().find(|v| !v.is_finite()) {
        return Err(QaoaError::InvalidParameters(format!(
            "initial point contains non-finite value {v}"
        )));
    }
    Ok(initial.len())
}

// =============================================================================
// COBYLA
// =============================================================================

/// Linear-model trust-region minimizer.
///
/// Keeps `n + 1` interpolation points, fits the affine model through them
/// and steps a distance `rho` along its steepest descent. A step that
/// achieves less than a tenth of the predicted decrease halves `rho` and
/// rebuilds the points around the best one. The run converges once a step
/// fails at `rho == rhoend`. This is the unconstrained case of Powell's
/// COBYLA; `rho` never grows.
#[derive(Debug, Clone)]
pub struct Cobyla {
    pub maxiter: usize,
    /// Predicted decrease below which a step is not attempted.
    pub tol: f64,
    /// Starting trust radius, also the spacing of the first points.
    pub rhobeg: f64,
    /// Smallest trust radius.
    pub rhoend: f64,
}

impl Default for Cobyla {
    fn default() -> Self {
        Self {
            maxiter: 100,
            tol: 1e-6,
            rhobeg: 0.5,
            rhoend: 1e-4,
        }
    }
}

impl Cobyla {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    #[must_use]
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    #[must_use]
    pub fn with_trust_region(mut self, rhobeg: f64, rhoend: f64) -> Self {
        self.rhobeg = rhobeg;
        self.rhoend = rhoend;
        self
    }

    /// Trial point and predicted decrease, or `None` if the model is
    /// degenerate or predicts less than `tol`.
    fn trial_step(&self, points: &Interpolation, rho: f64) -> Option<(Vec<f64>, f64)> {
        let slope = points.model_slope(rho)?;
        let norm = slope.iter().map(|g| g * g).sum::<f64>().sqrt();
        let predicted = rho * norm;
        if predicted <= self.tol {
            return None;
        }
        let origin = &points.points[points.best()];
        let trial = origin
            .iter()
            .zip(&slope)
            .map(|(x, g)| x - rho * g / norm)
            .collect();
        Some((trial, predicted))
    }
}

/// Interpolation points of the affine model.
struct Interpolation {
    points: Vec<Vec<f64>>,
    values: Vec<f64>,
}

impl Interpolation {
    /// `center` and `center + rho·e_i` for every coordinate.
    fn around(
        tracked: &mut Tracked<'_, '_>,
        center: &[f64],
        f_center: f64,
        rho: f64,
    ) -> QaoaResult<Self> {
        let mut points = vec![center.to_vec()];
        let mut values = vec![f_center];
        for i in 0..center.len() {
            let mut point = center.to_vec();
            point[i] += rho;
            values.push(tracked.eval(&point)?);
            points.push(point);
        }
        Ok(Self { points, values })
    }

    fn best(&self) -> usize {
        self.extreme(|a, b| a.total_cmp(b))
    }

    fn worst(&self) -> usize {
        self.extreme(|a, b| b.total_cmp(a))
    }

    fn extreme(&self, order: impl Fn(&f64, &f64) -> std::cmp::Ordering) -> usize {
        (0..self.values.len())
            .min_by(|&i, &j| order(&self.values[i], &self.values[j]))
            .unwrap_or(0)
    }

    /// Gradient of the affine interpolant, solving
    /// `(x_j - x_b) · g = f_j - f_b` for every point `j` other than the best.
    fn model_slope(&self, rho: f64) -> Option<Vec<f64>> {
        let b = self.best();
        let (rows, rhs): (Vec<Vec<f64>>, Vec<f64>) = (0..self.points.len())
            .filter(|&j| j != b)
            .map(|j| {
                let row = self.points[j]
                    .iter()
                    .zip(&self.points[b])
                    .map(|(x, xb)| x - xb)
                    .collect();
                (row, self.values[j] - self.values[b])
            })
            .unzip();
        solve_linear(&rows, &rhs, 1e-8 * rho)
    }
}

/// LU solve with partial pivoting. `None` when a pivot is smaller than
/// `singular`.
fn solve_linear(rows: &[Vec<f64>], rhs: &[f64], singular: f64) -> Option<Vec<f64>> {
    let n = rhs.len();
    let lu = DMatrix::from_fn(n, n, |i, j| rows[i][j]).lu();
    if lu.u().diagonal().iter().any(|pivot| pivot.abs() < singular) {
        return None;
    }
    let x = lu.solve(&DVector::from_column_slice(rhs))?;
    Some(x.iter().copied().collect())
}

impl Minimizer for Cobyla {
    fn name(&self) -> &'static str {
        "COBYLA"
    }

    fn minimize(
        &self,
        objective: &mut ObjectiveFn<'_>,
        initial: &[f64],
        callback: &mut dyn FnMut(&IterationReport),
    ) -> QaoaResult<OptimizationResult> {
        check_initial(initial)?;
        let mut tracked = Tracked::new(objective);

        let f_initial = tracked.eval(initial)?;
        let mut rho = self.rhobeg;
        let mut points = Interpolation::around(&mut tracked, initial, f_initial, rho)?;

        let mut converged = false;
        let mut history = Vec::new();
        let mut num_iterations = 0;

        for iteration in 1..=self.maxiter {
            let f_best = points.values[points.best()];
            let accepted = match self.trial_step(&points, rho) {
                Some((trial, predicted)) => {
                    let f_trial = tracked.eval(&trial)?;
                    let worst = points.worst();
                    if f_trial < points.values[worst] {
                        points.points[worst] = trial;
                        points.values[worst] = f_trial;
                    }
                    (f_best - f_trial) >= 0.1 * predicted
                }
                None => false,
            };

            if !accepted {
                if rho <= self.rhoend {
                    converged = true;
                    break;
                }
                rho = (rho * 0.5).max(self.rhoend);
                let b = points.best();
                let center = points.points[b].clone();
                points = Interpolation::around(&mut tracked, &center, points.values[b], rho)?;
            }

            num_iterations = iteration;
            let b = points.best();
            trace!(iteration, rho, value = points.values[b], "cobyla step");
            history.push(points.values[b]);
            callback(&IterationReport {
                iteration,
                point: points.points[b].clone(),
                value: points.values[b],
            });
        }

        tracked.finish(num_iterations, history, converged)
    }
}

// =============================================================================
// SPSA
// =============================================================================

/// Simultaneous perturbation stochastic approximation.
///
/// Estimates the gradient from two evaluations per iteration along a
/// random ±1 direction. Gains follow `a / k^alpha` and `c / k^gamma`.
///
/// A single estimate can be zero by chance (equal values at both
/// perturbed points), so the run only stops early once `patience`
/// consecutive iterations fail to improve the value by more than `tol`.
#[derive(Debug, Clone)]
pub struct Spsa {
    /// Maximum number of iterations.
    pub maxiter: usize,
    /// Step size numerator.
    pub a: f64,
    /// Perturbation size numerator.
    pub c: f64,
    /// Step size decay exponent.
    pub alpha: f64,
    /// Perturbation decay exponent.
    pub gamma: f64,
    /// Improvement below which an iteration counts as stalled.
    pub tol: f64,
    /// Consecutive stalled iterations that end the run.
    pub patience: usize,
    /// Seed for the perturbation directions; `None` uses OS entropy.
    pub seed: Option<u64>,
}

impl Default for Spsa {
    fn default() -> Self {
        Self {
            maxiter: 100,
            a: 0.1,
            c: 0.1,
            alpha: 0.602,
            gamma: 0.101,
            tol: 1e-6,
            patience: 25,
            seed: None,
        }
    }
}

impl Spsa {
    /// Create a new SPSA minimizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum iterations.
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set how many stalled iterations end the run.
    pub fn with_patience(mut self, patience: usize) -> Self {
        self.patience = patience;
        self
    }

    /// Set the perturbation seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

impl Minimizer for Spsa {
    fn name(&self) -> &'static str {
        "SPSA"
    }

    fn minimize(
        &self,
        objective: &mut ObjectiveFn<'_>,
        initial: &[f64],
        callback: &mut dyn FnMut(&IterationReport),
    ) -> QaoaResult<OptimizationResult> {
        check_initial(initial)?;
        let mut tracked = Tracked::new(objective);
        let mut rng = self
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        let mut x = initial.to_vec();
        let mut reference = tracked.eval(&x)?;
        let mut stalled = 0;
        let mut history = Vec::with_capacity(self.maxiter);
        let mut num_iterations = 0;
        let mut converged = false;

        for k in 1..=self.maxiter {
            let a_k = self.a / (k as f64).powf(self.alpha);
            let c_k = self.c / (k as f64).powf(self.gamma);

            let delta: Vec<f64> = x
                .iter()
                .map(|_| if rng.gen_bool(0.5) { 1.0 } else { -1.0 })
                .collect();
            let x_plus: Vec<f64> = x.iter().zip(&delta).map(|(xi, di)| xi + c_k * di).collect();
            let x_minus: Vec<f64> = x.iter().zip(&delta).map(|(xi, di)| xi - c_k * di).collect();

            let f_plus = tracked.eval(&x_plus)?;
            let f_minus = tracked.eval(&x_minus)?;
            let slope = (f_plus - f_minus) / (2.0 * c_k);

            // With ±1 perturbations, 1/Δ_i = Δ_i.
            for (xi, di) in x.iter_mut().zip(&delta) {
                *xi -= a_k * slope * di;
            }

            let f_x = tracked.eval(&x)?;
            num_iterations = k;
            history.push(f_x);
            callback(&IterationReport {
                iteration: k,
                point: x.clone(),
                value: f_x,
            });

            if f_x < reference - self.tol {
                reference = f_x;
                stalled = 0;
            } else {
                stalled += 1;
            }
            if stalled >= self.patience {
                converged = true;
                break;
            }
        }

        tracked.finish(num_iterations, history, converged)
    }
}

// =============================================================================
// argmin-backed solvers
// =============================================================================

/// Bridges a tracked objective into argmin's problem traits.
///
/// argmin only sees opaque errors, so the first objective error is kept
/// in `failure` and returned in place of argmin's.
struct ArgminProblem<'p, 'o, 'f> {
    tracked: &'p RefCell<Tracked<'o, 'f>>,
    failure: &'p RefCell<Option<QaoaError>>,
    halted: &'p AtomicBool,
    /// Report a failed evaluation as an infinite cost instead of an error.
    /// argmin's Nelder-Mead unwraps the costs of its initial simplex.
    infinite_on_failure: bool,
    fd_step: f64,
}

impl ArgminProblem<'_, '_, '_> {
    /// The first objective error is parked in `failure`; the recorder then
    /// aborts the run at the next iteration boundary.
    fn eval(&self, x: &[f64]) -> Result<f64, ArgminError> {
        if self.failure.borrow().is_none() {
            match self.tracked.borrow_mut().eval(x) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    *self.failure.borrow_mut() = Some(e);
                    self.halted.store(true, Ordering::SeqCst);
                }
            }
        }
        if self.infinite_on_failure {
            Ok(f64::INFINITY)
        } else {
            Err(ArgminError::msg("objective evaluation failed"))
        }
    }
}

impl CostFunction for ArgminProblem<'_, '_, '_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, ArgminError> {
        self.eval(param)
    }
}

impl Gradient for ArgminProblem<'_, '_, '_> {
    type Param = Vec<f64>;
    type Gradient = Vec<f64>;

    /// Central finite differences.
    fn gradient(&self, param: &Self::Param) -> Result<Self::Gradient, ArgminError> {
        let mut point = param.clone();
        let mut grad = Vec::with_capacity(param.len());
        for i in 0..param.len() {
            point[i] = param[i] + self.fd_step;
            let f_plus = self.eval(&point)?;
            point[i] = param[i] - self.fd_step;
            let f_minus = self.eval(&point)?;
            point[i] = param[i];
            grad.push((f_plus - f_minus) / (2.0 * self.fd_step));
        }
        Ok(grad)
    }
}

/// Records per-iteration best points while an argmin solver runs.
#[derive(Clone, Default)]
struct Recorder {
    reports: Arc<Mutex<Vec<IterationReport>>>,
    halted: Arc<AtomicBool>,
}

impl Recorder {
    fn take(&self) -> QaoaResult<Vec<IterationReport>> {
        let mut reports = self
            .reports
            .lock()
            .map_err(|_| QaoaError::Optimizer("iteration recorder was poisoned".into()))?;
        Ok(std::mem::take(&mut *reports))
    }
}

impl<I> Observe<I> for Recorder
where
    I: State<Param = Vec<f64>, Float = f64>,
{
    fn observe_iter(&mut self, state: &I, _kv: &KV) -> Result<(), ArgminError> {
        if self.halted.load(Ordering::SeqCst) {
            return Err(ArgminError::msg("objective evaluation failed"));
        }
        let Some(point) = state.get_best_param() else {
            return Ok(());
        };
        let report = IterationReport {
            iteration: state.get_iter() as usize,
            point: point.clone(),
            value: state.get_best_cost(),
        };
        self.reports
            .lock()
            .map_err(|_| ArgminError::msg("iteration recorder was poisoned"))?
            .push(report);
        Ok(())
    }
}

fn optimizer_error(e: ArgminError) -> QaoaError {
    QaoaError::Optimizer(e.to_string())
}

fn solver_converged<I: State>(state: &I) -> bool {
    matches!(
        state.get_termination_reason(),
        Some(TerminationReason::SolverConverged)
    )
}

/// Resolve an argmin run: objective errors win over argmin's, then the
/// recorded iterations are replayed to the callback.
fn finish_argmin(
    tracked: RefCell<Tracked<'_, '_>>,
    failure: RefCell<Option<QaoaError>>,
    outcome: Result<bool, ArgminError>,
    recorder: &Recorder,
    callback: &mut dyn FnMut(&IterationReport),
) -> QaoaResult<OptimizationResult> {
    if let Some(e) = failure.into_inner() {
        return Err(e);
    }
    let converged = outcome.map_err(optimizer_error)?;

    let reports = recorder.take()?;
    let mut history = Vec::with_capacity(reports.len());
    for report in &reports {
        history.push(report.value);
        callback(report);
    }
    let num_iterations = reports.last().map_or(0, |r| r.iteration);
    tracked
        .into_inner()
        .finish(num_iterations, history, converged)
}

/// Nelder-Mead simplex minimizer on argmin.
#[derive(Debug, Clone)]
pub struct NelderMead {
    /// Maximum number of iterations.
    pub maxiter: usize,
    /// Standard deviation of simplex values at which the search stops.
    pub tol: f64,
    /// Edge length of the initial simplex.
    pub step: f64,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self {
            maxiter: 100,
            tol: 1e-6,
            step: 0.5,
        }
    }
}

impl NelderMead {
    /// Create a new Nelder-Mead minimizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum iterations.
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }
}

impl Minimizer for NelderMead {
    fn name(&self) -> &'static str {
        "Nelder-Mead"
    }

    fn minimize(
        &self,
        objective: &mut ObjectiveFn<'_>,
        initial: &[f64],
        callback: &mut dyn FnMut(&IterationReport),
    ) -> QaoaResult<OptimizationResult> {
        check_initial(initial)?;
        let mut simplex = vec![initial.to_vec()];
        for i in 0..initial.len() {
            let mut vertex = initial.to_vec();
            vertex[i] += self.step;
            simplex.push(vertex);
        }
        let solver = ArgminNelderMead::new(simplex)
            .with_sd_tolerance(self.tol)
            .map_err(optimizer_error)?;

        let tracked = RefCell::new(Tracked::new(objective));
        let failure = RefCell::new(None);
        let recorder = Recorder::default();
        let problem = ArgminProblem {
            tracked: &tracked,
            failure: &failure,
            halted: &recorder.halted,
            infinite_on_failure: true,
            fd_step: 0.0,
        };

        let outcome = argmin::core::Executor::new(problem, solver)
            .configure(|state| state.max_iters(self.maxiter as u64))
            .add_observer(recorder.clone(), ObserverMode::Always)
            .run()
            .map(|result| solver_converged(&result.state));

        finish_argmin(tracked, failure, outcome, &recorder, callback)
    }
}

/// Limited-memory BFGS on argmin with central finite-difference gradients.
#[derive(Debug, Clone)]
pub struct Lbfgs {
    /// Maximum number of iterations.
    pub maxiter: usize,
    /// Gradient norm and cost change tolerance.
    pub tol: f64,
    /// History length.
    pub memory: usize,
    /// Finite-difference step.
    pub fd_step: f64,
}

impl Default for Lbfgs {
    fn default() -> Self {
        Self {
            maxiter: 100,
            tol: 1e-6,
            memory: 7,
            fd_step: 1e-2,
        }
    }
}

impl Lbfgs {
    /// Create a new L-BFGS minimizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum iterations.
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }
}

impl Minimizer for Lbfgs {
    fn name(&self) -> &'static str {
        "L-BFGS"
    }

    fn minimize(
        &self,
        objective: &mut ObjectiveFn<'_>,
        initial: &[f64],
        callback: &mut dyn FnMut(&IterationReport),
    ) -> QaoaResult<OptimizationResult> {
        check_initial(initial)?;
        let solver = LBFGS::new(MoreThuenteLineSearch::new(), self.memory)
            .with_tolerance_grad(self.tol)
            .and_then(|solver| solver.with_tolerance_cost(self.tol))
            .map_err(optimizer_error)?;

        let tracked = RefCell::new(Tracked::new(objective));
        let failure = RefCell::new(None);
        let recorder = Recorder::default();
        let problem = ArgminProblem {
            tracked: &tracked,
            failure: &failure,
            halted: &recorder.halted,
            infinite_on_failure: false,
            fd_step: self.fd_step,
        };

        let outcome = argmin::core::Executor::new(problem, solver)
            .configure(|state| state.param(initial.to_vec()).max_iters(self.maxiter as u64))
            .add_observer(recorder.clone(), ObserverMode::Always)
            .run()
            .map(|result| solver_converged(&result.state));

        finish_argmin(tracked, failure, outcome, &recorder, callback)
    }
}
