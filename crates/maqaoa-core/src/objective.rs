//! Objective adapter: flat angle vector in, negated expected cut out.

use tracing::debug;

use maqaoa_hal::{Counts, Executor};

use crate::ansatz::MaQaoa;
use crate::energy::{self, BitOrder};
use crate::error::{QaoaError, QaoaResult};

/// Default shot count per evaluation.
pub const DEFAULT_SHOTS: u32 = 1024;

/// Binds angles into the template, runs it and scores the outcome.
///
/// The returned value is the negated expected cut, so minimizing it
/// maximizes the cut.
pub struct Objective<'a, E: Executor> {
    ansatz: &'a MaQaoa,
    executor: E,
    shots: u32,
    order: BitOrder,
    evaluations: usize,
}

impl<'a, E: Executor> Objective<'a, E> {
    /// Create an objective over a measured template.
    pub fn new(ansatz: &'a MaQaoa, executor: E) -> QaoaResult<Self> {
        if !ansatz.is_measured() {
            return Err(QaoaError::InvalidParameters(
                "objective needs a template built with measurements".into(),
            ));
        }
        Ok(Self {
            ansatz,
            executor,
            shots: DEFAULT_SHOTS,
            order: BitOrder::Readout,
            evaluations: 0,
        })
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

    /// Shots per evaluation.
    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// The instance being scored.
    pub fn ansatz(&self) -> &MaQaoa {
        self.ansatz
    }

    /// Completed calls to [`evaluate`](Self::evaluate).
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// The wrapped executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run the bound circuit and return its raw distribution.
    pub fn distribution(&mut self, angles: &[f64]) -> QaoaResult<Counts> {
        let bound = self.ansatz.template().bind(angles)?;
        let result = self.executor.execute(&bound, self.shots)?;
        Ok(result.counts)
    }

    /// Negated expected cut at `angles`.
    pub fn evaluate(&mut self, angles: &[f64]) -> QaoaResult<f64> {
        let counts = self.distribution(angles)?;
        let expected = energy::estimate_with(self.ansatz.graph(), &counts, self.order)?;
        self.evaluations += 1;
        debug!(
            evaluation = self.evaluations,
            expected,
            outcomes = counts.len(),
            "evaluated objective"
        );
        Ok(-expected)
    }
}
