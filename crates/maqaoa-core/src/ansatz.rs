//! Multi-angle QAOA circuit construction.
//!
//! Every node and every edge gets its own angle in every layer. The
//! template is built once per (graph, p) with one symbolic
//! [`ParameterVector`] named `params` of length `p * (N + M)`, laid out
//! per layer as
//!
//! ```text
//!   layer l:  [ β_l,0 .. β_l,N-1 | γ_l,0 .. γ_l,M-1 ]
//!             ^ l*(N+M)          ^ l*(N+M) + N
//! ```
//!
//! Circuit structure:
//!
//! ```text
//!   H^⊗N ─ barrier ─┬─ cost(γ_l) ─ barrier ─ mixer(β_l) ─ barrier ─┬─ barrier ─ measure
//!                   └──────────────── l = 0 .. p-1 ─────────────────┘
//! ```
//!
//! The cost block applies `cx(i, j) · rz(γ, j) · cx(i, j)` per edge in
//! graph order, a phase that depends only on the parity of nodes i and
//! j. The mixer block applies `rx(β, v)` per node.

use std::f64::consts::PI;
use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use maqaoa_ir::{Circuit, ParameterVector, QubitId};

use crate::error::{QaoaError, QaoaResult};
use crate::graph::MaxCutGraph;

/// Name of the template's parameter vector.
pub const PARAMS_NAME: &str = "params";

/// How the initial angles are obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum AngleInit {
    /// Caller-supplied angles: `N * p` betas and `M * p` gammas.
    Specified {
        /// Mixer angles, layer-major.
        betas: Vec<f64>,
        /// Cost angles, layer-major.
        gammas: Vec<f64>,
    },
    /// Random angles: betas uniform in `[0, π)` drawn first, then gammas
    /// uniform in `[0, 2π)`. `None` seeds from OS entropy.
    Generated {
        /// Generator seed.
        seed: Option<u64>,
    },
}

impl AngleInit {
    /// Seeded random angles.
    pub fn seeded(seed: u64) -> Self {
        AngleInit::Generated { seed: Some(seed) }
    }

    /// Produce `(betas, gammas)` for a graph and layer count.
    pub fn resolve(
        self,
        num_nodes: usize,
        num_edges: usize,
        p: usize,
    ) -> QaoaResult<(Vec<f64>, Vec<f64>)> {
        match self {
            AngleInit::Specified { betas, gammas } => {
                check_angle_lengths(num_nodes, num_edges, p, &betas, &gammas)?;
                Ok((betas, gammas))
            }
            AngleInit::Generated { seed } => {
                let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
                let betas = (0..num_nodes * p).map(|_| rng.gen_range(0.0..PI)).collect();
                let gammas = (0..num_edges * p)
                    .map(|_| rng.gen_range(0.0..2.0 * PI))
                    .collect();
                Ok((betas, gammas))
            }
        }
    }

    fn seed(&self) -> Option<u64> {
        match self {
            AngleInit::Specified { .. } => None,
            AngleInit::Generated { seed } => *seed,
        }
    }
}

fn check_angle_lengths(
    num_nodes: usize,
    num_edges: usize,
    p: usize,
    betas: &[f64],
    gammas: &[f64],
) -> QaoaResult<()> {
    if betas.len() != num_nodes * p || gammas.len() != num_edges * p {
        return Err(QaoaError::InvalidParameters(format!(
            "each layer needs one beta per node and one gamma per edge: \
             expected {} betas and {} gammas for p = {p}, got {} and {}",
            num_nodes * p,
            num_edges * p,
            betas.len(),
            gammas.len()
        )));
    }
    if let Some(v) = betas.iter().chain(gammas).find(|v| !v.is_finite()) {
        return Err(QaoaError::InvalidParameters(format!(
            "angles must be finite, got {v}"
        )));
    }
    Ok(())
}

/// A parameterized multi-angle QAOA circuit, built once and bound per
/// evaluation.
#[derive(Debug, Clone)]
pub struct CircuitTemplate {
    circuit: Circuit,
    params: ParameterVector,
    layers: usize,
    num_nodes: usize,
    num_edges: usize,
    measured: bool,
}

impl CircuitTemplate {
    /// The symbolic circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// The parameter vector the circuit is expressed in.
    pub fn parameters(&self) -> &ParameterVector {
        &self.params
    }

    /// Number of layers p.
    pub fn layers(&self) -> usize {
        self.layers
    }

    /// Flat angle vector length, `p * (N + M)`.
    pub fn num_parameters(&self) -> usize {
        self.params.len()
    }

    /// Whether the template ends in measurements.
    pub fn is_measured(&self) -> bool {
        self.measured
    }

    /// Positions of layer `layer`'s mixer angles in the flat vector.
    pub fn mixer_range(&self, layer: usize) -> Range<usize> {
        let left = layer * (self.num_nodes + self.num_edges);
        left..left + self.num_nodes
    }

    /// Positions of layer `layer`'s cost angles in the flat vector.
    pub fn cost_range(&self, layer: usize) -> Range<usize> {
        let middle = layer * (self.num_nodes + self.num_edges) + self.num_nodes;
        middle..middle + self.num_edges
    }

    /// Bind a flat angle vector, producing an executable circuit.
    pub fn bind(&self, angles: &[f64]) -> QaoaResult<Circuit> {
        if angles.len() != self.num_parameters() {
            return Err(QaoaError::InvalidParameters(format!(
                "angle vector has length {}, template expects p * (N + M) = {}",
                angles.len(),
                self.num_parameters()
            )));
        }
        Ok(self.circuit.assign_parameters(&self.params, angles)?)
    }
}

/// Build the multi-angle QAOA template for `graph` with `p` layers.
///
/// `betas` and `gammas` are only checked here: they must hold `N * p`
/// and `M * p` angles. The template itself stays symbolic.
pub fn build(
    graph: &MaxCutGraph,
    p: usize,
    betas: &[f64],
    gammas: &[f64],
    measure: bool,
) -> QaoaResult<CircuitTemplate> {
    let n = graph.num_nodes();
    let m = graph.num_edges();
    if p == 0 {
        return Err(QaoaError::InvalidParameters(
            "layer count p must be at least 1".into(),
        ));
    }
    if n == 0 {
        return Err(QaoaError::InvalidParameters(format!(
            "graph '{}' has no nodes",
            graph.name()
        )));
    }
    check_angle_lengths(n, m, p, betas, gammas)?;

    let width = u32::try_from(n).map_err(|_| {
        QaoaError::InvalidParameters(format!("graph with {n} nodes is too large"))
    })?;
    let qubit = |v: usize| QubitId(v as u32);

    let params = ParameterVector::new(PARAMS_NAME, p * (n + m));
    let mut circuit = Circuit::with_size(format!("ma_qaoa_{}", graph.name()), width, width);

    for v in graph.nodes() {
        circuit.h(qubit(v))?;
    }
    circuit.barrier_all()?;

    for layer in 0..p {
        let left = layer * (n + m);
        let middle = left + n;

        for (k, (i, j, _)) in graph.edges().enumerate() {
            circuit
                .cx(qubit(i), qubit(j))?
                .rz(params.get(middle + k)?, qubit(j))?
                .cx(qubit(i), qubit(j))?;
        }
        circuit.barrier_all()?;

        for v in graph.nodes() {
            circuit.rx(params.get(left + v)?, qubit(v))?;
        }
        circuit.barrier_all()?;
    }
    circuit.barrier_all()?;

    if measure {
        circuit.measure_all()?;
    }

    debug!(
        graph = graph.name(),
        p,
        parameters = params.len(),
        "built multi-angle QAOA template"
    );

    Ok(CircuitTemplate {
        circuit,
        params,
        layers: p,
        num_nodes: n,
        num_edges: m,
        measured: measure,
    })
}

/// A multi-angle QAOA instance: graph, layer count, current angles and
/// the template built from them.
#[derive(Debug, Clone)]
pub struct MaQaoa {
    graph: MaxCutGraph,
    betas: Vec<f64>,
    gammas: Vec<f64>,
    seed: Option<u64>,
    template: CircuitTemplate,
}

impl MaQaoa {
    /// Resolve the angles and build the template.
    pub fn new(graph: MaxCutGraph, p: usize, init: AngleInit, measure: bool) -> QaoaResult<Self> {
        if p == 0 {
            return Err(QaoaError::InvalidParameters(
                "layer count p must be at least 1".into(),
            ));
        }
        let seed = init.seed();
        let (betas, gammas) = init.resolve(graph.num_nodes(), graph.num_edges(), p)?;
        let template = build(&graph, p, &betas, &gammas, measure)?;
        Ok(Self {
            graph,
            betas,
            gammas,
            seed,
            template,
        })
    }

    /// The problem graph.
    pub fn graph(&self) -> &MaxCutGraph {
        &self.graph
    }

    /// Number of layers p.
    pub fn layers(&self) -> usize {
        self.template.layers
    }

    /// Current mixer angles, `N * p`.
    pub fn betas(&self) -> &[f64] {
        &self.betas
    }

    /// Current cost angles, `M * p`.
    pub fn gammas(&self) -> &[f64] {
        &self.gammas
    }

    /// Seed used to generate the angles, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Whether the template ends in measurements.
    pub fn is_measured(&self) -> bool {
        self.template.measured
    }

    /// The symbolic template.
    pub fn template(&self) -> &CircuitTemplate {
        &self.template
    }

    /// The symbolic circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.template.circuit
    }

    /// Flat angle vector for the current angles, in template layout.
    pub fn initial_point(&self) -> Vec<f64> {
        let n = self.graph.num_nodes();
        let m = self.graph.num_edges();
        let mut flat = Vec::with_capacity(self.template.num_parameters());
        for layer in 0..self.layers() {
            flat.extend_from_slice(&self.betas[layer * n..(layer + 1) * n]);
            flat.extend_from_slice(&self.gammas[layer * m..(layer + 1) * m]);
        }
        flat
    }

    /// Split a flat angle vector into `(betas, gammas)`.
    pub fn split_point(&self, flat: &[f64]) -> QaoaResult<(Vec<f64>, Vec<f64>)> {
        if flat.len() != self.template.num_parameters() {
            return Err(QaoaError::InvalidParameters(format!(
                "angle vector has length {}, expected {}",
                flat.len(),
                self.template.num_parameters()
            )));
        }
        let mut betas = Vec::with_capacity(self.betas.len());
        let mut gammas = Vec::with_capacity(self.gammas.len());
        for layer in 0..self.layers() {
            betas.extend_from_slice(&flat[self.template.mixer_range(layer)]);
            gammas.extend_from_slice(&flat[self.template.cost_range(layer)]);
        }
        Ok((betas, gammas))
    }

    /// Replace the current angles. The template is unchanged.
    pub fn set_angles(&mut self, betas: Vec<f64>, gammas: Vec<f64>) -> QaoaResult<()> {
        check_angle_lengths(
            self.graph.num_nodes(),
            self.graph.num_edges(),
            self.layers(),
            &betas,
            &gammas,
        )?;
        self.betas = betas;
        self.gammas = gammas;
        Ok(())
    }
}
