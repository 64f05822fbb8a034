//! End-to-end tests of the circuit builder, estimator, objective and driver.

use maqaoa_adapter_sim::SimulatorBackend;
use maqaoa_core::ansatz::{self, AngleInit, MaQaoa};
use maqaoa_core::energy::{self, BitOrder};
use maqaoa_core::{MaxCutGraph, Method, Objective, OptimizationDriver, QaoaError, catalog};
use maqaoa_hal::{Capabilities, Counts, ExecutionResult, Executor, HalError, HalResult};
use maqaoa_ir::Circuit;

fn four_cycle() -> MaxCutGraph {
    MaxCutGraph::new("cycle_4", 4, [(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap()
}

fn zero_angles(graph: MaxCutGraph, p: usize) -> MaQaoa {
    let init = AngleInit::Specified {
        betas: vec![0.0; graph.num_nodes() * p],
        gammas: vec![0.0; graph.num_edges() * p],
    };
    MaQaoa::new(graph, p, init, true).unwrap()
}

/// Returns a fixed distribution for every circuit.
struct Fixed {
    counts: Counts,
    capabilities: Capabilities,
}

impl Fixed {
    fn new(counts: Counts) -> Self {
        Self {
            counts,
            capabilities: Capabilities::simulator(16),
        }
    }
}

impl Executor for Fixed {
    fn name(&self) -> &str {
        "fixed"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn validate(&self, _circuit: &Circuit) -> HalResult<()> {
        Ok(())
    }

    fn execute(&mut self, _circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        Ok(ExecutionResult::new(self.counts.clone(), shots))
    }
}

/// Always fails, as a broken backend would.
struct Broken {
    capabilities: Capabilities,
}

impl Executor for Broken {
    fn name(&self) -> &str {
        "broken"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn validate(&self, _circuit: &Circuit) -> HalResult<()> {
        Err(HalError::Unavailable("device offline".into()))
    }

    fn execute(&mut self, circuit: &Circuit, _shots: u32) -> HalResult<ExecutionResult> {
        self.validate(circuit)?;
        unreachable!()
    }
}

#[test]
fn test_angle_lengths_must_match_graph_and_layers() {
    for idx in [0, 3, 7, 15] {
        let graph = catalog::instance(idx).unwrap();
        let (n, m) = (graph.num_nodes(), graph.num_edges());
        for p in 1..=3 {
            let ok = ansatz::build(&graph, p, &vec![0.1; n * p], &vec![0.2; m * p], true);
            assert_eq!(ok.unwrap().num_parameters(), p * (n + m));

            for (betas, gammas) in [
                (n * p - 1, m * p),
                (n * p + 1, m * p),
                (n * p, m * p - 1),
                (n * p, m * p + 1),
                (m * p, n * p),
            ] {
                if betas == n * p && gammas == m * p {
                    continue;
                }
                let err = ansatz::build(&graph, p, &vec![0.0; betas], &vec![0.0; gammas], true);
                assert!(
                    matches!(err, Err(QaoaError::InvalidParameters(_))),
                    "idx={idx} p={p} betas={betas} gammas={gammas}"
                );
            }
        }
    }
}

#[test]
fn test_inversion_matters_on_asymmetric_path() {
    let path = MaxCutGraph::weighted("path_3", 3, [(0, 1, 1.0), (1, 2, 2.0)]).unwrap();
    let counts: Counts = [("110", 3), ("100", 1)].into_iter().collect();

    // Reversed: "110" -> nodes 1, 2 in S, cut 1; "100" -> node 2 in S, cut 2.
    let inverted = energy::estimate(&path, &counts).unwrap();
    assert!((inverted - (3.0 * 1.0 + 1.0 * 2.0) / 4.0).abs() < 1e-12);

    // Raw: "110" -> nodes 0, 1 in S, cut 2; "100" -> node 0 in S, cut 1.
    let raw = energy::estimate_with(&path, &counts, BitOrder::NodeOrder).unwrap();
    assert!((raw - (3.0 * 2.0 + 1.0 * 1.0) / 4.0).abs() < 1e-12);

    assert_ne!(inverted, raw);
}

#[test]
fn test_single_bitstring_distribution_is_exact() {
    let graph = catalog::instance(15).unwrap();
    // Readout "0110" puts nodes 1 and 2 in S.
    let counts: Counts = [("0110", 1)].into_iter().collect();
    let expected: f64 = graph
        .edges()
        .filter(|&(a, b, _)| [1, 2].contains(&a) != [1, 2].contains(&b))
        .map(|(_, _, w)| w)
        .sum();
    assert_eq!(energy::estimate(&graph, &counts).unwrap(), expected);
    assert_eq!(expected, 0.5 + 1.5 + 0.75 + 1.25);
}

#[test]
fn test_empty_distribution_fails() {
    let graph = four_cycle();
    assert!(matches!(
        energy::estimate(&graph, &Counts::new()),
        Err(QaoaError::EmptyDistribution)
    ));
}

#[test]
fn test_objective_negates_estimate_for_same_distribution() {
    let qaoa = zero_angles(four_cycle(), 1);
    let counts: Counts = [("0101", 5), ("0110", 2), ("1111", 1)]
        .into_iter()
        .collect();
    let estimate = energy::estimate(qaoa.graph(), &counts).unwrap();

    let mut objective = Objective::new(&qaoa, Fixed::new(counts)).unwrap();
    assert_eq!(objective.evaluate(&qaoa.initial_point()).unwrap(), -estimate);
}

#[test]
fn test_objective_matches_estimate_on_simulator() {
    let qaoa = MaQaoa::new(four_cycle(), 2, AngleInit::seeded(9), true).unwrap();
    let angles = qaoa.initial_point();

    let mut objective = Objective::new(&qaoa, SimulatorBackend::with_seed(3))
        .unwrap()
        .with_shots(2048);
    let value = objective.evaluate(&angles).unwrap();

    let mut backend = SimulatorBackend::with_seed(3);
    let bound = qaoa.template().bind(&angles).unwrap();
    let counts = backend.execute(&bound, 2048).unwrap().counts;
    assert_eq!(value, -energy::estimate(qaoa.graph(), &counts).unwrap());
}

#[test]
fn test_execution_failure_propagates() {
    let qaoa = zero_angles(four_cycle(), 1);
    let broken = Broken {
        capabilities: Capabilities::simulator(4),
    };
    let mut objective = Objective::new(&qaoa, broken).unwrap();
    assert!(matches!(
        objective.evaluate(&qaoa.initial_point()),
        Err(QaoaError::ExecutionFailure(HalError::Unavailable(_)))
    ));
}

#[test]
fn test_zero_angles_on_four_cycle_average_two() {
    let qaoa = zero_angles(four_cycle(), 1);
    let mut objective = Objective::new(&qaoa, SimulatorBackend::with_seed(121))
        .unwrap()
        .with_shots(8192);
    let value = -objective.evaluate(&qaoa.initial_point()).unwrap();
    assert!((value - 2.0).abs() < 0.1, "expected cut {value}");
}

#[test]
fn test_optimize_never_worse_than_start() {
    let qaoa = zero_angles(four_cycle(), 1);
    for method in [Method::Cobyla, Method::NelderMead, Method::Spsa] {
        let mut backend = SimulatorBackend::with_seed(121);
        let mut driver = OptimizationDriver::new(method, Some(121))
            .with_maxiter(20)
            .with_shots(512);
        let outcome = driver.optimize(&qaoa, &mut backend).unwrap();

        assert!(outcome.best_value >= outcome.initial_value, "{method}");
        assert_eq!(outcome.best_angles.len(), 8);
        assert_eq!(outcome.iterations, driver.iterations());
        assert!(outcome.evaluations > outcome.iterations);
    }
}

#[test]
fn test_optimize_is_deterministic_under_seed() {
    let run = || {
        let graph = catalog::instance(0).unwrap();
        let qaoa = MaQaoa::new(graph, 1, AngleInit::seeded(121), true).unwrap();
        let mut backend = SimulatorBackend::with_seed(121);
        let mut driver = OptimizationDriver::new(Method::Cobyla, Some(121))
            .with_maxiter(15)
            .with_shots(256);
        driver.optimize(&qaoa, &mut backend).unwrap()
    };
    let a = run();
    let b = run();
    assert_eq!(a.best_angles, b.best_angles);
    assert_eq!(a.best_value, b.best_value);
    assert_eq!(a.history, b.history);
}

#[test]
fn test_single_edge_reaches_good_cut() {
    let graph = MaxCutGraph::new("edge", 2, [(0, 1)]).unwrap();
    let qaoa = zero_angles(graph, 1);
    let mut backend = SimulatorBackend::with_seed(5);
    let mut driver = OptimizationDriver::new(Method::Cobyla, Some(5))
        .with_maxiter(60)
        .with_shots(1024);
    let outcome = driver.optimize(&qaoa, &mut backend).unwrap();
    assert!(outcome.best_value >= outcome.initial_value);

    let sampled = driver
        .sample_best_cut(&qaoa, &mut backend, &outcome.best_angles)
        .unwrap();
    assert_eq!(sampled.cut_value, 1.0);
    assert!(sampled.bitstring == "01" || sampled.bitstring == "10");
}

#[test]
fn test_catalog_instance_runs_on_simulator() {
    let graph = catalog::instance(12).unwrap();
    let qaoa = MaQaoa::new(graph, 2, AngleInit::seeded(1), true).unwrap();
    let mut objective = Objective::new(&qaoa, SimulatorBackend::with_seed(1)).unwrap();
    let value = -objective.evaluate(&qaoa.initial_point()).unwrap();
    let total = qaoa.graph().total_weight();
    assert!(value > 0.0 && value < total);
}
