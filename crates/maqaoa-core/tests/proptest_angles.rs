//! Property-based tests for the multi-angle layout.
//!
//! The template accepts exactly `N * p` betas and `M * p` gammas, and the
//! flat angle vector round-trips through the per-layer layout.

use maqaoa_core::ansatz::{self, AngleInit, MaQaoa};
use maqaoa_core::{MaxCutGraph, QaoaError};
use proptest::prelude::*;

/// A small graph without self-loops. Parallel edges are allowed.
fn arb_graph() -> impl Strategy<Value = MaxCutGraph> {
    (1_usize..=6).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n, 0.1_f64..3.0), 0..=8).prop_map(move |raw| {
            let edges = raw.into_iter().filter(|&(a, b, _)| a != b);
            MaxCutGraph::weighted("random", n, edges).unwrap()
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_build_accepts_only_matching_lengths(
        graph in arb_graph(),
        p in 1_usize..=3,
        beta_delta in -2_i64..=2,
        gamma_delta in -2_i64..=2,
    ) {
        let n = graph.num_nodes();
        let m = graph.num_edges();
        let betas_len = (n * p) as i64 + beta_delta;
        let gammas_len = (m * p) as i64 + gamma_delta;
        prop_assume!(betas_len >= 0 && gammas_len >= 0);

        let betas = vec![0.3; betas_len as usize];
        let gammas = vec![0.7; gammas_len as usize];
        let result = ansatz::build(&graph, p, &betas, &gammas, true);

        if beta_delta == 0 && gamma_delta == 0 {
            let template = result.unwrap();
            prop_assert_eq!(template.num_parameters(), p * (n + m));
            prop_assert_eq!(template.layers(), p);
            prop_assert!(template.circuit().is_parameterized());
        } else {
            prop_assert!(matches!(result, Err(QaoaError::InvalidParameters(_))));
        }
    }

    #[test]
    fn test_flat_layout_round_trip(
        graph in arb_graph(),
        p in 1_usize..=3,
        seed in any::<u64>(),
    ) {
        let n = graph.num_nodes();
        let m = graph.num_edges();
        let qaoa = MaQaoa::new(graph, p, AngleInit::seeded(seed), true).unwrap();

        let flat = qaoa.initial_point();
        prop_assert_eq!(flat.len(), p * (n + m));

        let (betas, gammas) = qaoa.split_point(&flat).unwrap();
        prop_assert_eq!(&betas[..], qaoa.betas());
        prop_assert_eq!(&gammas[..], qaoa.gammas());

        for layer in 0..p {
            let template = qaoa.template();
            prop_assert_eq!(&flat[template.mixer_range(layer)], &betas[layer * n..(layer + 1) * n]);
            prop_assert_eq!(&flat[template.cost_range(layer)], &gammas[layer * m..(layer + 1) * m]);
        }
    }

    #[test]
    fn test_binding_removes_every_symbol(
        graph in arb_graph(),
        p in 1_usize..=2,
        seed in any::<u64>(),
    ) {
        let qaoa = MaQaoa::new(graph, p, AngleInit::seeded(seed), true).unwrap();
        let bound = qaoa.template().bind(&qaoa.initial_point()).unwrap();
        prop_assert!(!bound.is_parameterized());
        prop_assert_eq!(bound.num_qubits(), qaoa.graph().num_nodes());
    }

    #[test]
    fn test_generated_angles_are_reproducible_and_in_range(
        graph in arb_graph(),
        p in 1_usize..=3,
        seed in any::<u64>(),
    ) {
        let a = MaQaoa::new(graph.clone(), p, AngleInit::seeded(seed), false).unwrap();
        let b = MaQaoa::new(graph, p, AngleInit::seeded(seed), false).unwrap();
        prop_assert_eq!(a.betas(), b.betas());
        prop_assert_eq!(a.gammas(), b.gammas());
        prop_assert!(a.betas().iter().all(|&x| (0.0..std::f64::consts::PI).contains(&x)));
        prop_assert!(a.gammas().iter().all(|&x| (0.0..std::f64::consts::TAU).contains(&x)));
    }
}
