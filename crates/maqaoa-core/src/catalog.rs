//! Pre-built MaxCut instances selectable by index.
//!
//! Every instance is deterministic, so an index always names the same
//! graph with the same node and edge order.

use crate::error::{QaoaError, QaoaResult};
use crate::graph::MaxCutGraph;

/// Number of instances in the catalog.
pub const CATALOG_SIZE: usize = 16;

const NAMES: [&str; CATALOG_SIZE] = [
    "cycle_4",
    "complete_4",
    "cycle_5",
    "star_5",
    "path_5",
    "cycle_6",
    "complete_5",
    "grid_2x3",
    "prism_6",
    "bipartite_3_3",
    "wheel_6",
    "petersen_10",
    "weighted_ring_6",
    "cube_8",
    "ladder_8",
    "weighted_complete_4",
];

/// Catalog instance names, in index order.
pub fn names() -> &'static [&'static str] {
    &NAMES
}

/// Select instance `idx` (0..=15).
pub fn instance(idx: usize) -> QaoaResult<MaxCutGraph> {
    let Some(&name) = NAMES.get(idx) else {
        return Err(QaoaError::InvalidParameters(format!(
            "graph index {idx} is outside the catalog (0..={})",
            CATALOG_SIZE - 1
        )));
    };
    match idx {
        0 => cycle(name, 4),
        1 => complete(name, 4),
        2 => cycle(name, 5),
        3 => MaxCutGraph::new(name, 5, (1..5).map(|v| (0, v))),
        4 => MaxCutGraph::new(name, 5, (0..4).map(|v| (v, v + 1))),
        5 => cycle(name, 6),
        6 => complete(name, 5),
        7 => MaxCutGraph::new(name, 6, [(0, 1), (1, 2), (3, 4), (4, 5), (0, 3), (1, 4), (2, 5)]),
        8 => MaxCutGraph::new(
            name,
            6,
            [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (0, 3), (1, 4), (2, 5)],
        ),
        9 => MaxCutGraph::new(name, 6, (0..3).flat_map(|a| (3..6).map(move |b| (a, b)))),
        10 => MaxCutGraph::new(
            name,
            6,
            (1..6).map(|v| (0, v)).chain((1..6).map(|v| (v, v % 5 + 1))),
        ),
        11 => MaxCutGraph::new(
            name,
            10,
            (0..5)
                .map(|v| (v, (v + 1) % 5))
                .chain((0..5).map(|v| (v, v + 5)))
                .chain((0..5).map(|v| (v + 5, (v + 2) % 5 + 5))),
        ),
        12 => MaxCutGraph::weighted(
            name,
            6,
            [
                (0, 1, 1.0),
                (1, 2, 2.0),
                (2, 3, 3.0),
                (3, 4, 1.0),
                (4, 5, 2.0),
                (5, 0, 3.0),
            ],
        ),
        13 => MaxCutGraph::new(
            name,
            8,
            (0..8usize).flat_map(|v| {
                [1, 2, 4]
                    .into_iter()
                    .filter(move |bit| v & bit == 0)
                    .map(move |bit| (v, v | bit))
            }),
        ),
        14 => MaxCutGraph::new(
            name,
            8,
            (0..3)
                .map(|v| (v, v + 1))
                .chain((4..7).map(|v| (v, v + 1)))
                .chain((0..4).map(|v| (v, v + 4))),
        ),
        _ => MaxCutGraph::weighted(
            name,
            4,
            [
                (0, 1, 0.5),
                (0, 2, 1.5),
                (0, 3, 1.0),
                (1, 2, 2.0),
                (1, 3, 0.75),
                (2, 3, 1.25),
            ],
        ),
    }
}

fn cycle(name: &str, n: usize) -> QaoaResult<MaxCutGraph> {
    MaxCutGraph::new(name, n, (0..n).map(|v| (v, (v + 1) % n)))
}

fn complete(name: &str, n: usize) -> QaoaResult<MaxCutGraph> {
    MaxCutGraph::new(name, n, (0..n).flat_map(|a| (a + 1..n).map(move |b| (a, b))))
}
