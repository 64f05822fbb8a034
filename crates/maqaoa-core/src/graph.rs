//! MaxCut problem graphs.
//!
//! The MaxCut problem: given a weighted graph G = (V, E), partition the
//! vertices into two sets S and T maximizing the total weight of edges
//! between S and T.
//!
//! [`MaxCutGraph`] is the only graph type the circuit builder accepts.
//! Node and edge order are fixed at construction; angle vectors are
//! indexed positionally against that order.

use std::fmt::{self, Write as _};
use std::ops::Range;

use ndarray::Array2;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::error::{QaoaError, QaoaResult};

/// Node limit for exhaustive search.
pub const BRUTE_FORCE_LIMIT: usize = 20;

/// An undirected weighted MaxCut instance.
#[derive(Debug, Clone)]
pub struct MaxCutGraph {
    name: String,
    graph: UnGraph<(), f64>,
}

impl MaxCutGraph {
    /// Create a graph with unit edge weights.
    pub fn new(
        name: impl Into<String>,
        n_nodes: usize,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> QaoaResult<Self> {
        Self::weighted(name, n_nodes, edges.into_iter().map(|(a, b)| (a, b, 1.0)))
    }

    /// Create a weighted graph.
    ///
    /// Endpoints must be below `n_nodes`; self-loops and non-finite
    /// weights are rejected.
    pub fn weighted(
        name: impl Into<String>,
        n_nodes: usize,
        edges: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> QaoaResult<Self> {
        let name = name.into();
        let mut graph = UnGraph::with_capacity(n_nodes, 0);
        for _ in 0..n_nodes {
            graph.add_node(());
        }
        for (a, b, w) in edges {
            if a >= n_nodes || b >= n_nodes {
                return Err(QaoaError::InvalidParameters(format!(
                    "edge ({a}, {b}) references a node outside 0..{n_nodes} in graph '{name}'"
                )));
            }
            if a == b {
                return Err(QaoaError::InvalidParameters(format!(
                    "self-loop on node {a} in graph '{name}'"
                )));
            }
            if !w.is_finite() {
                return Err(QaoaError::InvalidParameters(format!(
                    "edge ({a}, {b}) has non-finite weight {w} in graph '{name}'"
                )));
            }
            graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), w);
        }
        Ok(Self { name, graph })
    }

    /// Instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of nodes N.
    pub fn num_nodes(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges M.
    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in their fixed order.
    pub fn nodes(&self) -> Range<usize> {
        0..self.num_nodes()
    }

    /// Edges as `(i, j, weight)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index(), *e.weight()))
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> f64 {
        self.edges().map(|(_, _, w)| w).sum()
    }

    /// Symmetric weighted adjacency matrix. Parallel edges are summed.
    pub fn adjacency_matrix(&self) -> Array2<f64> {
        let n = self.num_nodes();
        let mut w = Array2::zeros((n, n));
        for (i, j, weight) in self.edges() {
            w[[i, j]] += weight;
            w[[j, i]] += weight;
        }
        w
    }

    /// Text rendering: edge list followed by the adjacency matrix.
    pub fn draw(&self) -> String {
        let mut out = self.to_string();
        out.push_str("  adjacency:\n");
        for row in self.adjacency_matrix().rows() {
            out.push_str("   ");
            for w in row {
                // Writing to a String cannot fail.
                let _ = write!(out, " {w:5.2}");
            }
            out.push('\n');
        }
        out
    }

    /// Cut value of an assignment, `assignment[i] = true` placing node i in S.
    ///
    /// `assignment` must have one entry per node.
    pub fn cut_value(&self, assignment: &[bool]) -> f64 {
        self.edges()
            .filter(|&(a, b, _)| assignment[a] != assignment[b])
            .map(|(_, _, w)| w)
            .sum()
    }

    /// Cut value of an integer assignment, bit i being node i.
    pub fn cut_value_from_bitstring(&self, bitstring: usize) -> f64 {
        self.edges()
            .filter(|&(a, b, _)| ((bitstring >> a) & 1) != ((bitstring >> b) & 1))
            .map(|(_, _, w)| w)
            .sum()
    }

    /// Maximum cut by exhaustive search.
    ///
    /// Returns the lowest-index optimal assignment and its value.
    pub fn max_cut_brute_force(&self) -> QaoaResult<(usize, f64)> {
        let n = self.num_nodes();
        if n > BRUTE_FORCE_LIMIT {
            return Err(QaoaError::InvalidParameters(format!(
                "brute force is limited to {BRUTE_FORCE_LIMIT} nodes, graph '{}' has {n}",
                self.name
            )));
        }
        let mut best_bitstring = 0;
        let mut best_value = 0.0;
        for bitstring in 0..(1usize << n) {
            let value = self.cut_value_from_bitstring(bitstring);
            if value > best_value {
                best_value = value;
                best_bitstring = bitstring;
            }
        }
        Ok((best_bitstring, best_value))
    }

    /// Split an integer assignment into the node sets (S, T).
    pub fn bitstring_to_partition(&self, bitstring: usize) -> (Vec<usize>, Vec<usize>) {
        self.nodes().partition(|&i| (bitstring >> i) & 1 == 1)
    }
}

impl fmt::Display for MaxCutGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Graph '{}' ({} nodes, {} edges):",
            self.name,
            self.num_nodes(),
            self.num_edges()
        )?;
        for (a, b, w) in self.edges() {
            if (w - 1.0).abs() < 1e-10 {
                writeln!(f, "  {a} -- {b}")?;
            } else {
                writeln!(f, "  {a} -- {b} (weight: {w:.2})")?;
            }
        }
        Ok(())
    }
}
