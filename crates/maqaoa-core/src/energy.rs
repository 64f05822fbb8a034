//! Cut-value estimation from measured bitstring distributions.
//!
//! Executors report bitstrings with classical bit 0 rightmost, so character
//! `N - 1 - i` of a readout string is node `i`. [`BitOrder::Readout`]
//! undoes that reversal before the cut is evaluated; [`BitOrder::NodeOrder`]
//! is for distributions already written with node 0 leftmost.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use maqaoa_hal::Counts;

use crate::error::{QaoaError, QaoaResult};
use crate::graph::MaxCutGraph;

/// How bitstring characters map to graph nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitOrder {
    /// Executor readout order: the last character is node 0.
    #[default]
    Readout,
    /// The first character is node 0.
    NodeOrder,
}

/// A distribution over measured bitstrings.
///
/// Weights may be raw counts or probabilities; only their ratios matter.
pub trait OutcomeDistribution {
    /// Visit every `(bitstring, weight)` pair.
    fn outcomes(&self) -> Box<dyn Iterator<Item = (&str, f64)> + '_>;
}

impl OutcomeDistribution for Counts {
    fn outcomes(&self) -> Box<dyn Iterator<Item = (&str, f64)> + '_> {
        Box::new(self.iter().map(|(s, n)| (s, n as f64)))
    }
}

impl<S: BuildHasher> OutcomeDistribution for HashMap<String, f64, S> {
    fn outcomes(&self) -> Box<dyn Iterator<Item = (&str, f64)> + '_> {
        Box::new(self.iter().map(|(s, &w)| (s.as_str(), w)))
    }
}

impl<S: BuildHasher> OutcomeDistribution for HashMap<String, u64, S> {
    fn outcomes(&self) -> Box<dyn Iterator<Item = (&str, f64)> + '_> {
        Box::new(self.iter().map(|(s, &n)| (s.as_str(), n as f64)))
    }
}

impl OutcomeDistribution for BTreeMap<String, f64> {
    fn outcomes(&self) -> Box<dyn Iterator<Item = (&str, f64)> + '_> {
        Box::new(self.iter().map(|(s, &w)| (s.as_str(), w)))
    }
}

impl OutcomeDistribution for [(&str, f64)] {
    fn outcomes(&self) -> Box<dyn Iterator<Item = (&str, f64)> + '_> {
        Box::new(self.iter().map(|&(s, w)| (s, w)))
    }
}

/// Decode a bitstring into a node assignment, `true` placing a node in S.
pub fn decode(bitstring: &str, num_nodes: usize, order: BitOrder) -> QaoaResult<Vec<bool>> {
    if bitstring.len() != num_nodes {
        return Err(QaoaError::MalformedDistribution(format!(
            "bitstring '{bitstring}' has length {}, graph has {num_nodes} nodes",
            bitstring.len()
        )));
    }
    let mut assignment = bitstring
        .bytes()
        .map(|b| match b {
            b'0' => Ok(false),
            b'1' => Ok(true),
            _ => Err(QaoaError::MalformedDistribution(format!(
                "bitstring '{bitstring}' contains characters other than '0' and '1'"
            ))),
        })
        .collect::<QaoaResult<Vec<_>>>()?;
    if order == BitOrder::Readout {
        assignment.reverse();
    }
    Ok(assignment)
}

/// Cut value of a single bitstring.
pub fn cut_of(graph: &MaxCutGraph, bitstring: &str, order: BitOrder) -> QaoaResult<f64> {
    let assignment = decode(bitstring, graph.num_nodes(), order)?;
    Ok(graph.cut_value(&assignment))
}

/// Expected cut value over a readout-order distribution.
pub fn estimate<D>(graph: &MaxCutGraph, distribution: &D) -> QaoaResult<f64>
where
    D: OutcomeDistribution + ?Sized,
{
    estimate_with(graph, distribution, BitOrder::Readout)
}

/// Expected cut value: `Σ w(s) · C(s) / Σ w(s)`.
pub fn estimate_with<D>(graph: &MaxCutGraph, distribution: &D, order: BitOrder) -> QaoaResult<f64>
where
    D: OutcomeDistribution + ?Sized,
{
    let mut weighted_sum = 0.0;
    let mut total = 0.0;
    for (bitstring, weight) in distribution.outcomes() {
        if !weight.is_finite() || weight < 0.0 {
            return Err(QaoaError::MalformedDistribution(format!(
                "bitstring '{bitstring}' has invalid weight {weight}"
            )));
        }
        let cut = cut_of(graph, bitstring, order)?;
        weighted_sum += weight * cut;
        total += weight;
    }
    if total <= 0.0 {
        return Err(QaoaError::EmptyDistribution);
    }
    Ok(weighted_sum / total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path3() -> MaxCutGraph {
        MaxCutGraph::weighted("path3", 3, [(0, 1, 1.0), (1, 2, 2.0)]).unwrap()
    }

    #[test]
    fn test_readout_order_reverses() {
        let g = path3();
        let dist = [("110", 1.0)];
        assert_eq!(estimate(&g, &dist[..]).unwrap(), 1.0);
        assert_eq!(estimate_with(&g, &dist[..], BitOrder::NodeOrder).unwrap(), 2.0);
    }

    #[test]
    fn test_single_bitstring_is_its_cut() {
        let g = MaxCutGraph::new("sq", 4, [(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        let counts: Counts = [("0101", 37)].into_iter().collect();
        assert_eq!(estimate(&g, &counts).unwrap(), 4.0);
        let counts: Counts = [("0011", 5)].into_iter().collect();
        assert_eq!(estimate(&g, &counts).unwrap(), 2.0);
    }

    #[test]
    fn test_frequency_weighted_mean() {
        let g = path3();
        // "001" -> node 0 in S, cut 1; "010" -> node 1 in S, cut 3.
        let counts: Counts = [("001", 3), ("010", 1)].into_iter().collect();
        assert!((estimate(&g, &counts).unwrap() - 1.5).abs() < 1e-12);

        let mut probs = HashMap::new();
        probs.insert("001".to_string(), 0.75);
        probs.insert("010".to_string(), 0.25);
        assert!((estimate(&g, &probs).unwrap() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_all_zero_and_all_one_cut_nothing() {
        let g = path3();
        let dist = [("000", 0.5), ("111", 0.5)];
        assert_eq!(estimate(&g, &dist[..]).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_distribution() {
        let g = path3();
        assert!(matches!(
            estimate(&g, &Counts::new()),
            Err(QaoaError::EmptyDistribution)
        ));
        let zero = [("010", 0.0)];
        assert!(matches!(
            estimate(&g, &zero[..]),
            Err(QaoaError::EmptyDistribution)
        ));
    }

    #[test]
    fn test_malformed_distribution() {
        let g = path3();
        for dist in [
            [("01", 1.0)],
            [("0101", 1.0)],
            [("0a1", 1.0)],
            [("010", -1.0)],
            [("010", f64::NAN)],
        ] {
            assert!(matches!(
                estimate(&g, &dist[..]),
                Err(QaoaError::MalformedDistribution(_))
            ));
        }
    }

    #[test]
    fn test_decode() {
        assert_eq!(
            decode("110", 3, BitOrder::Readout).unwrap(),
            vec![false, true, true]
        );
        assert_eq!(
            decode("110", 3, BitOrder::NodeOrder).unwrap(),
            vec![true, true, false]
        );
    }
}
