//! Measurement counts and execution results.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Histogram of measured bitstrings.
///
/// Keys are readout strings over the classical register with classical
/// bit 0 as the rightmost character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Observations of `bitstring` (zero if never seen).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of observations.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct bitstrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(bitstring, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// The most frequent bitstring; ties go to the lexicographically smallest.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.iter()
            .max_by(|(ka, va), (kb, vb)| va.cmp(vb).then_with(|| kb.cmp(ka)))
    }

    /// Pairs sorted by descending count, then bitstring.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_by(|(ka, va), (kb, vb)| vb.cmp(va).then_with(|| ka.cmp(kb)));
        pairs
    }

    /// Relative frequencies. Empty when there are no observations.
    #[allow(clippy::cast_precision_loss)]
    pub fn probabilities(&self) -> FxHashMap<String, f64> {
        let total = self.total_shots();
        if total == 0 {
            return FxHashMap::default();
        }
        self.counts
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / total as f64))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (k, v) in iter {
            counts.insert(k, v);
        }
        counts
    }
}

/// Result of executing a circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement histogram.
    pub counts: Counts,
    /// Number of shots requested.
    pub shots: u32,
    /// Wall-clock execution time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a new result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
        }
    }

    /// Set the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut counts = Counts::new();
        counts.insert("01", 3);
        counts.insert("01", 2);
        counts.insert("10", 5);

        assert_eq!(counts.get("01"), 5);
        assert_eq!(counts.get("11"), 0);
        assert_eq!(counts.total_shots(), 10);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_most_frequent_tie_break() {
        let counts: Counts = [("11", 4), ("00", 4), ("01", 1)].into_iter().collect();
        assert_eq!(counts.most_frequent(), Some(("00", 4)));
        assert_eq!(counts.sorted(), vec![("00", 4), ("11", 4), ("01", 1)]);
        assert_eq!(Counts::new().most_frequent(), None);
    }

    #[test]
    fn test_probabilities() {
        let counts: Counts = [("0", 1), ("1", 3)].into_iter().collect();
        let probs = counts.probabilities();
        assert!((probs["0"] - 0.25).abs() < 1e-12);
        assert!((probs["1"] - 0.75).abs() < 1e-12);
        assert!(Counts::new().probabilities().is_empty());
    }

    #[test]
    fn test_execution_result_builder() {
        let result = ExecutionResult::new(Counts::new(), 100)
            .with_execution_time(12);
        assert_eq!(result.shots, 100);
        assert_eq!(result.execution_time_ms, Some(12));
    }
}
