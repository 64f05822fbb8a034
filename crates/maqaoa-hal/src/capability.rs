//! Executor capability introspection.
//!
//! [`Capabilities`] describes what an executor accepts: qubit count,
//! supported gates and shot limits. Executors cache it at construction
//! and consult it in `validate()`.

use serde::{Deserialize, Serialize};

/// Capabilities of a circuit executor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the executor.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate set.
    pub gate_set: GateSet,
    /// Maximum number of shots per execution.
    pub max_shots: u32,
    /// Whether this is a simulator.
    pub is_simulator: bool,
    /// Additional capability flags, e.g. `"statevector"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Create capabilities for a statevector simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateSet::simulator(),
            max_shots: 1_000_000,
            is_simulator: true,
            features: vec!["statevector".into()],
        }
    }

    /// Set the executor name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the shot limit.
    #[must_use]
    pub fn with_max_shots(mut self, max_shots: u32) -> Self {
        self.max_shots = max_shots;
        self
    }

    /// Check whether a gate is supported by name.
    pub fn supports(&self, gate: &str) -> bool {
        self.gate_set.contains(gate)
    }

    /// Check whether a capability flag is present.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Gates an executor can run, by lowercase name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateSet {
    /// Single-qubit gates supported.
    pub single_qubit: Vec<String>,
    /// Two-qubit gates supported.
    pub two_qubit: Vec<String>,
}

impl GateSet {
    /// Gates the statevector simulator implements.
    pub fn simulator() -> Self {
        Self {
            single_qubit: ["h", "x", "rx", "rz"]
                .into_iter()
                .map(String::from)
                .collect(),
            two_qubit: ["cx", "rzz"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Check whether a gate is in the set.
    pub fn contains(&self, gate: &str) -> bool {
        self.single_qubit.iter().any(|g| g == gate) || self.two_qubit.iter().any(|g| g == gate)
    }

    /// Iterate over all gate names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.single_qubit
            .iter()
            .chain(&self.two_qubit)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator(12);
        assert_eq!(caps.num_qubits, 12);
        assert!(caps.is_simulator);
        assert!(caps.has_feature("statevector"));
        assert!(caps.supports("rx"));
        assert!(caps.supports("cx"));
        assert!(!caps.supports("ccx"));
    }

    #[test]
    fn test_builder() {
        let caps = Capabilities::simulator(4)
            .with_name("local")
            .with_max_shots(10);
        assert_eq!(caps.name, "local");
        assert_eq!(caps.max_shots, 10);
    }

    #[test]
    fn test_gate_set_iter() {
        let set = GateSet::simulator();
        let gates: Vec<_> = set.iter().collect();
        assert_eq!(gates.len(), 6);
        assert!(gates.contains(&"rzz"));
    }
}
