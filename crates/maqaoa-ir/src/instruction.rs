//! A gate, measurement or barrier together with the wires it touches.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gate::StandardGate;
use crate::qubit::{ClbitId, QubitId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    Gate(StandardGate),
    /// Readout of `qubits[0]` into `clbits[0]`.
    Measure,
    /// Orders operations on its qubits; has no effect on the state.
    Barrier,
}

/// One circuit operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub qubits: Vec<QubitId>,
    /// Empty except for measurements.
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Gate on arbitrary operands. Arity is checked when the instruction
    /// enters a circuit, not here.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
            clbits: Vec::new(),
        }
    }

    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    pub fn two_qubit_gate(gate: StandardGate, first: QubitId, second: QubitId) -> Self {
        Self::gate(gate, [first, second])
    }

    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: Vec::new(),
        }
    }

    /// Gate mnemonic, `"measure"` or `"barrier"`.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            InstructionKind::Gate(gate) => gate.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Barrier => "barrier",
        }
    }

    pub fn as_gate(&self) -> Option<&StandardGate> {
        match &self.kind {
            InstructionKind::Gate(gate) => Some(gate),
            InstructionKind::Measure | InstructionKind::Barrier => None,
        }
    }

    pub fn is_gate(&self) -> bool {
        self.as_gate().is_some()
    }

    pub fn is_measure(&self) -> bool {
        self.kind == InstructionKind::Measure
    }

    pub fn is_barrier(&self) -> bool {
        self.kind == InstructionKind::Barrier
    }

    /// True if this is a gate whose angle is still a symbol.
    pub fn is_parameterized(&self) -> bool {
        self.as_gate().is_some_and(StandardGate::is_symbolic)
    }
}

/// `rz(params[4]) q1`, `cx q0, q1`, `measure q2 -> c2`.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_gate() {
            Some(gate) => write!(f, "{gate}")?,
            None => f.write_str(self.name())?,
        }
        let qubits: Vec<String> = self.qubits.iter().map(ToString::to_string).collect();
        if !qubits.is_empty() {
            write!(f, " {}", qubits.join(", "))?;
        }
        for clbit in &self.clbits {
            write!(f, " -> {clbit}")?;
        }
        Ok(())
    }
}
