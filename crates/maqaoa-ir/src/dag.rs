//! Dependency graph of circuit operations.
//!
//! Every node is an instruction. An edge `a -> b` labelled with a wire
//! means `b` is the next operation on that wire after `a`, so the graph
//! is acyclic by construction and any topological order is a valid
//! execution order.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId};

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// A quantum or classical wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireId {
    /// A quantum wire.
    Qubit(QubitId),
    /// A classical wire.
    Clbit(ClbitId),
}

impl From<QubitId> for WireId {
    fn from(q: QubitId) -> Self {
        WireId::Qubit(q)
    }
}

impl From<ClbitId> for WireId {
    fn from(c: ClbitId) -> Self {
        WireId::Clbit(c)
    }
}

/// Operations linked along the wires they share.
#[derive(Debug, Clone, Default)]
pub struct CircuitDag {
    graph: DiGraph<Instruction, WireId, u32>,
    qubits: FxHashSet<QubitId>,
    clbits: FxHashSet<ClbitId>,
    /// Most recent operation on each wire that has one.
    last_on_wire: FxHashMap<WireId, NodeIndex>,
}

impl CircuitDag {
    /// Create an empty DAG with no wires.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a qubit wire. Registering twice has no effect.
    pub fn add_qubit(&mut self, qubit: QubitId) {
        self.qubits.insert(qubit);
    }

    /// Register a classical wire. Registering twice has no effect.
    pub fn add_clbit(&mut self, clbit: ClbitId) {
        self.clbits.insert(clbit);
    }

    fn check_operands(&self, instruction: &Instruction) -> IrResult<()> {
        let op = instruction.name();
        if let Some(gate) = instruction.as_gate() {
            let got = u32::try_from(instruction.qubits.len()).unwrap_or(u32::MAX);
            if gate.num_qubits() != got {
                return Err(IrError::Arity {
                    op,
                    expected: gate.num_qubits(),
                    got,
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !self.qubits.contains(&qubit) {
                return Err(IrError::UnknownQubit { op, qubit });
            }
            if !seen.insert(qubit) {
                return Err(IrError::RepeatedQubit { op, qubit });
            }
        }
        match instruction.clbits.iter().find(|c| !self.clbits.contains(c)) {
            Some(&clbit) => Err(IrError::UnknownClbit { op, clbit }),
            None => Ok(()),
        }
    }

    /// Append an instruction after the last operation on each of its wires.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<NodeIndex> {
        self.check_operands(&instruction)?;

        let wires: Vec<WireId> = instruction
            .qubits
            .iter()
            .map(|&q| WireId::Qubit(q))
            .chain(instruction.clbits.iter().map(|&c| WireId::Clbit(c)))
            .collect();

        let node = self.graph.add_node(instruction);
        for wire in wires {
            if let Some(prev) = self.last_on_wire.insert(wire, node) {
                self.graph.add_edge(prev, node, wire);
            }
        }
        Ok(node)
    }

    /// Operations in topological order.
    pub fn topological_ops(&self) -> IrResult<Vec<(NodeIndex, &Instruction)>> {
        let order = petgraph::algo::toposort(&self.graph, None)
            .map_err(|_| IrError::Cycle)?;
        Ok(order.into_iter().map(|idx| (idx, &self.graph[idx])).collect())
    }

    /// Every operation, in insertion order.
    pub fn ops(&self) -> impl Iterator<Item = &Instruction> {
        self.graph.node_weights()
    }

    /// Mutable access to every operation, in insertion order.
    pub fn ops_mut(&mut self) -> impl Iterator<Item = &mut Instruction> {
        self.graph.node_weights_mut()
    }

    /// Registered qubit wires.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Registered classical wires.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Number of operations, barriers included.
    pub fn num_ops(&self) -> usize {
        self.graph.node_count()
    }

    /// Longest chain of gates and measurements along shared wires.
    ///
    /// Barriers order operations but do not add a layer.
    pub fn depth(&self) -> IrResult<usize> {
        let mut layer = vec![0usize; self.graph.node_count()];
        let mut depth = 0;
        for (node, inst) in self.topological_ops()? {
            let before = self
                .graph
                .neighbors_directed(node, Direction::Incoming)
                .map(|pred| layer[pred.index()])
                .max()
                .unwrap_or(0);
            layer[node.index()] = before + usize::from(!inst.is_barrier());
            depth = depth.max(layer[node.index()]);
        }
        Ok(depth)
    }

    /// The underlying petgraph graph.
    pub fn graph(&self) -> &DiGraph<Instruction, WireId, u32> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StandardGate;

    fn two_wire_dag() -> CircuitDag {
        let mut dag = CircuitDag::new();
        dag.add_qubit(QubitId(0));
        dag.add_qubit(QubitId(1));
        dag.add_clbit(ClbitId(0));
        dag
    }

    #[test]
    fn test_ops_chain_along_wires() {
        let mut dag = two_wire_dag();
        let h = dag
            .apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        let cx = dag
            .apply(Instruction::two_qubit_gate(
                StandardGate::CX,
                QubitId(0),
                QubitId(1),
            ))
            .unwrap();
        dag.apply(Instruction::measure(QubitId(1), ClbitId(0)))
            .unwrap();

        assert_eq!(dag.num_ops(), 3);
        assert_eq!(dag.depth().unwrap(), 3);
        // q0 links h -> cx; q1 has no op before cx.
        assert_eq!(dag.graph().edges_connecting(h, cx).count(), 1);
        assert_eq!(dag.graph().edge_count(), 2);

        let names: Vec<_> = dag
            .topological_ops()
            .unwrap()
            .into_iter()
            .map(|(_, inst)| inst.name().to_string())
            .collect();
        assert_eq!(names, vec!["h", "cx", "measure"]);
    }

    #[test]
    fn test_parallel_gates_share_a_layer() {
        let mut dag = two_wire_dag();
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(1)))
            .unwrap();
        assert_eq!(dag.depth().unwrap(), 1);
    }

    #[test]
    fn test_barrier_does_not_add_depth() {
        let mut dag = two_wire_dag();
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        dag.apply(Instruction::barrier([QubitId(0), QubitId(1)]))
            .unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::X, QubitId(1)))
            .unwrap();
        assert_eq!(dag.depth().unwrap(), 2);
    }

    #[test]
    fn test_apply_rejects_bad_operands() {
        let mut dag = two_wire_dag();
        assert!(matches!(
            dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(5))),
            Err(IrError::UnknownQubit { .. })
        ));
        assert!(matches!(
            dag.apply(Instruction::two_qubit_gate(
                StandardGate::CX,
                QubitId(0),
                QubitId(0)
            )),
            Err(IrError::RepeatedQubit { .. })
        ));
        assert!(matches!(
            dag.apply(Instruction::gate(StandardGate::CX, [QubitId(0)])),
            Err(IrError::Arity { expected: 2, got: 1, .. })
        ));
        assert!(matches!(
            dag.apply(Instruction::measure(QubitId(0), ClbitId(3))),
            Err(IrError::UnknownClbit { .. })
        ));
        assert_eq!(dag.num_ops(), 0);
    }
}
