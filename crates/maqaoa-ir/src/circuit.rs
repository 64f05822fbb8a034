//! Fluent circuit builder over [`CircuitDag`].

use std::collections::BTreeSet;
use std::fmt;

use crate::dag::CircuitDag;
use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::parameter::{ParameterExpression, ParameterVector};
use crate::qubit::{ClbitId, QubitId};

/// A named circuit over `0..num_qubits` qubits and `0..num_clbits` bits.
///
/// Builder methods return `IrResult<&mut Self>`, so construction chains
/// with `?`:
///
/// ```rust
/// # use maqaoa_ir::{Circuit, QubitId};
/// let mut c = Circuit::with_size("pair", 2, 2);
/// c.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?.measure_all()?;
/// # Ok::<(), maqaoa_ir::IrError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Circuit {
    name: String,
    qubits: Vec<QubitId>,
    clbits: Vec<ClbitId>,
    dag: CircuitDag,
}

impl Circuit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: Vec::new(),
            clbits: Vec::new(),
            dag: CircuitDag::new(),
        }
    }

    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        (0..num_qubits).for_each(|_| {
            circuit.add_qubit();
        });
        (0..num_clbits).for_each(|_| {
            circuit.add_clbit();
        });
        circuit
    }

    /// Append a qubit wire and return its id.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.qubits.len() as u32);
        self.qubits.push(id);
        self.dag.add_qubit(id);
        id
    }

    /// Append a classical wire and return its id.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.clbits.len() as u32);
        self.clbits.push(id);
        self.dag.add_clbit(id);
        id
    }

    fn push(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.dag.apply(instruction)?;
        Ok(self)
    }

    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    pub fn rx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(
            StandardGate::Rx(theta.into()),
            qubit,
        ))
    }

    pub fn rz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(
            StandardGate::Rz(theta.into()),
            qubit,
        ))
    }

    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    pub fn rzz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        a: QubitId,
        b: QubitId,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(
            StandardGate::RZZ(theta.into()),
            a,
            b,
        ))
    }

    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.push(Instruction::measure(qubit, clbit))
    }

    /// Measure qubit `i` into bit `i`, adding bits as needed.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        while self.clbits.len() < self.qubits.len() {
            self.add_clbit();
        }
        for i in 0..self.qubits.len() {
            let (qubit, clbit) = (self.qubits[i], self.clbits[i]);
            self.dag.apply(Instruction::measure(qubit, clbit))?;
        }
        Ok(self)
    }

    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.push(Instruction::barrier(qubits))
    }

    /// Barrier across every qubit.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits = self.qubits.clone();
        self.barrier(qubits)
    }

    /// Sorted names of the symbols still present.
    pub fn parameter_names(&self) -> BTreeSet<String> {
        self.dag
            .ops()
            .filter_map(|inst| inst.as_gate()?.angle()?.symbol_name())
            .map(str::to_owned)
            .collect()
    }

    pub fn num_parameters(&self) -> usize {
        self.parameter_names().len()
    }

    pub fn is_parameterized(&self) -> bool {
        self.dag.ops().any(Instruction::is_parameterized)
    }

    /// Copy of this circuit with `values[i]` substituted for `params[i]`.
    ///
    /// `self` is left untouched so a template can be bound repeatedly.
    /// Fails on a length mismatch, a non-finite value, or a symbol that
    /// `params` does not cover.
    pub fn assign_parameters(&self, params: &ParameterVector, values: &[f64]) -> IrResult<Self> {
        let bindings = params.bindings(values)?;
        let mut bound = self.clone();
        for inst in bound.dag.ops_mut() {
            if let InstructionKind::Gate(gate) = &mut inst.kind {
                if let Some(theta) = gate.angle_mut() {
                    *theta = theta.resolve(&bindings);
                }
            }
        }
        match bound.parameter_names().pop_first() {
            Some(name) => Err(IrError::UnboundParameter(name)),
            None => Ok(bound),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Layers of gates and measurements; barriers do not count.
    pub fn depth(&self) -> IrResult<usize> {
        self.dag.depth()
    }

    pub fn dag(&self) -> &CircuitDag {
        &self.dag
    }

    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    pub fn clbits(&self) -> &[ClbitId] {
        &self.clbits
    }
}

/// Header line, then one indented instruction per line in execution order.
impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "circuit {} ({} qubits, {} clbits)",
            self.name,
            self.num_qubits(),
            self.num_clbits()
        )?;
        for (_, inst) in self.dag.topological_ops().map_err(|_| fmt::Error)? {
            writeln!(f, "  {inst}")?;
        }
        Ok(())
    }
}
