//! Gates used by the multi-angle ansatz.
//!
//! The set is deliberately small: Hadamards prepare `|+⟩^n`, a
//! `cx · rz · cx` ladder realizes each edge term, and `rx` is the mixer.
//! `X` and `RZZ` exist for test states and for checking the ladder
//! against the native two-qubit rotation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parameter::ParameterExpression;

/// A gate and, for rotations, its angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gate", content = "angle", rename_all = "lowercase")]
pub enum StandardGate {
    /// Hadamard.
    H,
    /// Bit flip.
    X,
    /// `exp(-i θ/2 X)`.
    Rx(ParameterExpression),
    /// `exp(-i θ/2 Z)`.
    Rz(ParameterExpression),
    /// CNOT, control first.
    CX,
    /// `exp(-i θ/2 Z⊗Z)`.
    RZZ(ParameterExpression),
}

impl StandardGate {
    /// Lowercase mnemonic and arity.
    const fn signature(&self) -> (&'static str, u32) {
        match self {
            Self::H => ("h", 1),
            Self::X => ("x", 1),
            Self::Rx(_) => ("rx", 1),
            Self::Rz(_) => ("rz", 1),
            Self::CX => ("cx", 2),
            Self::RZZ(_) => ("rzz", 2),
        }
    }

    /// Lowercase mnemonic, as listed in executor gate sets.
    pub const fn name(&self) -> &'static str {
        self.signature().0
    }

    /// Qubits the gate acts on.
    pub const fn num_qubits(&self) -> u32 {
        self.signature().1
    }

    /// Rotation angle, or `None` for fixed gates.
    pub fn angle(&self) -> Option<&ParameterExpression> {
        match self {
            Self::Rx(theta) | Self::Rz(theta) | Self::RZZ(theta) => Some(theta),
            Self::H | Self::X | Self::CX => None,
        }
    }

    /// Mutable rotation angle, used when binding a template.
    pub fn angle_mut(&mut self) -> Option<&mut ParameterExpression> {
        match self {
            Self::Rx(theta) | Self::Rz(theta) | Self::RZZ(theta) => Some(theta),
            Self::H | Self::X | Self::CX => None,
        }
    }

    /// True while the angle still mentions a symbol.
    pub fn is_symbolic(&self) -> bool {
        self.angle().is_some_and(ParameterExpression::is_symbolic)
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        if let Some(theta) = self.angle() {
            write!(f, "({theta})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::Rz(ParameterExpression::constant(0.2)).num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::RZZ(ParameterExpression::constant(0.1)).num_qubits(), 2);
    }

    #[test]
    fn test_symbolic_angles() {
        assert!(!StandardGate::X.is_symbolic());
        assert!(!StandardGate::Rx(ParameterExpression::constant(1.0)).is_symbolic());
        assert!(StandardGate::Rx(ParameterExpression::symbol("beta")).is_symbolic());
    }

    #[test]
    fn test_angle_mut_binds_in_place() {
        let mut gate = StandardGate::Rz(ParameterExpression::symbol("g"));
        if let Some(theta) = gate.angle_mut() {
            *theta = theta.bind("g", 0.5);
        }
        assert_eq!(gate.angle().and_then(ParameterExpression::as_f64), Some(0.5));
        assert!(StandardGate::CX.angle().is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(StandardGate::CX.to_string(), "cx");
        assert_eq!(
            StandardGate::Rx(ParameterExpression::symbol("params[0]")).to_string(),
            "rx(params[0])"
        );
    }
}
