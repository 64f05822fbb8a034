//! Dense statevector evolution.

use num_complex::Complex64;

use maqaoa_hal::{HalError, HalResult};
use maqaoa_ir::{Instruction, ParameterExpression, StandardGate};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Row-major 2x2 unitary.
type Matrix2 = [[Complex64; 2]; 2];

/// `2^n` amplitudes; bit `q` of a basis index is the value of qubit `q`.
pub struct Statevector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl Statevector {
    /// `|0...0⟩` on `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![ZERO; 1 << num_qubits];
        amplitudes[0] = ONE;
        Self {
            amplitudes,
            num_qubits,
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Evolve by one instruction. Measurements and barriers are no-ops here;
    /// sampling happens on the final probabilities.
    pub fn apply(&mut self, instruction: &Instruction) -> HalResult<()> {
        let Some(gate) = instruction.as_gate() else {
            return Ok(());
        };
        let q = |k: usize| instruction.qubits[k].index();
        match gate {
            StandardGate::H => self.apply_h(q(0)),
            StandardGate::X => self.apply_x(q(0)),
            StandardGate::Rx(theta) => self.apply_rx(q(0), angle(theta)?),
            StandardGate::Rz(theta) => self.apply_rz(q(0), angle(theta)?),
            StandardGate::CX => self.apply_cx(q(0), q(1)),
            StandardGate::RZZ(theta) => self.apply_rzz(q(0), q(1), angle(theta)?),
        }
        Ok(())
    }

    /// Apply `m` to every amplitude pair that differs only in `qubit`.
    fn apply_single(&mut self, qubit: usize, m: &Matrix2) {
        let mask = 1 << qubit;
        for i in (0..self.amplitudes.len()).filter(|i| i & mask == 0) {
            let j = i | mask;
            let (a, b) = (self.amplitudes[i], self.amplitudes[j]);
            self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
            self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
        }
    }

    /// Multiply each amplitude by a phase chosen from its basis index.
    fn apply_diagonal(&mut self, phase: impl Fn(usize) -> Complex64) {
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp *= phase(i);
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let s = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        self.apply_single(qubit, &[[s, s], [s, -s]]);
    }

    fn apply_x(&mut self, qubit: usize) {
        self.apply_single(qubit, &[[ZERO, ONE], [ONE, ZERO]]);
    }

    fn apply_rx(&mut self, qubit: usize, theta: f64) {
        let c = Complex64::new((theta / 2.0).cos(), 0.0);
        let s = Complex64::new(0.0, -(theta / 2.0).sin());
        self.apply_single(qubit, &[[c, s], [s, c]]);
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let (down, up) = half_phases(theta);
        self.apply_diagonal(|i| if i & mask == 0 { down } else { up });
    }

    fn apply_cx(&mut self, control: usize, target: usize) {
        let (c, t) = (1 << control, 1 << target);
        for i in 0..self.amplitudes.len() {
            if i & c != 0 && i & t == 0 {
                self.amplitudes.swap(i, i | t);
            }
        }
    }

    /// Phase depends only on the parity of the two qubits.
    fn apply_rzz(&mut self, a: usize, b: usize, theta: f64) {
        let mask = (1 << a) | (1 << b);
        let (even, odd) = half_phases(theta);
        self.apply_diagonal(|i| {
            if (i & mask).count_ones() % 2 == 0 {
                even
            } else {
                odd
            }
        });
    }

    /// Born-rule probability of every basis index.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }
}

/// `(e^{-iθ/2}, e^{iθ/2})`.
fn half_phases(theta: f64) -> (Complex64, Complex64) {
    (
        Complex64::from_polar(1.0, -theta / 2.0),
        Complex64::from_polar(1.0, theta / 2.0),
    )
}

fn angle(expr: &ParameterExpression) -> HalResult<f64> {
    expr.as_f64()
        .ok_or_else(|| HalError::InvalidCircuit(format!("unbound parameter '{expr}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use maqaoa_ir::QubitId;
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    fn close(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_starts_in_ground_state() {
        let sv = Statevector::new(2);
        assert_eq!(sv.num_qubits(), 2);
        assert!(close(sv.amplitudes[0], ONE));
        assert!(sv.amplitudes[1..].iter().all(|a| a.norm() < 1e-12));
    }

    #[test]
    fn test_entangled_pair() {
        let mut sv = Statevector::new(2);
        sv.apply_h(0);
        sv.apply_cx(0, 1);

        let s = Complex64::new(FRAC_1_SQRT_2, 0.0);
        assert!(close(sv.amplitudes[0b00], s));
        assert!(close(sv.amplitudes[0b01], ZERO));
        assert!(close(sv.amplitudes[0b10], ZERO));
        assert!(close(sv.amplitudes[0b11], s));
    }

    #[test]
    fn test_x_and_rx_pi_flip_the_same_qubit() {
        let mut a = Statevector::new(3);
        a.apply_x(1);
        let mut b = Statevector::new(3);
        b.apply_rx(1, PI);

        assert!((a.probabilities()[0b010] - 1.0).abs() < 1e-12);
        assert!((b.probabilities()[0b010] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cx_rz_cx_matches_rzz() {
        let prepare = |sv: &mut Statevector| {
            sv.apply_h(0);
            sv.apply_rx(1, 0.7);
        };

        let mut ladder = Statevector::new(2);
        prepare(&mut ladder);
        ladder.apply_cx(0, 1);
        ladder.apply_rz(1, 0.9);
        ladder.apply_cx(0, 1);

        let mut native = Statevector::new(2);
        prepare(&mut native);
        native.apply_rzz(0, 1, 0.9);

        for (x, y) in ladder.amplitudes.iter().zip(&native.amplitudes) {
            assert!(close(*x, *y));
        }
    }

    #[test]
    fn test_diagonal_gates_keep_populations() {
        let mut sv = Statevector::new(2);
        sv.apply_h(0);
        sv.apply_h(1);
        let before = sv.probabilities();
        sv.apply_rzz(0, 1, 1.3);
        sv.apply_rz(0, 0.4);
        for (p, q) in before.iter().zip(sv.probabilities()) {
            assert!((p - q).abs() < 1e-12);
        }
    }

    #[test]
    fn test_unbound_angle_rejected() {
        let mut sv = Statevector::new(1);
        let inst = Instruction::single_qubit_gate(
            StandardGate::Rx(ParameterExpression::symbol("params[0]")),
            QubitId(0),
        );
        assert!(matches!(sv.apply(&inst), Err(HalError::InvalidCircuit(_))));
    }
}
