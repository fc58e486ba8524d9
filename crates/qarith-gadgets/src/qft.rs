//! Fourier basis change over a register.
//!
//! One convention is used everywhere: bits are processed from most to least
//! significant and there is no trailing swap pass. After [`qft`] on a
//! register holding `y`, qubit `t` carries the phase `2π·y / 2^(t+1)`, so
//! adding `2^i` to `y` is a rotation of `π / 2^(t-i)` on every qubit `t >= i`.

use std::f64::consts::PI;

use qarith_ir::{Circuit, QubitId, QubitRegister};
use tracing::trace;

use crate::control::controlled_circuit;
use crate::error::SynthResult;
use crate::gadget::operand_span;
use crate::inverse::inverse_circuit;

/// Rotation that adds `2^i` to a Fourier-encoded value, as seen by qubit `t`.
pub(crate) fn fourier_angle(i: usize, t: usize) -> f64 {
    PI / 2_f64.powi((t - i) as i32)
}

/// Forward transform of `reg` into the Fourier basis.
pub fn qft(reg: &QubitRegister) -> SynthResult<Circuit> {
    let mut circuit = Circuit::new("qft", operand_span(&[reg], &[]));
    for i in (0..reg.len()).rev() {
        circuit.h(reg[i])?;
        for j in (0..i).rev() {
            circuit.cp(fourier_angle(j, i), reg[j], reg[i])?;
        }
    }
    trace!(width = reg.len(), gates = circuit.len(), "qft");
    Ok(circuit)
}

/// Inverse transform, the exact adjoint of [`qft`].
pub fn iqft(reg: &QubitRegister) -> SynthResult<Circuit> {
    let mut circuit = inverse_circuit(&qft(reg)?)?;
    circuit.set_name("iqft");
    Ok(circuit)
}

/// [`qft`] applied only when `control` is 1.
///
/// Hadamards become controlled-H blocks and controlled phases become
/// doubly-controlled phase decompositions.
pub fn controlled_qft(control: QubitId, reg: &QubitRegister) -> SynthResult<Circuit> {
    controlled_circuit(&qft(reg)?, control)
}

/// [`iqft`] applied only when `control` is 1.
pub fn controlled_iqft(control: QubitId, reg: &QubitRegister) -> SynthResult<Circuit> {
    controlled_circuit(&iqft(reg)?, control)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_count() {
        let reg = QubitRegister::contiguous(0, 4);
        let circuit = qft(&reg).unwrap();
        let counts = circuit.gate_counts();
        assert_eq!(counts.get("h"), Some(&4));
        assert_eq!(counts.get("cp"), Some(&6));
    }

    #[test]
    fn test_first_gate_targets_msb() {
        let reg = QubitRegister::contiguous(0, 3);
        let circuit = qft(&reg).unwrap();
        assert_eq!(circuit.instructions()[0].targets, vec![reg[2]]);
    }

    #[test]
    fn test_fourier_angle() {
        assert!((fourier_angle(0, 0) - PI).abs() < 1e-12);
        assert!((fourier_angle(1, 3) - PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_controlled_qft_keeps_single_controls_on_phases() {
        let reg = QubitRegister::contiguous(0, 3);
        let circuit = controlled_qft(QubitId(3), &reg).unwrap();
        assert_eq!(circuit.gate_counts().get("ch"), Some(&3));
        assert!(
            circuit
                .instructions()
                .iter()
                .filter(|i| i.gate.is_diagonal())
                .all(|i| i.controls.len() == 1)
        );
    }
}
