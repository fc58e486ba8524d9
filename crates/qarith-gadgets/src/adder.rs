//! Fourier-basis adders.
//!
//! The target register is moved into the Fourier basis, each set bit `i` of
//! the addend becomes a rotation of `π / 2^(t-i)` on target qubit `t >= i`,
//! and the register is moved back. Addition is modulo `2^len(y)`.

use qarith_ir::{Circuit, QubitId, QubitRegister};
use tracing::debug;

use crate::error::{SynthResult, SynthesisError};
use crate::gadget::{ensure_disjoint, operand_span};
use crate::inverse::inverse_circuit;
use crate::qft::{fourier_angle, iqft, qft};

/// Which qubits gate each rotation of a constant addition.
#[derive(Debug, Clone, Copy)]
enum Gating {
    None,
    Single(QubitId),
    Double(QubitId, QubitId),
}

impl Gating {
    fn qubits(self) -> Vec<QubitId> {
        match self {
            Gating::None => vec![],
            Gating::Single(c) => vec![c],
            Gating::Double(c1, c2) => vec![c1, c2],
        }
    }
}

fn check_addend(x: &QubitRegister, y: &QubitRegister) -> SynthResult<()> {
    if x.len() > y.len() {
        return Err(SynthesisError::DimensionMismatch {
            operation: "add",
            expected: y.len(),
            got: x.len(),
        });
    }
    Ok(())
}

/// Wrap `body` between the forward and inverse transform of `y`.
fn in_fourier_basis(
    name: &str,
    y: &QubitRegister,
    width: u32,
    body: impl FnOnce(&mut Circuit) -> SynthResult<()>,
) -> SynthResult<Circuit> {
    let mut circuit = Circuit::new(name, width);
    circuit.append(&qft(y)?)?;
    body(&mut circuit)?;
    circuit.append(&iqft(y)?)?;
    Ok(circuit)
}

fn register_add(
    name: &str,
    control: Option<QubitId>,
    x: &QubitRegister,
    y: &QubitRegister,
) -> SynthResult<Circuit> {
    check_addend(x, y)?;
    let extra: Vec<QubitId> = control.into_iter().collect();
    ensure_disjoint(&[x, y], &extra)?;

    let width = operand_span(&[x, y], &extra);
    let circuit = in_fourier_basis(name, y, width, |circuit| {
        for i in 0..x.len() {
            for t in i..y.len() {
                let theta = fourier_angle(i, t);
                match control {
                    None => circuit.cp(theta, x[i], y[t])?,
                    Some(c) => circuit.ccp(theta, c, x[i], y[t])?,
                };
            }
        }
        Ok(())
    })?;
    debug!(name, width = y.len(), gates = circuit.len(), "synthesized adder");
    Ok(circuit)
}

fn constant_add(name: &str, gating: Gating, y: &QubitRegister, value: u64) -> SynthResult<Circuit> {
    let controls = gating.qubits();
    ensure_disjoint(&[y], &controls)?;

    let width = operand_span(&[y], &controls);
    let circuit = in_fourier_basis(name, y, width, |circuit| {
        for i in (0..y.len()).filter(|&i| i < 64 && (value >> i) & 1 == 1) {
            for t in i..y.len() {
                let theta = fourier_angle(i, t);
                match gating {
                    Gating::None => circuit.p(theta, y[t])?,
                    Gating::Single(c) => circuit.cp(theta, c, y[t])?,
                    Gating::Double(c1, c2) => circuit.ccp(theta, c1, c2, y[t])?,
                };
            }
        }
        Ok(())
    })?;
    debug!(
        name,
        width = y.len(),
        value,
        gates = circuit.len(),
        "synthesized constant adder"
    );
    Ok(circuit)
}

/// `y := y + x mod 2^len(y)`; `x` is unchanged and may be narrower than `y`.
pub fn add(x: &QubitRegister, y: &QubitRegister) -> SynthResult<Circuit> {
    register_add("add", None, x, y)
}

/// `y := y - x mod 2^len(y)`, the exact adjoint of [`add`].
pub fn subtract(x: &QubitRegister, y: &QubitRegister) -> SynthResult<Circuit> {
    let mut circuit = inverse_circuit(&add(x, y)?)?;
    circuit.set_name("subtract");
    Ok(circuit)
}

/// [`add`] applied only when `control` is 1.
pub fn controlled_add(
    control: QubitId,
    x: &QubitRegister,
    y: &QubitRegister,
) -> SynthResult<Circuit> {
    register_add("controlled_add", Some(control), x, y)
}

/// `y := y + value mod 2^len(y)`.
///
/// Rotations are emitted only for the set bits of `value`; no qubit holds
/// the constant.
pub fn add_const(y: &QubitRegister, value: u64) -> SynthResult<Circuit> {
    constant_add("add_const", Gating::None, y, value)
}

/// `y := y - value mod 2^len(y)`, the exact adjoint of [`add_const`].
pub fn subtract_const(y: &QubitRegister, value: u64) -> SynthResult<Circuit> {
    let mut circuit = inverse_circuit(&add_const(y, value)?)?;
    circuit.set_name("subtract_const");
    Ok(circuit)
}

/// [`add_const`] applied only when `control` is 1.
pub fn controlled_add_const(
    control: QubitId,
    y: &QubitRegister,
    value: u64,
) -> SynthResult<Circuit> {
    constant_add("controlled_add_const", Gating::Single(control), y, value)
}

/// [`add_const`] applied only when both controls are 1.
pub fn doubly_controlled_add_const(
    c1: QubitId,
    c2: QubitId,
    y: &QubitRegister,
    value: u64,
) -> SynthResult<Circuit> {
    if c1 == c2 {
        return Err(SynthesisError::ConflictingAllocation { qubit: c1 });
    }
    constant_add("doubly_controlled_add_const", Gating::Double(c1, c2), y, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wider_addend_rejected() {
        let x = QubitRegister::contiguous(0, 4);
        let y = QubitRegister::contiguous(4, 3);
        assert!(matches!(
            add(&x, &y),
            Err(SynthesisError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_overlapping_registers_rejected() {
        let x = QubitRegister::contiguous(0, 3);
        let y = QubitRegister::contiguous(2, 3);
        assert_eq!(
            add(&x, &y).unwrap_err(),
            SynthesisError::ConflictingAllocation { qubit: QubitId(2) }
        );
    }

    #[test]
    fn test_const_emits_only_set_bits() {
        let y = QubitRegister::contiguous(0, 4);
        let zero = add_const(&y, 0).unwrap();
        let one = add_const(&y, 1).unwrap();
        let qft_len = qft(&y).unwrap().len();
        assert_eq!(zero.len(), 2 * qft_len);
        assert_eq!(one.len(), 2 * qft_len + 4);
        // Bit 3 touches only the top qubit.
        let eight = add_const(&y, 8).unwrap();
        assert_eq!(eight.len(), 2 * qft_len + 1);
    }

    #[test]
    fn test_subtract_is_adjoint() {
        let x = QubitRegister::contiguous(0, 2);
        let y = QubitRegister::contiguous(2, 3);
        let fwd = add(&x, &y).unwrap();
        let sub = subtract(&x, &y).unwrap();
        assert_eq!(fwd.len(), sub.len());
        let last = fwd.instructions().last().unwrap();
        assert_eq!(
            sub.instructions()[0],
            crate::inverse::inverse_instruction(last)
        );
    }

    #[test]
    fn test_doubly_controlled_needs_distinct_controls() {
        let y = QubitRegister::contiguous(0, 3);
        assert!(doubly_controlled_add_const(QubitId(3), QubitId(3), &y, 1).is_err());
    }
}
