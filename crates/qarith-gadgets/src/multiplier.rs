//! Shift-and-add modular multiplication and squaring.

use qarith_ir::{Circuit, QubitId, QubitRegister};
use tracing::debug;

use crate::config::ModulusConfig;
use crate::control::controlled_circuit;
use crate::error::SynthResult;
use crate::gadget::{ensure_disjoint, ensure_width, operand_span};
use crate::inverse::inverse_circuit;
use crate::modular::{
    controlled_mod_add, controlled_mod_add_const, double, doubly_controlled_mod_add_const, halve,
};

fn check_operands(
    operation: &'static str,
    registers: &[&QubitRegister],
    extra: &[QubitId],
    cfg: &ModulusConfig,
) -> SynthResult<()> {
    for reg in registers {
        ensure_width(operation, reg, cfg.width())?;
    }
    ensure_disjoint(registers, extra)
}

fn ladder(
    name: &'static str,
    control: Option<QubitId>,
    x: &QubitRegister,
    y: &QubitRegister,
    acc: &QubitRegister,
    z: QubitId,
    cfg: &ModulusConfig,
) -> SynthResult<Circuit> {
    let extra: Vec<QubitId> = std::iter::once(z).chain(control).collect();
    check_operands(name, &[x, y, acc], &extra, cfg)?;

    let mut circuit = Circuit::new(name, operand_span(&[x, y, acc], &extra));
    let step = double(y, cfg)?;
    for i in 0..cfg.value_bits() {
        let add = controlled_mod_add(x[i], y, acc, z, cfg)?;
        match control {
            None => circuit.append(&add)?,
            Some(c) => circuit.append(&controlled_circuit(&add, c)?)?,
        };
        circuit.append(&step)?;
    }
    let undo = halve(y, cfg)?;
    for _ in 0..cfg.value_bits() {
        circuit.append(&undo)?;
    }

    debug!(
        name,
        p = cfg.p(),
        width = cfg.width(),
        gates = circuit.len(),
        "synthesized multiplier"
    );
    Ok(circuit)
}

/// `acc := (acc + x·y) mod p`; `x` and `y` are unchanged.
///
/// Bit `i` of `x` gates adding `2^i·y mod p`, with `y` doubled in place
/// after every step and halved back to its input value at the end.
pub fn multiply(
    x: &QubitRegister,
    y: &QubitRegister,
    acc: &QubitRegister,
    z: QubitId,
    cfg: &ModulusConfig,
) -> SynthResult<Circuit> {
    ladder("multiply", None, x, y, acc, z, cfg)
}

/// [`multiply`] applied only when `control` is 1.
///
/// Only the accumulating additions take the control; the doublings of `y`
/// are undone either way.
pub fn controlled_multiply(
    control: QubitId,
    x: &QubitRegister,
    y: &QubitRegister,
    acc: &QubitRegister,
    z: QubitId,
    cfg: &ModulusConfig,
) -> SynthResult<Circuit> {
    ladder("controlled_multiply", Some(control), x, y, acc, z, cfg)
}

/// `acc := (acc - x·y) mod p`, the exact adjoint of [`multiply`].
pub fn multiply_sub(
    x: &QubitRegister,
    y: &QubitRegister,
    acc: &QubitRegister,
    z: QubitId,
    cfg: &ModulusConfig,
) -> SynthResult<Circuit> {
    let mut circuit = inverse_circuit(&multiply(x, y, acc, z, cfg)?)?;
    circuit.set_name("multiply_sub");
    Ok(circuit)
}

/// `acc := (acc + x²) mod p`.
///
/// Expands `x² = Σ x_j 4^j + Σ_{j<k} x_j x_k 2^(j+k+1)` and adds each term
/// as a constant gated on the bits it depends on, so `x` is never copied.
pub fn square(
    x: &QubitRegister,
    acc: &QubitRegister,
    z: QubitId,
    cfg: &ModulusConfig,
) -> SynthResult<Circuit> {
    check_operands("square", &[x, acc], &[z], cfg)?;

    let mut circuit = Circuit::new("square", operand_span(&[x, acc], &[z]));
    let bits = cfg.value_bits();
    for j in 0..bits {
        for k in j..bits {
            let term = if j == k {
                controlled_mod_add_const(x[j], acc, cfg.pow2(2 * j), z, cfg)?
            } else {
                let value = cfg.pow2(j + k + 1);
                doubly_controlled_mod_add_const(x[j], x[k], acc, value, z, cfg)?
            };
            circuit.append(&term)?;
        }
    }

    debug!(p = cfg.p(), gates = circuit.len(), "synthesized square");
    Ok(circuit)
}
