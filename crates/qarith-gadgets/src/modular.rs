//! Arithmetic modulo `p` on registers holding residues in `[0, p)`.
//!
//! Every reduction uses the same shape around an inner addition `A`:
//!
//! 1. `A`, then subtract `p` by adding `2^w - p` with wraparound
//! 2. copy the sign (top) bit into the ancilla `z`
//! 3. add `p` back when `z` is set
//! 4. undo `A`; the top bit is now set exactly when no reduction happened
//! 5. clear `z` with an inverted CNOT from the top bit
//! 6. redo `A`
//!
//! Inputs must already be reduced. Registers are [`ModulusConfig::width`]
//! qubits wide and `z` starts and ends at 0.

use qarith_ir::{Circuit, QubitId, QubitRegister};
use tracing::debug;

use crate::adder::{
    add, add_const, controlled_add, controlled_add_const, doubly_controlled_add_const,
};
use crate::config::ModulusConfig;
use crate::control::controlled_circuit;
use crate::error::SynthResult;
use crate::gadget::{ensure_disjoint, ensure_width, operand_span};
use crate::inverse::inverse_circuit;

/// Conditional reduction around `inner`, which adds something below `p` to `y`.
fn reduce_around(
    name: &'static str,
    inner: &Circuit,
    y: &QubitRegister,
    z: QubitId,
    cfg: &ModulusConfig,
) -> SynthResult<Circuit> {
    let top = y[y.len() - 1];
    let width = inner.num_qubits().max(operand_span(&[y], &[z]));

    let mut circuit = Circuit::new(name, width);
    circuit
        .append(inner)?
        .append(&add_const(y, cfg.wrap_subtrahend())?)?
        .cx(top, z)?
        .append(&controlled_add_const(z, y, cfg.p())?)?
        .append(&inverse_circuit(inner)?)?
        .x(top)?
        .cx(top, z)?
        .x(top)?
        .append(inner)?;

    debug!(
        name,
        p = cfg.p(),
        width = cfg.width(),
        gates = circuit.len(),
        "synthesized modular operation"
    );
    Ok(circuit)
}

/// `y := (x + y) mod p`.
pub fn mod_add(
    x: &QubitRegister,
    y: &QubitRegister,
    z: QubitId,
    cfg: &ModulusConfig,
) -> SynthResult<Circuit> {
    ensure_width("mod_add", x, cfg.width())?;
    ensure_width("mod_add", y, cfg.width())?;
    ensure_disjoint(&[x, y], &[z])?;
    reduce_around("mod_add", &add(x, y)?, y, z, cfg)
}

/// `y := (y - x) mod p`, the exact adjoint of [`mod_add`].
pub fn mod_sub(
    x: &QubitRegister,
    y: &QubitRegister,
    z: QubitId,
    cfg: &ModulusConfig,
) -> SynthResult<Circuit> {
    let mut circuit = inverse_circuit(&mod_add(x, y, z, cfg)?)?;
    circuit.set_name("mod_sub");
    Ok(circuit)
}

/// [`mod_add`] applied only when `control` is 1.
///
/// Only the inner addition is controlled: with the control clear, the
/// reduction of `y + 0` is already the identity and leaves `z` clean.
pub fn controlled_mod_add(
    control: QubitId,
    x: &QubitRegister,
    y: &QubitRegister,
    z: QubitId,
    cfg: &ModulusConfig,
) -> SynthResult<Circuit> {
    ensure_width("controlled_mod_add", x, cfg.width())?;
    ensure_width("controlled_mod_add", y, cfg.width())?;
    ensure_disjoint(&[x, y], &[z, control])?;
    reduce_around(
        "controlled_mod_add",
        &controlled_add(control, x, y)?,
        y,
        z,
        cfg,
    )
}

/// `y := (y + value) mod p` for a constant `value`.
pub fn mod_add_const(
    y: &QubitRegister,
    value: u64,
    z: QubitId,
    cfg: &ModulusConfig,
) -> SynthResult<Circuit> {
    ensure_width("mod_add_const", y, cfg.width())?;
    ensure_disjoint(&[y], &[z])?;
    let value = value % cfg.p();
    reduce_around("mod_add_const", &add_const(y, value)?, y, z, cfg)
}

/// [`mod_add_const`] applied only when `control` is 1.
pub fn controlled_mod_add_const(
    control: QubitId,
    y: &QubitRegister,
    value: u64,
    z: QubitId,
    cfg: &ModulusConfig,
) -> SynthResult<Circuit> {
    ensure_width("controlled_mod_add_const", y, cfg.width())?;
    ensure_disjoint(&[y], &[z, control])?;
    let value = value % cfg.p();
    reduce_around(
        "controlled_mod_add_const",
        &controlled_add_const(control, y, value)?,
        y,
        z,
        cfg,
    )
}

/// [`mod_add_const`] applied only when both controls are 1.
pub fn doubly_controlled_mod_add_const(
    c1: QubitId,
    c2: QubitId,
    y: &QubitRegister,
    value: u64,
    z: QubitId,
    cfg: &ModulusConfig,
) -> SynthResult<Circuit> {
    ensure_width("doubly_controlled_mod_add_const", y, cfg.width())?;
    ensure_disjoint(&[y], &[z, c1, c2])?;
    let value = value % cfg.p();
    reduce_around(
        "doubly_controlled_mod_add_const",
        &doubly_controlled_add_const(c1, c2, y, value)?,
        y,
        z,
        cfg,
    )
}

/// `x := -x mod 2^w`: flip every bit, then add one.
fn twos_complement(x: &QubitRegister) -> SynthResult<Circuit> {
    let mut circuit = Circuit::new("twos_complement", operand_span(&[x], &[]));
    for q in x {
        circuit.x(q)?;
    }
    circuit.append(&add_const(x, 1)?)?;
    Ok(circuit)
}

/// `x := (p - x) mod p`, in place, with `z` as a clean ancilla.
///
/// Two's complement gives `2^w - x`, whose top bit is set for every
/// non-zero residue; that bit gates adding `p`, and a second complement
/// exposes the sign needed to clear `z`. Zero passes through untouched.
pub fn negate(x: &QubitRegister, z: QubitId, cfg: &ModulusConfig) -> SynthResult<Circuit> {
    ensure_width("negate", x, cfg.width())?;
    ensure_disjoint(&[x], &[z])?;

    let top = x[x.len() - 1];
    let complement = twos_complement(x)?;
    let mut circuit = Circuit::new("negate", operand_span(&[x], &[z]));
    circuit
        .append(&complement)?
        .cx(top, z)?
        .append(&controlled_add_const(z, x, cfg.p())?)?
        .append(&complement)?
        .cx(top, z)?
        .append(&complement)?;

    debug!(p = cfg.p(), gates = circuit.len(), "synthesized negate");
    Ok(circuit)
}

/// [`negate`] applied only when `control` is 1.
pub fn controlled_negate(
    control: QubitId,
    x: &QubitRegister,
    z: QubitId,
    cfg: &ModulusConfig,
) -> SynthResult<Circuit> {
    ensure_disjoint(&[x], &[z, control])?;
    let mut circuit = controlled_circuit(&negate(x, z, cfg)?, control)?;
    circuit.set_name("controlled_negate");
    Ok(circuit)
}

/// `x := 2x mod p`, in place and without an ancilla.
///
/// A rotation of the register towards the top doubles `x` (the top bit of a
/// residue is 0). Subtracting `p` then leaves the sign in the top bit; when
/// it is set, `p` is added back to the low bits. For odd `p` the parity of
/// the result tells the two cases apart, which clears the top bit again.
pub fn double(x: &QubitRegister, cfg: &ModulusConfig) -> SynthResult<Circuit> {
    ensure_width("double", x, cfg.width())?;
    ensure_disjoint(&[x], &[])?;

    let n = x.len();
    let (top, low_bit) = (x[n - 1], x[0]);
    let (low, _) = x.split_at(n - 1);

    let mut circuit = Circuit::new("double", operand_span(&[x], &[]));
    for i in (0..n - 1).rev() {
        circuit.swap(x[i], x[i + 1])?;
    }
    circuit
        .append(&add_const(x, cfg.wrap_subtrahend())?)?
        .append(&controlled_add_const(top, &low, cfg.p())?)?
        .x(low_bit)?
        .cx(low_bit, top)?
        .x(low_bit)?;

    debug!(p = cfg.p(), gates = circuit.len(), "synthesized double");
    Ok(circuit)
}

/// `x := x / 2 mod p`, the exact adjoint of [`double`].
pub fn halve(x: &QubitRegister, cfg: &ModulusConfig) -> SynthResult<Circuit> {
    let mut circuit = inverse_circuit(&double(x, cfg)?)?;
    circuit.set_name("halve");
    Ok(circuit)
}
