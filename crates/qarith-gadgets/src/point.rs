//! Reversible elliptic-curve point addition.
//!
//! [`point_add`] maps `|P⟩` to `|P + Q⟩` for a classical point `Q` and any
//! point `P` held in two registers (identity encoded as (0, 0)).
//!
//! The chord formula only holds for inputs where neither the slope nor its
//! uncomputation divides by zero. Those inputs are known at synthesis time
//! (`O`, `-Q`, `Q` and `-2Q`), so each gets an equality flag, the chord
//! path runs only when no flag is set, and flagged inputs are moved to
//! their sums by XOR-ing constants. Because `P ↦ P + Q` is a bijection, a
//! flag is cleared again by testing the output against the expected sum.

use qarith_ir::{Ancilla, Circuit, QubitAllocator, QubitId, QubitRegister};
use tracing::{debug, instrument, trace};

use crate::context::UncomputeContext;
use crate::control::controlled_circuit;
use crate::curve::{AffinePoint, Curve};
use crate::error::SynthResult;
use crate::gadget::{ensure_disjoint, ensure_width, operand_span};
use crate::inverse::inverse_circuit;
use crate::lookup::mod_inverse;
use crate::modular::{controlled_mod_add_const, controlled_negate};
use crate::multiplier::{controlled_multiply, multiply, multiply_sub, square};

/// Number of special-case inputs a single addition may need to flag.
pub const SPECIAL_CASES: usize = 4;

/// A curve point held in two coordinate registers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointRegister {
    /// x coordinate.
    pub x: QubitRegister,
    /// y coordinate.
    pub y: QubitRegister,
}

impl PointRegister {
    /// Allocate both coordinates, `width` qubits each.
    pub fn allocate(alloc: &mut QubitAllocator, width: usize) -> Self {
        Self {
            x: alloc.register("px", width),
            y: alloc.register("py", width),
        }
    }

    /// Both coordinates as one register, x in the low half.
    pub fn joined(&self) -> QubitRegister {
        self.x.concat(&self.y)
    }
}

/// Scratch space borrowed by [`point_add`]. Every qubit is |0⟩ before and
/// after the addition.
#[derive(Debug)]
pub struct PointWorkspace {
    /// Holds the chord slope between stages.
    pub lambda: QubitRegister,
    ancilla: Ancilla,
    control: Ancilla,
    flags: Vec<Ancilla>,
}

impl PointWorkspace {
    /// Allocate a workspace for `width`-qubit coordinates.
    pub fn allocate(alloc: &mut QubitAllocator, width: usize) -> Self {
        Self {
            lambda: alloc.register("lambda", width),
            ancilla: alloc.ancilla(),
            control: alloc.ancilla(),
            flags: alloc.ancillas(SPECIAL_CASES),
        }
    }

    /// Comparison ancilla shared by every modular step.
    pub fn ancilla(&self) -> QubitId {
        self.ancilla.qubit()
    }

    /// Qubit gating the chord path.
    pub fn control(&self) -> QubitId {
        self.control.qubit()
    }

    /// Special-case flags.
    pub fn flags(&self) -> Vec<QubitId> {
        self.flags.iter().map(Ancilla::qubit).collect()
    }

    /// Every single-qubit scratch wire.
    fn scratch(&self) -> Vec<QubitId> {
        let mut qubits = vec![self.ancilla(), self.control()];
        qubits.extend(self.flags());
        qubits
    }

    /// Hand the ancillas back to the allocator.
    pub fn release(self, alloc: &mut QubitAllocator) {
        alloc.release(self.ancilla);
        alloc.release(self.control);
        for flag in self.flags {
            alloc.release(flag);
        }
    }
}

/// Inputs the chord path cannot handle, each paired with its sum with `q`.
pub fn special_cases(curve: &Curve, q: AffinePoint) -> Vec<(AffinePoint, AffinePoint)> {
    let candidates = [
        AffinePoint::Identity,
        curve.neg(q),
        q,
        curve.neg(curve.double(q)),
    ];
    let mut cases: Vec<(AffinePoint, AffinePoint)> = Vec::with_capacity(SPECIAL_CASES);
    for p in candidates {
        if cases.iter().all(|&(seen, _)| seen != p) {
            cases.push((p, curve.add(p, q)));
        }
    }
    cases
}

/// `flag ^= [point == value]`.
fn mark_equal(
    circuit: &mut Circuit,
    point: &PointRegister,
    value: AffinePoint,
    flag: QubitId,
) -> SynthResult<()> {
    let (vx, vy) = value.encode();
    let mut ctx = UncomputeContext::begin(circuit).with_label("equality mask");
    for (reg, v) in [(&point.x, vx), (&point.y, vy)] {
        for (k, q) in reg.iter().enumerate() {
            if (v >> k) & 1 == 0 {
                circuit.x(q)?;
            }
        }
    }
    ctx.seal(circuit);
    circuit.mcx(point.joined().qubits(), flag)?;
    ctx.uncompute(circuit)
}

/// `target ^= NOR(flags)`.
fn mark_none(circuit: &mut Circuit, flags: &[QubitId], target: QubitId) -> SynthResult<()> {
    let mut ctx = UncomputeContext::begin(circuit).with_label("flag complement");
    for &flag in flags {
        circuit.x(flag)?;
    }
    ctx.seal(circuit);
    circuit.mcx(flags, target)?;
    ctx.uncompute(circuit)
}

/// XOR the encoding difference of `from` and `to` into `point` when `flag` is set.
fn move_point(
    circuit: &mut Circuit,
    point: &PointRegister,
    from: AffinePoint,
    to: AffinePoint,
    flag: QubitId,
) -> SynthResult<()> {
    let ((fx, fy), (tx, ty)) = (from.encode(), to.encode());
    for (reg, diff) in [(&point.x, fx ^ tx), (&point.y, fy ^ ty)] {
        for (k, q) in reg.iter().enumerate() {
            if (diff >> k) & 1 == 1 {
                circuit.cx(flag, q)?;
            }
        }
    }
    Ok(())
}

/// `outer · inner · outer⁻¹`.
fn conjugated(width: u32, outer: &Circuit, inner: &Circuit) -> SynthResult<Circuit> {
    let mut circuit = Circuit::new("conjugated", width);
    let mut ctx = UncomputeContext::begin(&circuit);
    circuit.append(outer)?;
    ctx.seal(&circuit);
    circuit.append(inner)?;
    ctx.uncompute(&mut circuit)?;
    Ok(circuit)
}

/// Chord addition of `q` under `control`, valid when `P ∉ {O, ±Q, -2Q}`.
///
/// Stages, writing `(x, y)` for the input and `(a, b)` for `q`:
/// move the origin to `q`, form `λ = (y - b)/(x - a)` in the slope
/// register and clear `y`, turn `x` into `x' = λ² - x - a`, rebuild
/// `y' + b = λ(a - x')`, clear the slope with the same division against
/// the output, then move the origin back. The inverse lookups and the
/// plain multiplies act as the identity when `control` is clear, because
/// the slope register is then 0 and the lookups come in pairs.
fn chord_add(
    curve: &Curve,
    point: &PointRegister,
    q: AffinePoint,
    ws: &PointWorkspace,
    width: u32,
) -> SynthResult<Circuit> {
    let cfg = curve.field();
    let (a, b) = q.encode();
    let (x, y, lambda) = (&point.x, &point.y, &ws.lambda);
    let (z, c) = (ws.ancilla(), ws.control());

    let invert_x = mod_inverse(x, cfg)?.apply()?;
    let neg_a = cfg.neg(a);
    let neg_b = cfg.neg(b);

    let stages: Vec<(&str, Circuit)> = vec![
        ("shift x", controlled_mod_add_const(c, x, neg_a, z, cfg)?),
        ("shift y", controlled_mod_add_const(c, y, neg_b, z, cfg)?),
        (
            "compute slope",
            conjugated(width, &invert_x, &controlled_multiply(c, x, y, lambda, z, cfg)?)?,
        ),
        ("clear y", multiply_sub(x, lambda, y, z, cfg)?),
        ("negate x", controlled_negate(c, x, z, cfg)?),
        (
            "offset x",
            controlled_mod_add_const(c, x, cfg.mul(2, neg_a), z, cfg)?,
        ),
        ("add slope squared", square(lambda, x, z, cfg)?),
        ("negate x'", controlled_negate(c, x, z, cfg)?),
        ("offset x'", controlled_mod_add_const(c, x, a, z, cfg)?),
        ("rebuild y", multiply(x, lambda, y, z, cfg)?),
        (
            "clear slope",
            conjugated(
                width,
                &invert_x,
                &inverse_circuit(&controlled_multiply(c, x, y, lambda, z, cfg)?)?,
            )?,
        ),
        ("restore x", controlled_mod_add_const(c, x, neg_a, z, cfg)?),
        ("restore sign", controlled_negate(c, x, z, cfg)?),
        ("restore y", controlled_mod_add_const(c, y, neg_b, z, cfg)?),
    ];

    let mut circuit = Circuit::new("chord_add", width);
    for (label, stage) in &stages {
        trace!(stage = *label, gates = stage.len(), "point addition stage");
        circuit.append(stage)?;
    }
    Ok(circuit)
}

/// `|P⟩ ↦ |P + q⟩` for every point `P` on `curve`, identity included.
///
/// `point` and the workspace registers are `curve.field().width()` qubits
/// wide. Inputs that are not curve points produce unspecified output.
#[instrument(skip_all, fields(p = curve.field().p(), q = ?q))]
pub fn point_add(
    curve: &Curve,
    point: &PointRegister,
    q: AffinePoint,
    ws: &PointWorkspace,
) -> SynthResult<Circuit> {
    let cfg = curve.field();
    curve.ensure_contains(q)?;
    for reg in [&point.x, &point.y, &ws.lambda] {
        ensure_width("point_add", reg, cfg.width())?;
    }
    let scratch = ws.scratch();
    let registers = [&point.x, &point.y, &ws.lambda];
    ensure_disjoint(&registers, &scratch)?;

    let width = operand_span(&registers, &scratch);
    let mut circuit = Circuit::new("point_add", width);
    if q.is_identity() {
        return Ok(circuit);
    }

    let cases = special_cases(curve, q);
    let flags = ws.flags();
    let flags = &flags[..cases.len()];

    for (&(p, _), &flag) in cases.iter().zip(flags) {
        mark_equal(&mut circuit, point, p, flag)?;
    }
    mark_none(&mut circuit, flags, ws.control())?;
    circuit.append(&chord_add(curve, point, q, ws, width)?)?;
    mark_none(&mut circuit, flags, ws.control())?;
    for (&(p, r), &flag) in cases.iter().zip(flags) {
        move_point(&mut circuit, point, p, r, flag)?;
    }
    for (&(_, r), &flag) in cases.iter().zip(flags) {
        mark_equal(&mut circuit, point, r, flag)?;
    }

    debug!(
        special_cases = cases.len(),
        gates = circuit.len(),
        depth = circuit.depth(),
        "synthesized point addition"
    );
    Ok(circuit)
}

/// [`point_add`] applied only when `control` is 1.
pub fn controlled_point_add(
    control: QubitId,
    curve: &Curve,
    point: &PointRegister,
    q: AffinePoint,
    ws: &PointWorkspace,
) -> SynthResult<Circuit> {
    let mut scratch = ws.scratch();
    scratch.push(control);
    ensure_disjoint(&[&point.x, &point.y, &ws.lambda], &scratch)?;
    let mut circuit = controlled_circuit(&point_add(curve, point, q, ws)?, control)?;
    circuit.set_name("controlled_point_add");
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CurveParams;
    use crate::error::SynthesisError;

    fn curve() -> Curve {
        Curve::new(CurveParams {
            a: 2,
            b: 3,
            modulus: 7,
        })
        .unwrap()
    }

    fn layout() -> (QubitAllocator, PointRegister, PointWorkspace) {
        let mut alloc = QubitAllocator::new();
        let point = PointRegister::allocate(&mut alloc, 4);
        let ws = PointWorkspace::allocate(&mut alloc, 4);
        (alloc, point, ws)
    }

    #[test]
    fn test_special_cases_dedup() {
        let c = curve();
        // Generic point: all four inputs are distinct.
        assert_eq!(special_cases(&c, AffinePoint::new(2, 1)).len(), 4);
        // Order two: -Q = Q and -2Q = O.
        assert_eq!(special_cases(&c, AffinePoint::new(6, 0)).len(), 2);
        // Order three: -2Q = Q.
        assert_eq!(special_cases(&c, AffinePoint::new(3, 1)).len(), 3);
    }

    #[test]
    fn test_identity_addend_is_empty() {
        let (_, point, ws) = layout();
        let circuit = point_add(&curve(), &point, AffinePoint::Identity, &ws).unwrap();
        assert!(circuit.is_empty());
        assert_eq!(circuit.num_qubits(), 18);
    }

    #[test]
    fn test_off_curve_addend_rejected() {
        let (_, point, ws) = layout();
        assert_eq!(
            point_add(&curve(), &point, AffinePoint::new(1, 1), &ws).unwrap_err(),
            SynthesisError::InvalidPoint { x: 1, y: 1 }
        );
    }

    #[test]
    fn test_narrow_registers_rejected() {
        let mut alloc = QubitAllocator::new();
        let point = PointRegister::allocate(&mut alloc, 3);
        let ws = PointWorkspace::allocate(&mut alloc, 3);
        assert!(matches!(
            point_add(&curve(), &point, AffinePoint::new(2, 1), &ws),
            Err(SynthesisError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_workspace_release() {
        let (mut alloc, _, ws) = layout();
        assert_eq!(alloc.live_ancillas(), 6);
        ws.release(&mut alloc);
        assert_eq!(alloc.live_ancillas(), 0);
    }
}
