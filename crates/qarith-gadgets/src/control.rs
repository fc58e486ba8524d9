//! Structural control insertion.
//!
//! Adding a control to a circuit adds it to every instruction. Bit flips,
//! swaps, Hadamards and permutation blocks simply gain another control
//! qubit. Phase rotations are diagonal and capped at one control, so a
//! controlled phase that gains a second control is rewritten as the
//! doubly-controlled phase decomposition.

use qarith_ir::{Circuit, Instruction, QubitId, StandardGate};

use crate::error::{SynthResult, SynthesisError};

/// Append the controlled form of `inst` to `out`.
pub fn push_controlled(out: &mut Circuit, inst: &Instruction, control: QubitId) -> SynthResult<()> {
    if inst.involves(control) {
        return Err(SynthesisError::ConflictingAllocation { qubit: control });
    }
    match (&inst.gate, inst.controls.as_slice()) {
        (StandardGate::P(theta), []) => {
            out.cp(*theta, control, inst.targets[0])?;
        }
        (StandardGate::P(theta), [inner]) => {
            out.ccp(*theta, control, *inner, inst.targets[0])?;
        }
        _ => {
            let mut controls = Vec::with_capacity(inst.controls.len() + 1);
            controls.push(control);
            controls.extend_from_slice(&inst.controls);
            out.push(Instruction {
                gate: inst.gate.clone(),
                controls,
                targets: inst.targets.clone(),
            })?;
        }
    }
    Ok(())
}

/// Circuit that applies `circuit` only when `control` is 1.
///
/// The result is wide enough to address `control`.
pub fn controlled_circuit(circuit: &Circuit, control: QubitId) -> SynthResult<Circuit> {
    let width = circuit.num_qubits().max(control.0 + 1);
    let mut out = Circuit::new(format!("c_{}", circuit.name()), width);
    for inst in circuit.instructions() {
        push_controlled(&mut out, inst, control)?;
    }
    Ok(out)
}
