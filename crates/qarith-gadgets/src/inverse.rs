//! Structural inversion of gates and circuits.

use qarith_ir::{Circuit, Instruction, StandardGate};

use crate::error::SynthResult;

/// Compute the inverse of a gate.
///
/// - X, H and Swap are self-inverse
/// - P(θ)† = P(-θ)
/// - a permutation block inverts to its inverse table
pub fn inverse_gate(gate: &StandardGate) -> StandardGate {
    match gate {
        StandardGate::X | StandardGate::H | StandardGate::Swap => gate.clone(),
        StandardGate::P(theta) => StandardGate::P(-theta),
        StandardGate::Permutation(table) => StandardGate::Permutation(invert_table(table)),
    }
}

/// Compute the inverse of an instruction. Operands are unchanged.
pub fn inverse_instruction(inst: &Instruction) -> Instruction {
    Instruction {
        gate: inverse_gate(&inst.gate),
        controls: inst.controls.clone(),
        targets: inst.targets.clone(),
    }
}

/// Compute the inverse of a circuit: reversed order, every gate inverted.
pub fn inverse_circuit(circuit: &Circuit) -> SynthResult<Circuit> {
    let mut inverse = Circuit::new(format!("{}_inv", circuit.name()), circuit.num_qubits());
    for inst in circuit.instructions().iter().rev() {
        inverse.push(inverse_instruction(inst))?;
    }
    Ok(inverse)
}

fn invert_table(table: &[u64]) -> Vec<u64> {
    let mut inverse = vec![0; table.len()];
    for (input, &image) in table.iter().enumerate() {
        if let Some(slot) = inverse.get_mut(image as usize) {
            *slot = input as u64;
        }
    }
    inverse
}
