//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::qubit::QubitId;

/// Largest register a permutation block may act on.
pub const MAX_PERMUTATION_QUBITS: usize = 20;

/// A gate with its control and target operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate applied to the targets.
    pub gate: StandardGate,
    /// Qubits that must all be 1 for the gate to act.
    pub controls: Vec<QubitId>,
    /// Qubits the gate acts on.
    pub targets: Vec<QubitId>,
}

impl Instruction {
    /// Create an uncontrolled gate instruction.
    pub fn gate(gate: StandardGate, targets: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            gate,
            controls: vec![],
            targets: targets.into_iter().collect(),
        }
    }

    /// Create a controlled gate instruction.
    pub fn controlled(
        gate: StandardGate,
        controls: impl IntoIterator<Item = QubitId>,
        targets: impl IntoIterator<Item = QubitId>,
    ) -> Self {
        Self {
            gate,
            controls: controls.into_iter().collect(),
            targets: targets.into_iter().collect(),
        }
    }

    /// Display name including control prefix, e.g. `cx`, `ccx`, `c3x`.
    pub fn name(&self) -> String {
        match self.controls.len() {
            0 => self.gate.name().to_string(),
            1 => format!("c{}", self.gate.name()),
            2 => format!("cc{}", self.gate.name()),
            n => format!("c{n}{}", self.gate.name()),
        }
    }

    /// All operands, controls first.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.controls.iter().chain(self.targets.iter()).copied()
    }

    /// Check if the instruction touches `qubit`.
    pub fn involves(&self, qubit: QubitId) -> bool {
        self.qubits().any(|q| q == qubit)
    }

    /// Largest operand index, if any.
    pub fn max_qubit(&self) -> Option<QubitId> {
        self.qubits().max()
    }

    /// Validate arity, control limits, operand range and distinctness.
    pub fn validate(&self, num_qubits: u32) -> IrResult<()> {
        let gate_name = || Some(self.name());

        if let StandardGate::Permutation(table) = &self.gate {
            validate_permutation(table)?;
        }

        let expected = self.gate.num_targets();
        if self.targets.len() != expected {
            return Err(IrError::QubitCountMismatch {
                gate_name: self.name(),
                expected,
                got: self.targets.len(),
            });
        }

        if let Some(max) = self.gate.max_controls() {
            if self.controls.len() > max {
                return Err(IrError::UnsupportedControls {
                    gate_name: self.name(),
                    max,
                    got: self.controls.len(),
                });
            }
        }

        let mut seen: Vec<QubitId> = Vec::with_capacity(self.controls.len() + self.targets.len());
        for qubit in self.qubits() {
            if qubit.0 >= num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit,
                    num_qubits,
                    gate_name: gate_name(),
                });
            }
            if seen.contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name(),
                });
            }
            seen.push(qubit);
        }
        Ok(())
    }
}

fn validate_permutation(table: &[u64]) -> IrResult<()> {
    let len = table.len();
    if len < 2 || !len.is_power_of_two() {
        return Err(IrError::InvalidPermutation(format!(
            "table length {len} is not a power of two"
        )));
    }
    if len.trailing_zeros() as usize > MAX_PERMUTATION_QUBITS {
        return Err(IrError::InvalidPermutation(format!(
            "table spans more than {MAX_PERMUTATION_QUBITS} qubits"
        )));
    }
    let mut hit = vec![false; len];
    for &image in table {
        let slot = usize::try_from(image)
            .ok()
            .and_then(|i| hit.get_mut(i))
            .ok_or_else(|| IrError::InvalidPermutation(format!("image {image} out of range")))?;
        if *slot {
            return Err(IrError::InvalidPermutation(format!(
                "image {image} appears twice"
            )));
        }
        *slot = true;
    }
    Ok(())
}
