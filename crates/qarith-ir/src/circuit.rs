//! High-level circuit builder API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// A reversible circuit: an ordered instruction list over a fixed qubit count.
///
/// Every operand of every instruction is below [`Circuit::num_qubits`].
/// Builder methods validate their operands and chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Total qubits addressed by the circuit.
    num_qubits: u32,
    /// Instructions in application order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` wires.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            instructions: vec![],
        }
    }

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the circuit name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the instructions in order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Append a validated instruction.
    pub fn push(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        instruction.validate(self.num_qubits)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply bit flip.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::gate(StandardGate::X, [qubit]))
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::gate(StandardGate::H, [qubit]))
    }

    /// Apply phase rotation diag(1, e^{iθ}).
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::gate(StandardGate::P(theta), [qubit]))
    }

    // =========================================================================
    // Controlled gates
    // =========================================================================

    /// Apply CNOT.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::controlled(StandardGate::X, [control], [target]))
    }

    /// Apply Toffoli.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::controlled(StandardGate::X, [c1, c2], [target]))
    }

    /// Apply X controlled on every qubit in `controls`.
    ///
    /// With no controls this is a plain bit flip.
    pub fn mcx(&mut self, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::controlled(
            StandardGate::X,
            controls.iter().copied(),
            [target],
        ))
    }

    /// Apply controlled phase rotation.
    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::controlled(
            StandardGate::P(theta),
            [control],
            [target],
        ))
    }

    /// Apply a doubly-controlled phase rotation.
    ///
    /// Emitted as two controlled phases of θ/2, a CNOT-conjugated controlled
    /// phase of -θ/2 on `c2`: the phase lands only when `c1 = c2 = 1`.
    pub fn ccp(
        &mut self,
        theta: f64,
        c1: QubitId,
        c2: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        if c1 == c2 {
            return Err(IrError::DuplicateQubit {
                qubit: c1,
                gate_name: Some("ccp".into()),
            });
        }
        let half = theta / 2.0;
        self.cp(half, c1, target)?
            .cp(half, c2, target)?
            .cx(c1, c2)?
            .cp(-half, c2, target)?
            .cx(c1, c2)
    }

    /// Apply controlled Hadamard as an explicit controlled block.
    pub fn ch(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::controlled(StandardGate::H, [control], [target]))
    }

    /// Apply SWAP.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::gate(StandardGate::Swap, [q1, q2]))
    }

    /// Apply controlled SWAP (Fredkin).
    pub fn cswap(&mut self, control: QubitId, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::controlled(
            StandardGate::Swap,
            [control],
            [q1, q2],
        ))
    }

    /// Apply a classical permutation block over `targets` (LSB first).
    pub fn permutation(&mut self, targets: &[QubitId], table: Vec<u64>) -> IrResult<&mut Self> {
        self.push(Instruction::gate(
            StandardGate::Permutation(table),
            targets.iter().copied(),
        ))
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Append every instruction of `other` verbatim.
    ///
    /// `other` must not address more qubits than this circuit.
    pub fn append(&mut self, other: &Circuit) -> IrResult<&mut Self> {
        if other.num_qubits > self.num_qubits {
            return Err(IrError::WidthMismatch {
                expected: self.num_qubits,
                got: other.num_qubits,
            });
        }
        self.instructions.extend(other.instructions.iter().cloned());
        Ok(self)
    }

    /// Return a copy over `num_qubits` wires with every operand rewritten by `map`.
    pub fn remap(&self, num_qubits: u32, map: impl Fn(QubitId) -> QubitId) -> IrResult<Circuit> {
        let mut remapped = Circuit::new(self.name.clone(), num_qubits);
        for inst in &self.instructions {
            remapped.push(Instruction {
                gate: inst.gate.clone(),
                controls: inst.controls.iter().map(|&q| map(q)).collect(),
                targets: inst.targets.iter().map(|&q| map(q)).collect(),
            })?;
        }
        Ok(remapped)
    }

    /// Append `other` with its qubit `i` placed at `positions[i]`.
    pub fn embed(&mut self, other: &Circuit, positions: &[QubitId]) -> IrResult<&mut Self> {
        if positions.len() < other.num_qubits as usize {
            return Err(IrError::WidthMismatch {
                expected: positions.len() as u32,
                got: other.num_qubits,
            });
        }
        let placed = other.remap(self.num_qubits, |q| positions[q.index()])?;
        self.instructions.extend(placed.instructions);
        Ok(self)
    }

    /// Same instructions over a wider qubit space.
    pub fn widened(&self, num_qubits: u32) -> IrResult<Circuit> {
        if num_qubits < self.num_qubits {
            return Err(IrError::WidthMismatch {
                expected: num_qubits,
                got: self.num_qubits,
            });
        }
        Ok(Circuit {
            name: self.name.clone(),
            num_qubits,
            instructions: self.instructions.clone(),
        })
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Number of layers when every instruction is scheduled as early as its
    /// operands allow.
    pub fn depth(&self) -> usize {
        let mut levels = vec![0_usize; self.num_qubits as usize];
        let mut depth = 0;
        for inst in &self.instructions {
            let level = inst
                .qubits()
                .filter_map(|q| levels.get(q.index()).copied())
                .max()
                .unwrap_or(0)
                + 1;
            for q in inst.qubits() {
                if let Some(slot) = levels.get_mut(q.index()) {
                    *slot = level;
                }
            }
            depth = depth.max(level);
        }
        depth
    }

    /// Instruction counts keyed by name (`x`, `cx`, `ccx`, `cp`, ...).
    pub fn gate_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for inst in &self.instructions {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of instructions touching exactly two qubits.
    pub fn two_qubit_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|inst| inst.controls.len() + inst.targets.len() == 2)
            .count()
    }
}
