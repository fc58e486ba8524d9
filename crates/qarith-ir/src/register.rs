//! Qubit registers holding unsigned integers.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// An ordered group of qubits representing an unsigned integer.
///
/// Bit `i` of the value lives on `qubits[i]`: index 0 is the least
/// significant bit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QubitRegister {
    /// The qubits in this register, ordered from LSB to MSB.
    qubits: Vec<QubitId>,
    /// Label for this register (for debugging).
    label: Option<String>,
}

impl QubitRegister {
    /// Create a register from existing qubits.
    pub fn from_qubits(qubits: Vec<QubitId>) -> Self {
        Self {
            qubits,
            label: None,
        }
    }

    /// Register over the contiguous wires `start..start + len`.
    pub fn contiguous(start: u32, len: u32) -> Self {
        Self::from_qubits((start..start + len).map(QubitId).collect())
    }

    /// Create a register with a label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the number of qubits in this register.
    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    /// Check if the register is empty.
    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    /// Get the qubits in this register.
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Get a specific qubit by index.
    pub fn qubit(&self, index: usize) -> Option<QubitId> {
        self.qubits.get(index).copied()
    }

    /// Get the LSB qubit.
    pub fn lsb(&self) -> Option<QubitId> {
        self.qubits.first().copied()
    }

    /// Get the MSB qubit.
    pub fn msb(&self) -> Option<QubitId> {
        self.qubits.last().copied()
    }

    /// Get the label if set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Check if `qubit` belongs to this register.
    pub fn contains(&self, qubit: QubitId) -> bool {
        self.qubits.contains(&qubit)
    }

    /// Largest wire index in the register.
    pub fn max_index(&self) -> Option<u32> {
        self.qubits.iter().map(|q| q.0).max()
    }

    /// Split the register at an index, returning (lower, upper).
    pub fn split_at(&self, index: usize) -> (QubitRegister, QubitRegister) {
        let (lower, upper) = self.qubits.split_at(index.min(self.qubits.len()));
        (
            QubitRegister::from_qubits(lower.to_vec()),
            QubitRegister::from_qubits(upper.to_vec()),
        )
    }

    /// Concatenate two registers, `self` supplying the low bits.
    pub fn concat(&self, other: &QubitRegister) -> QubitRegister {
        let mut qubits = self.qubits.clone();
        qubits.extend_from_slice(&other.qubits);
        QubitRegister::from_qubits(qubits)
    }

    /// Iterate over qubits from LSB to MSB.
    pub fn iter(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.qubits.iter().copied()
    }
}

impl Index<usize> for QubitRegister {
    type Output = QubitId;

    fn index(&self, index: usize) -> &QubitId {
        &self.qubits[index]
    }
}

impl<'a> IntoIterator for &'a QubitRegister {
    type Item = QubitId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, QubitId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.qubits.iter().copied()
    }
}

/// Check that no qubit is claimed twice across `registers` and `qubits`.
///
/// Reports the first shared wire as [`IrError::DuplicateQubit`].
pub fn check_disjoint(registers: &[&QubitRegister], qubits: &[QubitId]) -> IrResult<()> {
    let mut seen = rustc_hash::FxHashSet::default();
    let all = registers
        .iter()
        .flat_map(|r| r.iter())
        .chain(qubits.iter().copied());
    for qubit in all {
        if !seen.insert(qubit) {
            return Err(IrError::DuplicateQubit {
                qubit,
                gate_name: None,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lsb_msb() {
        let reg = QubitRegister::contiguous(3, 4).with_label("x");
        assert_eq!(reg.len(), 4);
        assert_eq!(reg.lsb(), Some(QubitId(3)));
        assert_eq!(reg.msb(), Some(QubitId(6)));
        assert_eq!(reg[1], QubitId(4));
        assert_eq!(reg.label(), Some("x"));
        assert_eq!(reg.max_index(), Some(6));
    }

    #[test]
    fn test_split_concat() {
        let reg = QubitRegister::contiguous(0, 5);
        let (low, high) = reg.split_at(2);
        assert_eq!(low.len(), 2);
        assert_eq!(high.len(), 3);
        assert_eq!(low.concat(&high), reg);
    }

    #[test]
    fn test_check_disjoint() {
        let a = QubitRegister::contiguous(0, 3);
        let b = QubitRegister::contiguous(3, 3);
        assert!(check_disjoint(&[&a, &b], &[QubitId(6)]).is_ok());
        assert!(matches!(
            check_disjoint(&[&a, &b], &[QubitId(2)]),
            Err(IrError::DuplicateQubit { qubit: QubitId(2), .. })
        ));
    }
}
