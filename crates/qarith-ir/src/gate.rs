//! Reversible gate types.

use serde::{Deserialize, Serialize};

/// Gates understood by the IR.
///
/// Controls are not part of the gate: an [`Instruction`](crate::Instruction)
/// pairs a gate with any number of control qubits, so `X` with one control is
/// a CNOT and with two a Toffoli.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Bit flip.
    X,
    /// Hadamard basis change.
    H,
    /// Phase rotation diag(1, e^{iθ}).
    P(f64),
    /// Exchange of two qubits.
    Swap,
    /// Classical reversible block: basis state `v` of the target register
    /// maps to `table[v]`.
    Permutation(Vec<u64>),
}

impl StandardGate {
    /// Get the name of the gate.
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::H => "h",
            StandardGate::P(_) => "p",
            StandardGate::Swap => "swap",
            StandardGate::Permutation(_) => "perm",
        }
    }

    /// Number of target qubits the gate acts on.
    pub fn num_targets(&self) -> usize {
        match self {
            StandardGate::X | StandardGate::H | StandardGate::P(_) => 1,
            StandardGate::Swap => 2,
            StandardGate::Permutation(table) => table.len().trailing_zeros() as usize,
        }
    }

    /// Maximum number of controls an instruction may attach to this gate.
    ///
    /// Phase rotations stop at one control; doubly-controlled phases are
    /// emitted as a CNOT decomposition instead.
    pub fn max_controls(&self) -> Option<usize> {
        match self {
            StandardGate::P(_) => Some(1),
            _ => None,
        }
    }

    /// Check if this gate is its own inverse.
    pub fn is_self_inverse(&self) -> bool {
        matches!(self, StandardGate::X | StandardGate::H | StandardGate::Swap)
    }

    /// Check if this gate is diagonal in the computational basis.
    pub fn is_diagonal(&self) -> bool {
        matches!(self, StandardGate::P(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_targets() {
        assert_eq!(StandardGate::X.num_targets(), 1);
        assert_eq!(StandardGate::Swap.num_targets(), 2);
        assert_eq!(StandardGate::Permutation((0..8).collect()).num_targets(), 3);
    }

    #[test]
    fn test_phase_control_limit() {
        assert_eq!(StandardGate::P(0.5).max_controls(), Some(1));
        assert_eq!(StandardGate::X.max_controls(), None);
        assert!(StandardGate::H.is_self_inverse());
        assert!(!StandardGate::P(0.5).is_self_inverse());
    }
}
