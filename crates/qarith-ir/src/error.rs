//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// An operand index is not below the circuit's qubit count.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit circuit{}", format_gate_context(.gate_name))]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Total qubits in the circuit.
        num_qubits: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires a different number of target qubits.
    #[error("Gate '{gate_name}' requires {expected} target qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of targets.
        expected: usize,
        /// Actual number of targets provided.
        got: usize,
    },

    /// Gate cannot carry this many controls.
    #[error("Gate '{gate_name}' supports at most {max} controls, got {got}")]
    UnsupportedControls {
        /// Name of the gate.
        gate_name: String,
        /// Maximum number of controls.
        max: usize,
        /// Actual number of controls.
        got: usize,
    },

    /// Permutation table is not a bijection over its register.
    #[error("Invalid permutation: {0}")]
    InvalidPermutation(String),

    /// A sub-circuit does not fit into the circuit it is composed with.
    #[error("Circuit width mismatch: expected at most {expected} qubits, got {got}")]
    WidthMismatch {
        /// Width available.
        expected: u32,
        /// Width required.
        got: u32,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
