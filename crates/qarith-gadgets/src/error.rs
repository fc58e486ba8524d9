//! Error types for arithmetic synthesis.

use qarith_ir::{IrError, QubitId};
use thiserror::Error;

/// Synthesis-time contract violations.
///
/// None of these describe a fault of a running circuit: they are raised while
/// a circuit is being built from ill-formed registers or parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SynthesisError {
    /// Two operands do not have the widths the operation needs.
    #[error("{operation}: expected {expected} qubits, got {got}")]
    DimensionMismatch {
        /// Operation being synthesized.
        operation: &'static str,
        /// Required width.
        expected: usize,
        /// Width supplied.
        got: usize,
    },

    /// Two logical registers claim the same wire.
    #[error("Qubit {qubit} claimed by more than one operand")]
    ConflictingAllocation {
        /// The shared wire.
        qubit: QubitId,
    },

    /// An embedding put a wire outside the circuit.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit circuit")]
    IndexOutOfRange {
        /// The offending wire.
        qubit: QubitId,
        /// Circuit width.
        num_qubits: u32,
    },

    /// The modulus does not fit the register below its sign bit.
    #[error("Modulus {p} does not fit a {width}-qubit register with a sign bit")]
    ModulusOverflow {
        /// The modulus.
        p: u64,
        /// Register width.
        width: usize,
    },

    /// The modulus is outside what the constructions support.
    #[error("Unsupported modulus {p}: {reason}")]
    UnsupportedModulus {
        /// The modulus.
        p: u64,
        /// Why it was rejected.
        reason: String,
    },

    /// Curve parameters define no usable group.
    #[error("Invalid curve: {0}")]
    InvalidCurve(String),

    /// A classical point is not on the curve.
    #[error("Point ({x}, {y}) is not on the curve")]
    InvalidPoint {
        /// x coordinate.
        x: u64,
        /// y coordinate.
        y: u64,
    },

    /// An uncompute scope no longer matches the circuit it was opened on.
    #[error("Uncompute scope covers instructions {start}..{end}, circuit has {len}")]
    ScopeMismatch {
        /// First recorded instruction.
        start: usize,
        /// End of the recorded section.
        end: usize,
        /// Current circuit length.
        len: usize,
    },

    /// Any other IR error.
    #[error(transparent)]
    Circuit(IrError),
}

impl From<IrError> for SynthesisError {
    fn from(err: IrError) -> Self {
        match err {
            IrError::QubitOutOfRange {
                qubit, num_qubits, ..
            } => SynthesisError::IndexOutOfRange { qubit, num_qubits },
            IrError::DuplicateQubit { qubit, .. } => {
                SynthesisError::ConflictingAllocation { qubit }
            }
            other => SynthesisError::Circuit(other),
        }
    }
}

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthesisError>;
