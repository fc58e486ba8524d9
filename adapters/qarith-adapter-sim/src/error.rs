//! Error types for the evaluator.

use thiserror::Error;

/// Errors raised while preparing or reading a simulated state.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Basis indices are packed into a `u64`.
    #[error("Circuit needs {num_qubits} qubits, evaluator supports at most {max}")]
    TooManyQubits {
        /// Qubits the circuit addresses.
        num_qubits: u32,
        /// Evaluator limit.
        max: u32,
    },

    /// An input value does not fit its register.
    #[error("Value {value} does not fit a {width}-qubit register")]
    ValueTooLarge {
        /// The value to load.
        value: u64,
        /// Register width.
        width: usize,
    },

    /// An input wire falls outside the circuit.
    #[error("Input qubit {qubit} outside a {num_qubits}-qubit circuit")]
    QubitOutOfRange {
        /// Offending wire index.
        qubit: u32,
        /// Circuit width.
        num_qubits: u32,
    },

    /// The state is a superposition, so it has no single register value.
    #[error("State is not a basis state (largest probability {probability:.6})")]
    NotBasisState {
        /// Probability of the dominant basis state.
        probability: f64,
    },
}

/// Result type for evaluator operations.
pub type SimResult<T> = Result<T, SimError>;
