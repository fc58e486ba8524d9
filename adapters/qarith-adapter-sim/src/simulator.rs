//! Basis-input evaluation of whole circuits.

use tracing::{debug, instrument};

use qarith_ir::{Circuit, QubitId, QubitRegister};

use crate::error::{SimError, SimResult};
use crate::statevector::{SparseStatevector, scatter};

/// Largest circuit the evaluator accepts; basis indices are `u64`.
pub const MAX_QUBITS: u32 = 64;

/// Initial register values for an evaluation. Unset wires start at 0.
#[derive(Debug, Clone, Default)]
pub struct BasisInput {
    registers: Vec<(QubitRegister, u64)>,
}

impl BasisInput {
    /// All wires at |0⟩.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `value` into `register`.
    pub fn with(mut self, register: &QubitRegister, value: u64) -> Self {
        self.registers.push((register.clone(), value));
        self
    }

    /// Load a single wire.
    pub fn with_qubit(self, qubit: QubitId, set: bool) -> Self {
        self.with(&QubitRegister::from_qubits(vec![qubit]), u64::from(set))
    }

    /// Pack the inputs into one basis index.
    pub fn index(&self, num_qubits: u32) -> SimResult<u64> {
        let mut index = 0;
        for (register, value) in &self.registers {
            let width = register.len();
            if width < 64 && *value >> width != 0 {
                return Err(SimError::ValueTooLarge {
                    value: *value,
                    width,
                });
            }
            if let Some(qubit) = register.iter().find(|q| q.0 >= num_qubits) {
                return Err(SimError::QubitOutOfRange {
                    qubit: qubit.0,
                    num_qubits,
                });
            }
            index = scatter(index, register.qubits(), *value);
        }
        Ok(index)
    }
}

/// Runs circuits on basis-state inputs.
#[derive(Debug, Clone)]
pub struct Simulator {
    max_qubits: u32,
}

impl Simulator {
    /// Create an evaluator with the default qubit limit.
    pub fn new() -> Self {
        Self {
            max_qubits: MAX_QUBITS,
        }
    }

    /// Create an evaluator with a lower qubit limit.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            max_qubits: max_qubits.min(MAX_QUBITS),
        }
    }

    /// Apply `circuit` to the basis state described by `input`.
    #[instrument(skip_all, fields(circuit = circuit.name(), qubits = circuit.num_qubits()))]
    pub fn run(&self, circuit: &Circuit, input: &BasisInput) -> SimResult<SparseStatevector> {
        let num_qubits = circuit.num_qubits();
        if num_qubits > self.max_qubits {
            return Err(SimError::TooManyQubits {
                num_qubits,
                max: self.max_qubits,
            });
        }

        let mut sv = SparseStatevector::basis(num_qubits, input.index(num_qubits)?);
        let mut peak = 1;
        for inst in circuit.instructions() {
            sv.apply(inst);
            peak = peak.max(sv.support());
        }

        debug!(
            gates = circuit.len(),
            peak_support = peak,
            "evaluation complete"
        );
        Ok(sv)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}
