//! Shared helpers for the synthesis integration tests.

#![allow(dead_code)]

use qarith_adapter_sim::{BasisInput, Simulator, SparseStatevector};
use qarith_ir::{Circuit, QubitId, QubitRegister};
use tracing_subscriber::EnvFilter;

/// Install a test-friendly subscriber once; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Run `circuit` on the given register values.
pub fn run(circuit: &Circuit, inputs: &[(&QubitRegister, u64)]) -> SparseStatevector {
    let input = inputs
        .iter()
        .fold(BasisInput::new(), |acc, (reg, value)| acc.with(reg, *value));
    Simulator::new()
        .run(circuit, &input)
        .expect("circuit should evaluate")
}

/// Read a register from a state that must be a basis state.
pub fn read(sv: &SparseStatevector, reg: &QubitRegister) -> u64 {
    sv.read(reg).expect("state should be a basis state")
}

/// Read a single qubit from a basis state.
pub fn bit(sv: &SparseStatevector, qubit: QubitId) -> bool {
    sv.read_qubit(qubit).expect("state should be a basis state")
}

/// The full basis index of a state that must be a basis state.
pub fn basis(sv: &SparseStatevector) -> u64 {
    sv.basis_state().expect("state should be a basis state")
}
