//! Sparse basis-state evaluator for reversible arithmetic circuits.
//!
//! Synthesized arithmetic circuits map basis states to basis states, with a
//! superposition only inside a register while it sits in the Fourier basis.
//! This crate evaluates such circuits on a sparse statevector so tests can
//! check truth tables over 20+ qubits without a dense `2^n` allocation.
//!
//! # Features
//!
//! - **Every IR gate**: multi-controlled X/H/swap, phases with one control
//!   and classical permutation blocks
//! - **Register readout**: load integers into registers, read them back once
//!   the state collapses to a single basis state
//! - **Sampling**: seeded sampling of the full basis index
//!
//! # Example
//!
//! ```rust
//! use qarith_adapter_sim::{BasisInput, Simulator};
//! use qarith_ir::{Circuit, QubitAllocator};
//!
//! let mut alloc = QubitAllocator::new();
//! let a = alloc.register("a", 2);
//!
//! let mut circuit = Circuit::new("flip", alloc.num_qubits());
//! circuit.x(a[1]).unwrap();
//!
//! let sv = Simulator::new()
//!     .run(&circuit, &BasisInput::new().with(&a, 1))
//!     .unwrap();
//! assert_eq!(sv.read(&a).unwrap(), 3);
//! ```

mod error;
mod simulator;
mod statevector;

pub use error::{SimError, SimResult};
pub use simulator::{BasisInput, MAX_QUBITS, Simulator};
pub use statevector::{BASIS_TOLERANCE, PRUNE_EPSILON, SparseStatevector};
