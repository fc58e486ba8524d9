//! Reversible circuit intermediate representation.
//!
//! This crate holds the data structures shared by the arithmetic synthesis
//! layer and the evaluators that run its output.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] names a wire in one flat qubit space
//! - **Gates**: [`StandardGate`] covers bit flip, Hadamard, phase, swap and
//!   classical permutation blocks
//! - **Instructions**: [`Instruction`] pairs a gate with control and target
//!   qubits, so CNOT, Toffoli and multi-controlled X share one shape
//! - **Circuit**: [`Circuit`] ordered instruction list with a builder API,
//!   pure remapping and composition
//! - **Registers**: [`QubitRegister`] LSB-first integer registers and the
//!   [`QubitAllocator`] arena that hands them out
//!
//! # Example: Toffoli from a builder
//!
//! ```rust
//! use qarith_ir::{Circuit, QubitAllocator};
//!
//! let mut alloc = QubitAllocator::new();
//! let reg = alloc.register("a", 3);
//!
//! let mut circuit = Circuit::new("toffoli", alloc.num_qubits());
//! circuit.ccx(reg[0], reg[1], reg[2]).unwrap();
//!
//! assert_eq!(circuit.len(), 1);
//! assert_eq!(circuit.instructions()[0].name(), "ccx");
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Targets | Controls |
//! |------|---------|----------|
//! | `X` | 1 | any |
//! | `H` | 1 | any |
//! | `P(θ)` | 1 | 0 or 1 |
//! | `Swap` | 2 | any |
//! | `Permutation` | k | any |

pub mod allocator;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod register;

pub use allocator::{Ancilla, QubitAllocator};
pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, MAX_PERMUTATION_QUBITS};
pub use qubit::QubitId;
pub use register::{QubitRegister, check_disjoint};
