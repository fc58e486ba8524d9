//! Reversible arithmetic synthesis.
//!
//! This crate builds circuits for modular arithmetic and elliptic-curve
//! point addition out of bit flips, Hadamards, phase rotations and their
//! controlled forms. Every construction is a pure function from registers
//! and classical parameters to a [`Circuit`](qarith_ir::Circuit): it
//! computes the intended function on every basis state, returns every
//! ancilla to |0⟩, and can be inverted or given an extra control.
//!
//! # Layers
//!
//! | Module | Provides |
//! |--------|----------|
//! | [`qft`] | Fourier basis change, plain and controlled |
//! | [`adder`] | register and constant addition mod `2^n` |
//! | [`modular`] | addition, negation and doubling mod `p` |
//! | [`multiplier`] | `acc += x·y` and `acc += x²` mod `p` |
//! | [`lookup`] | table-backed modular inverse |
//! | [`point`] | `P ↦ P + Q` on a short Weierstrass curve |
//!
//! Supporting pieces: [`Gadget`] and the [`Reversible`] trait for opaque
//! invertible units, [`UncomputeContext`] for compute/uncompute staging,
//! [`ModulusConfig`] and [`CurveParams`] for the parameters every
//! constructor takes, and [`Curve`] for classical reference arithmetic.
//!
//! # Example: modular addition
//!
//! ```rust
//! use qarith_gadgets::{ModulusConfig, modular::mod_add};
//! use qarith_ir::QubitAllocator;
//!
//! let cfg = ModulusConfig::new(7).unwrap();
//! let mut alloc = QubitAllocator::new();
//! let x = alloc.register("x", cfg.width());
//! let y = alloc.register("y", cfg.width());
//! let z = alloc.ancilla();
//!
//! // y := (x + y) mod 7, z returns to |0⟩.
//! let circuit = mod_add(&x, &y, z.qubit(), &cfg).unwrap();
//! assert_eq!(circuit.num_qubits(), alloc.num_qubits());
//! ```

pub mod adder;
pub mod config;
pub mod context;
pub mod control;
pub mod curve;
pub mod error;
pub mod gadget;
pub mod inverse;
pub mod lookup;
pub mod modular;
pub mod multiplier;
pub mod point;
pub mod qft;

pub use config::{CurveParams, ModulusConfig, ModulusSpec};
pub use context::UncomputeContext;
pub use control::controlled_circuit;
pub use curve::{AffinePoint, Curve};
pub use error::{SynthResult, SynthesisError};
pub use gadget::{Gadget, Reversible};
pub use inverse::inverse_circuit;
pub use point::{PointRegister, PointWorkspace, controlled_point_add, point_add};
