//! Arena allocation of registers and ancilla qubits.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::qubit::QubitId;
use crate::register::QubitRegister;

/// A borrowed scratch qubit.
///
/// The handle is neither `Copy` nor `Clone`: releasing it consumes it, so an
/// ancilla cannot be returned to the pool twice.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Ancilla(QubitId);

impl Ancilla {
    /// The wire backing this ancilla.
    pub fn qubit(&self) -> QubitId {
        self.0
    }
}

/// Hands out disjoint wires from one flat qubit space.
///
/// Registers get fresh contiguous ranges. Ancillas are drawn from released
/// ancillas first (most recently released wins) and only then from fresh
/// wires, and the allocator tracks which of them are live.
#[derive(Debug, Default)]
pub struct QubitAllocator {
    next: u32,
    free: Vec<QubitId>,
    live: FxHashSet<QubitId>,
}

impl QubitAllocator {
    /// Create an empty allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total wires handed out so far; the width a circuit over them needs.
    pub fn num_qubits(&self) -> u32 {
        self.next
    }

    /// Allocate a fresh labelled register of `width` qubits.
    pub fn register(&mut self, label: impl Into<String>, width: usize) -> QubitRegister {
        let label = label.into();
        let start = self.next;
        self.next += width as u32;
        trace!(%label, start, width, "allocated register");
        QubitRegister::contiguous(start, width as u32).with_label(label)
    }

    /// Allocate a single fresh qubit that is not an ancilla.
    pub fn qubit(&mut self) -> QubitId {
        let id = QubitId(self.next);
        self.next += 1;
        id
    }

    /// Borrow a clean scratch qubit.
    pub fn ancilla(&mut self) -> Ancilla {
        let qubit = self.free.pop().unwrap_or_else(|| self.qubit());
        self.live.insert(qubit);
        trace!(%qubit, live = self.live.len(), "borrowed ancilla");
        Ancilla(qubit)
    }

    /// Borrow `count` ancillas at once.
    pub fn ancillas(&mut self, count: usize) -> Vec<Ancilla> {
        (0..count).map(|_| self.ancilla()).collect()
    }

    /// Return an ancilla to the pool. It must already be back at |0⟩.
    pub fn release(&mut self, ancilla: Ancilla) {
        if self.live.remove(&ancilla.0) {
            self.free.push(ancilla.0);
        }
        trace!(qubit = %ancilla.0, live = self.live.len(), "released ancilla");
    }

    /// Number of ancillas currently borrowed.
    pub fn live_ancillas(&self) -> usize {
        self.live.len()
    }

    /// Check if `qubit` is a live ancilla.
    pub fn is_live(&self, qubit: QubitId) -> bool {
        self.live.contains(&qubit)
    }
}
