//! Sparse statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;
use rustc_hash::FxHashMap;
use std::f64::consts::FRAC_1_SQRT_2;

use qarith_ir::{Instruction, QubitId, QubitRegister, StandardGate};

use crate::error::{SimError, SimResult};

/// Amplitudes smaller than this are dropped after every gate.
pub const PRUNE_EPSILON: f64 = 1e-9;

/// Probability a state must reach to count as a single basis state.
pub const BASIS_TOLERANCE: f64 = 1e-6;

/// A statevector storing only non-zero amplitudes.
///
/// Basis index bit `q` holds the value of qubit `q`. Reversible arithmetic
/// keeps the support small (a basis state, or a register-sized superposition
/// between Fourier transforms), so a hash map beats a dense `2^n` vector.
#[derive(Debug, Clone)]
pub struct SparseStatevector {
    amplitudes: FxHashMap<u64, Complex64>,
    num_qubits: u32,
}

impl SparseStatevector {
    /// Create a statevector in basis state `index`.
    pub fn basis(num_qubits: u32, index: u64) -> Self {
        let mut amplitudes = FxHashMap::default();
        amplitudes.insert(index, Complex64::new(1.0, 0.0));
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of basis states with non-zero amplitude.
    pub fn support(&self) -> usize {
        self.amplitudes.len()
    }

    /// Amplitude of basis state `index`.
    pub fn amplitude(&self, index: u64) -> Complex64 {
        self.amplitudes
            .get(&index)
            .copied()
            .unwrap_or(Complex64::new(0.0, 0.0))
    }

    /// Probability of basis state `index`.
    pub fn probability(&self, index: u64) -> f64 {
        self.amplitude(index).norm_sqr()
    }

    /// Apply an instruction to the statevector.
    pub fn apply(&mut self, instruction: &Instruction) {
        let controls = mask(&instruction.controls);
        let targets = &instruction.targets;
        match &instruction.gate {
            StandardGate::X => {
                let flip = bit(targets[0]);
                self.permute(controls, |i| i ^ flip);
            }
            StandardGate::Swap => {
                let (a, b) = (bit(targets[0]), bit(targets[1]));
                self.permute(controls, |i| {
                    if (i & a == 0) != (i & b == 0) {
                        i ^ a ^ b
                    } else {
                        i
                    }
                });
            }
            StandardGate::Permutation(table) => {
                self.permute(controls, |i| {
                    let field = gather(i, targets);
                    scatter(i, targets, table[field as usize])
                });
            }
            StandardGate::P(theta) => self.apply_phase(controls, bit(targets[0]), *theta),
            StandardGate::H => self.apply_h(controls, bit(targets[0])),
        }
    }

    /// Relabel basis states where every control bit is set.
    fn permute(&mut self, controls: u64, map: impl Fn(u64) -> u64) {
        let old = std::mem::take(&mut self.amplitudes);
        self.amplitudes.reserve(old.len());
        for (index, amp) in old {
            let next = if index & controls == controls {
                map(index)
            } else {
                index
            };
            self.amplitudes.insert(next, amp);
        }
    }

    fn apply_phase(&mut self, controls: u64, target: u64, theta: f64) {
        let active = controls | target;
        let phase = Complex64::from_polar(1.0, theta);
        for (index, amp) in &mut self.amplitudes {
            if index & active == active {
                *amp *= phase;
            }
        }
    }

    fn apply_h(&mut self, controls: u64, target: u64) {
        let old = std::mem::take(&mut self.amplitudes);
        let mut next: FxHashMap<u64, Complex64> = FxHashMap::default();
        next.reserve(2 * old.len());
        for (index, amp) in old {
            if index & controls != controls {
                *next.entry(index).or_default() += amp;
                continue;
            }
            let zero = index & !target;
            let one = index | target;
            let scaled = amp * FRAC_1_SQRT_2;
            *next.entry(zero).or_default() += scaled;
            if index & target == 0 {
                *next.entry(one).or_default() += scaled;
            } else {
                *next.entry(one).or_default() -= scaled;
            }
        }
        next.retain(|_, amp| amp.norm() >= PRUNE_EPSILON);
        self.amplitudes = next;
    }

    /// The single basis state holding (almost) all probability.
    pub fn basis_state(&self) -> SimResult<u64> {
        let (index, probability) = self
            .amplitudes
            .iter()
            .map(|(&i, a)| (i, a.norm_sqr()))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap_or((0, 0.0));
        if probability < 1.0 - BASIS_TOLERANCE {
            return Err(SimError::NotBasisState { probability });
        }
        Ok(index)
    }

    /// Value held by `register` when the state is a basis state.
    pub fn read(&self, register: &QubitRegister) -> SimResult<u64> {
        Ok(gather(self.basis_state()?, register.qubits()))
    }

    /// Value of a single qubit when the state is a basis state.
    pub fn read_qubit(&self, qubit: QubitId) -> SimResult<bool> {
        Ok(self.basis_state()? & bit(qubit) != 0)
    }

    /// Draw `shots` samples of the full basis index.
    pub fn sample<R: Rng>(&self, shots: usize, rng: &mut R) -> FxHashMap<u64, usize> {
        let mut entries: Vec<(u64, f64)> = self
            .amplitudes
            .iter()
            .map(|(&i, a)| (i, a.norm_sqr()))
            .collect();
        entries.sort_unstable_by_key(|&(i, _)| i);
        let total: f64 = entries.iter().map(|&(_, p)| p).sum();

        let mut counts = FxHashMap::default();
        for _ in 0..shots {
            let r = rng.r#gen::<f64>() * total;
            let mut cumulative = 0.0;
            let mut outcome = entries.last().map_or(0, |&(i, _)| i);
            for &(index, p) in &entries {
                cumulative += p;
                if r < cumulative {
                    outcome = index;
                    break;
                }
            }
            *counts.entry(outcome).or_insert(0) += 1;
        }
        counts
    }
}

fn bit(qubit: QubitId) -> u64 {
    1_u64 << qubit.0
}

fn mask(qubits: &[QubitId]) -> u64 {
    qubits.iter().fold(0, |m, &q| m | bit(q))
}

/// Pack the bits of `index` at `qubits` into an integer, LSB first.
pub(crate) fn gather(index: u64, qubits: &[QubitId]) -> u64 {
    qubits
        .iter()
        .enumerate()
        .fold(0, |v, (k, &q)| v | (((index >> q.0) & 1) << k))
}

/// Overwrite the bits of `index` at `qubits` with `value`.
pub(crate) fn scatter(index: u64, qubits: &[QubitId], value: u64) -> u64 {
    qubits.iter().enumerate().fold(index, |i, (k, &q)| {
        (i & !bit(q)) | (((value >> k) & 1) << q.0)
    })
}
