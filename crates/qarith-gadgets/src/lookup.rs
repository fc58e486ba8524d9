//! Table-backed gadgets for small fixed registers.

use qarith_ir::QubitRegister;
use tracing::debug;

use crate::config::ModulusConfig;
use crate::error::{SynthResult, SynthesisError};
use crate::gadget::{Gadget, ensure_disjoint, ensure_width};

/// Widest register a lookup table is built for.
pub const MAX_LOOKUP_WIDTH: usize = 16;

/// Table of `v ↦ v⁻¹ mod p` over every `width`-bit code.
///
/// Zero and codes at or above `p` map to themselves, so the table is a
/// bijection and, since inversion is an involution, its own inverse.
pub fn inverse_table(cfg: &ModulusConfig) -> SynthResult<Vec<u64>> {
    if cfg.width() > MAX_LOOKUP_WIDTH {
        return Err(SynthesisError::UnsupportedModulus {
            p: cfg.p(),
            reason: format!(
                "lookup tables stop at {MAX_LOOKUP_WIDTH} qubits, register needs {}",
                cfg.width()
            ),
        });
    }
    let size = 1_u64 << cfg.width();
    (0..size)
        .map(|v| {
            if v == 0 || v >= cfg.p() {
                return Ok(v);
            }
            cfg.inv(v).ok_or_else(|| SynthesisError::UnsupportedModulus {
                p: cfg.p(),
                reason: format!("{v} has no inverse"),
            })
        })
        .collect()
}

/// `x := x⁻¹ mod p` (zero fixed) as a single permutation block.
///
/// Valid for any prime small enough for a dense table; a reversible
/// extended-Euclid circuit would lift the width limit.
pub fn mod_inverse(x: &QubitRegister, cfg: &ModulusConfig) -> SynthResult<Gadget> {
    ensure_width("mod_inverse", x, cfg.width())?;
    ensure_disjoint(&[x], &[])?;
    let table = inverse_table(cfg)?;
    debug!(p = cfg.p(), width = cfg.width(), "built inverse lookup");
    Ok(Gadget::lookup("mod_inverse", x.clone(), table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_involution() {
        for p in [5, 7, 11, 13] {
            let cfg = ModulusConfig::new(p).unwrap();
            let table = inverse_table(&cfg).unwrap();
            for (v, &image) in table.iter().enumerate() {
                assert_eq!(table[image as usize], v as u64);
            }
        }
    }

    #[test]
    fn test_p7_table_is_bit_swap() {
        // Over F_7: 1↔1, 2↔4, 3↔5, 6↔6, which swaps bits 1 and 2.
        let cfg = ModulusConfig::new(7).unwrap();
        let table = inverse_table(&cfg).unwrap();
        for v in 0..8_u64 {
            let swapped = (v & 1) | ((v >> 1) & 1) << 2 | ((v >> 2) & 1) << 1;
            assert_eq!(table[v as usize], swapped);
        }
    }

    #[test]
    fn test_composite_modulus_rejected() {
        let cfg = ModulusConfig::new(9).unwrap();
        assert!(matches!(
            inverse_table(&cfg),
            Err(SynthesisError::UnsupportedModulus { .. })
        ));
    }
}
