//! Modulus and curve parameters threaded through every constructor.

use serde::{Deserialize, Serialize};

use crate::error::{SynthResult, SynthesisError};

/// Widest register the modular constructions accept.
pub const MAX_WIDTH: usize = 32;

/// A modulus together with the register width its residues occupy.
///
/// The width reserves one bit above the residues: adders borrow it as the
/// sign of a tentative subtraction, so `p <= 2^(width - 1)` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ModulusSpec", into = "ModulusSpec")]
pub struct ModulusConfig {
    p: u64,
    width: usize,
}

/// Serialized form of [`ModulusConfig`]; `width` defaults to the minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulusSpec {
    /// The modulus.
    pub p: u64,
    /// Register width, sign bit included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
}

impl ModulusConfig {
    /// Configuration with the narrowest register that fits `p`.
    pub fn new(p: u64) -> SynthResult<Self> {
        Self::with_width(p, bit_length(p.saturating_sub(1)) + 1)
    }

    /// Configuration with an explicit register width.
    pub fn with_width(p: u64, width: usize) -> SynthResult<Self> {
        if p < 3 || p % 2 == 0 {
            return Err(SynthesisError::UnsupportedModulus {
                p,
                reason: "modulus must be odd and at least 3".into(),
            });
        }
        if width > MAX_WIDTH {
            return Err(SynthesisError::UnsupportedModulus {
                p,
                reason: format!("width {width} exceeds {MAX_WIDTH}"),
            });
        }
        if width < 2 || p > 1_u64 << (width - 1) {
            return Err(SynthesisError::ModulusOverflow { p, width });
        }
        Ok(Self { p, width })
    }

    /// The modulus.
    pub fn p(&self) -> u64 {
        self.p
    }

    /// Register width, sign bit included.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Bits below the sign bit.
    pub fn value_bits(&self) -> usize {
        self.width - 1
    }

    /// `2^width - p`: adding it is subtracting `p` with wraparound.
    pub fn wrap_subtrahend(&self) -> u64 {
        (1_u64 << self.width) - self.p
    }

    /// Canonical residue of a signed integer.
    pub fn reduce(&self, value: i64) -> u64 {
        value.rem_euclid(self.p as i64) as u64
    }

    /// `-v mod p`.
    pub fn neg(&self, v: u64) -> u64 {
        (self.p - v % self.p) % self.p
    }

    /// `a + b mod p`.
    pub fn add(&self, a: u64, b: u64) -> u64 {
        (a % self.p + b % self.p) % self.p
    }

    /// `a - b mod p`.
    pub fn sub(&self, a: u64, b: u64) -> u64 {
        self.add(a, self.neg(b))
    }

    /// `a * b mod p`.
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        ((u128::from(a) * u128::from(b)) % u128::from(self.p)) as u64
    }

    /// `2^k mod p`.
    pub fn pow2(&self, k: usize) -> u64 {
        (0..k).fold(1 % self.p, |acc, _| self.mul(acc, 2))
    }

    /// Multiplicative inverse by the extended Euclidean algorithm.
    pub fn inv(&self, v: u64) -> Option<u64> {
        let (mut r0, mut r1) = (self.p as i128, (v % self.p) as i128);
        let (mut t0, mut t1) = (0_i128, 1_i128);
        while r1 != 0 {
            let q = r0 / r1;
            (r0, r1) = (r1, r0 - q * r1);
            (t0, t1) = (t1, t0 - q * t1);
        }
        (r0 == 1).then(|| t0.rem_euclid(self.p as i128) as u64)
    }
}

impl TryFrom<ModulusSpec> for ModulusConfig {
    type Error = SynthesisError;

    fn try_from(spec: ModulusSpec) -> SynthResult<Self> {
        match spec.width {
            Some(width) => Self::with_width(spec.p, width),
            None => Self::new(spec.p),
        }
    }
}

impl From<ModulusConfig> for ModulusSpec {
    fn from(cfg: ModulusConfig) -> Self {
        Self {
            p: cfg.p,
            width: Some(cfg.width),
        }
    }
}

/// Short Weierstrass curve `y^2 = x^3 + a x + b` over `F_modulus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurveParams {
    /// Linear coefficient.
    pub a: u64,
    /// Constant coefficient.
    pub b: u64,
    /// Field prime.
    pub modulus: u64,
}

impl CurveParams {
    /// Check the curve is usable with the register encoding.
    ///
    /// The discriminant must be non-zero, and `b != 0` keeps (0, 0) off the
    /// curve so it can stand for the point at infinity.
    pub fn validate(&self, cfg: &ModulusConfig) -> SynthResult<()> {
        if cfg.p() != self.modulus {
            return Err(SynthesisError::InvalidCurve(format!(
                "curve modulus {} differs from configured modulus {}",
                self.modulus,
                cfg.p()
            )));
        }
        let a3 = cfg.mul(cfg.mul(self.a, self.a), self.a);
        let b2 = cfg.mul(self.b, self.b);
        let disc = cfg.add(cfg.mul(4, a3), cfg.mul(27, b2));
        if disc == 0 {
            return Err(SynthesisError::InvalidCurve(
                "discriminant 4a^3 + 27b^2 vanishes".into(),
            ));
        }
        if self.b % self.modulus == 0 {
            return Err(SynthesisError::InvalidCurve(
                "b = 0 puts (0, 0) on the curve".into(),
            ));
        }
        Ok(())
    }
}

fn bit_length(v: u64) -> usize {
    (u64::BITS - v.leading_zeros()) as usize
}
