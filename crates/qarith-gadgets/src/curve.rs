//! Classical elliptic-curve arithmetic over a small prime field.
//!
//! Used to pick constants at synthesis time and to check circuits in tests.

use serde::{Deserialize, Serialize};

use crate::config::{CurveParams, ModulusConfig};
use crate::error::{SynthResult, SynthesisError};

/// An affine point or the point at infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AffinePoint {
    /// The group identity.
    Identity,
    /// A finite point `(x, y)` with reduced coordinates.
    Finite {
        /// x coordinate.
        x: u64,
        /// y coordinate.
        y: u64,
    },
}

impl AffinePoint {
    /// Finite point shorthand.
    pub fn new(x: u64, y: u64) -> Self {
        AffinePoint::Finite { x, y }
    }

    /// Register encoding; the identity is stored as (0, 0).
    pub fn encode(self) -> (u64, u64) {
        match self {
            AffinePoint::Identity => (0, 0),
            AffinePoint::Finite { x, y } => (x, y),
        }
    }

    /// Inverse of [`AffinePoint::encode`].
    pub fn decode(x: u64, y: u64) -> Self {
        if x == 0 && y == 0 {
            AffinePoint::Identity
        } else {
            AffinePoint::Finite { x, y }
        }
    }

    /// Check if this is the identity.
    pub fn is_identity(self) -> bool {
        matches!(self, AffinePoint::Identity)
    }
}

/// A validated curve with its field configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Curve {
    params: CurveParams,
    field: ModulusConfig,
}

impl Curve {
    /// Validate `params` and size registers for its field.
    pub fn new(params: CurveParams) -> SynthResult<Self> {
        let field = ModulusConfig::new(params.modulus)?;
        Self::with_field(params, field)
    }

    /// Validate `params` against an explicit field configuration.
    pub fn with_field(params: CurveParams, field: ModulusConfig) -> SynthResult<Self> {
        params.validate(&field)?;
        Ok(Self { params, field })
    }

    /// Curve coefficients.
    pub fn params(&self) -> &CurveParams {
        &self.params
    }

    /// Field configuration.
    pub fn field(&self) -> &ModulusConfig {
        &self.field
    }

    /// Check if `point` satisfies the curve equation.
    pub fn contains(&self, point: AffinePoint) -> bool {
        match point {
            AffinePoint::Identity => true,
            AffinePoint::Finite { x, y } => {
                let f = &self.field;
                if x >= f.p() || y >= f.p() {
                    return false;
                }
                let rhs = f.add(
                    f.add(f.mul(f.mul(x, x), x), f.mul(self.params.a, x)),
                    self.params.b,
                );
                f.mul(y, y) == rhs
            }
        }
    }

    /// Reject points not on the curve.
    pub fn ensure_contains(&self, point: AffinePoint) -> SynthResult<()> {
        if self.contains(point) {
            return Ok(());
        }
        let (x, y) = point.encode();
        Err(SynthesisError::InvalidPoint { x, y })
    }

    /// `-P`.
    pub fn neg(&self, point: AffinePoint) -> AffinePoint {
        match point {
            AffinePoint::Identity => AffinePoint::Identity,
            AffinePoint::Finite { x, y } => AffinePoint::new(x, self.field.neg(y)),
        }
    }

    /// Group law: chord through distinct points, tangent when they coincide.
    pub fn add(&self, p: AffinePoint, q: AffinePoint) -> AffinePoint {
        let f = &self.field;
        let (x1, y1, x2, y2) = match (p, q) {
            (AffinePoint::Identity, _) => return q,
            (_, AffinePoint::Identity) => return p,
            (AffinePoint::Finite { x: x1, y: y1 }, AffinePoint::Finite { x: x2, y: y2 }) => {
                (x1, y1, x2, y2)
            }
        };
        if x1 == x2 && f.add(y1, y2) == 0 {
            return AffinePoint::Identity;
        }
        let (num, den) = if x1 == x2 {
            let x_sq = f.mul(x1, x1);
            (f.add(f.mul(3, x_sq), self.params.a), f.mul(2, y1))
        } else {
            (f.sub(y2, y1), f.sub(x2, x1))
        };
        // `den` is non-zero here: equal x with y1 = -y1 was handled above.
        let lambda = f.mul(num, f.inv(den).unwrap_or(0));
        let x3 = f.sub(f.sub(f.mul(lambda, lambda), x1), x2);
        let y3 = f.sub(f.mul(lambda, f.sub(x1, x3)), y1);
        AffinePoint::new(x3, y3)
    }

    /// `2P`.
    pub fn double(&self, point: AffinePoint) -> AffinePoint {
        self.add(point, point)
    }

    /// `kP` by double-and-add.
    pub fn mul(&self, mut k: u64, point: AffinePoint) -> AffinePoint {
        let mut acc = AffinePoint::Identity;
        let mut base = point;
        while k > 0 {
            if k & 1 == 1 {
                acc = self.add(acc, base);
            }
            base = self.double(base);
            k >>= 1;
        }
        acc
    }

    /// Every point of the group, identity first, then by `(x, y)`.
    pub fn points(&self) -> Vec<AffinePoint> {
        let p = self.field.p();
        std::iter::once(AffinePoint::Identity)
            .chain((0..p).flat_map(|x| (0..p).map(move |y| AffinePoint::new(x, y))))
            .filter(|&pt| self.contains(pt))
            .collect()
    }
}
