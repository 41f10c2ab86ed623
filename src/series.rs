use rug::ops::Pow;
use rug::Integer;

use crate::mul::Multiplier;

pub(crate) const A: u64 = 13591409;
pub(crate) const B: u64 = 545140134;
/// 640320^3 / 24
pub(crate) const C3_OVER_24: u64 = 10939058860032000;

/// Decimal digits gained per series term (empirical constant).
pub(crate) const DIGITS_PER_TERM: f64 = 14.181647462725477;

/// Partial sum of the series over a half-open index range `[a, b)`.
///
/// We maintain P(a, b), Q(a, b), T(a, b) such that for the full range:
///   π = (Q(0, n) * 426880 * sqrt(10005)) / |T(0, n)|
///
/// `p` and `q` stay positive; `t` carries the alternating sign of the
/// series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triplet {
    pub p: Integer,
    pub q: Integer,
    pub t: Integer,
}

impl Triplet {
    /// Single term with index `k`, covering the range `[k, k + 1)`.
    pub fn term(k: u64) -> Self {
        if k == 0 {
            return Triplet {
                p: Integer::from(1),
                q: Integer::from(1),
                t: Integer::from(A),
            };
        }

        // The index is promoted to an Integer up front: the intermediates
        // grow as O(k^3) and outgrow a machine word around k ~ 2e5.
        let kz = Integer::from(k);

        // P_k = (6k - 5)(2k - 1)(6k - 1)
        let term1 = Integer::from(&kz * 6u32) - 5u32;
        let term2 = Integer::from(&kz * 2u32) - 1u32;
        let term3 = Integer::from(&kz * 6u32) - 1u32;
        let p = term1 * term2 * term3;

        // T_k = (-1)^k * (13591409 + 545140134 k) * P_k
        let val = Integer::from(&kz * B) + A;

        // Q_k = k^3 * C^3 / 24, where C = 640320
        let q = kz.pow(3u32) * Integer::from(C3_OVER_24);

        let t = if k % 2 == 1 {
            // use -val (moves val) to avoid NegIncomplete
            -val * &p
        } else {
            val * &p
        };

        Triplet { p, q, t }
    }

    /// Merge with the adjacent range on the right.
    ///
    /// `[a, m)` joined with `[m, b)` yields `[a, b)`:
    ///   P(a, b) = P(a, m) * P(m, b)
    ///   Q(a, b) = Q(a, m) * Q(m, b)
    ///   T(a, b) = T(a, m) * Q(m, b) + P(a, m) * T(m, b)
    ///
    /// Associative but not commutative. The big products go through the
    /// multiplier capability.
    pub fn join(self, rhs: Triplet, mul: &dyn Multiplier) -> Triplet {
        let mut t = mul.mul(&self.t, &rhs.q);
        t += mul.mul(&self.p, &rhs.t);
        Triplet {
            p: mul.mul(&self.p, &rhs.p),
            q: mul.mul(&self.q, &rhs.q),
            t,
        }
    }
}
