use rug::{Float, Integer};

use crate::series::Triplet;

/// Combine the root triplet into π at `precision` bits.
///
/// π = (Q * 426880 * sqrt(10005)) / |T|
///
/// Every temporary lives at full precision with round-to-nearest. The
/// denominator takes |T|: the alternating sign is already folded into the
/// magnitude formulation, and a signed T would flip the result for an odd
/// term count. P is an artifact of the combination rule and is not
/// consumed here.
pub(crate) fn assemble(root: &Triplet, precision: u32) -> Float {
    let sqrt_10005 = Float::with_val(precision, 10005u32).sqrt();
    let tmp = sqrt_10005 * 426880u32;
    let qf = Float::with_val(precision, &root.q);
    let tmp = tmp * qf;
    let tf = Float::with_val(precision, Integer::from(root.t.abs_ref()));
    tmp / tf
}
