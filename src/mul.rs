use rug::Integer;

/// Large-integer multiplication capability used at the evaluator's merge
/// points.
///
/// Binary splitting keeps the multiplicands balanced, which is exactly
/// where a subquadratic multiplier earns its keep. The evaluator depends
/// only on this trait, so an asymptotically faster backend can be slotted
/// in without touching the recursion.
pub trait Multiplier: Send + Sync {
    fn mul(&self, a: &Integer, b: &Integer) -> Integer;
}

/// Reference multiplier delegating to the bignum library.
#[derive(Debug, Default, Clone, Copy)]
pub struct GmpMultiplier;

impl Multiplier for GmpMultiplier {
    fn mul(&self, a: &Integer, b: &Integer) -> Integer {
        Integer::from(a * b)
    }
}
