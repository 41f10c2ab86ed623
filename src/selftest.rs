use rug::float::Constant;
use rug::Float;

use crate::error::PiError;
use crate::format::to_fixed;
use crate::plan::{Base, Plan};

/// Index of the first byte where `a` and `b` disagree, if any.
pub fn first_mismatch(a: &str, b: &str) -> Option<usize> {
    if a == b {
        return None;
    }
    let common = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    Some(common)
}

/// Compare the engine against the bignum library's own π constant at the
/// same digit count.
///
/// Both sides run through the same formatter, so a formatter bug cancels
/// out; what this exercises is the series evaluation. The integration
/// suite additionally compares against independently sourced digit
/// strings.
pub fn self_test(digits: usize) -> Result<(bool, String), PiError> {
    let plan = Plan::new(digits, Base::Dec)?;
    let reference = Float::with_val(plan.precision, Constant::Pi);
    let expected = to_fixed(&reference, digits, Base::Dec);

    let got = crate::compute_pi(digits)?;

    match first_mismatch(&got, &expected) {
        None => Ok((true, "outputs match exactly".to_string())),
        Some(i) => Ok((false, format!("mismatch at char index {}", i))),
    }
}
