use tracing::debug;

use crate::error::PiError;
use crate::series::DIGITS_PER_TERM;

/// Output radix for the fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    Dec,
    Hex,
}

impl Base {
    /// Validate a numeric radix from the public surface.
    pub fn from_radix(radix: u32) -> Result<Base, PiError> {
        match radix {
            10 => Ok(Base::Dec),
            16 => Ok(Base::Hex),
            other => Err(PiError::InvalidBase(other)),
        }
    }

    pub fn radix(self) -> u32 {
        match self {
            Base::Dec => 10,
            Base::Hex => 16,
        }
    }

    fn bits_per_digit(self) -> f64 {
        match self {
            Base::Dec => 3.32192809488736, // log2(10)
            Base::Hex => 4.0,
        }
    }
}

/// Extra bits of working precision beyond the informational minimum.
/// Below this the formatter's rounding at the last digit is not reliable.
const GUARD_BITS: u64 = 64;

/// Working parameters for one computation, fixed up front.
#[derive(Debug, Clone, Copy)]
pub struct Plan {
    pub digits: usize,
    pub base: Base,
    /// Bit precision for the floating-point assembly.
    pub precision: u32,
    /// Series terms to evaluate.
    pub terms: u64,
}

impl Plan {
    /// Size the computation for `digits` fractional digits in `base`.
    ///
    /// The extra term covers a fractional term count landing just short of
    /// the request.
    pub fn new(digits: usize, base: Base) -> Result<Plan, PiError> {
        if digits == 0 {
            return Err(PiError::InvalidDigits("at least one digit is required".into()));
        }

        let bits = (digits as f64 * base.bits_per_digit()) as u64 + GUARD_BITS;
        let precision = u32::try_from(bits).map_err(|_| {
            PiError::InvalidDigits(format!(
                "{} digits exceed the supported precision range",
                digits
            ))
        })?;
        let terms = (digits as f64 / DIGITS_PER_TERM).ceil() as u64 + 1;

        let plan = Plan {
            digits,
            base,
            precision,
            terms,
        };
        debug!(digits, radix = base.radix(), precision, terms, "computation planned");
        Ok(plan)
    }
}
