//! π to arbitrary precision via the Chudnovsky series and binary
//! splitting.
//!
//! The pipeline: a [`Plan`] converts a digit count and output base into a
//! bit precision and a series term count; the evaluator combines the
//! series terms over `[0, n)` by divide-and-conquer into a single
//! [`Triplet`] of exact integers; the assembler folds that triplet into a
//! high-precision float; the formatter renders a fixed-point string with
//! exactly the requested number of fractional digits.
//!
//! All exact arithmetic is done with `rug` (GMP), the floating assembly
//! with `rug::Float` (MPFR). The parallel entry point evaluates subtree
//! halves concurrently on a fixed-size `rayon` pool and produces output
//! byte-identical to the sequential path.

mod assemble;
mod bsplit;
pub mod error;
mod format;
pub mod mul;
pub mod plan;
pub mod progress;
pub mod selftest;
pub mod series;

use std::any::Any;

use crate::bsplit::{bsplit, bsplit_parallel};
use crate::progress::Progress;

pub use error::PiError;
pub use mul::{GmpMultiplier, Multiplier};
pub use plan::{Base, Plan};
pub use progress::ProgressSink;
pub use selftest::{first_mismatch, self_test};
pub use series::Triplet;

/// Decimal π with `digits` fractional digits.
///
/// # Example
/// ```
/// assert_eq!(pisplit::compute_pi(5).unwrap(), "3.14159");
/// ```
pub fn compute_pi(digits: usize) -> Result<String, PiError> {
    let plan = Plan::new(digits, Base::Dec)?;
    run(&plan, 1, None)
}

/// π with `digits` fractional digits in the given radix (10 or 16).
pub fn compute_pi_base(digits: usize, radix: u32) -> Result<String, PiError> {
    let plan = Plan::new(digits, Base::from_radix(radix)?)?;
    run(&plan, 1, None)
}

/// Sequential computation reporting one tick per evaluated series term.
pub fn compute_pi_with_progress(
    digits: usize,
    radix: u32,
    sink: &dyn ProgressSink,
) -> Result<String, PiError> {
    let plan = Plan::new(digits, Base::from_radix(radix)?)?;
    run(&plan, 1, Some(sink))
}

/// Computation on `threads` pool workers; `threads == 1` is exactly the
/// sequential path.
pub fn compute_pi_parallel(
    digits: usize,
    radix: u32,
    threads: usize,
    sink: Option<&dyn ProgressSink>,
) -> Result<String, PiError> {
    if threads == 0 {
        return Err(PiError::InvalidThreads(threads));
    }
    let plan = Plan::new(digits, Base::from_radix(radix)?)?;
    run(&plan, threads, sink)
}

fn run(plan: &Plan, threads: usize, sink: Option<&dyn ProgressSink>) -> Result<String, PiError> {
    let mul = GmpMultiplier;
    let progress = sink.map(|s| Progress::new(plan.terms, s));

    let root = if threads <= 1 {
        bsplit(0, plan.terms, &mul, progress.as_ref())
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| PiError::Worker(e.to_string()))?;
        // Stop spawning once a subrange is down to roughly a quarter of a
        // worker's share; below that the task overhead outweighs the win.
        let chunk = (plan.terms / (threads as u64 * 4)).max(1);
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            bsplit_parallel(&pool, 0, plan.terms, chunk, &mul, progress.as_ref())
        }))
        .map_err(|payload| PiError::Worker(panic_message(payload)))?
    };

    let pi = assemble::assemble(&root, plan.precision);
    Ok(format::to_fixed(&pi, plan.digits, plan.base))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker task panicked".to_string()
    }
}
