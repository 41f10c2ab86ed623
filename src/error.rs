use std::fmt::{self, Display, Formatter};
use std::io;

/// Errors surfaced by the library and mapped to exit codes by the CLI.
///
/// Allocation failure inside the bignum library aborts the process and is
/// not representable here.
#[derive(Debug)]
pub enum PiError {
    /// Digit count of zero, or one too large for the precision field.
    InvalidDigits(String),
    /// Output radix other than 10 or 16.
    InvalidBase(u32),
    /// Worker count of zero.
    InvalidThreads(usize),
    /// Output file open/write failure.
    Io(io::Error),
    /// A task panicked inside the worker pool.
    Worker(String),
}

impl Display for PiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PiError::InvalidDigits(msg) => write!(f, "invalid digit count: {}", msg),
            PiError::InvalidBase(radix) => {
                write!(f, "unsupported base {} (expected 10 or 16)", radix)
            }
            PiError::InvalidThreads(n) => {
                write!(f, "invalid worker count {} (at least 1 required)", n)
            }
            PiError::Io(e) => write!(f, "I/O error: {}", e),
            PiError::Worker(msg) => write!(f, "worker failure: {}", msg),
        }
    }
}

impl std::error::Error for PiError {}

impl From<io::Error> for PiError {
    fn from(value: io::Error) -> Self {
        PiError::Io(value)
    }
}
