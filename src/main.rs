use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pisplit::{compute_pi_parallel, self_test, PiError, ProgressSink};

#[derive(Parser)]
#[command(name = "pisplit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compute π with the Chudnovsky series and binary splitting (GMP/MPFR)")]
struct Cli {
    /// Number of fractional digits to compute. Accepts plain integers
    /// (12345), scientific notation (1e6) and K/M/G/T suffixes (10M).
    #[arg(
        short = 'n',
        long = "digits",
        value_name = "N",
        value_parser = parse_digit_spec,
        required_unless_present = "self_test"
    )]
    digits: Option<u64>,

    /// Write the digits to FILE instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Output base for the fractional digits.
    #[arg(short, long, value_enum, default_value_t = BaseArg::Dec)]
    base: BaseArg,

    /// Worker threads for the series evaluation.
    #[arg(short, long, value_name = "W", default_value_t = 1)]
    threads: usize,

    /// Suppress the banner and timing output on stderr.
    #[arg(short, long)]
    quiet: bool,

    /// Render a progress bar on stderr while evaluating.
    #[arg(short, long)]
    progress: bool,

    /// Verify the output against the library π constant and exit
    /// (uses --digits if given, 1000 otherwise).
    #[arg(short = 'T', long = "self-test")]
    self_test: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum BaseArg {
    Dec,
    Hex,
}

impl BaseArg {
    fn radix(self) -> u32 {
        match self {
            BaseArg::Dec => 10,
            BaseArg::Hex => 16,
        }
    }
}

/// Digit count grammar: a decimal integer with an optional scale.
///
/// `250000`, `1e6` and `25K` all parse; scale suffixes K, M, G and T
/// (case-insensitive) stand for the matching powers of 1000. Both the
/// exponent and the suffix reduce to the same value-times-10^zeros form.
fn parse_digit_spec(input: &str) -> Result<u64, String> {
    let text = input.trim();
    if text.is_empty() {
        return Err("digit count is empty".to_string());
    }

    let (number, zeros) = if let Some((mantissa, exponent)) = text.split_once(['e', 'E']) {
        let zeros: u32 = exponent
            .parse()
            .map_err(|_| format!("'{}': exponent is not a number", input))?;
        (mantissa, zeros)
    } else {
        match text.chars().next_back() {
            Some(c) if c.is_ascii_alphabetic() => {
                let zeros = match c.to_ascii_uppercase() {
                    'K' => 3,
                    'M' => 6,
                    'G' => 9,
                    'T' => 12,
                    other => {
                        return Err(format!("'{}': unknown scale suffix '{}'", input, other))
                    }
                };
                (&text[..text.len() - 1], zeros)
            }
            _ => (text, 0),
        }
    };

    if number.is_empty() {
        return Err(format!("'{}': no digits before the scale", input));
    }
    let value: u64 = number
        .parse()
        .map_err(|_| format!("'{}' is not a digit count", input))?;

    10u64
        .checked_pow(zeros)
        .and_then(|scale| value.checked_mul(scale))
        .ok_or_else(|| format!("'{}' does not fit in 64 bits", input))
}

/// Single-line progress bar on stderr, refreshed on whole-percent steps.
struct StderrProgress {
    started: Instant,
    last_percent: AtomicU64,
}

impl StderrProgress {
    fn new() -> Self {
        StderrProgress {
            started: Instant::now(),
            last_percent: AtomicU64::new(u64::MAX),
        }
    }
}

impl ProgressSink for StderrProgress {
    fn tick(&self, done: u64, total: u64) {
        let percent = done * 100 / total.max(1);
        if self.last_percent.swap(percent, Ordering::Relaxed) == percent && done != total {
            return;
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        let eta = if done > 0 && done < total {
            elapsed * (total - done) as f64 / done as f64
        } else {
            0.0
        };
        eprint!("\r{:3}%  {}/{} terms  eta {:5.1}s", percent, done, total, eta);
        if done == total {
            eprintln!();
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn banner() {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        "pisplit, Chudnovsky + binary splitting (GMP/MPFR)"
    );
}

fn exit_code(err: &PiError) -> i32 {
    match err {
        PiError::InvalidDigits(_) | PiError::InvalidBase(_) | PiError::InvalidThreads(_) => 1,
        PiError::Io(_) | PiError::Worker(_) => 2,
    }
}

fn write_output(pi: &str, out: Option<&Path>) -> io::Result<()> {
    match out {
        Some(path) => fs::write(path, format!("{}\n", pi)),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", pi)
        }
    }
}

fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            return code;
        }
    };

    if !cli.quiet {
        init_logging();
        banner();
    }

    if cli.threads < 1 {
        eprintln!("Error: {}", PiError::InvalidThreads(cli.threads));
        return 1;
    }

    if cli.self_test {
        let digits = cli.digits.unwrap_or(1000) as usize;
        return match self_test(digits) {
            Ok((true, verdict)) => {
                info!("self-test ok: {}", verdict);
                0
            }
            Ok((false, verdict)) => {
                eprintln!("self-test FAILED: {}", verdict);
                3
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                exit_code(&e)
            }
        };
    }

    let digits = match cli.digits {
        Some(d) => d as usize,
        None => {
            // Unreachable through clap, kept as a hard stop.
            eprintln!("Error: missing required option --digits N");
            return 1;
        }
    };

    info!(digits, radix = cli.base.radix(), threads = cli.threads, "request accepted");

    let started = Instant::now();
    let bar = StderrProgress::new();
    let sink: Option<&dyn ProgressSink> = if cli.progress { Some(&bar) } else { None };

    match compute_pi_parallel(digits, cli.base.radix(), cli.threads, sink) {
        Ok(pi) => {
            if let Err(e) = write_output(&pi, cli.out.as_deref()) {
                eprintln!("Error: {}", PiError::Io(e));
                return 2;
            }
            if let Some(path) = &cli.out {
                info!(digits, path = %path.display(), "digits written");
            }
            info!(elapsed_secs = started.elapsed().as_secs_f64(), "computation finished");
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code(&e)
        }
    }
}

fn main() {
    process::exit(run());
}
