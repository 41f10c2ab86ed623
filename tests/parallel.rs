use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use pisplit::{
    compute_pi, compute_pi_base, compute_pi_parallel, compute_pi_with_progress, Base, PiError,
    Plan, ProgressSink,
};

struct TickCounter(AtomicU64);

impl ProgressSink for TickCounter {
    fn tick(&self, _done: u64, _total: u64) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

struct TickRecorder(Mutex<Vec<(u64, u64)>>);

impl ProgressSink for TickRecorder {
    fn tick(&self, done: u64, total: u64) {
        self.0.lock().unwrap().push((done, total));
    }
}

#[test]
fn parallel_output_matches_sequential() {
    for digits in [100, 1000, 10_000] {
        let sequential = compute_pi(digits).unwrap();
        for workers in [2, 4] {
            let parallel = compute_pi_parallel(digits, 10, workers, None).unwrap();
            assert_eq!(parallel, sequential, "digits={} W={}", digits, workers);
        }
    }
}

#[test]
fn one_worker_is_the_sequential_path() {
    assert_eq!(
        compute_pi_parallel(500, 10, 1, None).unwrap(),
        compute_pi(500).unwrap()
    );
}

#[test]
fn hex_parallel_matches_sequential() {
    assert_eq!(
        compute_pi_parallel(100, 16, 3, None).unwrap(),
        compute_pi_base(100, 16).unwrap()
    );
}

#[test]
fn zero_workers_is_rejected() {
    assert!(matches!(
        compute_pi_parallel(10, 10, 0, None),
        Err(PiError::InvalidThreads(0))
    ));
}

#[test]
fn sequential_progress_ticks_every_term_in_order() {
    let sink = TickRecorder(Mutex::new(Vec::new()));
    compute_pi_with_progress(200, 10, &sink).unwrap();

    let terms = Plan::new(200, Base::Dec).unwrap().terms;
    let ticks = sink.0.lock().unwrap();
    let expected: Vec<(u64, u64)> = (1..=terms).map(|done| (done, terms)).collect();
    assert_eq!(*ticks, expected);
}

#[test]
fn parallel_progress_ticks_every_term() {
    let sink = TickCounter(AtomicU64::new(0));
    compute_pi_parallel(2000, 10, 4, Some(&sink)).unwrap();

    let terms = Plan::new(2000, Base::Dec).unwrap().terms;
    assert_eq!(sink.0.load(Ordering::Relaxed), terms);
}
