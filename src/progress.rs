use std::sync::atomic::{AtomicU64, Ordering};

/// Receiver for per-leaf completion ticks.
///
/// The evaluator calls `tick` exactly once per leaf with a monotonically
/// increasing `done` against a fixed `total`. Implementations must be cheap
/// and non-blocking; ticks issued by different workers carry no ordering
/// relative to each other.
pub trait ProgressSink: Send + Sync {
    fn tick(&self, done: u64, total: u64);
}

/// Shared leaf counter driving a sink.
///
/// The counter is the only state shared between concurrent evaluator
/// tasks.
pub(crate) struct Progress<'a> {
    total: u64,
    done: AtomicU64,
    sink: &'a dyn ProgressSink,
}

impl<'a> Progress<'a> {
    pub(crate) fn new(total: u64, sink: &'a dyn ProgressSink) -> Self {
        Progress {
            total,
            done: AtomicU64::new(0),
            sink,
        }
    }

    pub(crate) fn leaf_done(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        self.sink.tick(done, self.total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder(Mutex<Vec<(u64, u64)>>);

    impl ProgressSink for Recorder {
        fn tick(&self, done: u64, total: u64) {
            self.0.lock().unwrap().push((done, total));
        }
    }

    #[test]
    fn counter_is_monotone() {
        let sink = Recorder(Mutex::new(Vec::new()));
        let progress = Progress::new(3, &sink);
        progress.leaf_done();
        progress.leaf_done();
        progress.leaf_done();
        assert_eq!(*sink.0.lock().unwrap(), vec![(1, 3), (2, 3), (3, 3)]);
    }
}
