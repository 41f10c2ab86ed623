use rayon::ThreadPool;

use crate::mul::Multiplier;
use crate::progress::Progress;
use crate::series::Triplet;

/// Binary splitting for the Chudnovsky series over `[a, b)`.
///
/// Divide-and-conquer keeps the multiplicands at every merge of comparable
/// size, so the bignum library's subquadratic multiplication actually gets
/// to act; a linear accumulation would keep multiplying a huge running
/// product by a small term and degrade to quadratic cost overall.
pub(crate) fn bsplit(
    a: u64,
    b: u64,
    mul: &dyn Multiplier,
    progress: Option<&Progress>,
) -> Triplet {
    debug_assert!(a < b);
    if b - a == 1 {
        let leaf = Triplet::term(a);
        if let Some(p) = progress {
            p.leaf_done();
        }
        return leaf;
    }

    let m = (a + b) / 2;
    let left = bsplit(a, m, mul, progress);
    let right = bsplit(m, b, mul, progress);
    left.join(right, mul)
}

/// Parallel variant on a fixed-size worker pool.
///
/// Subranges wider than `chunk` are split into two concurrent tasks; the
/// parent blocks on both children before merging, so the combination order
/// is fixed and the root triplet is bit-identical to the sequential walk.
/// Subranges at or below `chunk` run sequentially inside the executing
/// worker, which keeps the pool from being flooded with tiny tasks.
///
/// A panic in either child is re-raised in the parent after its sibling
/// has been joined; no worker is left orphaned.
pub(crate) fn bsplit_parallel(
    pool: &ThreadPool,
    a: u64,
    b: u64,
    chunk: u64,
    mul: &dyn Multiplier,
    progress: Option<&Progress>,
) -> Triplet {
    let chunk = chunk.max(1);
    pool.install(|| split_join(a, b, chunk, mul, progress))
}

fn split_join(
    a: u64,
    b: u64,
    chunk: u64,
    mul: &dyn Multiplier,
    progress: Option<&Progress>,
) -> Triplet {
    if b - a <= chunk {
        return bsplit(a, b, mul, progress);
    }

    let m = (a + b) / 2;
    let (left, right) = rayon::join(
        || split_join(a, m, chunk, mul, progress),
        || split_join(m, b, chunk, mul, progress),
    );
    left.join(right, mul)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mul::GmpMultiplier;
    use crate::progress::ProgressSink;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    struct Recorder(Mutex<Vec<u64>>);

    impl ProgressSink for Recorder {
        fn tick(&self, done: u64, _total: u64) {
            self.0.lock().unwrap().push(done);
        }
    }

    struct Counter(AtomicU64);

    impl ProgressSink for Counter {
        fn tick(&self, _done: u64, _total: u64) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn single_leaf_range() {
        let mul = GmpMultiplier;
        assert_eq!(bsplit(3, 4, &mul, None), Triplet::term(3));
    }

    #[test]
    fn matches_leaf_fold() {
        let mul = GmpMultiplier;
        let folded = (0..9)
            .map(Triplet::term)
            .reduce(|acc, t| acc.join(t, &mul))
            .unwrap();
        assert_eq!(bsplit(0, 9, &mul, None), folded);
    }

    #[test]
    fn sequential_ticks_in_order() {
        let mul = GmpMultiplier;
        let sink = Recorder(Mutex::new(Vec::new()));
        let progress = Progress::new(6, &sink);
        bsplit(0, 6, &mul, Some(&progress));
        assert_eq!(*sink.0.lock().unwrap(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn parallel_is_bit_identical() {
        let mul = GmpMultiplier;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .unwrap();
        let sequential = bsplit(0, 37, &mul, None);
        for chunk in [1, 3, 8, 64] {
            assert_eq!(
                bsplit_parallel(&pool, 0, 37, chunk, &mul, None),
                sequential
            );
        }
    }

    #[test]
    fn parallel_ticks_once_per_leaf() {
        let mul = GmpMultiplier;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(2)
            .build()
            .unwrap();
        let sink = Counter(AtomicU64::new(0));
        let progress = Progress::new(31, &sink);
        bsplit_parallel(&pool, 0, 31, 4, &mul, Some(&progress));
        assert_eq!(sink.0.load(Ordering::Relaxed), 31);
    }
}
