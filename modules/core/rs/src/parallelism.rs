use std::cmp::Ordering;
use std::thread::available_parallelism;

use eyre::{Result, WrapErr};
use rayon::{ThreadPool, ThreadPoolBuilder};

// Positive values are taken as is (capped by the number of cores), zero means a single thread and
// negative values count back from the number of cores: -1 is all of them, -2 is all but one, etc.
fn _normalize(requested: isize, max: isize) -> usize {
    match requested.cmp(&0) {
        Ordering::Less => (max + requested + 1).max(1) as usize,
        Ordering::Equal => 1,
        Ordering::Greater => requested.min(max) as usize,
    }
}

/// Number of worker threads to use for the requested setting.
pub fn threads(requested: isize) -> Result<usize> {
    let max = available_parallelism()
        .wrap_err("Failed to query the available parallelism")?
        .get() as isize;
    Ok(_normalize(requested, max))
}

/// Rayon pool sized according to [`threads`]. The calling thread participates in the work.
pub fn pool(requested: isize) -> Result<ThreadPool> {
    let threads = threads(requested)?;
    ThreadPoolBuilder::new()
        .num_threads(threads)
        .use_current_thread()
        .build()
        .wrap_err_with(|| format!("Failed to build a thread pool with {threads} threads"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallelism_normalization() {
        for (threads, max, expected) in [
            (0, 8, 1),
            (1, 8, 1),
            (6, 8, 6),
            (8, 8, 8),
            (64, 8, 8),
            (-1, 8, 8),
            (-3, 8, 6),
            (-8, 8, 1),
            (-100, 8, 1),
        ] {
            assert_eq!(_normalize(threads, max), expected);
        }
    }

    #[test]
    fn test_threads_is_positive() {
        assert!(threads(-1).unwrap() >= 1);
        assert_eq!(threads(0).unwrap(), 1);
    }

    #[test]
    fn test_pool() -> Result<()> {
        let pool = pool(2)?;
        assert_eq!(pool.current_num_threads(), threads(2)?);
        assert_eq!(pool.install(|| (0..100).sum::<u64>()), 4950);
        Ok(())
    }
}
