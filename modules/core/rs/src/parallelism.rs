use std::cmp::Ordering;
use std::thread::available_parallelism;

use eyre::Result;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Turn a requested number of threads into an actual one:
/// positive values are capped by `max`, zero means a single thread, and negative values
/// mean "all but N-1" (e.g. -1 = all available threads).
fn _normalize(requested: isize, max: isize) -> usize {
    match requested.cmp(&0) {
        Ordering::Less => (max + requested + 1).max(1) as usize,
        Ordering::Equal => 1,
        Ordering::Greater => requested.min(max) as usize,
    }
}

pub fn available(requested: isize) -> Result<usize> {
    let max = available_parallelism()?.get() as isize;
    Ok(_normalize(requested, max))
}

/// Build a dedicated rayon pool with the normalized number of threads.
pub fn pool(requested: isize) -> Result<ThreadPool> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(available(requested)?)
        .build()?;
    Ok(pool)
}
