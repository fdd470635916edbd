//! Parallelism abstraction for channel and sweep evaluation
//!
//! Channel pipelines and sweep cells are independent and side-effect-free,
//! so they are mapped in parallel and merged afterwards.
//!
//! - `parallel` feature: multi-threaded execution via rayon
//! - Sequential fallback: same API without the feature
//! - Both paths return results in index order

use crate::error::MotionResult;

/// Configure the global thread pool with the specified number of threads.
///
/// Only the first successful call takes effect (rayon limitation); later
/// calls report the size of the pool already in place.
///
/// # Arguments
///
/// * `num_threads` - Number of threads to use. If None, uses rayon's default
///   (typically the number of logical CPUs).
#[cfg(feature = "parallel")]
pub fn configure_thread_pool(num_threads: Option<usize>) -> MotionResult<usize> {
    use rayon::ThreadPoolBuilder;

    let builder = ThreadPoolBuilder::new();
    let builder = if let Some(n) = num_threads {
        builder.num_threads(n)
    } else {
        builder
    };

    match builder.build_global() {
        Ok(()) => Ok(rayon::current_num_threads()),
        // Pool already initialized
        Err(_) => Ok(rayon::current_num_threads()),
    }
}

/// Sequential fallback - no thread pool to configure.
#[cfg(not(feature = "parallel"))]
pub fn configure_thread_pool(num_threads: Option<usize>) -> MotionResult<usize> {
    let _ = num_threads;
    Ok(1)
}

/// Parallel map over a range of indices.
///
/// Returns a vector of results in index order, independent of the order in
/// which workers finish.
///
/// # Example
///
/// ```ignore
/// let lengths = parallel_map(0..channels.len(), |i| channels[i].len());
/// ```
#[cfg(feature = "parallel")]
pub fn parallel_map<T, F>(range: std::ops::Range<usize>, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Send + Sync,
{
    use rayon::prelude::*;
    range.into_par_iter().map(f).collect()
}

/// Sequential fallback when `parallel` feature is disabled.
#[cfg(not(feature = "parallel"))]
pub fn parallel_map<T, F>(range: std::ops::Range<usize>, f: F) -> Vec<T>
where
    F: Fn(usize) -> T,
{
    range.map(f).collect()
}

/// Parallel map that collects Results, short-circuiting on error.
///
/// # Returns
///
/// Ok(Vec) in index order if all succeed, Err otherwise.
#[cfg(feature = "parallel")]
pub fn parallel_try_map<T, F>(range: std::ops::Range<usize>, f: F) -> MotionResult<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> MotionResult<T> + Send + Sync,
{
    use rayon::prelude::*;
    range.into_par_iter().map(f).collect()
}

/// Sequential fallback for try_map.
#[cfg(not(feature = "parallel"))]
pub fn parallel_try_map<T, F>(range: std::ops::Range<usize>, f: F) -> MotionResult<Vec<T>>
where
    F: Fn(usize) -> MotionResult<T>,
{
    range.map(f).collect()
}

/// Check if parallel execution is available.
#[must_use]
pub fn is_parallel_available() -> bool {
    cfg!(feature = "parallel")
}

/// Get the number of threads available for parallel execution.
#[cfg(feature = "parallel")]
#[must_use]
pub fn thread_count() -> usize {
    rayon::current_num_threads()
}

/// Sequential fallback - always 1 thread.
#[cfg(not(feature = "parallel"))]
#[must_use]
pub fn thread_count() -> usize {
    1
}
