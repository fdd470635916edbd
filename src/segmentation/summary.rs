//! Point summarization
//!
//! Collapses a sorted pool of inflection indices so that each cluster is
//! represented by the index preceding a gap wider than the minimum range.

use crate::error::{MotionError, MotionResult};

/// Summarize an ascending list of frame indices.
///
/// The first point is always kept. Each following point except the last is
/// kept when the gap to its successor exceeds `range`. The last point is never
/// evaluated on its own.
///
/// # Errors
///
/// Returns `EmptyInput` when `points` is empty.
pub fn summarize_points(points: &[usize], range: usize) -> MotionResult<Vec<usize>> {
    let (&first, _) = points.split_first().ok_or(MotionError::EmptyInput)?;

    let mut kept = vec![first];
    for i in 1..points.len().saturating_sub(1) {
        // unsorted neighbours count as a zero gap
        let gap = points[i + 1].saturating_sub(points[i]);
        if gap > range {
            kept.push(points[i]);
        }
    }

    Ok(kept)
}
