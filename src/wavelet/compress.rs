//! Hard-threshold compression of Haar coefficients
//!
//! Coefficients are ranked by magnitude and everything below the cutoff is
//! zeroed. Reconstructing from the survivors gives a step-like approximation
//! whose detail shrinks with the kept fraction.

use super::haar::{inverse_transform, pad, transform};
use crate::error::{MotionError, MotionResult};

/// Check that a kept fraction lies in `[0, 1]`.
///
/// # Errors
///
/// Returns `InvalidConfig` for values outside the interval or NaN.
pub fn validate_threshold(threshold: f64) -> MotionResult<()> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(MotionError::InvalidConfig(format!(
            "compress threshold {threshold} outside [0, 1]"
        )))
    }
}

/// Magnitude below which coefficients are discarded.
///
/// The cutoff is the magnitude at rank `floor(len * threshold)` in descending
/// order; a rank past the end keeps everything.
#[must_use]
pub fn cutoff_magnitude(coefficients: &[f64], threshold: f64) -> f64 {
    let mut magnitudes: Vec<f64> = coefficients.iter().map(|c| c.abs()).collect();
    magnitudes.sort_by(|a, b| b.total_cmp(a));

    let rank = (coefficients.len() as f64 * threshold).floor() as usize;
    magnitudes.get(rank).copied().unwrap_or(0.0)
}

/// Zero every coefficient whose magnitude is strictly below the cutoff.
///
/// `threshold` is the fraction of coefficients kept: 1.0 keeps all of them,
/// 0.0 keeps only the largest magnitude (and anything tied with it).
///
/// # Errors
///
/// Returns `InvalidConfig` if `threshold` is outside `[0, 1]`.
pub fn compress(coefficients: &[f64], threshold: f64) -> MotionResult<Vec<f64>> {
    validate_threshold(threshold)?;

    let cutoff = cutoff_magnitude(coefficients, threshold);
    Ok(coefficients
        .iter()
        .map(|&c| if c.abs() < cutoff { 0.0 } else { c })
        .collect())
}

/// Step-function approximation of a signal.
///
/// Runs transform, compress and inverse transform, then truncates the
/// reconstruction back to the original signal length.
///
/// # Errors
///
/// Fails on an empty signal or an out-of-range threshold.
pub fn approximate(signal: &[f64], threshold: f64) -> MotionResult<Vec<f64>> {
    validate_threshold(threshold)?;
    let (_, original_len) = pad(signal)?;

    let coefficients = transform(signal)?;
    let kept = compress(&coefficients, threshold)?;
    let mut restored = inverse_transform(&kept)?;
    restored.truncate(original_len);
    Ok(restored)
}
