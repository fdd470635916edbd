//! Array math on channel signals
//!
//! Stateless transforms over a sequence of samples, one per frame:
//! min-max normalization and first-order finite differences.

use crate::error::{ensure_finite, MotionError, MotionResult};

/// Smallest and largest sample, or `None` for an empty signal.
///
/// NaN samples are ignored by the comparison; callers that need finite data
/// check it separately.
#[must_use]
pub fn value_range(signal: &[f64]) -> Option<(f64, f64)> {
    let (&first, rest) = signal.split_first()?;
    Some(
        rest.iter()
            .fold((first, first), |(min, max), &v| (min.min(v), max.max(v))),
    )
}

/// Whether the signal has no positive dynamic range.
///
/// Empty signals count as flat.
#[must_use]
pub fn is_flat(signal: &[f64]) -> bool {
    match value_range(signal) {
        Some((min, max)) => !(max - min > 0.0),
        None => true,
    }
}

/// Min-max normalize a signal onto `[0, 1]`.
///
/// # Errors
///
/// - `InsufficientLength` for an empty signal
/// - `NonFiniteValue` if any sample is NaN or infinite
/// - `DegenerateSignal` if `max <= min` (flat signals must be filtered first)
pub fn normalize(signal: &[f64]) -> MotionResult<Vec<f64>> {
    let (min, max) =
        value_range(signal).ok_or_else(|| MotionError::insufficient("normalize", 1, 0))?;
    ensure_finite(signal, "normalize")?;

    let range = max - min;
    if !(range > 0.0) {
        return Err(MotionError::DegenerateSignal { min, max });
    }
    if !range.is_finite() {
        return Err(MotionError::NonFiniteValue {
            stage: "normalize",
            index: 0,
        });
    }

    Ok(signal.iter().map(|&v| (v - min) / range).collect())
}

/// First-order forward difference: `out[i] = signal[i + 1] - signal[i]`.
///
/// # Errors
///
/// Returns `InsufficientLength` when the signal has fewer than 2 samples.
pub fn differentiate(signal: &[f64]) -> MotionResult<Vec<f64>> {
    if signal.len() < 2 {
        return Err(MotionError::insufficient("differentiate", 2, signal.len()));
    }

    Ok(signal.windows(2).map(|w| w[1] - w[0]).collect())
}
