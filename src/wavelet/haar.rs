//! Orthonormal Haar transform over power-of-two sequences
//!
//! The forward pass works in place on a zero-padded copy of the signal,
//! pairing neighbours at stride 2, then 4, and so on until a single
//! approximation coefficient remains at index 0. The inverse runs the same
//! butterfly with the strides in reverse order.

use std::f64::consts::SQRT_2;

use crate::error::{MotionError, MotionResult};

/// Zero-pad a signal to the next power of two.
///
/// Returns the padded copy and the original length. Signals whose length is
/// already a power of two are copied unchanged.
///
/// # Errors
///
/// Returns `InsufficientLength` for an empty signal.
pub fn pad(signal: &[f64]) -> MotionResult<(Vec<f64>, usize)> {
    if signal.is_empty() {
        return Err(MotionError::insufficient("pad", 1, 0));
    }

    let mut padded = vec![0.0; signal.len().next_power_of_two()];
    padded[..signal.len()].copy_from_slice(signal);
    Ok((padded, signal.len()))
}

/// Number of butterfly passes for a power-of-two length.
fn levels(len: usize) -> usize {
    len.trailing_zeros() as usize
}

/// Apply the Haar butterfly to every `(i, i + step / 2)` pair.
fn butterfly_pass(data: &mut [f64], step: usize) {
    let half = step / 2;
    for i in (0..data.len()).step_by(step) {
        let left = data[i];
        let right = data[i + half];
        data[i] = (left + right) / SQRT_2;
        data[i + half] = (left - right) / SQRT_2;
    }
}

/// Forward Haar transform.
///
/// The signal is zero-padded to `next_power_of_two(len)` before the passes,
/// so the result length is always a power of two.
///
/// # Errors
///
/// Returns `InsufficientLength` for an empty signal.
pub fn transform(signal: &[f64]) -> MotionResult<Vec<f64>> {
    let (mut coefficients, _) = pad(signal)?;
    let len = coefficients.len();

    for m in (0..levels(len)).rev() {
        let bands = 1usize << m;
        butterfly_pass(&mut coefficients, len / bands);
    }

    Ok(coefficients)
}

/// Inverse Haar transform; exact inverse of [`transform`] up to rounding.
///
/// # Errors
///
/// Returns `InvalidLength` unless the input length is a non-zero power of two.
pub fn inverse_transform(coefficients: &[f64]) -> MotionResult<Vec<f64>> {
    let len = coefficients.len();
    if !len.is_power_of_two() {
        return Err(MotionError::InvalidLength {
            operation: "inverse_transform",
            length: len,
        });
    }

    let mut signal = coefficients.to_vec();
    for m in 0..levels(len) {
        let bands = 1usize << m;
        butterfly_pass(&mut signal, len / bands);
    }

    Ok(signal)
}
