//! Inflection point detection on a second derivative
//!
//! The scanner opens a window at the first signed sample and closes it when
//! a sample of the opposite sign arrives. Each closed window yields one
//! inflection at the midpoint of the window start and the closing sample.
//! The sample right after a closing sample is consumed by the reset.

/// Sign of a sample relative to the zero band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Positive,
    Negative,
}

impl Sign {
    fn of(value: f64, tolerance: f64) -> Option<Self> {
        if value > tolerance {
            Some(Self::Positive)
        } else if value < -tolerance {
            Some(Self::Negative)
        } else {
            None
        }
    }
}

/// Scanner state between samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// No signed sample seen since the last reset
    Idle,
    /// One sign seen; window opened at `start`
    Open { sign: Sign, start: usize },
    /// Window just closed; the next sample is skipped
    Reset,
}

/// Detect inflection points with exact zero as the only inert value.
///
/// Output indices are ascending and index into `second_derivative`.
#[must_use]
pub fn find_inflection_points(second_derivative: &[f64]) -> Vec<usize> {
    find_inflection_points_with_tolerance(second_derivative, 0.0)
}

/// Detect inflection points, treating `|v| <= tolerance` as zero.
///
/// NaN samples are inert; callers surface non-finite data before scanning.
#[must_use]
pub fn find_inflection_points_with_tolerance(
    second_derivative: &[f64],
    tolerance: f64,
) -> Vec<usize> {
    let mut points = Vec::new();
    let mut state = ScanState::Idle;

    for (i, &value) in second_derivative.iter().enumerate() {
        if state == ScanState::Reset {
            state = ScanState::Idle;
            continue;
        }

        let Some(sign) = Sign::of(value, tolerance) else {
            continue;
        };

        state = match state {
            ScanState::Open { sign: open, start } if open != sign => {
                points.push((start + i) / 2);
                ScanState::Reset
            }
            ScanState::Open { .. } => state,
            ScanState::Idle | ScanState::Reset => ScanState::Open { sign, start: i },
        };
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternating_signs() {
        assert_eq!(find_inflection_points(&[1.0, 2.0, -1.0, -2.0, 1.0, 2.0]), vec![1]);
    }

    #[test]
    fn test_empty_and_single_sign() {
        assert!(find_inflection_points(&[]).is_empty());
        assert!(find_inflection_points(&[1.0, 2.0, 3.0]).is_empty());
        assert!(find_inflection_points(&[-1.0, -0.5]).is_empty());
        assert!(find_inflection_points(&[0.0; 8]).is_empty());
    }

    #[test]
    fn test_negative_then_positive() {
        assert_eq!(find_inflection_points(&[-1.0, 0.0, 0.0, 1.0]), vec![1]);
    }

    #[test]
    fn test_window_starts_at_first_signed_sample() {
        // window opens at 1 and closes at 5
        assert_eq!(
            find_inflection_points(&[0.0, 1.0, 1.0, 1.0, 0.0, -1.0]),
            vec![3]
        );
    }

    #[test]
    fn test_zeros_are_inert() {
        assert_eq!(
            find_inflection_points(&[0.0, 0.0, 2.0, 0.0, 0.0, 0.0, -3.0]),
            vec![4]
        );
    }

    #[test]
    fn test_sample_after_close_is_skipped() {
        // closes at 1, index 2 is consumed, index 3 opens a new window closed at 4
        assert_eq!(
            find_inflection_points(&[1.0, -1.0, 1.0, -1.0, 1.0]),
            vec![0, 3]
        );
    }

    #[test]
    fn test_step_edge_pattern() {
        // second derivative of an upward then downward step
        let mut data = vec![0.0; 20];
        data[4] = 1.0;
        data[5] = -1.0;
        data[14] = -1.0;
        data[15] = 1.0;
        assert_eq!(find_inflection_points(&data), vec![4, 14]);
    }

    #[test]
    fn test_tolerance_suppresses_residue() {
        let data = [1e-16, -1e-16, 0.0, 0.0, 1.0, -1.0, 0.0, 2e-16, -3e-16];
        assert_eq!(find_inflection_points(&data), vec![0, 4, 7]);
        assert_eq!(find_inflection_points_with_tolerance(&data, 1e-9), vec![4]);
    }

    #[test]
    fn test_nan_is_inert() {
        assert_eq!(
            find_inflection_points(&[1.0, f64::NAN, -1.0]),
            vec![1]
        );
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn property_points_ascending_and_in_bounds(
                data in prop::collection::vec(-1.0f64..1.0, 0..400),
            ) {
                let points = find_inflection_points(&data);
                prop_assert!(points.windows(2).all(|w| w[0] < w[1]));
                prop_assert!(points.iter().all(|&p| p < data.len()));
                prop_assert!(points.len() <= data.len() / 2);
            }
        }
    }
}
