//! Admissible truncation windows.
//!
//! A window is the suffix `fired[limit..]` of the sorted fired times. Every
//! window keeps at least `min_samples` points, so `limit` runs over
//! `0..=n_fired - min_samples`.

use std::ops::RangeInclusive;

use crate::error::EstimateError;

/// Default minimum number of points per regression window.
pub const DEFAULT_MIN_SAMPLES: usize = 5;

/// Smallest window a line can be fitted through.
pub const MIN_WINDOW: usize = 2;

/// Range of admissible `limit` values.
pub fn window_limits(n_fired: usize, min_samples: usize) -> Result<RangeInclusive<usize>, EstimateError> {
    if min_samples < MIN_WINDOW {
        return Err(EstimateError::InvalidMinSamples);
    }
    if n_fired < min_samples {
        return Err(EstimateError::InsufficientData {
            fired: n_fired,
            required: min_samples,
        });
    }
    Ok(0..=n_fired - min_samples)
}
