//! Best-window selection and MFPT synthesis.
//!
//! Selection rules:
//! 1. Choose the window with the highest squared correlation `R`
//! 2. On ties, prefer the smallest `tPrime` (the widest window)
//!
//! The estimate then blends the observed fired mean with the fitted tail's
//! conditional mean beyond the horizon:
//!
//! ```text
//! MFPT = f * mean(fired) + (1 - f) * E[T | T > horizon],   f = nFPT / nSimulations
//! ```

use tracing::debug;

use crate::domain::{CensoredTrials, FitRow, FitTable, TailFamily, TailFit};
use crate::error::EstimateError;
use crate::models::{admits_finite_mean, shape_from_slope};

/// Pick the row with maximum `R`; ties go to the earliest window.
///
/// Returns `None` for an empty table.
pub fn select_best(table: &FitTable) -> Option<FitRow> {
    let mut rows = table.iter();
    let mut best = *rows.next()?;
    for row in rows {
        let better_fit = row.r_squared > best.r_squared;
        let tie_earlier = row.r_squared == best.r_squared
            && (row.t_prime < best.t_prime || (row.t_prime == best.t_prime && row.limit < best.limit));
        if better_fit || tie_earlier {
            best = *row;
        }
    }
    Some(best)
}

/// Bias-corrected MFPT from the fired share, fired mean and tail mean.
pub fn blend_mfpt(fired_fraction: f64, fired_mean: f64, tail_mean: f64) -> f64 {
    fired_fraction * fired_mean + (1.0 - fired_fraction) * tail_mean
}

/// Convert the winning row into the parameter record.
pub fn synthesize(family: TailFamily, best: &FitRow, trials: &CensoredTrials) -> Result<TailFit, EstimateError> {
    if !admits_finite_mean(family, best.slope) {
        return Err(EstimateError::DivergentTail);
    }

    let shape = shape_from_slope(family, best.slope);
    let tail_mean = shape.tail_mean_beyond(trials.horizon);
    let mfpt = blend_mfpt(trials.fired_fraction(), trials.fired_mean(), tail_mean);
    if !mfpt.is_finite() {
        return Err(EstimateError::DivergentTail);
    }

    debug!(
        family = %family,
        limit = best.limit,
        t_prime = best.t_prime,
        r_squared = best.r_squared,
        shape = shape.value(),
        mfpt,
        "selected tail window"
    );

    Ok(TailFit {
        mfpt,
        shape,
        t_prime: best.t_prime,
    })
}
