//! Tail-window regression sweep.
//!
//! Given:
//! - sorted fired times `t_i`
//! - survival estimates `S_i`
//! - a tail family
//!
//! we regress, for each admissible window `limit`:
//! - `ln S` on `t` (exponential) or on `ln t` (power law)
//!
//! and record the window's slope and squared correlation. Windows are
//! independent, so they are evaluated in parallel; the table comes back in
//! ascending `limit` order regardless.

use rayon::prelude::*;
use tracing::debug;

use crate::domain::{FitRow, FitTable, TailFamily};
use crate::error::EstimateError;
use crate::fit::windows::window_limits;
use crate::math::{LineFit, linear_regression};
use crate::models::{admits_finite_mean, regressor};

/// Regress every admissible window, without family-specific filtering.
///
/// Windows whose regression is undefined, or that keep fewer than
/// `min_samples` finite points once `ln 0` pairs are dropped, are left out of
/// the table.
///
/// # Panics
/// Panics if `survival` is not co-indexed with `fired` (same length).
pub fn regress_windows(
    family: TailFamily,
    fired: &[f64],
    survival: &[f64],
    min_samples: usize,
) -> Result<FitTable, EstimateError> {
    assert_eq!(fired.len(), survival.len(), "survival must be co-indexed with fired times");
    let limits = window_limits(fired.len(), min_samples)?;

    // Transform once; each window is a suffix of these.
    let x: Vec<f64> = fired.iter().map(|&t| regressor(family, t)).collect();
    let y: Vec<f64> = survival.iter().map(|s| s.ln()).collect();

    let rows: Vec<FitRow> = limits
        .into_par_iter()
        .filter_map(|limit| {
            let fit = regress_suffix(&x, &y, limit).filter(|fit| fit.n >= min_samples);
            fit_row(limit, fired[limit], fit)
        })
        .collect();

    Ok(FitTable::new(rows))
}

fn fit_row(limit: usize, t_prime: f64, fit: Option<LineFit>) -> Option<FitRow> {
    match fit {
        Some(fit) => Some(FitRow {
            limit,
            t_prime,
            slope: fit.slope,
            r_squared: fit.r_squared,
        }),
        None => {
            debug!(limit, t_prime, "skipping degenerate or undersized tail window");
            None
        }
    }
}

/// Regress every admissible window and apply the family's finite-mean filter.
///
/// Errors:
/// - `DegenerateFit` if no window had a defined regression
/// - `DivergentTail` if the power-law filter removes every window
pub fn sweep_windows(
    family: TailFamily,
    fired: &[f64],
    survival: &[f64],
    min_samples: usize,
) -> Result<FitTable, EstimateError> {
    let mut table = regress_windows(family, fired, survival, min_samples)?;
    if table.is_empty() {
        return Err(EstimateError::DegenerateFit);
    }

    match family {
        TailFamily::Exponential => {}
        TailFamily::Power => {
            let before = table.len();
            table.retain(|row| admits_finite_mean(family, row.slope));
            debug!(before, after = table.len(), "power-law windows with slope < -1");
            if table.is_empty() {
                return Err(EstimateError::DivergentTail);
            }
        }
    }

    Ok(table)
}

/// Regression line of a single window (for plotting the chosen fit).
pub fn fit_window(family: TailFamily, fired: &[f64], survival: &[f64], limit: usize) -> Option<LineFit> {
    if limit >= fired.len() || fired.len() != survival.len() {
        return None;
    }
    let x: Vec<f64> = fired[limit..].iter().map(|&t| regressor(family, t)).collect();
    let y: Vec<f64> = survival[limit..].iter().map(|s| s.ln()).collect();
    regress_suffix(&x, &y, 0)
}

/// Regress `y[limit..]` on `x[limit..]`, dropping non-finite pairs
/// (`ln 0` survival when every trial fired, `ln 0` time for power laws).
fn regress_suffix(x: &[f64], y: &[f64], limit: usize) -> Option<LineFit> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x[limit..]
        .iter()
        .zip(&y[limit..])
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .unzip();
    linear_regression(&xs, &ys)
}
