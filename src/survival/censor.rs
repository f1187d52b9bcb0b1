//! Split a trial batch into fired and censored trials.

use crate::domain::CensoredTrials;
use crate::error::EstimateError;

/// Validate the batch, resolve the horizon, and return the fired trials sorted
/// ascending.
///
/// - `horizon = None` uses the largest trial time.
/// - A trial fired when it is strictly below the horizon; trials at or above
///   it are censored.
pub fn censor_trials(endtimes: &[f64], horizon: Option<f64>) -> Result<CensoredTrials, EstimateError> {
    if endtimes.is_empty() {
        return Err(EstimateError::InsufficientData {
            fired: 0,
            required: 1,
        });
    }
    if let Some((index, &value)) = endtimes
        .iter()
        .enumerate()
        .find(|(_, t)| !t.is_finite() || **t < 0.0)
    {
        return Err(EstimateError::InvalidTrialTime { index, value });
    }

    let (min, max) = endtimes
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &t| (lo.min(t), hi.max(t)));

    let horizon = horizon.unwrap_or(max);
    if !(horizon.is_finite() && horizon > 0.0) {
        return Err(EstimateError::InvalidHorizon(format!(
            "horizon must be finite and > 0, got {horizon}"
        )));
    }
    if horizon <= min {
        return Err(EstimateError::InvalidHorizon(format!(
            "horizon {horizon} <= earliest trial {min}; no trial fired"
        )));
    }

    let mut fired: Vec<f64> = endtimes.iter().copied().filter(|&t| t < horizon).collect();
    fired.sort_by(f64::total_cmp);

    Ok(CensoredTrials {
        n_censored: endtimes.len() - fired.len(),
        n_simulations: endtimes.len(),
        fired,
        horizon,
    })
}
