//! Seeded synthetic trial batches with a known tail.
//!
//! Each trial draws a first-passage time from the chosen law and is censored
//! at the horizon (recorded as exactly `horizon`), which is how a simulation
//! with a fixed observation window reports runs that never fired.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Exp, Pareto};

use crate::error::AppError;

/// Law of the simulated first-passage times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrialModel {
    /// `S(t) = exp(-rate t)`; mean `1 / rate`.
    Exponential { rate: f64 },
    /// `S(t) = (scale / t)^alpha` for `t >= scale`; mean finite only for `alpha > 1`.
    Pareto { scale: f64, alpha: f64 },
}

impl TrialModel {
    /// Mean of the uncensored law, if finite.
    pub fn true_mean(self) -> Option<f64> {
        match self {
            TrialModel::Exponential { rate } => Some(1.0 / rate),
            TrialModel::Pareto { scale, alpha } if alpha > 1.0 => Some(alpha * scale / (alpha - 1.0)),
            TrialModel::Pareto { .. } => None,
        }
    }
}

/// Draw `count` trials and censor them at `horizon`.
pub fn generate_trials(model: TrialModel, count: usize, horizon: f64, seed: u64) -> Result<Vec<f64>, AppError> {
    if count == 0 {
        return Err(AppError::new(2, "Trial count must be > 0."));
    }
    if !(horizon.is_finite() && horizon > 0.0) {
        return Err(AppError::new(2, "Horizon must be finite and > 0."));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let trials = match model {
        TrialModel::Exponential { rate } => {
            let dist = Exp::new(rate)
                .map_err(|e| AppError::new(2, format!("Invalid exponential rate {rate}: {e}")))?;
            draw(&dist, &mut rng, count, horizon)
        }
        TrialModel::Pareto { scale, alpha } => {
            let dist = Pareto::new(scale, alpha)
                .map_err(|e| AppError::new(2, format!("Invalid Pareto scale/alpha ({scale}, {alpha}): {e}")))?;
            draw(&dist, &mut rng, count, horizon)
        }
    };

    Ok(trials)
}

fn draw(dist: &impl Distribution<f64>, rng: &mut StdRng, count: usize, horizon: f64) -> Vec<f64> {
    (0..count).map(|_| dist.sample(rng).min(horizon)).collect()
}
