//! The estimation facade.
//!
//! `estimate` is a pure function of its inputs:
//! censor/sort -> survival curve -> window sweep -> selection/synthesis.
//! Nothing is cached between calls, so identical inputs give bit-identical
//! outputs.

use crate::domain::{CensoredTrials, EstimateOutput, Estimation, OutputMode, TailFamily};
use crate::error::EstimateError;
use crate::fit::{DEFAULT_MIN_SAMPLES, select_best, sweep_windows, synthesize};
use crate::survival::{censor_trials, survival_curve};

/// Options for a single estimation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateOptions {
    pub tail: TailFamily,
    /// Observation horizon; `None` uses the largest trial time.
    pub horizon: Option<f64>,
    pub output: OutputMode,
    /// Minimum points retained per regression window.
    pub min_samples: usize,
}

impl Default for EstimateOptions {
    fn default() -> Self {
        Self {
            tail: TailFamily::Exponential,
            horizon: None,
            output: OutputMode::Mfpt,
            min_samples: DEFAULT_MIN_SAMPLES,
        }
    }
}

impl EstimateOptions {
    pub fn with_tail(mut self, tail: TailFamily) -> Self {
        self.tail = tail;
        self
    }

    pub fn with_horizon(mut self, horizon: f64) -> Self {
        self.horizon = Some(horizon);
        self
    }

    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }
}

/// Estimate the MFPT of a trial batch and return the requested output.
pub fn estimate(endtimes: &[f64], opts: &EstimateOptions) -> Result<EstimateOutput, EstimateError> {
    let run = estimate_detailed(endtimes, opts.tail, opts.horizon, opts.min_samples)?;
    Ok(match opts.output {
        OutputMode::Mfpt => EstimateOutput::Mfpt(run.fit.mfpt),
        OutputMode::Params => EstimateOutput::Params(run.fit),
        OutputMode::Table => EstimateOutput::Table(run.table),
    })
}

/// Run the full pipeline and keep every intermediate artefact.
pub fn estimate_detailed(
    endtimes: &[f64],
    tail: TailFamily,
    horizon: Option<f64>,
    min_samples: usize,
) -> Result<Estimation, EstimateError> {
    let trials = censor_trials(endtimes, horizon)?;
    let survival = survival_curve(trials.n_fired(), trials.n_simulations);
    estimate_censored(&trials, &survival, tail, min_samples)
}

/// Fit an already censored batch against its survival curve.
///
/// Callers that also plot or export the intermediates use this so that what
/// they show is exactly what was fitted.
pub fn estimate_censored(
    trials: &CensoredTrials,
    survival: &[f64],
    tail: TailFamily,
    min_samples: usize,
) -> Result<Estimation, EstimateError> {
    let table = sweep_windows(tail, &trials.fired, survival, min_samples)?;
    let best_row = select_best(&table).ok_or(EstimateError::DegenerateFit)?;
    let fit = synthesize(tail, &best_row, trials)?;

    Ok(Estimation {
        tail,
        min_samples,
        trials: trials.summary(),
        table,
        best_row,
        fit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synthetic::{TrialModel, generate_trials};
    use crate::domain::TailShape;
    use crate::fit::regress_windows;
    use proptest::prelude::*;

    const SCENARIO: [f64; 8] = [0.5, 1.2, 1.9, 2.4, 3.1, 5.0, 5.0, 5.0];

    fn scenario_opts() -> EstimateOptions {
        EstimateOptions::default().with_horizon(5.0).with_min_samples(2)
    }

    #[test]
    fn concrete_scenario_exceeds_fired_mean() {
        let out = estimate(&SCENARIO, &scenario_opts().with_output(OutputMode::Params)).unwrap();
        let EstimateOutput::Params(fit) = out else {
            panic!("expected params output");
        };
        let TailShape::Rate(k) = fit.shape else {
            panic!("expected an exponential rate");
        };
        assert!(k.is_finite() && k > 0.0, "k={k}");
        assert!(fit.mfpt > 1.82, "mfpt={}", fit.mfpt);
        assert!([0.5, 1.2, 1.9, 2.4].contains(&fit.t_prime));
    }

    #[test]
    fn output_modes_agree() {
        let mfpt = match estimate(&SCENARIO, &scenario_opts()).unwrap() {
            EstimateOutput::Mfpt(v) => v,
            other => panic!("unexpected {other:?}"),
        };
        let table = match estimate(&SCENARIO, &scenario_opts().with_output(OutputMode::Table)).unwrap() {
            EstimateOutput::Table(t) => t,
            other => panic!("unexpected {other:?}"),
        };
        let run = estimate_detailed(&SCENARIO, TailFamily::Exponential, Some(5.0), 2).unwrap();

        assert_eq!(mfpt, run.fit.mfpt);
        assert_eq!(table, run.table);
        assert_eq!(table.len(), 4);
        assert!(table.rows.contains(&run.best_row));
        assert_eq!(run.trials.n_fired, 5);
        assert_eq!(run.trials.n_censored, 3);
    }

    #[test]
    fn min_samples_above_fired_count_is_insufficient() {
        let err = estimate(&SCENARIO, &EstimateOptions::default().with_min_samples(6)).unwrap_err();
        assert_eq!(err, EstimateError::InsufficientData { fired: 5, required: 6 });
    }

    #[test]
    fn all_fired_batch_respects_min_samples() {
        let batch = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let run = estimate_detailed(&batch, TailFamily::Exponential, Some(10.0), 3).unwrap();
        assert_eq!(run.trials.n_censored, 0);

        // The last survival value is 0, so limit 3 would regress only two points.
        assert!(run.table.iter().all(|r| r.limit <= 2));
        assert!(run.best_row.limit <= 2);
        assert!(run.best_row.r_squared < 1.0);
    }

    #[test]
    fn min_samples_below_two_is_rejected() {
        let err = estimate(&SCENARIO, &scenario_opts().with_min_samples(1)).unwrap_err();
        assert_eq!(err, EstimateError::InvalidMinSamples);
    }

    #[test]
    fn censored_entry_point_matches_detailed() {
        let trials = censor_trials(&SCENARIO, Some(5.0)).unwrap();
        let survival = survival_curve(trials.n_fired(), trials.n_simulations);
        let a = estimate_censored(&trials, &survival, TailFamily::Exponential, 2).unwrap();
        let b = estimate_detailed(&SCENARIO, TailFamily::Exponential, Some(5.0), 2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn identical_calls_are_bit_identical() {
        let batch = generate_trials(TrialModel::Exponential { rate: 0.8 }, 500, 3.0, 11).unwrap();
        let opts = EstimateOptions::default().with_output(OutputMode::Params);
        let a = estimate(&batch, &opts).unwrap();
        let b = estimate(&batch, &opts).unwrap();
        match (a, b) {
            (EstimateOutput::Params(a), EstimateOutput::Params(b)) => {
                assert_eq!(a.mfpt.to_bits(), b.mfpt.to_bits());
                assert_eq!(a.shape.value().to_bits(), b.shape.value().to_bits());
                assert_eq!(a.t_prime.to_bits(), b.t_prime.to_bits());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn exponential_estimate_converges_to_true_mean() {
        // Exp(rate 0.5): true mean 2.0; ~86% fire before the horizon.
        let batch = generate_trials(TrialModel::Exponential { rate: 0.5 }, 5000, 4.0, 7).unwrap();
        let run = estimate_detailed(&batch, TailFamily::Exponential, None, 2500).unwrap();
        let TailShape::Rate(k) = run.fit.shape else {
            panic!("expected rate");
        };
        assert!((k - 0.5).abs() < 0.05, "k={k}");
        assert!((run.fit.mfpt - 2.0).abs() < 0.1, "mfpt={}", run.fit.mfpt);
    }

    #[test]
    fn power_law_recovers_exponent() {
        let batch = generate_trials(TrialModel::Pareto { scale: 1.0, alpha: 2.5 }, 5000, 10.0, 3).unwrap();
        let run = estimate_detailed(&batch, TailFamily::Power, None, 2500).unwrap();
        let TailShape::Exponent(alpha) = run.fit.shape else {
            panic!("expected exponent");
        };
        assert!((alpha - 2.5).abs() < 0.25, "alpha={alpha}");
        assert!(alpha > 1.0);
    }

    #[test]
    fn heavy_power_law_is_divergent() {
        let batch = generate_trials(TrialModel::Pareto { scale: 1.0, alpha: 0.8 }, 5000, 10.0, 5).unwrap();
        let err = estimate_detailed(&batch, TailFamily::Power, None, 2500).unwrap_err();
        assert_eq!(err, EstimateError::DivergentTail);
    }

    fn batch_strategy() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(0.0f64..100.0, 1..60)
    }

    proptest! {
        #[test]
        fn counts_are_conserved(batch in batch_strategy(), frac in 0.05f64..1.5) {
            let max = batch.iter().copied().fold(0.0, f64::max);
            let min = batch.iter().copied().fold(f64::INFINITY, f64::min);
            let horizon = max * frac;
            prop_assume!(horizon > min && horizon > 0.0);

            let trials = censor_trials(&batch, Some(horizon)).unwrap();
            prop_assert_eq!(trials.n_fired() + trials.n_censored, trials.n_simulations);
            prop_assert!(trials.fired.windows(2).all(|w| w[0] <= w[1]));
            prop_assert!(trials.fired.iter().all(|&t| t < horizon));

            let survival = survival_curve(trials.n_fired(), trials.n_simulations);
            prop_assert_eq!(survival.len(), trials.n_fired());
            prop_assert!(survival.windows(2).all(|w| w[1] <= w[0]));
        }

        #[test]
        fn table_rows_and_r_squared_bounds(mut batch in prop::collection::vec(0.01f64..100.0, 8..60), min_samples in 2usize..8) {
            // Distinct values keep every exponential window well defined.
            batch.sort_by(f64::total_cmp);
            batch.dedup();
            prop_assume!(batch.len() >= 2);
            let trials = censor_trials(&batch, None).unwrap();
            let n_fired = trials.n_fired();
            prop_assume!(n_fired >= min_samples);

            let survival = survival_curve(n_fired, trials.n_simulations);
            let raw = regress_windows(TailFamily::Exponential, &trials.fired, &survival, min_samples).unwrap();
            prop_assert_eq!(raw.len(), n_fired + 1 - min_samples);
            prop_assert!(raw.iter().all(|r| (0.0..=1.0).contains(&r.r_squared)));

            if let Ok(power) = sweep_windows(TailFamily::Power, &trials.fired, &survival, min_samples) {
                prop_assert!(power.len() <= n_fired + 1 - min_samples);
                prop_assert!(power.iter().all(|r| r.slope < -1.0));
            }
        }

        #[test]
        fn insufficient_when_min_samples_exceeds_fired(batch in batch_strategy(), extra in 1usize..5) {
            if let Ok(trials) = censor_trials(&batch, None) {
                let min_samples = trials.n_fired() + extra;
                let opts = EstimateOptions::default().with_min_samples(min_samples);
                let is_insufficient = matches!(
                    estimate(&batch, &opts),
                    Err(EstimateError::InsufficientData { .. })
                );
                prop_assert!(is_insufficient);
            }
        }
    }
}
