//! Shared "estimate pipeline" logic used by the `estimate` and `compare`
//! subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> censor/sort -> survival curve -> window sweep -> selection
//!
//! The handlers in `app.rs` then only deal with presentation.

use std::path::Path;

use tracing::info;

use crate::domain::{CensoredTrials, Estimation, TailFamily};
use crate::error::{AppError, EstimateError};
use crate::estimator::{EstimateOptions, estimate_censored, estimate_detailed};
use crate::io::ingest::{TrialInput, load_trials};
use crate::survival::{censor_trials, survival_curve};

/// All computed outputs of a single `mfpt estimate` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub input: TrialInput,
    pub trials: CensoredTrials,
    pub survival: Vec<f64>,
    pub estimation: Estimation,
}

/// Load a trial file and run the estimator with `opts`.
pub fn run_estimate(path: &Path, column: Option<&str>, opts: &EstimateOptions) -> Result<RunOutput, AppError> {
    let input = load_trials(path, column)?;
    info!(
        path = %path.display(),
        trials = input.endtimes.len(),
        "loaded trial batch"
    );
    run_estimate_with_input(input, opts)
}

/// Run the estimator on an already loaded batch.
pub fn run_estimate_with_input(input: TrialInput, opts: &EstimateOptions) -> Result<RunOutput, AppError> {
    let trials = censor_trials(&input.endtimes, opts.horizon)?;
    let survival = survival_curve(trials.n_fired(), trials.n_simulations);
    info!(
        fired = trials.n_fired(),
        censored = trials.n_censored,
        horizon = trials.horizon,
        "censored batch"
    );

    let estimation = estimate_censored(&trials, &survival, opts.tail, opts.min_samples)?;
    info!(
        tail = %estimation.tail,
        windows = estimation.table.len(),
        mfpt = estimation.fit.mfpt,
        "estimate complete"
    );

    Ok(RunOutput {
        input,
        trials,
        survival,
        estimation,
    })
}

/// Estimate the same batch under every tail family.
///
/// Per-family failures are kept so a divergent power-law tail does not hide
/// a valid exponential estimate.
pub fn run_comparison(
    input: &TrialInput,
    opts: &EstimateOptions,
) -> Vec<(TailFamily, Result<Estimation, EstimateError>)> {
    TailFamily::ALL
        .iter()
        .map(|&family| {
            let result = estimate_detailed(&input.endtimes, family, opts.horizon, opts.min_samples);
            if let Err(err) = &result {
                info!(tail = %family, error = %err, "tail family rejected");
            }
            (family, result)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_batch(name: &str, body: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("mfpt_{name}_{}.csv", std::process::id()));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn estimate_from_file_keeps_intermediates() {
        let path = write_batch("pipeline", "endtime\n0.5\n1.2\n1.9\n2.4\n3.1\n5.0\n5.0\n5.0\n");
        let opts = EstimateOptions::default().with_horizon(5.0).with_min_samples(2);
        let run = run_estimate(&path, None, &opts).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(run.input.endtimes.len(), 8);
        assert_eq!(run.trials.fired, vec![0.5, 1.2, 1.9, 2.4, 3.1]);
        assert_eq!(run.survival.len(), 5);
        assert_eq!(run.estimation.trials.n_censored, 3);
        assert!(run.estimation.fit.mfpt > run.estimation.trials.fired_mean);
        // Plotted intermediates are the ones the estimate was built from.
        assert_eq!(run.trials.summary(), run.estimation.trials);
        let best = run.estimation.best_row;
        assert_eq!(run.trials.fired[best.limit], best.t_prime);
    }

    #[test]
    fn estimator_errors_map_to_exit_code_three() {
        let path = write_batch("pipeline_short", "1.0\n2.0\n3.0\n");
        let opts = EstimateOptions::default().with_min_samples(10);
        let err = run_estimate(&path, None, &opts).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn comparison_covers_every_family() {
        let input = TrialInput {
            endtimes: vec![0.5, 1.2, 1.9, 2.4, 3.1, 5.0, 5.0, 5.0],
            column: None,
            row_errors: Vec::new(),
            rows_read: 8,
        };
        let opts = EstimateOptions::default().with_horizon(5.0).with_min_samples(2);
        let results = run_comparison(&input, &opts);
        assert_eq!(results.len(), TailFamily::ALL.len());
        assert!(results[0].1.is_ok());
    }
}
