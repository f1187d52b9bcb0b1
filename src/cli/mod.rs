//! Command-line parsing for the MFPT estimator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! estimation code. Every option can also be set through an environment
//! variable (a `.env` file is loaded first).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{OutputMode, TailFamily};
use crate::fit::DEFAULT_MIN_SAMPLES;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "mfpt", version, about = "Tail-corrected mean first-passage time estimator")]
pub struct Cli {
    /// Log verbosity (error, warn, info, debug, trace).
    #[arg(long, global = true, env = "MFPT_LOG_LEVEL", default_value = "warn")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate the MFPT of a trial batch.
    Estimate(EstimateArgs),
    /// Estimate with both tail families and print them side by side.
    Compare(CompareArgs),
    /// Write a synthetic censored trial batch with a known tail.
    Simulate(SimulateArgs),
    /// Print a previously exported JSON report.
    Show(ShowArgs),
}

/// Where trials come from and how to fit them.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Trial file: CSV with a header, or a plain list of numbers.
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// CSV column holding the completion times (default: `endtime`, else the first column).
    #[arg(long)]
    pub column: Option<String>,

    /// Observation horizon; trials at or above it are censored (default: the largest trial).
    #[arg(long)]
    pub horizon: Option<f64>,

    /// Minimum points kept in every regression window.
    #[arg(long, env = "MFPT_MIN_SAMPLES", default_value_t = DEFAULT_MIN_SAMPLES)]
    pub min_samples: usize,
}

/// Options for `mfpt estimate`.
#[derive(Debug, Args, Clone)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Tail family (exponential | power).
    #[arg(short, long, env = "MFPT_TAIL", default_value = "exponential")]
    pub tail: TailFamily,

    /// What to print: the scalar MFPT, the parameter record, or the fit table.
    #[arg(short, long, value_enum, default_value_t = OutputMode::Mfpt)]
    pub output: OutputMode,

    /// Print the run summary before the selected output.
    #[arg(long)]
    pub summary: bool,

    /// Render an ASCII plot of the survival tail and the chosen fit.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the fit table to CSV.
    #[arg(long = "export-table", value_name = "CSV")]
    pub export_table: Option<PathBuf>,

    /// Export the full run (summary, record, table) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options for `mfpt compare`.
#[derive(Debug, Args, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Options for `mfpt simulate`.
#[derive(Debug, Args, Clone)]
pub struct SimulateArgs {
    /// Tail law of the simulated first-passage times (exponential | power).
    #[arg(short, long, default_value = "exponential")]
    pub tail: TailFamily,

    /// Number of trials.
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub trials: usize,

    /// Observation horizon; longer runs are recorded as exactly this value.
    #[arg(long)]
    pub horizon: f64,

    /// Exponential rate `k`.
    #[arg(long, default_value_t = 1.0)]
    pub rate: f64,

    /// Pareto exponent `alpha`.
    #[arg(long, default_value_t = 2.0)]
    pub alpha: f64,

    /// Pareto scale (smallest possible time).
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output CSV (single `endtime` column).
    #[arg(long, value_name = "CSV")]
    pub out: PathBuf,
}

/// Options for `mfpt show`.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Report JSON produced by `mfpt estimate --export-json`.
    #[arg(long, value_name = "JSON")]
    pub report: PathBuf,

    /// Also print the fit table.
    #[arg(long)]
    pub table: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_estimate_flags() {
        let cli = Cli::try_parse_from([
            "mfpt", "estimate", "-i", "trials.csv", "--tail", "power", "--horizon", "5",
            "--min-samples", "2", "--output", "params",
        ])
        .unwrap();
        let Command::Estimate(args) = cli.command else {
            panic!("expected estimate");
        };
        assert_eq!(args.tail, TailFamily::Power);
        assert_eq!(args.output, OutputMode::Params);
        assert_eq!(args.input.horizon, Some(5.0));
        assert_eq!(args.input.min_samples, 2);
    }

    #[test]
    fn unknown_tail_family_is_rejected() {
        let err = Cli::try_parse_from(["mfpt", "estimate", "-i", "x.csv", "--tail", "gamma"]).unwrap_err();
        assert!(err.to_string().contains("gamma"));
    }
}
