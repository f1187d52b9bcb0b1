//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - runs the estimator and prints the requested output
//! - writes optional exports

use std::path::Path;

use clap::Parser;
use tracing::info;

use crate::cli::{Cli, Command, CompareArgs, EstimateArgs, InputArgs, ShowArgs, SimulateArgs};
use crate::data::synthetic::{TrialModel, generate_trials};
use crate::domain::{OutputMode, TailFamily};
use crate::error::AppError;
use crate::estimator::EstimateOptions;
use crate::io::export::{ReportFile, read_report_json, write_report_json, write_table_csv};

pub mod pipeline;

/// Entry point for the `mfpt` binary.
pub fn run() -> Result<(), AppError> {
    // Missing `.env` is the common case.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Estimate(args) => handle_estimate(args),
        Command::Compare(args) => handle_compare(args),
        Command::Simulate(args) => handle_simulate(args),
        Command::Show(args) => handle_show(args),
    }
}

fn handle_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let opts = options_from_args(&args.input, args.tail).with_output(args.output);
    let run = pipeline::run_estimate(&args.input.input, args.input.column.as_deref(), &opts)?;
    let est = &run.estimation;

    if args.summary {
        println!("{}", crate::report::format_run_summary(est, Some(&run.input)));
    }

    match args.output {
        OutputMode::Mfpt => println!("{}", est.fit.mfpt),
        OutputMode::Params => print!("{}", crate::report::format_params(&est.fit)),
        OutputMode::Table => print!("{}", crate::report::format_table(&est.table, Some(&est.best_row))),
    }

    if args.plot {
        let plot = crate::plot::render_survival_plot(
            est.tail,
            &run.trials.fired,
            &run.survival,
            est.best_row.limit,
            args.width,
            args.height,
        );
        println!("\n{plot}");
        if let Some(y) = crate::plot::log_survival_at(
            est.tail,
            &run.trials.fired,
            &run.survival,
            est.best_row.limit,
            run.trials.horizon,
        ) {
            println!("Fitted ln S at horizon {:.6}: {y:.6}", run.trials.horizon);
        }
    }

    if let Some(path) = &args.export_table {
        write_table_csv(path, &est.table)?;
        info!(path = %path.display(), "wrote fit table");
    }
    if let Some(path) = &args.export_json {
        let report = ReportFile::new(run.estimation.clone(), Some(&args.input.input));
        write_report_json(path, &report)?;
        info!(path = %path.display(), "wrote report");
    }

    Ok(())
}

fn handle_compare(args: CompareArgs) -> Result<(), AppError> {
    let opts = options_from_args(&args.input, TailFamily::default());
    let input = crate::io::ingest::load_trials(&args.input.input, args.input.column.as_deref())?;
    let results = pipeline::run_comparison(&input, &opts);
    print!("{}", crate::report::format_comparison(&results));

    // Fail only when no family produced an estimate.
    if results.iter().all(|(_, r)| r.is_err()) {
        if let Some((_, Err(err))) = results.into_iter().next() {
            return Err(err.into());
        }
    }
    Ok(())
}

fn handle_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let model = match args.tail {
        TailFamily::Exponential => TrialModel::Exponential { rate: args.rate },
        TailFamily::Power => TrialModel::Pareto {
            scale: args.scale,
            alpha: args.alpha,
        },
    };
    let endtimes = generate_trials(model, args.trials, args.horizon, args.seed)?;
    write_trials_csv(&args.out, &endtimes)?;

    let censored = endtimes.iter().filter(|&&t| t >= args.horizon).count();
    info!(
        path = %args.out.display(),
        trials = endtimes.len(),
        censored,
        "wrote synthetic batch"
    );
    if let Some(mean) = model.true_mean() {
        println!("True MFPT of the generating law: {mean:.6}");
    }
    println!("Wrote {} trials ({censored} censored) to {}", endtimes.len(), args.out.display());
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let report = read_report_json(&args.report)?;
    println!(
        "Report from {} at {}{}",
        report.tool,
        report.generated_at.to_rfc3339(),
        report.source.as_deref().map(|s| format!(" ({s})")).unwrap_or_default()
    );
    println!("{}", crate::report::format_run_summary(&report.estimation, None));
    if args.table {
        print!(
            "{}",
            crate::report::format_table(&report.estimation.table, Some(&report.estimation.best_row))
        );
    }
    Ok(())
}

/// Build estimator options from the shared input flags.
pub fn options_from_args(args: &InputArgs, tail: TailFamily) -> EstimateOptions {
    let mut opts = EstimateOptions::default()
        .with_tail(tail)
        .with_min_samples(args.min_samples);
    if let Some(h) = args.horizon {
        opts = opts.with_horizon(h);
    }
    opts
}

fn write_trials_csv(path: &Path, endtimes: &[f64]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", path.display())))?;
    writer
        .write_record(["endtime"])
        .map_err(|e| AppError::new(2, format!("Failed to write CSV header: {e}")))?;
    for t in endtimes {
        writer
            .write_record([t.to_string()])
            .map_err(|e| AppError::new(2, format!("Failed to write CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush '{}': {e}", path.display())))
}
