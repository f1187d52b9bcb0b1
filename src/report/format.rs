//! Formatted terminal output for estimation runs.

use crate::domain::{Estimation, FitRow, FitTable, TailFamily, TailFit};
use crate::error::EstimateError;
use crate::io::ingest::TrialInput;

/// Format the full run summary (batch stats + chosen window + estimate).
pub fn format_run_summary(run: &Estimation, input: Option<&TrialInput>) -> String {
    let mut out = String::new();
    let t = &run.trials;

    out.push_str("=== mfpt - tail-corrected MFPT estimate ===\n");
    if let Some(input) = input {
        let column = input.column.as_deref().unwrap_or("(no header)");
        out.push_str(&format!(
            "Input: column={column} | rows={} | skipped={}\n",
            input.rows_read,
            input.row_errors.len()
        ));
    }
    out.push_str(&format!(
        "Trials: n={} | fired={} | censored={} | horizon={:.6}\n",
        t.n_simulations, t.n_fired, t.n_censored, t.horizon
    ));
    out.push_str(&format!("Fired mean: {:.6}\n", t.fired_mean));
    out.push_str(&format!(
        "Tail: {} | min_samples={} | windows kept={}\n",
        run.tail.display_name(),
        run.min_samples,
        run.table.len()
    ));

    out.push_str("\nChosen window:\n");
    out.push_str(&format!(
        "- tPrime={:.6} (limit={}) slope={:.6} R={:.6}\n",
        run.best_row.t_prime, run.best_row.limit, run.best_row.slope, run.best_row.r_squared
    ));
    out.push_str(&format!(
        "- {} = {:.6}\n",
        run.tail.shape_name(),
        run.fit.shape.value()
    ));
    out.push_str(&format!("- tail contribution = {:.6}\n", run.tail_contribution()));
    out.push_str(&format!("\nMFPT = {:.6}\n", run.fit.mfpt));

    out
}

/// Format a parameter record as `key = value` lines.
pub fn format_params(fit: &TailFit) -> String {
    format!(
        "MFPT = {:.6}\n{} = {:.6}\ntPrime = {:.6}\n",
        fit.mfpt,
        fit.shape.family().shape_name(),
        fit.shape.value(),
        fit.t_prime
    )
}

/// Format the fit table; the winning row (if given) is marked with `*`.
pub fn format_table(table: &FitTable, best: Option<&FitRow>) -> String {
    let mut out = String::new();
    out.push_str(format!("  {:>6} {:>14} {:>14} {:>10}", "limit", "tPrime", "slope", "R").trim_end());
    out.push('\n');
    out.push_str(format!("  {:-<6} {:-<14} {:-<14} {:-<10}", "", "", "", "").trim_end());
    out.push('\n');

    for row in table.iter() {
        let mark = if best.is_some_and(|b| b.limit == row.limit) { '*' } else { ' ' };
        out.push_str(&format!(
            "{mark} {:>6} {:>14.6} {:>14.6} {:>10.6}\n",
            row.limit, row.t_prime, row.slope, row.r_squared
        ));
    }

    out
}

/// Side-by-side comparison of both tail families on one batch.
pub fn format_comparison(results: &[(TailFamily, Result<Estimation, EstimateError>)]) -> String {
    let mut out = String::new();
    out.push_str(format!("{:<12} {:>14} {:>8} {:>12} {:>12}", "tail", "MFPT", "shape", "value", "tPrime").trim_end());
    out.push('\n');

    for (family, result) in results {
        match result {
            Ok(run) => out.push_str(&format!(
                "{:<12} {:>14.6} {:>8} {:>12.6} {:>12.6}\n",
                family.display_name(),
                run.fit.mfpt,
                family.shape_name(),
                run.fit.shape.value(),
                run.fit.t_prime
            )),
            Err(err) => out.push_str(&format!("{:<12} error: {err}\n", family.display_name())),
        }
    }

    out
}
