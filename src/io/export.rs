//! Export fit tables to CSV and full runs to JSON.
//!
//! The CSV is meant to be easy to consume in spreadsheets or downstream
//! scripts; the JSON report is the portable record of a run and can be read
//! back by `mfpt show`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Estimation, FitTable};
use crate::error::AppError;

/// A saved estimation report (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    /// Trial file the batch was read from, if any.
    pub source: Option<String>,
    pub estimation: Estimation,
}

impl ReportFile {
    pub fn new(estimation: Estimation, source: Option<&Path>) -> Self {
        Self {
            tool: "mfpt".to_string(),
            generated_at: Utc::now(),
            source: source.map(|p| p.display().to_string()),
            estimation,
        }
    }
}

/// Write the fit table to a CSV file.
pub fn write_table_csv(path: &Path, table: &FitTable) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create table CSV '{}': {e}", path.display())))?;

    writeln!(file, "limit,t_prime,slope,r_squared")
        .map_err(|e| AppError::new(2, format!("Failed to write table CSV header: {e}")))?;

    for row in table.iter() {
        writeln!(
            file,
            "{},{:.10},{:.10},{:.10}",
            row.limit, row.t_prime, row.slope, row.r_squared
        )
        .map_err(|e| AppError::new(2, format!("Failed to write table CSV row: {e}")))?;
    }

    Ok(())
}

/// Write a JSON report file.
pub fn write_report_json(path: &Path, report: &ReportFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::new(2, format!("Failed to write report JSON: {e}")))?;
    Ok(())
}

/// Read a JSON report file.
pub fn read_report_json(path: &Path) -> Result<ReportFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open report JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid report JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TailFamily;
    use crate::estimator::estimate_detailed;

    fn scenario() -> Estimation {
        estimate_detailed(
            &[0.5, 1.2, 1.9, 2.4, 3.1, 5.0, 5.0, 5.0],
            TailFamily::Exponential,
            Some(5.0),
            2,
        )
        .unwrap()
    }

    #[test]
    fn table_csv_has_header_and_one_line_per_row() {
        let run = scenario();
        let path = std::env::temp_dir().join(format!("mfpt_table_{}.csv", std::process::id()));
        write_table_csv(&path, &run.table).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("limit,t_prime,slope,r_squared"));
        assert_eq!(lines.count(), run.table.len());
    }

    #[test]
    fn report_json_reads_back() {
        let report = ReportFile::new(scenario(), Some(Path::new("trials.csv")));
        let path = std::env::temp_dir().join(format!("mfpt_report_{}.json", std::process::id()));
        write_report_json(&path, &report).unwrap();

        let back = read_report_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(back.tool, "mfpt");
        assert_eq!(back.source.as_deref(), Some("trials.csv"));
        assert_eq!(back.estimation.table.len(), report.estimation.table.len());
        assert_eq!(back.estimation.best_row.limit, report.estimation.best_row.limit);
        assert!((back.estimation.fit.mfpt - report.estimation.fit.mfpt).abs() < 1e-12);
    }
}
