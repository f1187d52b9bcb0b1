//! Trial-batch ingest.
//!
//! Accepts two layouts:
//! - a CSV with a header, reading one column (`--column`, else `endtime` /
//!   `endtimes`, else the first column)
//! - a header-less list of numbers, separated by commas and/or whitespace
//!
//! Bad cells are collected as row errors instead of aborting the load, so a
//! long simulation log with a few corrupt lines can still be estimated.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::warn;

use crate::error::AppError;

/// Column names tried, in order, when `--column` is not given.
const DEFAULT_COLUMNS: [&str; 3] = ["endtime", "endtimes", "time"];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: parsed trial times + diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialInput {
    pub endtimes: Vec<f64>,
    /// Column the values came from (`None` for header-less input).
    pub column: Option<String>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load trial times from a file.
pub fn load_trials(path: &Path, column: Option<&str>) -> Result<TrialInput, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open input '{}': {e}", path.display())))?;
    let input = parse_trials(file, column)?;
    if !input.row_errors.is_empty() {
        warn!(
            path = %path.display(),
            skipped = input.row_errors.len(),
            "skipped unparsable rows"
        );
    }
    Ok(input)
}

/// Parse trial times from any reader.
pub fn parse_trials<R: Read>(reader: R, column: Option<&str>) -> Result<TrialInput, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| AppError::new(2, format!("CSV parse error on line {}: {e}", idx + 1)))?;
        records.push(record);
    }

    let Some(first) = records.first() else {
        return Err(AppError::new(3, "Input contains no trial times."));
    };

    let input = if is_numeric_record(first) {
        if let Some(name) = column {
            return Err(AppError::new(
                2,
                format!("Column `{name}` requested, but the input has no header row."),
            ));
        }
        parse_headerless(&records)
    } else {
        parse_with_header(&records, column)?
    };

    if input.endtimes.is_empty() {
        return Err(AppError::new(3, "No valid trial times remain after parsing."));
    }
    Ok(input)
}

fn parse_headerless(records: &[StringRecord]) -> TrialInput {
    let mut endtimes = Vec::new();
    let mut row_errors = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        for token in record.iter().flat_map(str::split_whitespace) {
            match parse_time(token) {
                Ok(v) => endtimes.push(v),
                Err(message) => row_errors.push(RowError { line: idx + 1, message }),
            }
        }
    }

    TrialInput {
        endtimes,
        column: None,
        row_errors,
        rows_read: records.len(),
    }
}

fn parse_with_header(records: &[StringRecord], column: Option<&str>) -> Result<TrialInput, AppError> {
    let headers = &records[0];
    let header_map = build_header_map(headers);

    let idx = match column {
        Some(name) => *header_map
            .get(&normalize_header_name(name))
            .ok_or_else(|| AppError::new(2, format!("Missing requested column: `{name}`")))?,
        None => DEFAULT_COLUMNS
            .iter()
            .find_map(|name| header_map.get(*name).copied())
            .unwrap_or(0),
    };
    let column_name = headers.get(idx).map(normalize_header_name).unwrap_or_default();

    let mut endtimes = Vec::new();
    let mut row_errors = Vec::new();

    for (offset, record) in records[1..].iter().enumerate() {
        // +2: one for the header, one for 1-based line numbers.
        let line = offset + 2;
        let Some(cell) = record.get(idx).filter(|s| !s.is_empty()) else {
            continue;
        };
        match parse_time(cell) {
            Ok(v) => endtimes.push(v),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    Ok(TrialInput {
        endtimes,
        column: Some(column_name),
        row_errors,
        rows_read: records.len() - 1,
    })
}

fn is_numeric_record(record: &StringRecord) -> bool {
    let mut tokens = record.iter().flat_map(str::split_whitespace).peekable();
    tokens.peek().is_some() && tokens.all(|t| t.parse::<f64>().is_ok())
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Strip a UTF-8 BOM left on the first header by spreadsheet exports.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_time(s: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid trial time '{s}'."))?;
    if !v.is_finite() || v < 0.0 {
        return Err(format!("Trial time '{s}' must be finite and >= 0."));
    }
    Ok(v)
}
