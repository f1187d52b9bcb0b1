//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - used in-memory during a single estimation call
//! - exported to JSON/CSV
//! - printed by the report/plot front ends

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::EstimateError;

/// Parametric decay shape assumed for completion times beyond the horizon.
///
/// Parsed by name through `FromStr` so that an unsupported name surfaces as
/// `EstimateError::UnknownTailFamily`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TailFamily {
    /// `S(t) ~ exp(-k t)`: regress `ln S` on `t`.
    #[default]
    Exponential,
    /// `S(t) ~ t^-alpha`: regress `ln S` on `ln t`.
    Power,
}

impl TailFamily {
    pub const ALL: [TailFamily; 2] = [TailFamily::Exponential, TailFamily::Power];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            TailFamily::Exponential => "exponential",
            TailFamily::Power => "power-law",
        }
    }

    /// Name of the tail-shape parameter (`k` or `alpha`).
    pub fn shape_name(self) -> &'static str {
        match self {
            TailFamily::Exponential => "k",
            TailFamily::Power => "alpha",
        }
    }
}

impl fmt::Display for TailFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for TailFamily {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exponential" | "exp" => Ok(TailFamily::Exponential),
            "power" | "power-law" | "powerlaw" => Ok(TailFamily::Power),
            _ => Err(EstimateError::UnknownTailFamily(s.to_string())),
        }
    }
}

/// What a single `estimate` call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputMode {
    /// The scalar MFPT estimate.
    #[default]
    Mfpt,
    /// The winning window's parameter record.
    Params,
    /// The full tail-fit table.
    Table,
}

/// Trial batch split at the horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct CensoredTrials {
    /// Fired trials (strictly below the horizon), ascending.
    pub fired: Vec<f64>,
    pub n_censored: usize,
    pub n_simulations: usize,
    pub horizon: f64,
}

impl CensoredTrials {
    /// `nFPT`.
    pub fn n_fired(&self) -> usize {
        self.fired.len()
    }

    /// Fraction of trials that fired before the horizon.
    pub fn fired_fraction(&self) -> f64 {
        self.n_fired() as f64 / self.n_simulations as f64
    }

    /// Empirical mean of the fired times.
    pub fn fired_mean(&self) -> f64 {
        crate::math::mean(&self.fired).unwrap_or(f64::NAN)
    }

    pub fn summary(&self) -> TrialSummary {
        TrialSummary {
            n_simulations: self.n_simulations,
            n_fired: self.n_fired(),
            n_censored: self.n_censored,
            horizon: self.horizon,
            fired_mean: self.fired_mean(),
        }
    }
}

/// Counts and moments of a censored batch (for reports and exports).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSummary {
    pub n_simulations: usize,
    pub n_fired: usize,
    pub n_censored: usize,
    pub horizon: f64,
    pub fired_mean: f64,
}

/// One regression window of the tail sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitRow {
    /// Truncation index into the sorted fired times.
    pub limit: usize,
    /// Earliest fired time in the window (`fired[limit]`).
    #[serde(rename = "tPrime")]
    pub t_prime: f64,
    pub slope: f64,
    /// Squared Pearson correlation, in `[0, 1]`.
    #[serde(rename = "R")]
    pub r_squared: f64,
}

/// Ordered tail-fit table, ascending in `limit` (and therefore `t_prime`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FitTable {
    pub rows: Vec<FitRow>,
}

impl FitTable {
    pub fn new(rows: Vec<FitRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FitRow> {
        self.rows.iter()
    }

    /// Keep only the rows matching `keep`, preserving order.
    pub fn retain(&mut self, keep: impl FnMut(&FitRow) -> bool) {
        self.rows.retain(keep);
    }
}

/// Fitted tail-shape parameter.
///
/// Serialized as a single `"k"` or `"alpha"` field when flattened into
/// `TailFit`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TailShape {
    /// Exponential decay rate.
    #[serde(rename = "k")]
    Rate(f64),
    /// Power-law exponent (always `> 1` once accepted).
    #[serde(rename = "alpha")]
    Exponent(f64),
}

impl TailShape {
    pub fn family(self) -> TailFamily {
        match self {
            TailShape::Rate(_) => TailFamily::Exponential,
            TailShape::Exponent(_) => TailFamily::Power,
        }
    }

    pub fn value(self) -> f64 {
        match self {
            TailShape::Rate(v) | TailShape::Exponent(v) => v,
        }
    }

    /// Expected completion time of a trial known to exceed `horizon`.
    pub fn tail_mean_beyond(self, horizon: f64) -> f64 {
        crate::models::conditional_tail_mean(self.family(), self.value(), horizon)
    }
}

/// Parameter record of the winning window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TailFit {
    #[serde(rename = "MFPT")]
    pub mfpt: f64,
    #[serde(flatten)]
    pub shape: TailShape,
    #[serde(rename = "tPrime")]
    pub t_prime: f64,
}

/// Everything a single estimation run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimation {
    pub tail: TailFamily,
    pub min_samples: usize,
    pub trials: TrialSummary,
    /// Table after family-specific filtering.
    pub table: FitTable,
    /// Winning row of `table`.
    pub best_row: FitRow,
    pub fit: TailFit,
}

impl Estimation {
    /// Censored share of the batch times its conditional mean beyond the horizon.
    pub fn tail_contribution(&self) -> f64 {
        let censored = self.trials.n_censored as f64 / self.trials.n_simulations as f64;
        censored * self.fit.shape.tail_mean_beyond(self.trials.horizon)
    }
}

/// Result of `estimate`, shaped by `OutputMode`.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimateOutput {
    Mfpt(f64),
    Params(TailFit),
    Table(FitTable),
}
