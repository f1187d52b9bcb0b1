//! Domain types used throughout the estimator.
//!
//! This module defines:
//!
//! - input selectors (`TailFamily`, `OutputMode`)
//! - the censored trial split (`CensoredTrials`, `TrialSummary`)
//! - fit outputs (`FitRow`, `FitTable`, `TailFit`, `Estimation`, `EstimateOutput`)

pub mod types;

pub use types::*;
