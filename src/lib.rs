//! `mfpt-tail` library crate.
//!
//! Estimates the mean first-passage time of a simulated process from a batch
//! of completion times, extrapolating censored trials with a fitted tail.
//!
//! The binary (`mfpt`) is a thin wrapper around this library so that:
//!
//! - the estimator is testable without spawning processes
//! - file loading and presentation stay out of the numerical core

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod estimator;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod survival;

pub use error::{AppError, EstimateError};
pub use estimator::{EstimateOptions, estimate, estimate_censored, estimate_detailed};
