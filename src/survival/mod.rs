//! Censoring and the empirical survival curve.
//!
//! Responsibilities:
//!
//! - split a trial batch at the horizon into fired and censored trials
//! - build the step-down survival estimate at each fired time

pub mod censor;
pub mod curve;

pub use censor::*;
pub use curve::*;
