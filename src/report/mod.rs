//! Reporting utilities: formatted terminal output.
//!
//! Formatting lives here so the estimator stays free of presentation code and
//! output changes are localized.

pub mod format;

pub use format::*;
