//! Input/output helpers.
//!
//! - trial-batch ingest from CSV / plain number lists (`ingest`)
//! - table CSV and JSON report exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
