//! Trial-batch sources that are not files.

pub mod synthetic;

pub use synthetic::*;
