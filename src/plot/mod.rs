//! Terminal plots of the survival tail.

pub mod ascii;

pub use ascii::*;
