//! Tail-family model implementations.
//!
//! Families are implemented as small, pure functions keyed on `TailFamily` so
//! that the sweep and selection code can stay generic.

pub mod tail;

pub use tail::*;
