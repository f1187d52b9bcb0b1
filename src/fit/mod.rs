//! Tail fitting orchestration.
//!
//! Responsibilities:
//!
//! - enumerate admissible truncation windows
//! - regress each window's transformed survival (parallel)
//! - select the best window and synthesize the MFPT

pub mod selection;
pub mod sweep;
pub mod windows;

pub use selection::*;
pub use sweep::*;
pub use windows::*;
