//! Per-family transforms for the exponential and power-law tails.
//!
//! The sweep relies on two primitive operations:
//! - map a fired time to the regression abscissa (`t` or `ln t`)
//! - turn the fitted slope into a shape parameter and a conditional mean
//!   beyond the horizon (for MFPT synthesis)
//!
//! Adding a tail family means adding a variant to `TailFamily` and an arm to
//! each match below.

use crate::domain::{TailFamily, TailShape};

/// Regression abscissa for a fired time.
///
/// May be non-finite (`ln 0`); callers drop such points.
pub fn regressor(family: TailFamily, t: f64) -> f64 {
    match family {
        TailFamily::Exponential => t,
        TailFamily::Power => t.ln(),
    }
}

/// Shape parameter implied by a `ln S` regression slope.
pub fn shape_from_slope(family: TailFamily, slope: f64) -> TailShape {
    match family {
        TailFamily::Exponential => TailShape::Rate(-slope),
        TailFamily::Power => TailShape::Exponent(-slope),
    }
}

/// Whether a window's slope describes a tail with a finite mean.
///
/// Power-law tails need `alpha > 1`, i.e. a slope strictly below -1.
pub fn admits_finite_mean(family: TailFamily, slope: f64) -> bool {
    match family {
        TailFamily::Exponential => slope < 0.0,
        TailFamily::Power => slope < -1.0,
    }
}

/// `E[T | T > horizon]` under the fitted tail.
///
/// - exponential (memoryless): `horizon + 1/k`
/// - power law: `alpha * horizon / (alpha - 1)`
pub fn conditional_tail_mean(family: TailFamily, shape: f64, horizon: f64) -> f64 {
    match family {
        TailFamily::Exponential => horizon + 1.0 / shape,
        TailFamily::Power => shape * horizon / (shape - 1.0),
    }
}

/// Fitted `ln S` at time `t` for a line in the family's coordinates.
pub fn predict_log_survival(family: TailFamily, t: f64, intercept: f64, slope: f64) -> f64 {
    intercept + slope * regressor(family, t)
}
