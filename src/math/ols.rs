//! Ordinary least squares for a single regressor.
//!
//! The tail sweep solves one tiny regression per window:
//!
//! ```text
//! minimize Σ (y_i - a - b x_i)^2
//! ```
//!
//! so we use the closed form `b = cov(x, y) / var(x)` with centred sums
//! (two-pass) rather than a general solver. The squared Pearson correlation
//! `r² = cov² / (var(x) var(y))` is the goodness-of-fit used for selection.

/// Slope, intercept and squared correlation of a fitted line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
    /// Squared Pearson correlation, clamped to `[0, 1]`.
    pub r_squared: f64,
    pub n: usize,
}

/// Fit `y = intercept + slope * x`.
///
/// Returns `None` when the regression is undefined: mismatched lengths, fewer
/// than two points, non-finite inputs, or a constant `x` or `y`.
pub fn linear_regression(x: &[f64], y: &[f64]) -> Option<LineFit> {
    let n = x.len();
    if n != y.len() || n < 2 {
        return None;
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return None;
    }
    // A constant column has zero variance; centring it in floating point can
    // leave spurious residue, so detect it exactly.
    if is_constant(x) || is_constant(y) {
        return None;
    }

    let n_f = n as f64;
    let xbar = x.iter().sum::<f64>() / n_f;
    let ybar = y.iter().sum::<f64>() / n_f;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - xbar;
        let dy = yi - ybar;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = ybar - slope * xbar;
    let r_squared = ((sxy * sxy) / (sxx * syy)).clamp(0.0, 1.0);

    if !(slope.is_finite() && intercept.is_finite() && r_squared.is_finite()) {
        return None;
    }

    Some(LineFit {
        slope,
        intercept,
        r_squared,
        n,
    })
}

fn is_constant(v: &[f64]) -> bool {
    v.iter().all(|&x| x == v[0])
}
