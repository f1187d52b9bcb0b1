//! Empirical survival at each fired time.
//!
//! With `n` trials, the i-th fired event (1-based, in sort order) leaves
//! `n - i` trials at risk, so the survival estimate just after it is
//! `(n - i) / n`. Ties are treated as sequential single-step drops.

use crate::math::lin_space;

/// Survival probabilities co-indexed with the sorted fired times.
///
/// Linearly spaced from `(n_simulations - 1) / n_simulations` down to
/// `(n_simulations - n_fired) / n_simulations`, length `n_fired`.
pub fn survival_curve(n_fired: usize, n_simulations: usize) -> Vec<f64> {
    debug_assert!(n_fired <= n_simulations);
    let n = n_simulations as f64;
    lin_space(n - 1.0, n - n_fired as f64, n_fired)
        .into_iter()
        .map(|at_risk| at_risk / n)
        .collect()
}
