//! Small sample statistics and grids.

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// `steps` linearly spaced points from `start` to `stop` (inclusive).
///
/// `steps == 1` yields `[start]`, `steps == 0` an empty vector.
pub fn lin_space(start: f64, stop: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (steps as f64 - 1.0);
            let mut out: Vec<f64> = (0..steps).map(|i| start + step * i as f64).collect();
            // Pin the endpoint so it matches `stop` exactly.
            out[steps - 1] = stop;
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lin_space_includes_endpoints() {
        let v = lin_space(7.0, 3.0, 5);
        assert_eq!(v, vec![7.0, 6.0, 5.0, 4.0, 3.0]);
        assert_eq!(lin_space(2.0, 9.0, 1), vec![2.0]);
        assert!(lin_space(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn mean_basic() {
        assert_eq!(mean(&[]), None);
        assert!((mean(&[0.5, 1.2, 1.9, 2.4, 3.1]).unwrap() - 1.82).abs() < 1e-12);
    }
}
