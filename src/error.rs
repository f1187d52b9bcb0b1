use thiserror::Error;

/// Failures of a single estimation call.
///
/// The estimator is deterministic, so every variant recurs identically for the
/// same inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    /// Fewer fired trials than one regression window needs.
    #[error("Insufficient data: {fired} fired trial(s), at least {required} required.")]
    InsufficientData { fired: usize, required: usize },

    /// No power-law window has a slope steeper than -1, so the mean is undefined.
    #[error("Could not find a tail exponent with finite mean (no window has slope < -1).")]
    DivergentTail,

    #[error("Unknown tail family '{0}' (expected 'exponential' or 'power').")]
    UnknownTailFamily(String),

    #[error("Invalid horizon: {0}")]
    InvalidHorizon(String),

    #[error("Invalid trial time {value} at index {index} (must be finite and >= 0).")]
    InvalidTrialTime { index: usize, value: f64 },

    #[error("min_samples must be >= 2.")]
    InvalidMinSamples,

    /// Every admissible window produced an undefined regression.
    #[error("No tail window produced a defined regression.")]
    DegenerateFit,
}

impl EstimateError {
    /// Exit code used when the error reaches the binary.
    ///
    /// `3` means the data could not support an estimate, `2` means the input
    /// or options were invalid.
    pub fn exit_code(&self) -> u8 {
        match self {
            EstimateError::InsufficientData { .. }
            | EstimateError::DivergentTail
            | EstimateError::DegenerateFit => 3,
            EstimateError::UnknownTailFamily(_)
            | EstimateError::InvalidHorizon(_)
            | EstimateError::InvalidTrialTime { .. }
            | EstimateError::InvalidMinSamples => 2,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<EstimateError> for AppError {
    fn from(err: EstimateError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_errors_map_to_exit_codes() {
        let app: AppError = EstimateError::DivergentTail.into();
        assert_eq!(app.exit_code(), 3);

        let app: AppError = EstimateError::UnknownTailFamily("gamma".into()).into();
        assert_eq!(app.exit_code(), 2);
        assert!(app.to_string().contains("gamma"));
    }
}
