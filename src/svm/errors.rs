//! Error surface for SVM training inputs and options.
//!
//! The solver loop never fails; these errors are raised only by the
//! validation performed in front of it.
use thiserror::Error;

pub type SvmResult<T> = Result<T, SvmError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SvmError {
    // ---- Options ----
    #[error("Invalid box constraint C = {c}: {reason}")]
    InvalidC { c: f64, reason: &'static str },

    #[error("Invalid tolerance {tol}: {reason}")]
    InvalidTol { tol: f64, reason: &'static str },

    #[error("Invalid number of idle passes {max_passes}: {reason}")]
    InvalidMaxPasses { max_passes: usize, reason: &'static str },

    #[error("Invalid maximum iterations {max_iter}: {reason}")]
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    #[error("Invalid Gaussian kernel bandwidth {sigma}: {reason}")]
    InvalidSigma { sigma: f64, reason: &'static str },

    // ---- Training data ----
    #[error("Training set has {n} example(s); at least 2 are required")]
    TooFewExamples { n: usize },

    #[error("Training set has {rows} rows but {labels} labels")]
    LabelCountMismatch { rows: usize, labels: usize },

    #[error("Invalid label {value} at index {index}: labels must be +1 or -1")]
    InvalidLabel { index: usize, value: f64 },

    #[error("Non-finite feature value {value} at ({row}, {col})")]
    NonFiniteFeature { row: usize, col: usize, value: f64 },

    // ---- Scoring ----
    #[error("Feature dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = SvmError::InvalidLabel { index: 4, value: 0.0 };

        let msg = err.to_string();

        assert!(msg.contains("index 4"));
        assert!(msg.contains("+1 or -1"));
    }
}
