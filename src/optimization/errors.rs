//! Error surface for the optimization layer.
//!
//! The minimizers themselves never fail (they always hand back their best
//! point), so [`OptError`] is reserved for the edges around them: option
//! construction, derivative checks, outcome validation, and the argmin-backed
//! L-BFGS runner.
use argmin::core::{ArgminError, Error};
use thiserror::Error;

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptError {
    // ---- Options ----
    /// Maximum iterations needs to be positive.
    #[error("Invalid maximum iterations {max_iter}: {reason}")]
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    /// Per-line-search evaluation budget needs to be positive.
    #[error("Invalid line-search evaluation budget {budget}: {reason}")]
    InvalidEvalBudget { budget: usize, reason: &'static str },

    /// Fail-fast limit on non-finite polynomial fits needs to be positive.
    #[error("Invalid non-finite fit limit {limit}: {reason}")]
    InvalidFailFastLimit { limit: usize, reason: &'static str },

    /// Gradient tolerance needs to be positive and finite.
    #[error("Invalid gradient tolerance {tol}: {reason}")]
    InvalidTolGrad { tol: f64, reason: &'static str },

    /// Cost change tolerance needs to be positive and finite.
    #[error("Invalid cost function change tolerance {tol}: {reason}")]
    InvalidTolCost { tol: f64, reason: &'static str },

    /// Invalid line searcher name.
    #[error("Invalid line searcher '{name}': {reason}")]
    InvalidLineSearch { name: String, reason: &'static str },

    /// lbfgs_mem needs to be at least 1.
    #[error("Invalid L-BFGS memory {mem}: {reason}")]
    InvalidLBFGSMem { mem: usize, reason: &'static str },

    // ---- Derivatives ----
    /// Gradient dimensions do not match parameter dimensions.
    #[error("Gradient dimension mismatch: expected {expected}, found {found}")]
    GradientDimMismatch { expected: usize, found: usize },

    /// Gradient elements need to be finite.
    #[error("Invalid gradient at index {index}: {value}: {reason}")]
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    /// Analytic and finite-difference gradients disagree.
    #[error(
        "Gradient check failed at index {index}: analytic {analytic}, numeric {numeric} (tol {tol})"
    )]
    GradientCheckFailed { index: usize, analytic: f64, numeric: f64, tol: f64 },

    /// Hessian matrix dimensions do not match parameter dimensions.
    #[error("Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}")]
    HessianDimMismatch { expected: usize, found: (usize, usize) },

    /// Hessian values need to be finite.
    #[error("Invalid Hessian at ({row}, {col}): {value}, must be finite")]
    InvalidHessian { row: usize, col: usize, value: f64 },

    // ---- Outcome ----
    /// Cost function returned a non-finite value.
    #[error("Non-finite cost value: {value}")]
    NonFiniteCost { value: f64 },

    /// Estimated parameters must be finite.
    #[error("Invalid estimated parameter at index {index}: {value}: {reason}")]
    InvalidThetaHat { index: usize, value: f64, reason: &'static str },

    /// Theta hat is missing
    #[error("Missing estimated parameters (theta hat)")]
    MissingThetaHat,

    // ---- Argmin ----
    #[error("Invalid parameter: {text}")]
    InvalidParameter { text: String },
    #[error("Not implemented: {text}")]
    NotImplemented { text: String },
    #[error("Not initialized: {text}")]
    NotInitialized { text: String },
    #[error("Condition violated: {text}")]
    ConditionViolated { text: String },
    #[error("Potential bug: {text}")]
    PotentialBug { text: String },
    /// Wrapper for other argmin::Error types
    #[error("Backend error: {text}")]
    BackendError { text: String },

    // ---- Fallback ----
    #[error("Unknown error")]
    UnknownError,
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        match original_err.downcast::<ArgminError>() {
            Ok(opt_err) => match opt_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                _ => OptError::UnknownError,
            },
            Err(err) => match err.downcast::<OptError>() {
                Ok(opt_err) => opt_err,
                Err(err) => OptError::BackendError { text: err.to_string() },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Argmin's own error kinds map onto the matching `OptError` variants.
    fn argmin_invalid_parameter_maps_to_invalid_parameter() {
        let err: Error = ArgminError::InvalidParameter { text: "tol".to_string() }.into();

        let mapped = OptError::from(err);

        assert_eq!(mapped, OptError::InvalidParameter { text: "tol".to_string() });
    }

    #[test]
    // Purpose
    // -------
    // An `OptError` that travelled through argmin as `anyhow::Error` comes back
    // unchanged instead of being flattened into `BackendError`.
    fn opt_error_round_trips_through_argmin_error() {
        let err: Error = OptError::NonFiniteCost { value: f64::INFINITY }.into();

        let mapped = OptError::from(err);

        assert_eq!(mapped, OptError::NonFiniteCost { value: f64::INFINITY });
    }

    #[test]
    fn display_mentions_offending_index() {
        let err = OptError::InvalidGradient {
            index: 3,
            value: f64::NAN,
            reason: "Gradient elements must be finite.",
        };

        assert!(err.to_string().contains("index 3"));
    }
}
