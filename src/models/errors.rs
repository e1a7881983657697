//! Errors for the model trainers.
//!
//! Trainers validate their inputs before handing a cost function to an
//! optimizer, so almost everything here is a data or option problem. The
//! optimizer and SVM layers keep their own error types; they are wrapped
//! transparently.
use crate::optimization::errors::OptError;
use crate::svm::errors::SvmError;
use thiserror::Error;

/// Result alias for training and prediction.
pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    // ---- Training data ----
    /// No rows or no feature columns.
    #[error("Training data is empty: {rows} row(s), {cols} column(s)")]
    EmptyData { rows: usize, cols: usize },

    /// A row of a row-oriented input has the wrong number of values.
    #[error("Ragged input: row {row} has {found} values, expected {expected}")]
    RaggedRows { row: usize, expected: usize, found: usize },

    /// Feature matrix and target vector disagree on the number of examples.
    #[error("Feature matrix has {rows} rows but {targets} targets")]
    LengthMismatch { rows: usize, targets: usize },

    #[error("Non-finite feature value {value} at ({row}, {col})")]
    NonFiniteFeature { row: usize, col: usize, value: f64 },

    #[error("Non-finite target value {value} at index {index}")]
    NonFiniteTarget { index: usize, value: f64 },

    /// R² is undefined when every target has the same value.
    #[error("Targets have zero variance")]
    ConstantTarget,

    // ---- Options ----
    #[error("Invalid regularization strength {lambda}: {reason}")]
    InvalidLambda { lambda: f64, reason: &'static str },

    #[error("Invalid hidden layer size {hidden}: {reason}")]
    InvalidHidden { hidden: usize, reason: &'static str },

    #[error("Invalid solver '{name}': {reason}")]
    InvalidSolver { name: String, reason: &'static str },

    #[error("Invalid expansion '{name}': {reason}")]
    InvalidExpansion { name: String, reason: &'static str },

    #[error("Invalid classification cutoff {cutoff}: {reason}")]
    InvalidCutoff { cutoff: f64, reason: &'static str },

    // ---- Prediction ----
    /// A row passed to a fitted model has the wrong number of raw features.
    #[error("Feature dimension mismatch: expected {expected}, found {found}")]
    FeatureDimMismatch { expected: usize, found: usize },

    // ---- Wrapped ----
    #[error(transparent)]
    Opt(#[from] OptError),

    #[error(transparent)]
    Svm(#[from] SvmError),
}
