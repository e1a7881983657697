//! Validation helpers for the conjugate-gradient minimizer.
//!
//! - **Option checks**: [`verify_max_iter`], [`verify_eval_budget`],
//!   [`verify_fail_fast_limit`] reject zero-valued knobs.
//! - **Evaluation checks**: [`is_usable`] decides whether an evaluator
//!   result can take part in the line search.
//! - **Gradient validation**: [`validate_grad`] enforces dimension and
//!   finiteness, reporting the first offending entry.
//! - **Hessian validation**: [`validate_hessian`] enforces shape and
//!   finiteness.
use crate::optimization::{
    conjugate_gradient::types::{Cost, Grad, Hessian},
    errors::{OptError, OptResult},
};

pub fn verify_max_iter(max_iter: usize) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

pub fn verify_eval_budget(budget: usize) -> OptResult<()> {
    if budget == 0 {
        return Err(OptError::InvalidEvalBudget {
            budget,
            reason: "Each line search needs at least one evaluation.",
        });
    }
    Ok(())
}

pub fn verify_fail_fast_limit(limit: usize) -> OptResult<()> {
    if limit == 0 {
        return Err(OptError::InvalidFailFastLimit {
            limit,
            reason: "Fail-fast limit must be greater than zero.",
        });
    }
    Ok(())
}

/// `true` if `(cost, grad)` is finite and `grad.len() == dim`.
pub fn is_usable(cost: Cost, grad: &Grad, dim: usize) -> bool {
    cost.is_finite() && validate_grad(grad, dim).is_ok()
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] for the first non-finite element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate the shape and entries of a Hessian matrix.
///
/// # Errors
/// - [`OptError::HessianDimMismatch`] if the matrix is not `dim × dim`.
/// - [`OptError::InvalidHessian`] for the first non-finite entry.
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    for ((i, j), &value) in hessian.indexed_iter() {
        if !value.is_finite() {
            return Err(OptError::InvalidHessian { row: i, col: j, value });
        }
    }
    Ok(())
}
