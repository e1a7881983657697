//! conjugate_gradient::finite_diff — numerical derivative checks for cost evaluators.
//!
//! Purpose
//! -------
//! Give model authors a way to confirm that the analytic gradient returned by
//! a [`CostEvaluator`] matches its cost, and give curvature diagnostics a
//! Hessian when only the gradient is known.
//!
//! Key behaviors
//! -------------
//! - [`numeric_gradient`] differentiates the cost half of an evaluator with
//!   central differences.
//! - [`check_gradient`] compares analytic and numeric gradients entry by
//!   entry and reports the largest scaled discrepancy.
//! - [`compute_hessian`] differentiates the gradient half of an evaluator,
//!   preferring central differences and falling back to forward differences
//!   when the central matrix fails validation; the result is symmetrized.
//!
//! Conventions
//! -----------
//! - Discrepancies are scaled by `max(1, |numeric|)`, so `tol` acts as an
//!   absolute tolerance near zero and a relative one for large entries.
//! - All helpers validate their output with [`validate_grad`] /
//!   [`validate_hessian`] and surface problems as [`OptError`].
use crate::optimization::{
    conjugate_gradient::{
        traits::CostEvaluator,
        types::{Grad, Hessian, Theta},
        validation::{validate_grad, validate_hessian},
    },
    errors::{OptError, OptResult},
};
use finitediff::FiniteDiff;

/// Central-difference gradient of the cost returned by `evaluator`.
///
/// # Errors
/// - [`OptError::InvalidGradient`] if any difference quotient is non-finite
///   (typically because the cost is non-finite near `theta`).
pub fn numeric_gradient<E: CostEvaluator + ?Sized>(evaluator: &E, theta: &Theta) -> OptResult<Grad> {
    let cost = |x: &Theta| evaluator.evaluate(x).0;
    let grad = theta.central_diff(&cost);
    validate_grad(&grad, theta.len())?;
    Ok(grad)
}

/// Compare the analytic gradient of `evaluator` with central differences.
///
/// Returns the largest scaled discrepancy
/// `|analytic_i - numeric_i| / max(1, |numeric_i|)` when it is within `tol`.
///
/// # Errors
/// - [`OptError::NonFiniteCost`] if the cost at `theta` is not finite.
/// - [`OptError::GradientDimMismatch`] / [`OptError::InvalidGradient`] if the
///   analytic gradient is malformed.
/// - [`OptError::GradientCheckFailed`] naming the worst entry when the
///   discrepancy exceeds `tol`.
pub fn check_gradient<E: CostEvaluator + ?Sized>(
    evaluator: &E, theta: &Theta, tol: f64,
) -> OptResult<f64> {
    if !(tol.is_finite() && tol > 0.0) {
        return Err(OptError::InvalidTolGrad {
            tol,
            reason: "Gradient check tolerance must be positive and finite.",
        });
    }
    let (cost, analytic) = evaluator.evaluate(theta);
    if !cost.is_finite() {
        return Err(OptError::NonFiniteCost { value: cost });
    }
    validate_grad(&analytic, theta.len())?;
    let numeric = numeric_gradient(evaluator, theta)?;

    let (worst_index, worst) = analytic
        .iter()
        .zip(numeric.iter())
        .map(|(a, n)| (a - n).abs() / n.abs().max(1.0))
        .enumerate()
        .fold((0, 0.0_f64), |best, (i, d)| if d > best.1 { (i, d) } else { best });

    if worst > tol {
        return Err(OptError::GradientCheckFailed {
            index: worst_index,
            analytic: analytic[worst_index],
            numeric: numeric[worst_index],
            tol,
        });
    }
    Ok(worst)
}

/// Finite-difference Hessian of the cost, built from the analytic gradient.
///
/// # Errors
/// - [`OptError::HessianDimMismatch`] / [`OptError::InvalidHessian`] when
///   both the central and the forward approximation fail validation; only
///   the forward-difference error is reported.
pub fn compute_hessian<E: CostEvaluator + ?Sized>(evaluator: &E, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let grad = |x: &Theta| evaluator.evaluate(x).1;
    let mut hess = theta.central_hessian(&grad);
    if validate_hessian(&hess, dim).is_err() {
        hess = theta.forward_hessian(&grad);
        validate_hessian(&hess, dim)?;
    }
    symmetrize_hess(&mut hess);
    Ok(hess)
}

/// Average each off-diagonal pair in place; the diagonal is untouched.
pub fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}
