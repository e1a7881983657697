//! Public API surface for the conjugate-gradient minimizer.
//!
//! - [`CostEvaluator`]: what callers hand to the minimizer.
//! - [`CgOptions`] and [`NonFinitePolicy`]: run configuration.
//! - [`CgOutcome`] and [`CgStatus`]: what comes back.
use crate::optimization::{
    conjugate_gradient::{
        types::{Cost, DEFAULT_MAX_ITER, Grad, MAX_LINE_SEARCH_EVALS, Theta},
        validation::{verify_eval_budget, verify_fail_fast_limit, verify_max_iter},
    },
    errors::OptResult,
};
use std::fmt;

/// Cost/gradient oracle consumed by the minimizer.
///
/// `evaluate(θ)` returns `(f(θ), ∇f(θ))`. Implementations must be
/// deterministic for a given `θ` and must return a gradient with
/// `θ.len()` entries. Non-finite values are tolerated; the line search
/// treats them as a step that went too far.
///
/// Any `Fn(&Theta) -> (Cost, Grad)` closure is a `CostEvaluator`.
pub trait CostEvaluator {
    fn evaluate(&self, theta: &Theta) -> (Cost, Grad);
}

impl<F> CostEvaluator for F
where
    F: Fn(&Theta) -> (Cost, Grad),
{
    fn evaluate(&self, theta: &Theta) -> (Cost, Grad) {
        self(theta)
    }
}

/// What to do when a polynomial step fit comes out `NaN`/`±∞`.
///
/// - `Bisect`: replace the fit by bisection (or maximal extrapolation) and
///   keep spending the evaluation budget.
/// - `FailFast { limit }`: once `limit` non-finite fits were produced in a
///   single line search, abandon that search as failed. Useful when
///   diagnosing pathological cost surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonFinitePolicy {
    #[default]
    Bisect,
    FailFast {
        limit: usize,
    },
}

/// Run configuration for [`minimize_with_options`](super::minimize_with_options).
///
/// Default:
/// - `max_iter`: `1000` outer iterations (line searches)
/// - `max_evals_per_search`: `20`
/// - `non_finite_policy`: [`NonFinitePolicy::Bisect`]
/// - `record_trace`: `true`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CgOptions {
    pub max_iter: usize,
    pub max_evals_per_search: usize,
    pub non_finite_policy: NonFinitePolicy,
    pub record_trace: bool,
}

impl CgOptions {
    /// Build validated options.
    ///
    /// # Errors
    /// - [`OptError::InvalidMaxIter`](crate::optimization::errors::OptError::InvalidMaxIter)
    ///   if `max_iter == 0`.
    /// - [`OptError::InvalidEvalBudget`](crate::optimization::errors::OptError::InvalidEvalBudget)
    ///   if `max_evals_per_search == 0`.
    /// - [`OptError::InvalidFailFastLimit`](crate::optimization::errors::OptError::InvalidFailFastLimit)
    ///   if a `FailFast` limit of zero is requested.
    pub fn new(
        max_iter: usize, max_evals_per_search: usize, non_finite_policy: NonFinitePolicy,
        record_trace: bool,
    ) -> OptResult<Self> {
        verify_max_iter(max_iter)?;
        verify_eval_budget(max_evals_per_search)?;
        if let NonFinitePolicy::FailFast { limit } = non_finite_policy {
            verify_fail_fast_limit(limit)?;
        }
        Ok(Self { max_iter, max_evals_per_search, non_finite_policy, record_trace })
    }

    /// Default options with a different iteration ceiling.
    ///
    /// A ceiling of zero is allowed here and simply returns the start point.
    pub fn with_max_iter(max_iter: usize) -> Self {
        Self { max_iter, ..Self::default() }
    }
}

impl Default for CgOptions {
    fn default() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
            max_evals_per_search: MAX_LINE_SEARCH_EVALS,
            non_finite_policy: NonFinitePolicy::Bisect,
            record_trace: true,
        }
    }
}

/// Why the minimizer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CgStatus {
    /// The outer iteration ceiling was reached.
    MaxIterReached,
    /// Two consecutive line searches failed; treated as convergence/stall.
    LineSearchStalled,
    /// The evaluator returned a non-finite cost or an unusable gradient at
    /// the start point; the start point is returned unchanged.
    InvalidStart,
}

impl fmt::Display for CgStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CgStatus::MaxIterReached => write!(f, "Maximum iterations reached"),
            CgStatus::LineSearchStalled => write!(f, "Line search failed twice in a row"),
            CgStatus::InvalidStart => write!(f, "Invalid evaluation at the start point"),
        }
    }
}

/// Result of a conjugate-gradient run.
///
/// - `theta_hat`: best point found (the start point if nothing improved).
/// - `value`: cost at `theta_hat`.
/// - `status`: why the run stopped.
/// - `iterations`: outer iterations (line searches) performed.
/// - `evaluations`: total calls to the evaluator, including the first one.
/// - `failed_searches`: line searches that were rolled back.
/// - `non_finite_fits`: polynomial step fits that came out non-finite.
/// - `cost_trace`: the initial cost followed by the cost after every
///   accepted line search (empty when tracing is disabled).
/// - `grad_norm`: Euclidean norm of the gradient at `theta_hat`.
#[derive(Debug, Clone, PartialEq)]
pub struct CgOutcome {
    pub theta_hat: Theta,
    pub value: Cost,
    pub status: CgStatus,
    pub iterations: usize,
    pub evaluations: usize,
    pub failed_searches: usize,
    pub non_finite_fits: usize,
    pub cost_trace: Vec<Cost>,
    pub grad_norm: f64,
}

impl CgOutcome {
    /// `true` when the run ended because progress stalled rather than
    /// because the iteration ceiling cut it short.
    pub fn stalled(&self) -> bool {
        self.status == CgStatus::LineSearchStalled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use ndarray::array;

    #[test]
    fn closures_are_cost_evaluators() {
        let f = |x: &Theta| (x.dot(x), x.mapv(|v| 2.0 * v));

        let (cost, grad) = f.evaluate(&array![1.0, 2.0]);

        assert_eq!(cost, 5.0);
        assert_eq!(grad, array![2.0, 4.0]);
    }

    #[test]
    fn default_options_follow_classical_settings() {
        let opts = CgOptions::default();

        assert_eq!(opts.max_iter, 1000);
        assert_eq!(opts.max_evals_per_search, 20);
        assert_eq!(opts.non_finite_policy, NonFinitePolicy::Bisect);
        assert!(opts.record_trace);
    }

    #[test]
    // Purpose
    // -------
    // Each zero-valued knob is rejected with its own error variant.
    fn new_rejects_zero_knobs() {
        assert!(matches!(
            CgOptions::new(0, 20, NonFinitePolicy::Bisect, false),
            Err(OptError::InvalidMaxIter { .. })
        ));
        assert!(matches!(
            CgOptions::new(10, 0, NonFinitePolicy::Bisect, false),
            Err(OptError::InvalidEvalBudget { .. })
        ));
        assert!(matches!(
            CgOptions::new(10, 20, NonFinitePolicy::FailFast { limit: 0 }, false),
            Err(OptError::InvalidFailFastLimit { .. })
        ));
    }

    #[test]
    fn new_accepts_fail_fast_policy() {
        let opts = CgOptions::new(50, 10, NonFinitePolicy::FailFast { limit: 3 }, true)
            .expect("positive knobs should be accepted");

        assert_eq!(opts.non_finite_policy, NonFinitePolicy::FailFast { limit: 3 });
        assert_eq!(opts.max_evals_per_search, 10);
    }
}
