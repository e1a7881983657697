//! Transient state of one minimizer invocation.
//!
//! [`OptimizerState`] owns the current point, cost, gradient, search
//! direction, slope, and trial step of a single `minimize` call. It is
//! mutated in place across outer iterations and dropped when the call
//! returns; nothing here is shared between calls.
use crate::optimization::{
    conjugate_gradient::{
        traits::{CgOptions, CostEvaluator},
        types::{Cost, Grad, RATIO, Theta},
        validation::is_usable,
    },
    numerical_stability::{REALMIN, safe_div},
};
use ndarray::Array1;

/// Read-only inputs shared by every step of one run.
pub(crate) struct SearchContext<'a, E: ?Sized> {
    pub evaluator: &'a E,
    pub opts: &'a CgOptions,
}

/// One evaluation along the search direction.
///
/// `slope` is the directional derivative `∇f · s`. Unusable evaluations
/// (non-finite cost or gradient, wrong gradient length) are recorded with
/// `cost = slope = +∞`, which every Wolfe–Powell test reads as "too far".
#[derive(Debug, Clone)]
pub(crate) struct Probe {
    pub cost: Cost,
    pub grad: Grad,
    pub slope: f64,
}

impl Probe {
    pub(crate) fn is_valid(&self) -> bool {
        self.cost.is_finite()
    }
}

/// Point to roll back to when a line search fails.
pub(crate) struct Checkpoint {
    x: Theta,
    f: Cost,
    df: Grad,
}

#[derive(Debug, Clone)]
pub(crate) struct OptimizerState {
    /// Current point `X`.
    pub x: Theta,
    /// Cost at `x`.
    pub f1: Cost,
    /// Gradient at `x`.
    pub df1: Grad,
    /// Search direction.
    pub s: Grad,
    /// Directional derivative `df1 · s`; negative for a descent direction.
    pub d1: f64,
    /// Trial step length for the next line search.
    pub z1: f64,
    /// Whether the previous line search failed.
    pub ls_failed: bool,
    pub iter: usize,
    pub evaluations: usize,
    pub failed_searches: usize,
    pub non_finite_fits: usize,
}

impl OptimizerState {
    /// Start from an already evaluated point, heading down the steepest
    /// descent direction with initial step `1 / (1 - d1)`.
    pub(crate) fn new(x: Theta, f1: Cost, df1: Grad) -> Self {
        let s = -&df1;
        let d1 = -s.dot(&s);
        let z1 = safe_div(1.0, 1.0 - d1);
        Self {
            x,
            f1,
            df1,
            s,
            d1,
            z1,
            ls_failed: false,
            iter: 0,
            evaluations: 1,
            failed_searches: 0,
            non_finite_fits: 0,
        }
    }

    /// Evaluate the cost at the current `x` and project the gradient on `s`.
    pub(crate) fn probe<E: CostEvaluator + ?Sized>(&mut self, evaluator: &E) -> Probe {
        self.evaluations += 1;
        let (cost, grad) = evaluator.evaluate(&self.x);
        if is_usable(cost, &grad, self.x.len()) {
            let slope = grad.dot(&self.s);
            if slope.is_finite() {
                return Probe { cost, grad, slope };
            }
        }
        tracing::trace!(cost, "unusable evaluation treated as an overshoot");
        Probe { cost: f64::INFINITY, grad: Array1::zeros(self.x.len()), slope: f64::INFINITY }
    }

    /// Move `x` by `step` along the search direction.
    pub(crate) fn advance(&mut self, step: f64) {
        self.x.scaled_add(step, &self.s);
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint { x: self.x.clone(), f: self.f1, df: self.df1.clone() }
    }

    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.x = checkpoint.x;
        self.f1 = checkpoint.f;
        self.df1 = checkpoint.df;
    }

    /// Take the point found by a successful line search and build the next
    /// Polack–Ribière direction. `self.z1` must hold the accepted step.
    pub(crate) fn accept(&mut self, probe: Probe) {
        let Probe { cost, grad: df2, .. } = probe;
        self.f1 = cost;

        let beta = safe_div(df2.dot(&df2) - self.df1.dot(&df2), self.df1.dot(&self.df1));
        self.s *= beta;
        self.s -= &df2;
        self.df1 = df2;

        let mut d2 = self.df1.dot(&self.s);
        if d2 > 0.0 {
            self.s = -&self.df1;
            d2 = -self.s.dot(&self.s);
        }
        self.z1 *= RATIO.min(safe_div(self.d1, d2 - REALMIN));
        self.d1 = d2;
        self.ls_failed = false;
    }

    /// Restart along the steepest descent direction at the current point.
    pub(crate) fn reset_to_steepest_descent(&mut self) {
        self.s = -&self.df1;
        self.d1 = -self.s.dot(&self.s);
        self.z1 = safe_div(1.0, 1.0 - self.d1);
    }

    pub(crate) fn grad_norm(&self) -> f64 {
        self.df1.dot(&self.df1).sqrt()
    }
}
