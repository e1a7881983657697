//! Trainer options and solver dispatch.
//!
//! [`TrainOptions`] carries the knobs shared by the gradient-based trainers
//! (regularization, iteration ceiling, solver choice) together with the
//! feature pipeline settings consumed by [`FeatureSet`](super::FeatureSet).
//! [`solve`] hands a trainer's cost function to the selected minimizer.
use crate::models::{
    errors::{ModelError, ModelResult},
    features::Expansion,
};
use crate::optimization::{
    conjugate_gradient::{CgOptions, CgStatus, CostEvaluator, Theta, minimize_with_options},
    errors::OptError,
    lbfgs_backend::{DEFAULT_LBFGS_MEM, LbfgsOptions, LineSearcher, minimize_lbfgs},
};
use std::str::FromStr;
use tracing::debug;

pub const DEFAULT_TRAIN_MAX_ITER: usize = 1000;

/// Minimizer used to fit model parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Solver {
    /// Line-search conjugate gradient; never fails once started.
    #[default]
    ConjugateGradient,
    /// Argmin L-BFGS with a Moré–Thuente line search.
    Lbfgs,
}

impl FromStr for Solver {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String =
            s.chars().filter(|c| !matches!(c, '-' | '_' | ' ')).collect::<String>().to_lowercase();
        match key.as_str() {
            "cg" | "conjugategradient" => Ok(Solver::ConjugateGradient),
            "lbfgs" => Ok(Solver::Lbfgs),
            _ => Err(ModelError::InvalidSolver {
                name: s.to_string(),
                reason: "Expected 'cg' or 'lbfgs'.",
            }),
        }
    }
}

/// Options shared by the trainers.
///
/// - `lambda`: L2 penalty strength, `≥ 0`. The intercept weight is never
///   penalized.
/// - `max_iter`: iteration ceiling handed to the solver.
/// - `solver`: see [`Solver`].
/// - `intercept`: prepend a constant `1` column to the features.
/// - `standardize`: center and scale raw columns before expansion.
/// - `expansion`: polynomial feature expansion.
/// - `seed`: seed for randomized initialization; `None` seeds from entropy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainOptions {
    pub lambda: f64,
    pub max_iter: usize,
    pub solver: Solver,
    pub intercept: bool,
    pub standardize: bool,
    pub expansion: Expansion,
    pub seed: Option<u64>,
}

impl TrainOptions {
    /// # Errors
    /// [`ModelError::InvalidLambda`] unless `lambda` is finite and `≥ 0`.
    pub fn new(
        lambda: f64, max_iter: usize, solver: Solver, intercept: bool, standardize: bool,
        expansion: Expansion, seed: Option<u64>,
    ) -> ModelResult<Self> {
        let opts = Self { lambda, max_iter, solver, intercept, standardize, expansion, seed };
        opts.validate()?;
        Ok(opts)
    }

    pub(crate) fn validate(&self) -> ModelResult<()> {
        if !self.lambda.is_finite() {
            return Err(ModelError::InvalidLambda {
                lambda: self.lambda,
                reason: "Regularization strength must be finite.",
            });
        }
        if self.lambda < 0.0 {
            return Err(ModelError::InvalidLambda {
                lambda: self.lambda,
                reason: "Regularization strength must be non-negative.",
            });
        }
        Ok(())
    }
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            lambda: 0.0,
            max_iter: DEFAULT_TRAIN_MAX_ITER,
            solver: Solver::ConjugateGradient,
            intercept: true,
            standardize: true,
            expansion: Expansion::Linear,
            seed: None,
        }
    }
}

/// Fitted parameters and the training cost at them.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Solution {
    pub theta: Theta,
    pub cost: f64,
}

/// Minimize `evaluator` from `x0` with the solver named in `opts`.
///
/// # Errors
/// - [`OptError::NonFiniteCost`] (wrapped) if the cost is unusable at `x0`.
/// - Any L-BFGS option or backend error when [`Solver::Lbfgs`] is selected.
pub(crate) fn solve<E: CostEvaluator + ?Sized>(
    evaluator: &E, x0: Theta, opts: &TrainOptions,
) -> ModelResult<Solution> {
    match opts.solver {
        Solver::ConjugateGradient => {
            let cg = CgOptions { record_trace: false, ..CgOptions::with_max_iter(opts.max_iter) };
            let outcome = minimize_with_options(evaluator, x0, &cg);
            if outcome.status == CgStatus::InvalidStart {
                return Err(OptError::NonFiniteCost { value: outcome.value }.into());
            }
            debug!(
                solver = "cg",
                status = %outcome.status,
                iterations = outcome.iterations,
                cost = outcome.value,
                "training finished"
            );
            Ok(Solution { theta: outcome.theta_hat, cost: outcome.value })
        }
        Solver::Lbfgs => {
            let lbfgs = LbfgsOptions::new(
                Some(1e-8),
                None,
                opts.max_iter,
                DEFAULT_LBFGS_MEM,
                LineSearcher::MoreThuente,
                false,
            )?;
            let outcome = minimize_lbfgs(evaluator, x0, &lbfgs)?;
            debug!(
                solver = "lbfgs",
                status = %outcome.status,
                iterations = outcome.iterations,
                cost = outcome.value,
                "training finished"
            );
            Ok(Solution { theta: outcome.theta_hat, cost: outcome.value })
        }
    }
}
