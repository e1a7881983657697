//! Configuration and outcome types for the L-BFGS backend.
use crate::optimization::{
    conjugate_gradient::{Grad, Theta},
    errors::{OptError, OptResult},
    lbfgs_backend::types::{DEFAULT_LBFGS_MAX_ITER, DEFAULT_LBFGS_MEM},
};
use argmin::core::{TerminationReason, TerminationStatus};
use std::{collections::HashMap, str::FromStr};

/// Line search paired with L-BFGS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineSearcher {
    #[default]
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Options for [`minimize_lbfgs`](super::minimize_lbfgs).
///
/// `tol_grad` / `tol_cost` left as `None` keep argmin's defaults.
/// `verbose` attaches a terminal slog observer when the crate is built with
/// the `obs_slog` feature and is ignored otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct LbfgsOptions {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: usize,
    pub mem: usize,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
}

impl LbfgsOptions {
    /// # Errors
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for a
    ///   non-finite or non-positive tolerance.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    /// - [`OptError::InvalidLBFGSMem`] if `mem == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: usize, mem: usize,
        line_searcher: LineSearcher, verbose: bool,
    ) -> OptResult<Self> {
        if let Some(tol) = tol_grad {
            if !(tol.is_finite() && tol > 0.0) {
                return Err(OptError::InvalidTolGrad {
                    tol,
                    reason: "Tolerance must be positive and finite.",
                });
            }
        }
        if let Some(tol) = tol_cost {
            if !(tol.is_finite() && tol > 0.0) {
                return Err(OptError::InvalidTolCost {
                    tol,
                    reason: "Tolerance must be positive and finite.",
                });
            }
        }
        if max_iter == 0 {
            return Err(OptError::InvalidMaxIter {
                max_iter,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        if mem == 0 {
            return Err(OptError::InvalidLBFGSMem {
                mem,
                reason: "L-BFGS memory must be greater than zero.",
            });
        }
        Ok(Self { tol_grad, tol_cost, max_iter, mem, line_searcher, verbose })
    }
}

impl Default for LbfgsOptions {
    fn default() -> Self {
        Self {
            tol_grad: Some(1e-8),
            tol_cost: None,
            max_iter: DEFAULT_LBFGS_MAX_ITER,
            mem: DEFAULT_LBFGS_MEM,
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
        }
    }
}

/// Result of an L-BFGS run.
///
/// `converged` is `true` only when argmin reports that a tolerance was met;
/// hitting the iteration ceiling is reported through `status` with
/// `converged = false`.
#[derive(Debug, Clone, PartialEq)]
pub struct LbfgsOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: HashMap<String, u64>,
    pub grad_norm: Option<f64>,
}

impl LbfgsOutcome {
    /// # Errors
    /// - [`OptError::MissingThetaHat`] if argmin kept no best parameter.
    /// - [`OptError::InvalidThetaHat`] for a non-finite best parameter.
    /// - [`OptError::NonFiniteCost`] for a non-finite best cost.
    pub fn new(
        theta_hat: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: HashMap<String, u64>, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = theta_hat.ok_or(OptError::MissingThetaHat)?;
        if let Some((index, &value)) = theta_hat.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(OptError::InvalidThetaHat {
                index,
                value,
                reason: "Parameter estimates must be finite.",
            });
        }
        if !value.is_finite() {
            return Err(OptError::NonFiniteCost { value });
        }
        let converged = matches!(
            termination,
            TerminationStatus::Terminated(TerminationReason::SolverConverged)
                | TerminationStatus::Terminated(TerminationReason::TargetCostReached)
        );
        Ok(Self {
            theta_hat,
            value,
            converged,
            status: termination.to_string(),
            iterations: iterations as usize,
            fn_evals,
            grad_norm: grad.map(|g| g.dot(&g).sqrt()),
        })
    }

    /// Number of cost evaluations argmin recorded.
    pub fn cost_evals(&self) -> u64 {
        self.fn_evals.get("cost_count").copied().unwrap_or(0)
    }
}
