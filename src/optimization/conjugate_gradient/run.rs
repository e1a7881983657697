//! Outer conjugate-gradient loop.
//!
//! One outer iteration = one line search. A successful search moves to the
//! new point and builds the next Polack–Ribière direction; a failed search
//! rolls back to the point it started from. Two failures in a row (or a
//! failure right after a steepest-descent restart) end the run.
use crate::optimization::conjugate_gradient::{
    line_search::{FailureKind, SearchResult, line_search},
    state::{OptimizerState, SearchContext},
    traits::{CgOptions, CgOutcome, CgStatus, CostEvaluator},
    types::Theta,
    validation::is_usable,
};

pub(crate) fn run_cg<E: CostEvaluator + ?Sized>(
    evaluator: &E, x0: Theta, opts: &CgOptions,
) -> CgOutcome {
    let dim = x0.len();
    let (f0, df0) = evaluator.evaluate(&x0);
    if !is_usable(f0, &df0, dim) {
        tracing::warn!(cost = f0, dim, "start point is not a usable evaluation; returning it unchanged");
        return CgOutcome {
            theta_hat: x0,
            value: f0,
            status: CgStatus::InvalidStart,
            iterations: 0,
            evaluations: 1,
            failed_searches: 0,
            non_finite_fits: 0,
            cost_trace: if opts.record_trace { vec![f0] } else { Vec::new() },
            grad_norm: f64::NAN,
        };
    }

    let ctx = SearchContext { evaluator, opts };
    let mut state = OptimizerState::new(x0, f0, df0);
    let mut cost_trace = if opts.record_trace { vec![f0] } else { Vec::new() };
    let mut status = CgStatus::MaxIterReached;

    while state.iter < opts.max_iter {
        state.iter += 1;
        let checkpoint = state.checkpoint();

        match line_search(&ctx, &mut state) {
            SearchResult::Accepted(probe) => {
                state.accept(probe);
                if opts.record_trace {
                    cost_trace.push(state.f1);
                }
                tracing::debug!(
                    iteration = state.iter,
                    cost = state.f1,
                    step = state.z1,
                    "line search accepted"
                );
            }
            SearchResult::Rejected(kind) => {
                state.failed_searches += 1;
                state.restore(checkpoint);
                if state.ls_failed {
                    tracing::debug!(
                        iteration = state.iter,
                        cost = state.f1,
                        ?kind,
                        "second consecutive line search failure; stopping"
                    );
                    status = CgStatus::LineSearchStalled;
                    break;
                }
                if kind == FailureKind::NonFiniteFits {
                    tracing::warn!(iteration = state.iter, "restarting after non-finite step fits");
                }
                state.reset_to_steepest_descent();
                state.ls_failed = true;
            }
        }
    }

    let grad_norm = state.grad_norm();
    tracing::debug!(
        iterations = state.iter,
        evaluations = state.evaluations,
        cost = state.f1,
        grad_norm,
        %status,
        "conjugate gradient finished"
    );
    CgOutcome {
        theta_hat: state.x,
        value: state.f1,
        status,
        iterations: state.iter,
        evaluations: state.evaluations,
        failed_searches: state.failed_searches,
        non_finite_fits: state.non_finite_fits,
        cost_trace,
        grad_norm,
    }
}
