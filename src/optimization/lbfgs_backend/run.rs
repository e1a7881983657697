//! Execution of an argmin L-BFGS solve over a [`CostEvaluator`].
use crate::optimization::{
    conjugate_gradient::{CostEvaluator, Grad, Theta},
    errors::OptResult,
    lbfgs_backend::{
        adapter::EvaluatorProblem,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        options::{LbfgsOptions, LbfgsOutcome, LineSearcher},
    },
};
use argmin::core::{Executor, IterState, Solver, State};

/// Minimize `evaluator` from `x0` with L-BFGS.
///
/// Unlike the conjugate-gradient minimizer this can fail: argmin aborts on
/// a non-finite cost or gradient, and on line-search breakdowns.
///
/// # Errors
/// - [`OptError::NonFiniteCost`](crate::optimization::errors::OptError::NonFiniteCost)
///   / [`OptError::InvalidGradient`](crate::optimization::errors::OptError::InvalidGradient)
///   when the evaluator misbehaves during the run.
/// - Any argmin error, mapped through `From<argmin::core::Error>`.
/// - Outcome validation errors from [`LbfgsOutcome::new`].
pub fn minimize_lbfgs<E: CostEvaluator + ?Sized>(
    evaluator: &E, x0: Theta, opts: &LbfgsOptions,
) -> OptResult<LbfgsOutcome> {
    let problem = EvaluatorProblem::new(evaluator);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(x0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(x0, opts, problem, solver)
        }
    }
}

pub fn run_lbfgs<'a, E, S>(
    x0: Theta, opts: &LbfgsOptions, problem: EvaluatorProblem<'a, E>, solver: S,
) -> OptResult<LbfgsOutcome>
where
    E: CostEvaluator + ?Sized,
    S: Solver<EvaluatorProblem<'a, E>, IterState<Theta, Grad, (), (), (), f64>> + Send + 'static,
{
    if opts.verbose {
        let (cost0, grad0) = problem.evaluator.evaluate(&x0);
        tracing::info!(cost = cost0, grad_norm = grad0.dot(&grad0).sqrt(), "L-BFGS start");
    }
    let max_iter = opts.max_iter as u64;
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(x0).max_iters(max_iter));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let fn_evals = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    tracing::debug!(iterations, status = %termination, "L-BFGS finished");
    LbfgsOutcome::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        fn_evals,
        grad,
    )
}
