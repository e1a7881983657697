//! lbfgs_backend — argmin-powered L-BFGS over the same cost evaluators.
//!
//! Purpose
//! -------
//! Offer a quasi-Newton alternative to the conjugate-gradient minimizer for
//! any [`CostEvaluator`](crate::optimization::conjugate_gradient::CostEvaluator).
//! Trainers can select it through their solver option, and tests use it to
//! cross-check conjugate-gradient results.
//!
//! Key behaviors
//! -------------
//! - [`adapter::EvaluatorProblem`] exposes an evaluator to argmin as a
//!   `CostFunction` + `Gradient`.
//! - [`builders`] construct L-BFGS with a More–Thuente or Hager–Zhang line
//!   search and apply optional tolerances.
//! - [`minimize_lbfgs`] runs the solver and normalizes the final state into
//!   an [`LbfgsOutcome`].
//!
//! Conventions
//! -----------
//! - Unlike the conjugate-gradient path, this backend returns `OptResult`:
//!   non-finite evaluations abort the run instead of shrinking the step.
//! - With the `obs_slog` feature and `verbose = true`, a terminal slog
//!   observer logs every iteration; otherwise progress goes to `tracing`.

pub mod adapter;
pub mod builders;
pub mod options;
pub mod run;
pub mod types;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::options::{LbfgsOptions, LbfgsOutcome, LineSearcher};
pub use self::run::minimize_lbfgs;
pub use self::types::{DEFAULT_LBFGS_MAX_ITER, DEFAULT_LBFGS_MEM};

pub mod prelude {
    pub use super::options::{LbfgsOptions, LbfgsOutcome, LineSearcher};
    pub use super::run::minimize_lbfgs;
}
