//! conjugate_gradient — nonlinear conjugate-gradient minimizer with a
//! Wolfe–Powell line search.
//!
//! Purpose
//! -------
//! Minimize a differentiable cost `f(θ)` given an oracle returning
//! `(f(θ), ∇f(θ))`. This is the Rasmussen-style `minimize`: Polack–Ribière
//! directions, a bracketing line search driven by quadratic/cubic
//! interpolation and cubic extrapolation, and rollback to steepest descent
//! when a search fails.
//!
//! Key behaviors
//! -------------
//! - [`minimize`] runs at most `max_iter` line searches and returns the best
//!   point; [`minimize_with_options`] returns a [`CgOutcome`] with counters,
//!   the cost trace, and the stopping reason.
//! - Every accepted step satisfies both strong Wolfe–Powell conditions with
//!   `RHO = 0.01` and `SIG = 0.5`, so the cost never increases between
//!   accepted iterates.
//! - A failed search restores the point it started from. A second failure in
//!   a row ends the run with [`CgStatus::LineSearchStalled`], which is the
//!   normal way this method reports convergence.
//! - Non-finite evaluations are read as overshoot and the step is shrunk;
//!   non-finite polynomial fits fall back to bisection (or abort the search
//!   under [`NonFinitePolicy::FailFast`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - The evaluator is deterministic and returns a gradient of length
//!   `θ.len()`.
//! - All state lives in one `OptimizerState` per call; concurrent calls on
//!   different threads are independent.
//!
//! Conventions
//! -----------
//! - Progress is reported through `tracing` events (`debug` per accepted
//!   line search and at the end of a run, `warn` for an unusable start point
//!   or repeated non-finite fits). No subscriber is installed here.
//! - Derivative checks live in [`finite_diff`] and are opt-in; the minimizer
//!   itself never differentiates numerically.
//!
//! Testing notes
//! -------------
//! - [`line_search`] tests pin the polynomial fits and single searches on
//!   1-D profiles.
//! - [`api`] tests cover convergence, trace monotonicity, stall detection,
//!   non-finite regions, and concurrent runs.

pub mod api;
pub mod finite_diff;
pub(crate) mod line_search;
pub(crate) mod run;
pub(crate) mod state;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::{minimize, minimize_with_options};
pub use self::finite_diff::{check_gradient, compute_hessian, numeric_gradient};
pub use self::traits::{CgOptions, CgOutcome, CgStatus, CostEvaluator, NonFinitePolicy};
pub use self::types::{Cost, DEFAULT_MAX_ITER, Grad, Hessian, Theta};

pub mod prelude {
    pub use super::api::{minimize, minimize_with_options};
    pub use super::traits::{CgOptions, CgOutcome, CgStatus, CostEvaluator, NonFinitePolicy};
    pub use super::types::{Cost, Grad, Theta};
}
