//! optimization — gradient-based minimizers, numerical guards, and the
//! shared error surface.
//!
//! Purpose
//! -------
//! Fit model parameters by minimizing a differentiable cost. Callers hand
//! over a cost evaluator returning `(f(θ), ∇f(θ))` and a start point, and get
//! back a best-effort minimizer candidate.
//!
//! Key behaviors
//! -------------
//! - [`conjugate_gradient`]: the Polack–Ribière conjugate-gradient minimizer
//!   with a Wolfe–Powell line search. Never fails; always returns its best
//!   point.
//! - [`lbfgs_backend`]: argmin L-BFGS over the same evaluators, used as an
//!   alternative trainer solver and as a cross-check.
//! - [`curvature`]: Hessian eigenvalue checks to tell minima from saddles
//!   after a run on a non-convex cost.
//! - [`numerical_stability`]: the division floor and overflow-free
//!   logistic/softplus shared by the line search and the cost adapters.
//! - [`errors`]: `OptError` / `OptResult` for everything around the
//!   minimizers that can be rejected (options, derivative checks, L-BFGS).
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters, gradients, and Hessians use the `ndarray` aliases `Theta`,
//!   `Grad`, `Hessian`; gradient length always equals parameter length.
//! - Each minimizer call owns its state; nothing is shared across calls.
//!
//! Conventions
//! -----------
//! - The library emits `tracing` events and never installs a subscriber.
//! - No `unsafe`, no panics on user input.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; end-to-end trainer runs are in
//!   `tests/`.

pub mod conjugate_gradient;
pub mod curvature;
pub mod errors;
pub mod lbfgs_backend;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_mlopt::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::conjugate_gradient::prelude::*;
    pub use super::curvature::{is_local_minimum, min_curvature};
    pub use super::errors::{OptError, OptResult};
    pub use super::lbfgs_backend::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
