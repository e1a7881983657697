//! numerical_stability — guarded scalar primitives for the optimizers.
//!
//! Purpose
//! -------
//! Centralize the handful of floating-point guards the optimization core
//! relies on, so that the line search, the conjugate-direction update, and
//! the cost adapters share one definition of "too small to divide by" and
//! one overflow-free logistic/softplus pair.
//!
//! Key behaviors
//! -------------
//! - [`safe_div`] floors a denominator at [`REALMIN`] in magnitude while
//!   keeping its sign, so near-singular cost surfaces produce large but
//!   finite trial steps instead of `±∞`.
//! - [`safe_logistic`] / [`logistic_gradient`] evaluate σ and σ′ without
//!   overflowing `exp`.
//! - [`safe_softplus`] evaluates `ln(1 + eˣ)`, used to write cross-entropy
//!   costs without ever taking `ln(0)`.
//!
//! Conventions
//! -----------
//! - Pure `f64 -> f64` helpers; no allocation, no logging, no global state.
//! - `NaN` inputs propagate; callers that need to detect non-finite results
//!   (the polynomial fits in the line search) rely on this.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] compare against naive formulas on
//!   safe grids and check saturation in the tails.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    REALMIN, logistic_gradient, safe_div, safe_logistic, safe_softplus,
};

pub mod prelude {
    pub use super::transformations::{
        REALMIN, logistic_gradient, safe_div, safe_logistic, safe_softplus,
    };
}
