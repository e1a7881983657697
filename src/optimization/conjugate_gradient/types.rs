//! conjugate_gradient::types — numeric aliases and line-search constants.
//!
//! The constants are the classical Wolfe–Powell settings of Rasmussen's
//! `minimize`: a sufficient-decrease coefficient `RHO`, a curvature
//! coefficient `SIG`, an interpolation margin `INT`, an extrapolation cap
//! `EXT`, a per-search evaluation budget, and a cap on the growth of the
//! initial step between iterations.
use ndarray::{Array1, Array2};

/// Parameter vector `θ`.
pub type Theta = Array1<f64>;

/// Gradient vector `∇f(θ)`, same length as [`Theta`].
pub type Grad = Array1<f64>;

/// Dense `n × n` Hessian for `n = Theta.len()`.
pub type Hessian = Array2<f64>;

/// Scalar cost value.
pub type Cost = f64;

/// Extrapolate at most this many times the current bracket.
pub const EXT: f64 = 3.0;

/// Sufficient-decrease constant of the Wolfe–Powell conditions.
pub const RHO: f64 = 0.01;

/// Curvature constant of the Wolfe–Powell conditions.
pub const SIG: f64 = 0.5;

/// Do not re-evaluate within this fraction of the current bracket limits.
pub const INT: f64 = 0.1;

/// Maximum number of cost evaluations per line search.
pub const MAX_LINE_SEARCH_EVALS: usize = 20;

/// Maximum allowed growth of the initial step between iterations.
pub const RATIO: f64 = 100.0;

/// Default outer-iteration ceiling used by the trainers.
pub const DEFAULT_MAX_ITER: usize = 1000;
