//! rust_mlopt — a line-search minimizer, an SMO-style SVM solver, and the
//! model trainers built on them.
//!
//! Purpose
//! -------
//! Serve as the crate root. Numerical work lives in three modules:
//! [`optimization`] (conjugate-gradient minimizer, L-BFGS backend, curvature
//! checks), [`svm`] (kernel SVM dual solved by simplified SMO) and
//! [`models`] (linear, logistic, neural and SVM trainers wired onto the two
//! engines).
//!
//! Key behaviors
//! -------------
//! - The minimizer and the SMO loop never fail; they always return their
//!   best iterate. Everything that can be rejected (options, data,
//!   derivative checks) is validated in front of them and surfaces as a
//!   typed error.
//! - Randomness (SVM partner selection, network initialization) comes from
//!   a seedable `Xoshiro256PlusPlus`, so runs are reproducible.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every call owns its state; independent calls can run concurrently.
//! - Costs and gradients are `f64` over `ndarray` vectors.
//!
//! Conventions
//! -----------
//! - Progress and degradations are reported through `tracing` events; the
//!   library never installs a subscriber.
//! - Each module exposes a `prelude` with its primary surface.
//!
//! Downstream usage
//! ----------------
//! ```ignore
//! use rust_mlopt::models::prelude::*;
//!
//! let model = LogisticRegression::fit(&x, &labels, &TrainOptions::default())?;
//! let p = model.score(row.view())?;
//! ```

pub mod models;
pub mod optimization;
pub mod svm;
