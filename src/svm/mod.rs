//! svm — kernel support-vector classifier trained with simplified SMO.
//!
//! Purpose
//! -------
//! Solve the SVM dual quadratic program with box constraints `0 ≤ αᵢ ≤ C`
//! by sequential pairwise coordinate ascent, and wrap the result in a
//! [`DecisionFunction`].
//!
//! Key behaviors
//! -------------
//! - [`train_svm`] / [`train_svm_with_rng`] validate options and the
//!   training set, then run the solver loop, which itself never fails.
//! - [`Kernel`] is the pluggable similarity; [`KernelType`] provides the
//!   linear and Gaussian kernels.
//! - The partner index for each KKT-violating example comes from an
//!   injectable RNG (`Xoshiro256PlusPlus` seeded from [`SmoOptions::seed`]
//!   by default), so runs are reproducible.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every αᵢ stays in `[0, C]` after every update.
//! - `Σαᵢyᵢ` is preserved by the paired update rule, up to round-off.
//! - Labels are exactly `+1` or `-1`.
//!
//! Conventions
//! -----------
//! - The kernel matrix over the training set is computed once per run.
//! - Per-sweep progress is a `trace` event; the end of a run is `debug`.

pub mod decision;
pub mod errors;
pub mod kernel;
pub mod options;
pub mod smo;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::decision::{DecisionFunction, SmoStats};
pub use self::errors::{SvmError, SvmResult};
pub use self::kernel::{Kernel, KernelType};
pub use self::options::SmoOptions;
pub use self::smo::{train_svm, train_svm_with_rng};

pub mod prelude {
    pub use super::decision::DecisionFunction;
    pub use super::errors::{SvmError, SvmResult};
    pub use super::kernel::{Kernel, KernelType};
    pub use super::options::SmoOptions;
    pub use super::smo::{train_svm, train_svm_with_rng};
}
