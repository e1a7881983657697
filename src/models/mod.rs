//! models — trainers that feed cost functions to the optimizers.
//!
//! Purpose
//! -------
//! Wire concrete learning problems onto the crate's two engines: the
//! line-search minimizer (or the L-BFGS backend) for the smooth models and
//! the SMO solver for the SVM. Each trainer owns the feature transform it
//! was fitted with, so prediction on new rows is a single call.
//!
//! Key behaviors
//! -------------
//! - [`FeatureSet`] standardizes, expands and adds an intercept column.
//! - [`LinearRegression`], [`LogisticRegression`] and [`NeuralNetwork`]
//!   build a [`CostEvaluator`](crate::optimization::conjugate_gradient::CostEvaluator)
//!   over the design matrix and minimize it with the [`Solver`] chosen in
//!   [`TrainOptions`].
//! - [`SvmClassifier`] maps boolean labels to `±1` and calls
//!   [`train_svm`](crate::svm::train_svm).
//!
//! Invariants & assumptions
//! ------------------------
//! - All inputs are validated before an optimizer is invoked; the engines
//!   only ever see finite data.
//! - Intercept weights are never penalized.
//!
//! Conventions
//! -----------
//! - Rows are examples; classification labels are `bool`.
//! - `classify` takes an explicit cutoff for probabilistic models
//!   ([`DEFAULT_CUTOFF`] = 0.5) and uses the sign of the margin for the SVM.
//!
//! Testing notes
//! -------------
//! - Each trainer checks its analytic gradient against finite differences.
//! - Linear regression is compared with a direct solve of the ridge normal
//!   equations.

pub mod errors;
pub mod features;
pub mod linreg;
pub mod logreg;
pub mod neural;
pub mod options;
pub(crate) mod regularization;
pub mod svm;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{ModelError, ModelResult};
pub use self::features::{Expansion, FeatureSet, design_matrix};
pub use self::linreg::{LinearRegression, SquaredErrorCost};
pub use self::logreg::{CrossEntropyCost, DEFAULT_CUTOFF, LogisticRegression};
pub use self::neural::{NetworkCost, NetworkShape, NeuralNetwork};
pub use self::options::{Solver, TrainOptions};
pub use self::svm::SvmClassifier;

pub mod prelude {
    pub use super::errors::{ModelError, ModelResult};
    pub use super::features::{Expansion, FeatureSet, design_matrix};
    pub use super::linreg::LinearRegression;
    pub use super::logreg::{DEFAULT_CUTOFF, LogisticRegression};
    pub use super::neural::NeuralNetwork;
    pub use super::options::{Solver, TrainOptions};
    pub use super::svm::SvmClassifier;
}
