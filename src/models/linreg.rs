//! Regularized least-squares regression.
//!
//! Cost over the design matrix `X` (m rows):
//! `J(θ) = Σ(Xθ - y)² / 2m + λ/2m Σⱼ θⱼ²`, gradient
//! `Xᵀ(Xθ - y)/m + λ/m θ`, with the intercept weight left out of the
//! penalty. Parameters start at zero.
use crate::models::{
    errors::{ModelError, ModelResult},
    features::{FeatureSet, validate_features, validate_targets},
    options::{TrainOptions, solve},
    regularization::ridge,
};
use crate::optimization::conjugate_gradient::{Cost, CostEvaluator, Grad, Theta};
use ndarray::{Array1, Array2, ArrayView1};

/// Squared-error cost over a fixed design matrix.
#[derive(Debug, Clone, Copy)]
pub struct SquaredErrorCost<'a> {
    x: &'a Array2<f64>,
    y: &'a Array1<f64>,
    lambda: f64,
    skip: usize,
}

impl<'a> SquaredErrorCost<'a> {
    /// `skip` leading weights are excluded from the penalty.
    pub fn new(x: &'a Array2<f64>, y: &'a Array1<f64>, lambda: f64, skip: usize) -> Self {
        Self { x, y, lambda, skip }
    }
}

impl CostEvaluator for SquaredErrorCost<'_> {
    fn evaluate(&self, theta: &Theta) -> (Cost, Grad) {
        let m = self.x.nrows() as f64;
        let residual = self.x.dot(theta) - self.y;
        let (penalty, penalty_grad) = ridge(theta.view(), self.lambda, m, self.skip);
        let cost = residual.dot(&residual) / (2.0 * m) + penalty;
        let grad = self.x.t().dot(&residual) / m + penalty_grad;
        (cost, grad)
    }
}

/// Fitted linear regression.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression {
    features: FeatureSet,
    theta: Theta,
    training_cost: f64,
}

impl LinearRegression {
    /// Fit on rows of `x` with real-valued targets `y`.
    ///
    /// # Errors
    /// - Option validation ([`ModelError::InvalidLambda`]).
    /// - Data validation: empty, non-finite, or length mismatch.
    /// - Solver errors, wrapped as [`ModelError::Opt`].
    pub fn fit(x: &Array2<f64>, y: &Array1<f64>, opts: &TrainOptions) -> ModelResult<Self> {
        opts.validate()?;
        validate_features(x)?;
        validate_targets(x.nrows(), y)?;

        let features = FeatureSet::fit(x, opts)?;
        let design = features.transform(x)?;
        let cost =
            SquaredErrorCost::new(&design, y, opts.lambda, usize::from(features.has_intercept()));
        let solution = solve(&cost, Array1::zeros(features.dim()), opts)?;

        Ok(Self { features, theta: solution.theta, training_cost: solution.cost })
    }

    /// Prediction for one raw row.
    pub fn predict(&self, row: ArrayView1<'_, f64>) -> ModelResult<f64> {
        Ok(self.features.extract(row)?.dot(&self.theta))
    }

    /// Predictions for every raw row of `x`.
    pub fn predict_batch(&self, x: &Array2<f64>) -> ModelResult<Array1<f64>> {
        Ok(self.features.transform(x)?.dot(&self.theta))
    }

    /// Weights in the transformed feature space (intercept first if present).
    pub fn coefficients(&self) -> &Theta {
        &self.theta
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    /// Cost at the fitted parameters on the training data.
    pub fn training_cost(&self) -> f64 {
        self.training_cost
    }

    /// Explained-variance ratio `Σ(ŷ - ȳ)² / Σ(y - ȳ)²` on `(x, y)`.
    ///
    /// # Errors
    /// - Data validation as in [`fit`](Self::fit).
    /// - [`ModelError::ConstantTarget`] when `y` has no spread.
    pub fn r2(&self, x: &Array2<f64>, y: &Array1<f64>) -> ModelResult<f64> {
        validate_features(x)?;
        validate_targets(x.nrows(), y)?;
        let predicted = self.predict_batch(x)?;
        let y_bar = y.sum() / y.len() as f64;
        let ss_tot: f64 = y.iter().map(|v| (v - y_bar).powi(2)).sum();
        if ss_tot <= 0.0 {
            return Err(ModelError::ConstantTarget);
        }
        let ss_reg: f64 = predicted.iter().map(|v| (v - y_bar).powi(2)).sum();
        Ok(ss_reg / ss_tot)
    }
}
