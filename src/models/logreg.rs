//! Regularized logistic regression.
//!
//! Cost per example is the cross-entropy `-[y ln h + (1-y) ln(1-h)]` with
//! `h = σ(θ·x)`, evaluated as `softplus(z) - y·z` so that saturated
//! predictions never produce `ln 0`. The penalty follows the linear model:
//! `λ/2m Σⱼ θⱼ²` without the intercept weight.
use crate::models::{
    errors::{ModelError, ModelResult},
    features::{FeatureSet, validate_features, validate_labels},
    options::{TrainOptions, solve},
    regularization::ridge,
};
use crate::optimization::{
    conjugate_gradient::{Cost, CostEvaluator, Grad, Theta},
    numerical_stability::{safe_logistic, safe_softplus},
};
use ndarray::{Array1, Array2, ArrayView1, Zip};

/// Default score threshold for `classify`.
pub const DEFAULT_CUTOFF: f64 = 0.5;

/// Cross-entropy cost over a fixed design matrix; targets are `0.0`/`1.0`.
#[derive(Debug, Clone)]
pub struct CrossEntropyCost<'a> {
    x: &'a Array2<f64>,
    y: Array1<f64>,
    lambda: f64,
    skip: usize,
}

impl<'a> CrossEntropyCost<'a> {
    pub fn new(x: &'a Array2<f64>, labels: &[bool], lambda: f64, skip: usize) -> Self {
        let y = labels.iter().map(|&l| if l { 1.0 } else { 0.0 }).collect();
        Self { x, y, lambda, skip }
    }
}

impl CostEvaluator for CrossEntropyCost<'_> {
    fn evaluate(&self, theta: &Theta) -> (Cost, Grad) {
        let m = self.x.nrows() as f64;
        let z = self.x.dot(theta);
        let data_cost =
            Zip::from(&z).and(&self.y).fold(0.0, |acc, &zi, &yi| acc + safe_softplus(zi) - yi * zi);
        let residual = z.mapv(safe_logistic) - &self.y;
        let (penalty, penalty_grad) = ridge(theta.view(), self.lambda, m, self.skip);
        let grad = self.x.t().dot(&residual) / m + penalty_grad;
        (data_cost / m + penalty, grad)
    }
}

/// Fitted logistic regression.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    features: FeatureSet,
    theta: Theta,
    training_cost: f64,
}

impl LogisticRegression {
    /// Fit on rows of `x` with boolean labels `y`.
    ///
    /// # Errors
    /// - Option validation ([`ModelError::InvalidLambda`]).
    /// - Data validation: empty, non-finite, or length mismatch.
    /// - Solver errors, wrapped as [`ModelError::Opt`].
    pub fn fit(x: &Array2<f64>, y: &[bool], opts: &TrainOptions) -> ModelResult<Self> {
        opts.validate()?;
        validate_features(x)?;
        validate_labels(x.nrows(), y)?;

        let features = FeatureSet::fit(x, opts)?;
        let design = features.transform(x)?;
        let cost =
            CrossEntropyCost::new(&design, y, opts.lambda, usize::from(features.has_intercept()));
        let solution = solve(&cost, Array1::zeros(features.dim()), opts)?;

        Ok(Self { features, theta: solution.theta, training_cost: solution.cost })
    }

    /// Probability of the positive class, `σ(θ·x)`.
    pub fn score(&self, row: ArrayView1<'_, f64>) -> ModelResult<f64> {
        Ok(safe_logistic(self.features.extract(row)?.dot(&self.theta)))
    }

    /// Scores for every raw row of `x`.
    pub fn score_batch(&self, x: &Array2<f64>) -> ModelResult<Array1<f64>> {
        Ok(self.features.transform(x)?.dot(&self.theta).mapv(safe_logistic))
    }

    /// `score(row) > cutoff`; [`DEFAULT_CUTOFF`] reproduces the usual rule.
    ///
    /// # Errors
    /// [`ModelError::InvalidCutoff`] unless `0 ≤ cutoff ≤ 1`, plus row
    /// validation.
    pub fn classify(&self, row: ArrayView1<'_, f64>, cutoff: f64) -> ModelResult<bool> {
        check_cutoff(cutoff)?;
        Ok(self.score(row)? > cutoff)
    }

    pub fn coefficients(&self) -> &Theta {
        &self.theta
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn training_cost(&self) -> f64 {
        self.training_cost
    }
}

pub(crate) fn check_cutoff(cutoff: f64) -> ModelResult<()> {
    if !(0.0..=1.0).contains(&cutoff) {
        return Err(ModelError::InvalidCutoff {
            cutoff,
            reason: "Cutoff must lie in [0, 1].",
        });
    }
    Ok(())
}
