//! Single-hidden-layer neural network classifier.
//!
//! Purpose
//! -------
//! Fit a feed-forward network with one layer of sigmoid units and a single
//! sigmoid output by minimizing regularized cross-entropy, with the
//! gradient supplied by backpropagation.
//!
//! Key behaviors
//! -------------
//! - The design matrix `X` comes from [`FeatureSet`] and already carries the
//!   intercept column when requested.
//! - Parameters live in one flat vector: Θ₁ (`dim(X) × hidden`) row-major,
//!   then Θ₂ (`(hidden + 1) × 1`). Row 0 of Θ₂ is the hidden-layer bias.
//! - Forward pass: `a₂ = [1, σ(XΘ₁)]`, `h = σ(a₂Θ₂)`.
//! - Initial weights are uniform in `[-0.5, 0.5)` from a seeded
//!   `Xoshiro256PlusPlus`, so fits are reproducible for a fixed seed.
//!
//! Invariants & assumptions
//! ------------------------
//! - Bias rows (row 0 of Θ₁ when an intercept is present, row 0 of Θ₂) are
//!   excluded from the L2 penalty.
//! - The cost surface is non-convex; different seeds can land in different
//!   local minima.
use crate::models::{
    errors::{ModelError, ModelResult},
    features::{FeatureSet, validate_features, validate_labels},
    logreg::check_cutoff,
    options::{TrainOptions, solve},
    regularization::ridge,
};
use crate::optimization::{
    conjugate_gradient::{Cost, CostEvaluator, Grad, Theta},
    numerical_stability::{logistic_gradient, safe_logistic, safe_softplus},
};
use ndarray::{Array1, Array2, ArrayView1, Zip, s};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Shapes of the two weight matrices inside the flat parameter vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkShape {
    pub inputs: usize,
    pub hidden: usize,
}

impl NetworkShape {
    /// Entries of Θ₁.
    pub fn first_layer_len(&self) -> usize {
        self.inputs * self.hidden
    }

    /// Total number of weights.
    pub fn len(&self) -> usize {
        self.first_layer_len() + self.hidden + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Split a flat parameter vector into `(Θ₁, Θ₂)`.
    pub fn unpack(&self, theta: ArrayView1<'_, f64>) -> (Array2<f64>, Array1<f64>) {
        let n1 = self.first_layer_len();
        let h = self.hidden;
        let theta1 = Array2::from_shape_fn((self.inputs, h), |(i, j)| theta[i * h + j]);
        let theta2 = theta.slice(s![n1..]).to_owned();
        (theta1, theta2)
    }
}

/// Regularized cross-entropy of the network with its backprop gradient.
#[derive(Debug, Clone)]
pub struct NetworkCost<'a> {
    x: &'a Array2<f64>,
    y: Array1<f64>,
    shape: NetworkShape,
    lambda: f64,
    intercept: bool,
}

impl<'a> NetworkCost<'a> {
    /// `intercept` marks column 0 of `x` as the constant bias input.
    pub fn new(
        x: &'a Array2<f64>, labels: &[bool], hidden: usize, lambda: f64, intercept: bool,
    ) -> Self {
        let y = labels.iter().map(|&l| if l { 1.0 } else { 0.0 }).collect();
        Self { x, y, shape: NetworkShape { inputs: x.ncols(), hidden }, lambda, intercept }
    }
}

impl CostEvaluator for NetworkCost<'_> {
    fn evaluate(&self, theta: &Theta) -> (Cost, Grad) {
        let m = self.x.nrows() as f64;
        let n1 = self.shape.first_layer_len();
        let (theta1, theta2) = self.shape.unpack(theta.view());

        // Forward
        let z2 = self.x.dot(&theta1);
        let mut a2 = Array2::<f64>::ones((self.x.nrows(), self.shape.hidden + 1));
        a2.slice_mut(s![.., 1..]).assign(&z2.mapv(safe_logistic));
        let z3 = a2.dot(&theta2);
        let data_cost =
            Zip::from(&z3).and(&self.y).fold(0.0, |acc, &zi, &yi| acc + safe_softplus(zi) - yi * zi);

        // Backward
        let d3 = z3.mapv(safe_logistic) - &self.y;
        let w2 = theta2.slice(s![1..]);
        let mut d2 = z2.mapv(logistic_gradient);
        for (row, &err) in d2.rows_mut().into_iter().zip(d3.iter()) {
            Zip::from(row).and(&w2).for_each(|d, &w| *d *= err * w);
        }
        let grad1 = self.x.t().dot(&d2) / m;
        let grad2 = a2.t().dot(&d3) / m;

        let skip1 = if self.intercept { self.shape.hidden } else { 0 };
        let (pen1, pen_grad1) = ridge(theta.slice(s![..n1]), self.lambda, m, skip1);
        let (pen2, pen_grad2) = ridge(theta.slice(s![n1..]), self.lambda, m, 1);

        let mut grad = Array1::zeros(theta.len());
        grad.slice_mut(s![..n1])
            .assign(&(Array1::from_iter(grad1.iter().copied()) + pen_grad1));
        grad.slice_mut(s![n1..]).assign(&(grad2 + pen_grad2));
        (data_cost / m + pen1 + pen2, grad)
    }
}

/// Fitted one-hidden-layer network.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuralNetwork {
    features: FeatureSet,
    shape: NetworkShape,
    theta1: Array2<f64>,
    theta2: Array1<f64>,
    training_cost: f64,
}

impl NeuralNetwork {
    /// Fit a network with `hidden` sigmoid units on rows of `x` with boolean
    /// labels `y`. Initial weights are drawn from `opts.seed`.
    ///
    /// # Errors
    /// - [`ModelError::InvalidHidden`] if `hidden == 0`.
    /// - Option and data validation as for the linear models.
    /// - Solver errors, wrapped as [`ModelError::Opt`].
    pub fn fit(
        x: &Array2<f64>, y: &[bool], hidden: usize, opts: &TrainOptions,
    ) -> ModelResult<Self> {
        opts.validate()?;
        if hidden == 0 {
            return Err(ModelError::InvalidHidden {
                hidden,
                reason: "At least one hidden unit is required.",
            });
        }
        validate_features(x)?;
        validate_labels(x.nrows(), y)?;

        let features = FeatureSet::fit(x, opts)?;
        let design = features.transform(x)?;
        let cost = NetworkCost::new(&design, y, hidden, opts.lambda, features.has_intercept());

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(opts.seed.unwrap_or_else(rand::random));
        let x0: Theta = (0..cost.shape.len()).map(|_| rng.gen_range(-0.5..0.5)).collect();
        let solution = solve(&cost, x0, opts)?;

        let shape = cost.shape;
        let (theta1, theta2) = shape.unpack(solution.theta.view());
        Ok(Self { features, shape, theta1, theta2, training_cost: solution.cost })
    }

    /// Output-unit activation for one raw row.
    pub fn score(&self, row: ArrayView1<'_, f64>) -> ModelResult<f64> {
        let input = self.features.extract(row)?;
        let hidden = input.dot(&self.theta1).mapv(safe_logistic);
        let z = self.theta2[0] + hidden.dot(&self.theta2.slice(s![1..]));
        Ok(safe_logistic(z))
    }

    /// `score(row) > cutoff`.
    ///
    /// # Errors
    /// [`ModelError::InvalidCutoff`] unless `0 ≤ cutoff ≤ 1`, plus row
    /// validation.
    pub fn classify(&self, row: ArrayView1<'_, f64>, cutoff: f64) -> ModelResult<bool> {
        check_cutoff(cutoff)?;
        Ok(self.score(row)? > cutoff)
    }

    pub fn shape(&self) -> NetworkShape {
        self.shape
    }

    /// Θ₁, one row per transformed input column.
    pub fn input_weights(&self) -> &Array2<f64> {
        &self.theta1
    }

    /// Θ₂, bias first.
    pub fn output_weights(&self) -> &Array1<f64> {
        &self.theta2
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn training_cost(&self) -> f64 {
        self.training_cost
    }
}
