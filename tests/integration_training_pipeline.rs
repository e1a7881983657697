//! Integration tests for the model trainers and the engines beneath them.
//!
//! Purpose
//! -------
//! - Validate the end-to-end training pipeline: row-oriented data, feature
//!   transform, cost evaluator, minimizer (CG or L-BFGS) or SMO solver, and
//!   prediction on fresh rows.
//! - Exercise realistic settings (regularization, polynomial expansion,
//!   kernels, fixed seeds) through the public API only.
//!
//! Coverage
//! --------
//! - `models::features`: `design_matrix`, standardization and expansion via
//!   the trainers.
//! - `models::{linreg, logreg, neural, svm}`: fit, predict/score/classify.
//! - `optimization::conjugate_gradient` and `optimization::curvature`:
//!   certifying a trained convex model as a local minimum.
//! - Concurrent independent training runs.
//!
//! Exclusions
//! ----------
//! - Line-search branch coverage, SMO update algebra and option validation
//!   grids; those are covered by unit tests.
use ndarray::{Array1, Array2, array};
use rust_mlopt::{
    models::{
        CrossEntropyCost, Expansion, LinearRegression, LogisticRegression, NeuralNetwork, Solver,
        SvmClassifier, TrainOptions, DEFAULT_CUTOFF, design_matrix,
    },
    optimization::{conjugate_gradient::CostEvaluator, curvature::is_local_minimum},
    svm::{KernelType, SmoOptions},
};

/// Purpose
/// -------
/// Two-feature classification data with a diagonal boundary and a few
/// deterministic label flips near it.
///
/// Returns
/// -------
/// - `(x, y)` with `n` rows; `y[i] = x₀ + x₁ + 0.3·sin(5i) > 0`.
fn diagonal_classes(n: usize) -> (Array2<f64>, Vec<bool>) {
    let x = Array2::from_shape_fn((n, 2), |(i, j)| {
        let t = i as f64;
        if j == 0 { (0.37 * t).sin() * 3.0 } else { (0.23 * t + 1.0).cos() * 2.0 }
    });
    let y = (0..n).map(|i| x[[i, 0]] + x[[i, 1]] + 0.3 * (5.0 * i as f64).sin() > 0.0).collect();
    (x, y)
}

/// Fraction of rows whose prediction matches the label.
fn accuracy(x: &Array2<f64>, y: &[bool], predict: impl Fn(ndarray::ArrayView1<'_, f64>) -> bool) -> f64 {
    let correct = x.rows().into_iter().zip(y).filter(|(row, &label)| predict(row.view()) == label).count();
    correct as f64 / y.len() as f64
}

#[test]
// Purpose
// -------
// Row-oriented data goes through `design_matrix` and a quadratic
// expansion, and the linear model recovers a curved relation.
//
// Given
// -----
// - y = 1 + x - 0.5x² sampled at 12 points, `Expansion::Quadratic`.
// - Both solvers.
//
// Expect
// ------
// - Predictions at unseen points match the true curve.
// - R² on the training data is 1 up to solver accuracy.
fn linear_regression_fits_quadratic_through_expansion() {
    let rows: Vec<Vec<f64>> = (0..12).map(|i| vec![-3.0 + 0.5 * i as f64]).collect();
    let x = design_matrix(&rows).expect("rows are rectangular");
    let truth = |v: f64| 1.0 + v - 0.5 * v * v;
    let y = x.column(0).mapv(truth);

    for solver in [Solver::ConjugateGradient, Solver::Lbfgs] {
        let opts = TrainOptions { expansion: Expansion::Quadratic, solver, ..TrainOptions::default() };
        let model = LinearRegression::fit(&x, &y, &opts).expect("fit should succeed");

        for v in [-2.2, 0.1, 1.7] {
            let got = model.predict(array![v].view()).expect("prediction should succeed");
            assert!((got - truth(v)).abs() < 1e-4, "{solver:?}: {got} vs {}", truth(v));
        }
        assert!((model.r2(&x, &y).expect("r2 defined") - 1.0).abs() < 1e-6);
    }
}

#[test]
// Purpose
// -------
// The probabilistic classifiers learn a diagonal boundary and the convex
// logistic fit is certified as a local minimum by the curvature check.
//
// Given
// -----
// - 60 rows of `diagonal_classes`.
// - Logistic regression with λ = 0.5; network with 3 hidden units,
//   λ = 0.1, fixed seed.
//
// Expect
// ------
// - Training accuracy ≥ 85% for both models; scores lie in (0, 1).
// - The logistic solution has a small gradient and non-negative curvature.
fn probabilistic_classifiers_learn_diagonal_boundary() {
    let (x, y) = diagonal_classes(60);

    let opts = TrainOptions { lambda: 0.5, ..TrainOptions::default() };
    let logit = LogisticRegression::fit(&x, &y, &opts).expect("logistic fit should succeed");
    let acc = accuracy(&x, &y, |row| logit.classify(row, DEFAULT_CUTOFF).expect("valid row"));
    assert!(acc >= 0.85, "logistic accuracy {acc}");

    let design = logit.features().transform(&x).expect("training rows transform");
    let cost = CrossEntropyCost::new(&design, &y, 0.5, 1);
    let (_, grad) = cost.evaluate(logit.coefficients());
    assert!(grad.iter().all(|g| g.abs() < 1e-4));
    assert!(is_local_minimum(&cost, logit.coefficients(), 1e-3, 1e-8).expect("curvature check runs"));

    let net_opts = TrainOptions { lambda: 0.1, seed: Some(1), ..TrainOptions::default() };
    let net = NeuralNetwork::fit(&x, &y, 3, &net_opts).expect("network fit should succeed");
    let acc = accuracy(&x, &y, |row| net.classify(row, DEFAULT_CUTOFF).expect("valid row"));
    assert!(acc >= 0.85, "network accuracy {acc}");
    let p = net.score(array![2.0, 2.0].view()).expect("valid row");
    assert!(p > 0.0 && p < 1.0);
}

#[test]
// Purpose
// -------
// The SVM classifier agrees with the data on both kernels and is
// reproducible for a fixed SMO seed.
//
// Given
// -----
// - 40 rows of `diagonal_classes`, C = 10.
// - Linear and Gaussian (σ = 1) kernels, seed 9.
//
// Expect
// ------
// - Training accuracy ≥ 85% for both kernels.
// - Two fits with the same seed produce identical dual coefficients.
fn svm_classifier_is_accurate_and_reproducible() {
    let (x, y) = diagonal_classes(40);
    let smo = SmoOptions { c: 10.0, seed: Some(9), ..SmoOptions::default() };
    let opts = TrainOptions::default();

    for kernel in [KernelType::Linear, KernelType::gaussian(1.0).expect("valid sigma")] {
        let clf = SvmClassifier::fit(&x, &y, kernel, &opts, &smo).expect("svm fit should succeed");
        let acc = accuracy(&x, &y, |row| clf.classify(row).expect("valid row"));
        assert!(acc >= 0.85, "{kernel:?} accuracy {acc}");

        let again = SvmClassifier::fit(&x, &y, kernel, &opts, &smo).expect("svm fit should succeed");
        assert_eq!(clf.decision_function().alpha, again.decision_function().alpha);
    }
}

#[test]
// Purpose
// -------
// Independent trainings share no state and can run on separate threads.
//
// Given
// -----
// - Four regressions on scaled copies of the same data, run concurrently.
//
// Expect
// ------
// - Each model's slope-to-target scaling matches its own data.
fn concurrent_trainings_are_independent() {
    let x = Array2::from_shape_fn((20, 1), |(i, _)| i as f64);
    let scales = [1.0, 2.0, 3.0, 4.0];

    let predictions: Vec<f64> = std::thread::scope(|s| {
        let handles: Vec<_> = scales
            .iter()
            .map(|&k| {
                let x = &x;
                s.spawn(move || {
                    let y: Array1<f64> = x.column(0).mapv(|v| k * v);
                    let model = LinearRegression::fit(x, &y, &TrainOptions::default())
                        .expect("fit should succeed");
                    model.predict(array![10.0].view()).expect("valid row")
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().expect("thread should not panic")).collect()
    });

    for (got, k) in predictions.iter().zip(scales) {
        assert!((got - 10.0 * k).abs() < 1e-5);
    }
}
