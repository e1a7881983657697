//! SVM classifier over the shared feature pipeline.
//!
//! Boolean labels are mapped to `+1`/`-1`, rows go through [`FeatureSet`]
//! (intercept, standardization and expansion as in [`TrainOptions`]), and
//! the dual is solved by [`train_svm`]. Only the feature fields of
//! `TrainOptions` are used; solver knobs and the seed come from
//! [`SmoOptions`].
use crate::models::{
    errors::ModelResult,
    features::{FeatureSet, validate_features, validate_labels},
    options::TrainOptions,
};
use crate::svm::{DecisionFunction, KernelType, SmoOptions, train_svm};
use ndarray::{Array1, Array2, ArrayView1};

/// Fitted SVM classifier.
#[derive(Debug, Clone)]
pub struct SvmClassifier {
    features: FeatureSet,
    decision: DecisionFunction<KernelType>,
}

impl SvmClassifier {
    /// # Errors
    /// - Data validation: empty, non-finite, or length mismatch.
    /// - [`SvmError`](crate::svm::SvmError) from option or training-set
    ///   validation, wrapped as [`ModelError::Svm`](super::ModelError::Svm).
    pub fn fit(
        x: &Array2<f64>, y: &[bool], kernel: KernelType, opts: &TrainOptions, smo: &SmoOptions,
    ) -> ModelResult<Self> {
        validate_features(x)?;
        validate_labels(x.nrows(), y)?;

        let features = FeatureSet::fit(x, opts)?;
        let design = features.transform(x)?;
        let labels: Array1<f64> = y.iter().map(|&l| if l { 1.0 } else { -1.0 }).collect();
        let decision = train_svm(&design, &labels, kernel, smo)?;

        Ok(Self { features, decision })
    }

    /// Signed margin of one raw row; positive means `true`.
    pub fn score(&self, row: ArrayView1<'_, f64>) -> ModelResult<f64> {
        let input = self.features.extract(row)?;
        Ok(self.decision.score(input.view())?)
    }

    pub fn classify(&self, row: ArrayView1<'_, f64>) -> ModelResult<bool> {
        Ok(self.score(row)? > 0.0)
    }

    pub fn decision_function(&self) -> &DecisionFunction<KernelType> {
        &self.decision
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ModelError;
    use crate::svm::SvmError;
    use ndarray::array;

    fn seeded() -> SmoOptions {
        SmoOptions { seed: Some(5), ..SmoOptions::default() }
    }

    #[test]
    fn linear_kernel_separates_shifted_clusters() {
        // Purpose
        // -------
        // Boolean labels and raw rows flow through features into SMO.
        //
        // Given
        // -----
        // Two clusters around (-2, -2) and (2, 2), linear kernel.
        //
        // Expect
        // ------
        // Training points and fresh points near each center are classified
        // on the right side.
        let x = array![
            [-2.0, -2.5],
            [-2.5, -1.5],
            [-1.5, -2.0],
            [2.0, 2.5],
            [2.5, 1.5],
            [1.5, 2.0]
        ];
        let y = [false, false, false, true, true, true];

        let clf =
            SvmClassifier::fit(&x, &y, KernelType::Linear, &TrainOptions::default(), &seeded())
                .unwrap();

        for (row, &label) in x.rows().into_iter().zip(&y) {
            assert_eq!(clf.classify(row).unwrap(), label);
        }
        assert!(clf.classify(array![3.0, 3.0].view()).unwrap());
        assert!(!clf.classify(array![-3.0, -3.0].view()).unwrap());
        assert!(clf.decision_function().support_vector_count() >= 2);
    }

    #[test]
    fn gaussian_kernel_handles_ring() {
        // Inner points are `false`, the surrounding ring is `true`.
        let mut rows = vec![vec![0.0, 0.0], vec![0.3, 0.0], vec![0.0, -0.3], vec![-0.2, 0.2]];
        let mut labels = vec![false; 4];
        for k in 0..8 {
            let a = k as f64 * std::f64::consts::FRAC_PI_4;
            rows.push(vec![2.0 * a.cos(), 2.0 * a.sin()]);
            labels.push(true);
        }
        let x = Array2::from_shape_fn((rows.len(), 2), |(i, j)| rows[i][j]);
        let kernel = KernelType::gaussian(1.0).unwrap();
        let smo = SmoOptions { c: 10.0, ..seeded() };
        let opts = TrainOptions { standardize: false, ..TrainOptions::default() };

        let clf = SvmClassifier::fit(&x, &labels, kernel, &opts, &smo).unwrap();

        for (row, &label) in x.rows().into_iter().zip(&labels) {
            assert_eq!(clf.classify(row).unwrap(), label);
        }
    }

    #[test]
    fn svm_errors_are_wrapped() {
        let x = array![[1.0], [2.0]];
        let smo = SmoOptions { c: -1.0, ..SmoOptions::default() };

        let res = SvmClassifier::fit(&x, &[true, false], KernelType::Linear, &TrainOptions::default(), &smo);

        assert!(matches!(res, Err(ModelError::Svm(SvmError::InvalidC { .. }))));
    }
}
