//! Trained SVM decision function.
use crate::svm::{
    errors::{SvmError, SvmResult},
    kernel::{Kernel, KernelType},
};
use ndarray::{Array1, Array2, ArrayView1};

/// Counters from one SMO run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SmoStats {
    /// Full sweeps over the training set.
    pub iterations: usize,
    /// Consecutive sweeps without an update at the end of the run.
    pub passes: usize,
    /// Accepted pair updates over the whole run.
    pub updates: usize,
    /// `true` when the run stopped on idle passes rather than the sweep ceiling.
    pub converged: bool,
}

/// `score(x) = Σᵢ αᵢ yᵢ k(x, xᵢ) + b`; classification is `score(x) > 0`.
#[derive(Debug, Clone)]
pub struct DecisionFunction<K = KernelType> {
    pub alpha: Array1<f64>,
    pub bias: f64,
    pub labels: Array1<f64>,
    pub examples: Array2<f64>,
    pub kernel: K,
    pub stats: SmoStats,
}

impl<K: Kernel> DecisionFunction<K> {
    /// Margin of `x`; positive on the `+1` side.
    ///
    /// # Errors
    /// [`SvmError::DimensionMismatch`] if `x` does not have one entry per
    /// training feature.
    pub fn score(&self, x: ArrayView1<'_, f64>) -> SvmResult<f64> {
        let expected = self.examples.ncols();
        if x.len() != expected {
            return Err(SvmError::DimensionMismatch { expected, found: x.len() });
        }
        Ok(self.margin(x))
    }

    pub fn classify(&self, x: ArrayView1<'_, f64>) -> SvmResult<bool> {
        Ok(self.score(x)? > 0.0)
    }

    /// Examples with a non-zero dual coefficient.
    pub fn support_vector_count(&self) -> usize {
        self.alpha.iter().filter(|&&a| a > 0.0).count()
    }

    /// `Σᵢ αᵢ yᵢ`; zero at an exact dual optimum.
    pub fn dual_residual(&self) -> f64 {
        self.alpha.dot(&self.labels)
    }

    pub(crate) fn margin(&self, x: ArrayView1<'_, f64>) -> f64 {
        self.examples
            .rows()
            .into_iter()
            .zip(self.alpha.iter().zip(self.labels.iter()))
            .filter(|(_, (&a, _))| a != 0.0)
            .map(|(row, (&a, &y))| a * y * self.kernel.compute(x, row))
            .sum::<f64>()
            + self.bias
    }
}
