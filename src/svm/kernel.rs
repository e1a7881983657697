//! Kernel functions for the SVM dual.
//!
//! A kernel is a symmetric similarity `k(a, b)` between two feature vectors
//! standing in for an inner product in an implicit feature space. Two
//! kernels ship with the crate: the plain dot product and the Gaussian
//! (RBF) kernel `exp(-‖a - b‖² / (2σ²))`. Custom kernels implement
//! [`Kernel`].
use crate::svm::errors::{SvmError, SvmResult};
use ndarray::ArrayView1;

pub trait Kernel {
    /// Similarity of `a` and `b`; both views have the same length.
    fn compute(&self, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum KernelType {
    #[default]
    Linear,
    Gaussian {
        sigma: f64,
    },
}

impl KernelType {
    /// Gaussian kernel with bandwidth `sigma`.
    ///
    /// # Errors
    /// [`SvmError::InvalidSigma`] unless `sigma` is finite and positive.
    pub fn gaussian(sigma: f64) -> SvmResult<Self> {
        if !sigma.is_finite() {
            return Err(SvmError::InvalidSigma { sigma, reason: "Bandwidth must be finite." });
        }
        if sigma <= 0.0 {
            return Err(SvmError::InvalidSigma { sigma, reason: "Bandwidth must be positive." });
        }
        Ok(KernelType::Gaussian { sigma })
    }
}

impl Kernel for KernelType {
    fn compute(&self, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
        match *self {
            KernelType::Linear => a.dot(&b),
            KernelType::Gaussian { sigma } => {
                let sq_dist: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum();
                (-sq_dist / (2.0 * sigma * sigma)).exp()
            }
        }
    }
}

impl<K: Kernel + ?Sized> Kernel for &K {
    fn compute(&self, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
        (**self).compute(a, b)
    }
}
