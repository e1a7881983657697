//! Solver knobs for SMO training.
use crate::svm::errors::{SvmError, SvmResult};

pub const DEFAULT_C: f64 = 1.0;
pub const DEFAULT_TOL: f64 = 1e-4;
pub const DEFAULT_MAX_PASSES: usize = 10;
pub const DEFAULT_SMO_MAX_ITER: usize = 10_000;

/// Options for [`train_svm`](super::train_svm).
///
/// - `c`: box constraint; smaller values regularize more.
/// - `tol`: KKT violation tolerance, also the minimum accepted change of a
///   dual coefficient and the minimum width of a feasible box.
/// - `max_passes`: consecutive sweeps without any update before stopping.
/// - `max_iter`: hard ceiling on sweeps.
/// - `seed`: seed for the pair-selection RNG; `None` seeds from entropy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoOptions {
    pub c: f64,
    pub tol: f64,
    pub max_passes: usize,
    pub max_iter: usize,
    pub seed: Option<u64>,
}

impl SmoOptions {
    /// # Errors
    /// - [`SvmError::InvalidC`] / [`SvmError::InvalidTol`] unless positive
    ///   and finite.
    /// - [`SvmError::InvalidMaxPasses`] / [`SvmError::InvalidMaxIter`] if
    ///   zero.
    pub fn new(
        c: f64, tol: f64, max_passes: usize, max_iter: usize, seed: Option<u64>,
    ) -> SvmResult<Self> {
        let opts = Self { c, tol, max_passes, max_iter, seed };
        opts.validate()?;
        Ok(opts)
    }

    pub(crate) fn validate(&self) -> SvmResult<()> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(SvmError::InvalidC { c: self.c, reason: "C must be positive and finite." });
        }
        if !(self.tol.is_finite() && self.tol > 0.0) {
            return Err(SvmError::InvalidTol {
                tol: self.tol,
                reason: "Tolerance must be positive and finite.",
            });
        }
        if self.max_passes == 0 {
            return Err(SvmError::InvalidMaxPasses {
                max_passes: self.max_passes,
                reason: "At least one idle pass is required to stop early.",
            });
        }
        if self.max_iter == 0 {
            return Err(SvmError::InvalidMaxIter {
                max_iter: self.max_iter,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        Ok(())
    }
}

impl Default for SmoOptions {
    fn default() -> Self {
        Self {
            c: DEFAULT_C,
            tol: DEFAULT_TOL,
            max_passes: DEFAULT_MAX_PASSES,
            max_iter: DEFAULT_SMO_MAX_ITER,
            seed: None,
        }
    }
}
