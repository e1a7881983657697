//! Simplified SMO solver for the SVM dual.
//!
//! Maximizes `Σαᵢ - ½ΣᵢΣⱼ αᵢαⱼyᵢyⱼk(xᵢ, xⱼ)` subject to `0 ≤ αᵢ ≤ C` by
//! sweeping over the examples. Every example that violates the KKT
//! conditions by more than `tol` is paired with a uniformly chosen partner
//! and the two-variable subproblem is solved in closed form. The pair update
//! keeps `Σαᵢyᵢ` unchanged, so the equality constraint of the dual is never
//! enforced separately.
//!
//! Stopping: `max_passes` consecutive sweeps without an accepted update, or
//! `max_iter` sweeps in total, whichever comes first.
use crate::svm::{
    decision::{DecisionFunction, SmoStats},
    errors::{SvmError, SvmResult},
    kernel::Kernel,
    options::SmoOptions,
};
use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Train a kernel SVM on rows of `x` with labels `y ∈ {-1, +1}`.
///
/// The pair-selection RNG is seeded from `opts.seed`, or from entropy when
/// no seed is given.
///
/// # Errors
/// Option and input validation only; see [`train_svm_with_rng`].
pub fn train_svm<K: Kernel>(
    x: &Array2<f64>, y: &Array1<f64>, kernel: K, opts: &SmoOptions,
) -> SvmResult<DecisionFunction<K>> {
    let seed = opts.seed.unwrap_or_else(rand::random);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    train_svm_with_rng(x, y, kernel, opts, &mut rng)
}

/// [`train_svm`] with a caller-supplied RNG; `opts.seed` is ignored.
///
/// # Errors
/// - Any [`SmoOptions`] validation error.
/// - [`SvmError::TooFewExamples`] for fewer than two rows.
/// - [`SvmError::LabelCountMismatch`] if `y.len() != x.nrows()`.
/// - [`SvmError::InvalidLabel`] for a label other than `±1`.
/// - [`SvmError::NonFiniteFeature`] for a NaN/∞ feature value.
pub fn train_svm_with_rng<K: Kernel, R: Rng>(
    x: &Array2<f64>, y: &Array1<f64>, kernel: K, opts: &SmoOptions, rng: &mut R,
) -> SvmResult<DecisionFunction<K>> {
    opts.validate()?;
    validate_training_set(x, y)?;

    let gram = gram_matrix(x, &kernel);
    let mut dual = DualState::new(x.nrows());
    let stats = dual.solve(&gram, y, opts, rng);

    Ok(DecisionFunction {
        alpha: dual.alpha,
        bias: dual.bias,
        labels: y.clone(),
        examples: x.clone(),
        kernel,
        stats,
    })
}

fn validate_training_set(x: &Array2<f64>, y: &Array1<f64>) -> SvmResult<()> {
    let n = x.nrows();
    if n < 2 {
        return Err(SvmError::TooFewExamples { n });
    }
    if y.len() != n {
        return Err(SvmError::LabelCountMismatch { rows: n, labels: y.len() });
    }
    if let Some((index, &value)) = y.iter().enumerate().find(|(_, &v)| v != 1.0 && v != -1.0) {
        return Err(SvmError::InvalidLabel { index, value });
    }
    if let Some(((row, col), &value)) = x.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(SvmError::NonFiniteFeature { row, col, value });
    }
    Ok(())
}

fn gram_matrix<K: Kernel>(x: &Array2<f64>, kernel: &K) -> Array2<f64> {
    let n = x.nrows();
    let mut gram = Array2::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let k = kernel.compute(x.row(i), x.row(j));
            gram[[i, j]] = k;
            gram[[j, i]] = k;
        }
    }
    gram
}

struct DualState {
    alpha: Array1<f64>,
    bias: f64,
}

impl DualState {
    fn new(n: usize) -> Self {
        Self { alpha: Array1::zeros(n), bias: 0.0 }
    }

    fn solve<R: Rng>(
        &mut self, gram: &Array2<f64>, y: &Array1<f64>, opts: &SmoOptions, rng: &mut R,
    ) -> SmoStats {
        let n = y.len();
        let mut stats = SmoStats::default();

        while stats.passes < opts.max_passes && stats.iterations < opts.max_iter {
            let mut changed = 0;
            for i in 0..n {
                let ei = self.error(gram, y, i);
                let (yi, ai) = (y[i], self.alpha[i]);
                let violates =
                    (yi * ei < -opts.tol && ai < opts.c) || (yi * ei > opts.tol && ai > 0.0);
                if !violates {
                    continue;
                }
                let j = pick_partner(rng, n, i);
                if self.take_step(gram, y, opts, i, j, ei) {
                    changed += 1;
                }
            }

            stats.iterations += 1;
            stats.updates += changed;
            if changed == 0 {
                stats.passes += 1;
            } else {
                stats.passes = 0;
            }
            tracing::trace!(sweep = stats.iterations, changed, bias = self.bias, "SMO sweep");
        }

        stats.converged = stats.passes >= opts.max_passes;
        tracing::debug!(
            sweeps = stats.iterations,
            updates = stats.updates,
            converged = stats.converged,
            support_vectors = self.alpha.iter().filter(|&&a| a > 0.0).count(),
            "SMO finished"
        );
        stats
    }

    /// `Eᵢ = f(xᵢ) - yᵢ`.
    fn error(&self, gram: &Array2<f64>, y: &Array1<f64>, i: usize) -> f64 {
        let f: f64 = gram
            .row(i)
            .iter()
            .zip(self.alpha.iter().zip(y.iter()))
            .filter(|(_, (&a, _))| a != 0.0)
            .map(|(&k, (&a, &yk))| a * yk * k)
            .sum();
        f + self.bias - y[i]
    }

    /// Jointly optimize `αᵢ, αⱼ`; returns `false` when the pair is skipped.
    fn take_step(
        &mut self, gram: &Array2<f64>, y: &Array1<f64>, opts: &SmoOptions, i: usize, j: usize,
        ei: f64,
    ) -> bool {
        let c = opts.c;
        let ej = self.error(gram, y, j);
        let (ai, aj) = (self.alpha[i], self.alpha[j]);
        let (yi, yj) = (y[i], y[j]);

        let (low, high) = if yi == yj {
            ((ai + aj - c).max(0.0), (ai + aj).min(c))
        } else {
            ((aj - ai).max(0.0), (c + aj - ai).min(c))
        };
        if (low - high).abs() < opts.tol {
            return false;
        }

        let (kii, kjj, kij) = (gram[[i, i]], gram[[j, j]], gram[[i, j]]);
        let eta = 2.0 * kij - kii - kjj;
        if eta >= 0.0 {
            return false;
        }

        let new_aj = (aj - yj * (ei - ej) / eta).min(high).max(low);
        if (aj - new_aj).abs() < opts.tol {
            return false;
        }
        // Exact arithmetic keeps αᵢ in the box; the clip only absorbs round-off.
        let new_ai = (ai + yi * yj * (aj - new_aj)).max(0.0).min(c);
        self.alpha[j] = new_aj;
        self.alpha[i] = new_ai;
        debug_assert!(self.alpha.iter().all(|&a| (0.0..=c).contains(&a)));

        let (di, dj) = (yi * (new_ai - ai), yj * (new_aj - aj));
        let b1 = self.bias - ei - di * kii - dj * kij;
        let b2 = self.bias - ej - di * kij - dj * kjj;
        self.bias = 0.5 * (b1 + b2);
        if new_ai > 0.0 && new_ai < c {
            self.bias = b1;
        }
        if new_aj > 0.0 && new_aj < c {
            self.bias = b2;
        }
        true
    }
}

/// Uniform index in `0..n` other than `i`.
fn pick_partner<R: Rng>(rng: &mut R, n: usize, i: usize) -> usize {
    let j = rng.gen_range(0..n - 1);
    if j >= i { j + 1 } else { j }
}
