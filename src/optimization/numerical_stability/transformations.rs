//! Numerical stability utilities.
//!
//! Provides guarded versions of the few scalar operations that the
//! minimizer and the cost adapters cannot afford to get wrong:
//! division by a vanishing denominator, the logistic function, and
//! `ln(1 + exp(x))`.
//!
//! # Provided items
//! - [`REALMIN`]: smallest positive normal `f64`, substituted for
//!   denominators that are (numerically) zero.
//! - [`safe_div(num, den)`]: `num / den` with the denominator floored in
//!   magnitude at [`REALMIN`], keeping its sign.
//! - [`safe_logistic(x)`]: `1 / (1 + exp(-x))` without overflow.
//! - [`logistic_gradient(x)`]: `σ(x)(1 − σ(x))`.
//! - [`safe_softplus(x)`]: stable `ln(1 + exp(x))`, mapping ℝ → (0, ∞).
//!
//! # Rationale
//! Cross-entropy costs written as `-y ln σ(z) - (1-y) ln(1-σ(z))` hit
//! `ln(0)` as soon as `|z|` is large. Using the identity
//! `-ln σ(z) = softplus(-z)` keeps every term finite.

/// Smallest positive normal `f64`.
///
/// Used as the floor for denominators in the line search and the
/// conjugate-direction update.
pub const REALMIN: f64 = f64::MIN_POSITIVE;

/// Divide `num` by `den`, flooring `|den|` at [`REALMIN`].
///
/// A `den` of exactly `0.0` is treated as `+REALMIN`, `-0.0` as `-REALMIN`.
/// `NaN` denominators are passed through so callers can still detect a
/// non-finite result and fall back to bisection.
pub fn safe_div(num: f64, den: f64) -> f64 {
    if den.abs() < REALMIN {
        num / REALMIN.copysign(den)
    } else {
        num / den
    }
}

/// Numerically stable logistic function `σ(x) = 1 / (1 + exp(-x))`.
///
/// For negative `x` the algebraically equal form `exp(x) / (1 + exp(x))`
/// is used so that `exp` never overflows.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Derivative of the logistic function, `σ'(x) = σ(x)(1 − σ(x))`.
pub fn logistic_gradient(x: f64) -> f64 {
    let s = safe_logistic(x);
    s * (1.0 - s)
}

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// - For large positive `x`, `softplus(x) = x + ln1p(exp(-x))`.
/// - Otherwise `ln1p(exp(x))`.
///
/// The cutoff (`x > 20.0`) keeps the computation in a well-conditioned
/// regime for `f64`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x + (-x).exp().ln_1p() } else { x.exp().ln_1p() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn safe_div_floors_zero_denominator() {
        assert_eq!(safe_div(1.0, 0.0), 1.0 / REALMIN);
        assert_eq!(safe_div(1.0, -0.0), -1.0 / REALMIN);
        assert!(safe_div(0.0, 0.0).is_finite());
    }

    #[test]
    fn safe_div_passes_through_regular_and_nan_denominators() {
        assert_eq!(safe_div(3.0, 2.0), 1.5);
        assert!(safe_div(1.0, f64::NAN).is_nan());
    }

    #[test]
    // Purpose
    // -------
    // The guarded logistic agrees with the naive formula on a safe grid and
    // saturates cleanly in the tails.
    fn safe_logistic_matches_naive_and_saturates() {
        for &x in &[-5.0, -1.0, 0.0, 0.5, 3.0] {
            let naive = 1.0 / (1.0 + f64::exp(-x));
            assert_relative_eq!(safe_logistic(x), naive, epsilon = 1e-14);
        }
        assert_eq!(safe_logistic(0.0), 0.5);
        assert!(safe_logistic(-1000.0) >= 0.0 && safe_logistic(-1000.0) < 1e-300);
        assert_eq!(safe_logistic(1000.0), 1.0);
    }

    #[test]
    fn logistic_gradient_peaks_at_zero() {
        assert_eq!(logistic_gradient(0.0), 0.25);
        assert!(logistic_gradient(4.0) < 0.25);
        assert_relative_eq!(logistic_gradient(2.0), logistic_gradient(-2.0), epsilon = 1e-15);
    }

    #[test]
    fn safe_softplus_matches_naive_and_stays_finite() {
        for &x in &[-30.0, -2.0, 0.0, 1.0, 10.0] {
            assert_relative_eq!(safe_softplus(x), (1.0 + f64::exp(x)).ln(), epsilon = 1e-12);
        }
        assert_relative_eq!(safe_softplus(800.0), 800.0);
        assert!(safe_softplus(-800.0) >= 0.0);
    }
}
