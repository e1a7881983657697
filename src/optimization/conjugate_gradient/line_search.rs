//! Wolfe–Powell bracketing line search.
//!
//! Starting from the current point with trial step `z1`, the search keeps
//! three quantities for two points along the direction `s`: the point
//! already accepted (`f1`, `d1`, at offset 0), the current trial (`f2`,
//! `d2`, at offset `z1`), and a third reference point `z3` expressed
//! relative to the current trial.
//!
//! - While the trial violates sufficient decrease or has too steep a
//!   slope, the bracket is tightened by a quadratic (cost went up) or
//!   cubic (cost went down) fit, clipped to `[INT, 1 - INT]` of the bracket.
//! - Once sufficient decrease holds but the slope is still too negative,
//!   the step is extrapolated with a cubic fit, capped at `EXT` times the
//!   current step and kept inside any known upper limit.
//! - Success means both strong Wolfe–Powell conditions hold; running out
//!   of the evaluation budget (or out of patience with non-finite fits
//!   under `FailFast`) is a failure and the caller rolls back.
//!
//! The polynomial helpers return `NaN` for degenerate denominators; the
//! search reads that as "no usable fit" and bisects instead.
use crate::optimization::{
    conjugate_gradient::{
        state::{OptimizerState, Probe, SearchContext},
        traits::{CostEvaluator, NonFinitePolicy},
        types::{EXT, INT, RHO, SIG},
    },
    numerical_stability::{REALMIN, safe_div},
};

/// Outcome of a single line search.
#[derive(Debug)]
pub(crate) enum SearchResult {
    /// Both Wolfe–Powell conditions hold at the probe; `state.x` sits on it
    /// and `state.z1` holds the accepted step.
    Accepted(Probe),
    /// The search gave up; `state.x` is somewhere along the line and must
    /// be rolled back by the caller.
    Rejected(FailureKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailureKind {
    /// Tightening ran out of budget without restoring the conditions.
    ConditionsViolated,
    /// Extrapolation ran out of budget before the slope flattened enough.
    BudgetExhausted,
    /// `NonFinitePolicy::FailFast` limit reached.
    NonFiniteFits,
}

pub(crate) fn line_search<E: CostEvaluator + ?Sized>(
    ctx: &SearchContext<'_, E>, state: &mut OptimizerState,
) -> SearchResult {
    let f1 = state.f1;
    let d1 = state.d1;
    let mut z1 = state.z1;
    let mut budget = ctx.opts.max_evals_per_search;
    let mut non_finite = 0_usize;

    state.advance(z1);
    let mut p2 = state.probe(ctx.evaluator);

    // Point 3 starts at the accepted point, i.e. `-z1` behind the trial.
    let mut f3 = f1;
    let mut d3 = d1;
    let mut z3 = -z1;
    // Upper limit on the step; negative while none is known.
    let mut limit = -1.0;

    loop {
        while (insufficient_decrease(&p2, f1, d1, z1) || p2.slope > -SIG * d1) && budget > 0 {
            limit = z1;
            let mut z2 = if p2.cost > f1 {
                quadratic_step(p2.cost, f3, d3, z3)
            } else {
                cubic_step(p2.cost, f3, p2.slope, d3, z3)
            };
            if !z2.is_finite() {
                if note_non_finite(ctx, state, &mut non_finite) {
                    return SearchResult::Rejected(FailureKind::NonFiniteFits);
                }
                z2 = z3 / 2.0;
            }
            z2 = z2.min(INT * z3).max((1.0 - INT) * z3);
            z1 += z2;
            state.advance(z2);
            p2 = state.probe(ctx.evaluator);
            budget -= 1;
            z3 -= z2;
        }

        if insufficient_decrease(&p2, f1, d1, z1) || p2.slope > -SIG * d1 {
            return SearchResult::Rejected(FailureKind::ConditionsViolated);
        }
        if p2.slope > SIG * d1 {
            state.z1 = z1;
            return SearchResult::Accepted(p2);
        }
        if budget == 0 {
            return SearchResult::Rejected(FailureKind::BudgetExhausted);
        }

        let mut z2 = cubic_extrapolation(p2.cost, f3, p2.slope, d3, z3);
        if !z2.is_finite() || z2 < 0.0 {
            if !z2.is_finite() && note_non_finite(ctx, state, &mut non_finite) {
                return SearchResult::Rejected(FailureKind::NonFiniteFits);
            }
            z2 = if limit < -0.5 { z1 * (EXT - 1.0) } else { (limit - z1) / 2.0 };
        } else if limit > -0.5 && z2 + z1 > limit {
            z2 = (limit - z1) / 2.0;
        } else if limit < -0.5 && z2 + z1 > z1 * EXT {
            z2 = z1 * (EXT - 1.0);
        } else if z2 < -z3 * INT {
            z2 = -z3 * INT;
        } else if limit > -0.5 && z2 < (limit - z1) * (1.0 - INT) {
            z2 = (limit - z1) * (1.0 - INT);
        }

        f3 = p2.cost;
        d3 = p2.slope;
        z3 = -z2;
        z1 += z2;
        state.advance(z2);
        p2 = state.probe(ctx.evaluator);
        budget -= 1;
    }
}

fn insufficient_decrease(p2: &Probe, f1: f64, d1: f64, z1: f64) -> bool {
    p2.cost > f1 + z1 * RHO * d1
}

/// Count a non-finite fit; returns `true` when the search should give up.
fn note_non_finite<E: ?Sized>(
    ctx: &SearchContext<'_, E>, state: &mut OptimizerState, count: &mut usize,
) -> bool {
    *count += 1;
    state.non_finite_fits += 1;
    match ctx.opts.non_finite_policy {
        NonFinitePolicy::Bisect => false,
        NonFinitePolicy::FailFast { limit } => {
            let give_up = *count >= limit;
            if give_up {
                tracing::warn!(
                    iteration = state.iter,
                    non_finite_fits = *count,
                    "abandoning line search after repeated non-finite step fits"
                );
            }
            give_up
        }
    }
}

/// Minimizer offset (relative to point 2) of the quadratic matching `f2`
/// at 0 and `(f3, d3)` at `z3`.
pub(crate) fn quadratic_step(f2: f64, f3: f64, d3: f64, z3: f64) -> f64 {
    let den = d3 * z3 + f2 - f3;
    if den.abs() < REALMIN {
        return f64::NAN;
    }
    z3 - (0.5 * d3 * z3 * z3) / den
}

/// Coefficients `(A, B)` of the cubic through `(f2, d2)` at 0 and
/// `(f3, d3)` at `z3`.
fn cubic_coefficients(f2: f64, f3: f64, d2: f64, d3: f64, z3: f64) -> (f64, f64) {
    let a = 6.0 * safe_div(f2 - f3, z3) + 3.0 * (d2 + d3);
    let b = 3.0 * (f3 - f2) - z3 * (d3 + 2.0 * d2);
    (a, b)
}

/// Cubic interpolation step used while tightening the bracket.
pub(crate) fn cubic_step(f2: f64, f3: f64, d2: f64, d3: f64, z3: f64) -> f64 {
    let (a, b) = cubic_coefficients(f2, f3, d2, d3, z3);
    if a.abs() < REALMIN {
        return f64::NAN;
    }
    ((b * b - a * d2 * z3 * z3).sqrt() - b) / a
}

/// Cubic extrapolation step used while the slope is still too steep.
pub(crate) fn cubic_extrapolation(f2: f64, f3: f64, d2: f64, d3: f64, z3: f64) -> f64 {
    let (a, b) = cubic_coefficients(f2, f3, d2, d3, z3);
    let den = b + (b * b - a * d2 * z3 * z3).sqrt();
    if den.abs() < REALMIN {
        return f64::NAN;
    }
    -d2 * z3 * z3 / den
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::conjugate_gradient::{
        traits::CgOptions,
        types::{Grad, Theta},
    };
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exactness of the polynomial fits on a quadratic profile.
    // - Degenerate fits returning NaN.
    // - Single line searches on simple 1-D profiles (success, budget failure,
    //   fail-fast).
    //
    // They intentionally DO NOT cover:
    // - The outer conjugate-gradient loop (see `run`).
    // -------------------------------------------------------------------------

    fn shifted_parabola(x: &Theta) -> (f64, Grad) {
        let d = x[0] - 2.0;
        (d * d, array![2.0 * d])
    }

    #[test]
    // Purpose
    // -------
    // The quadratic fit recovers the exact minimizer of a parabola.
    //
    // Given
    // -----
    // - f(t) = (t - 1)², point 3 at t = 0 (f3 = 1, d3 = -2), point 2 at t = 3
    //   (f2 = 4), so z3 = -3 relative to point 2.
    //
    // Expect
    // ------
    // - Offset -2, i.e. absolute t = 1.
    fn quadratic_step_is_exact_on_parabola() {
        assert_relative_eq!(quadratic_step(4.0, 1.0, -2.0, -3.0), -2.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The cubic extrapolation is exact on a parabola as well.
    //
    // Given
    // -----
    // - f(t) = (t - 2)², point 3 at t = 0 (f3 = 4, d3 = -4), point 2 at t = 0.5
    //   (f2 = 2.25, d2 = -3), z3 = -0.5.
    //
    // Expect
    // ------
    // - Offset 1.5, i.e. absolute t = 2.
    fn cubic_extrapolation_is_exact_on_parabola() {
        assert_relative_eq!(
            cubic_extrapolation(2.25, 4.0, -3.0, -4.0, -0.5),
            1.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn degenerate_fits_return_nan() {
        // Flat profile: every coefficient vanishes.
        assert!(quadratic_step(1.0, 1.0, 0.0, -1.0).is_nan());
        assert!(cubic_step(1.0, 1.0, 0.0, 0.0, -1.0).is_nan());
        assert!(cubic_extrapolation(1.0, 1.0, 0.0, 0.0, -1.0).is_nan());
    }

    #[test]
    // Purpose
    // -------
    // On f(x) = (x - 2)² from x = 0 the search extrapolates and lands on the
    // minimizer, satisfying both Wolfe–Powell conditions.
    fn line_search_accepts_minimizer_of_parabola() {
        let opts = CgOptions::default();
        let ctx = SearchContext { evaluator: &shifted_parabola, opts: &opts };
        let (f0, g0) = shifted_parabola(&array![0.0]);
        let mut state = OptimizerState::new(array![0.0], f0, g0);

        let result = line_search(&ctx, &mut state);

        match result {
            SearchResult::Accepted(probe) => {
                assert!(probe.cost < f0);
                assert_relative_eq!(state.x[0], 2.0, epsilon = 1e-8);
                assert_relative_eq!(state.z1, 0.5, epsilon = 1e-8);
            }
            other => panic!("Expected success, got {other:?}"),
        }
        assert!(state.evaluations <= 1 + opts.max_evals_per_search + 1);
    }

    #[test]
    // Purpose
    // -------
    // A flat cost never satisfies the curvature test strictly, so the
    // search burns its budget and fails.
    fn line_search_fails_on_flat_cost() {
        let opts = CgOptions::default();
        let flat = |_: &Theta| (3.0, array![0.0, 0.0]);
        let ctx = SearchContext { evaluator: &flat, opts: &opts };
        let mut state = OptimizerState::new(array![1.0, 1.0], 3.0, array![0.0, 0.0]);

        let result = line_search(&ctx, &mut state);

        assert!(matches!(result, SearchResult::Rejected(FailureKind::BudgetExhausted)));
        assert_eq!(state.evaluations, 1 + 1 + opts.max_evals_per_search);
        assert!(state.non_finite_fits > 0);
    }

    #[test]
    fn fail_fast_policy_stops_search_early() {
        let opts = CgOptions::new(10, 20, NonFinitePolicy::FailFast { limit: 2 }, false)
            .expect("valid options");
        let flat = |_: &Theta| (3.0, array![0.0]);
        let ctx = SearchContext { evaluator: &flat, opts: &opts };
        let mut state = OptimizerState::new(array![0.0], 3.0, array![0.0]);

        let result = line_search(&ctx, &mut state);

        assert!(matches!(result, SearchResult::Rejected(FailureKind::NonFiniteFits)));
        assert_eq!(state.non_finite_fits, 2);
        assert!(state.evaluations < 1 + 1 + opts.max_evals_per_search);
    }

    #[test]
    // Purpose
    // -------
    // A cost that turns non-finite beyond a wall makes the search back off
    // instead of accepting or propagating NaN.
    fn line_search_backs_off_from_non_finite_region() {
        let opts = CgOptions::default();
        // Minimum at 2, but undefined for x > 1.5.
        let walled = |x: &Theta| {
            if x[0] > 1.5 { (f64::NAN, array![f64::NAN]) } else { shifted_parabola(x) }
        };
        let ctx = SearchContext { evaluator: &walled, opts: &opts };
        let (f0, g0) = walled(&array![1.0]);
        let mut state = OptimizerState::new(array![1.0], f0, g0);
        state.z1 = 1.0; // first trial lands on x = 3, inside the NaN region

        let result = line_search(&ctx, &mut state);

        if let SearchResult::Accepted(probe) = result {
            assert!(probe.cost.is_finite() && probe.cost < f0);
            assert!(state.x[0] <= 1.5);
        }
    }
}
