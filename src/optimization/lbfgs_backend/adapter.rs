//! Bridge from [`CostEvaluator`] to argmin's `CostFunction` + `Gradient`.
//!
//! argmin asks for cost and gradient separately, so each is taken from its
//! own evaluator call. Non-finite costs and malformed gradients become
//! errors here, since argmin's line searches have no overshoot handling of
//! their own.
use crate::optimization::{
    conjugate_gradient::{CostEvaluator, Cost, Grad, Theta, validation::validate_grad},
    errors::OptError,
};
use argmin::core::{CostFunction, Error, Gradient};

pub struct EvaluatorProblem<'a, E: ?Sized> {
    pub evaluator: &'a E,
}

impl<'a, E: CostEvaluator + ?Sized> EvaluatorProblem<'a, E> {
    pub fn new(evaluator: &'a E) -> Self {
        Self { evaluator }
    }
}

impl<'a, E: CostEvaluator + ?Sized> CostFunction for EvaluatorProblem<'a, E> {
    type Param = Theta;
    type Output = Cost;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let (cost, _) = self.evaluator.evaluate(theta);
        if !cost.is_finite() {
            return Err(OptError::NonFiniteCost { value: cost }.into());
        }
        Ok(cost)
    }
}

impl<'a, E: CostEvaluator + ?Sized> Gradient for EvaluatorProblem<'a, E> {
    type Param = Theta;
    type Gradient = Grad;

    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let (_, grad) = self.evaluator.evaluate(theta);
        validate_grad(&grad, theta.len())?;
        Ok(grad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn adapter_splits_cost_and_gradient() {
        let f = |x: &Theta| (x.dot(x), 2.0 * x);
        let problem = EvaluatorProblem::new(&f);
        let x = array![1.0, -2.0];

        assert_eq!(problem.cost(&x).expect("finite cost"), 5.0);
        assert_eq!(problem.gradient(&x).expect("valid gradient"), array![2.0, -4.0]);
    }

    #[test]
    // Purpose
    // -------
    // Unusable evaluations surface as `OptError` after the round trip
    // through argmin's error type.
    fn adapter_rejects_non_finite_values() {
        let f = |_: &Theta| (f64::NAN, array![f64::INFINITY]);
        let problem = EvaluatorProblem::new(&f);
        let x = array![0.0];

        let cost_err = OptError::from(problem.cost(&x).expect_err("NaN cost"));
        let grad_err = OptError::from(problem.gradient(&x).expect_err("infinite gradient"));

        assert!(matches!(cost_err, OptError::NonFiniteCost { .. }));
        assert!(matches!(grad_err, OptError::InvalidGradient { index: 0, .. }));
    }
}
