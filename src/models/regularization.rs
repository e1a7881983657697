//! L2 penalty shared by the trainers.
use ndarray::{Array1, ArrayView1};

/// `λ/2m Σⱼ wⱼ²` over `weights[skip..]` and its gradient `λ/m wⱼ`.
///
/// The first `skip` entries (bias weights) contribute nothing and get a zero
/// gradient.
pub(crate) fn ridge(weights: ArrayView1<'_, f64>, lambda: f64, m: f64, skip: usize) -> (f64, Array1<f64>) {
    let mut grad = weights.mapv(|w| lambda / m * w);
    grad.iter_mut().take(skip).for_each(|g| *g = 0.0);
    let penalty = weights.iter().skip(skip).map(|w| w * w).sum::<f64>() * lambda / (2.0 * m);
    (penalty, grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn bias_weights_are_not_penalized() {
        let w = array![10.0, 1.0, -2.0];

        let (penalty, grad) = ridge(w.view(), 2.0, 4.0, 1);

        // 2/8 * (1 + 4)
        assert_relative_eq!(penalty, 1.25);
        assert_eq!(grad, array![0.0, 0.5, -1.0]);
    }

    #[test]
    fn zero_lambda_is_free() {
        let (penalty, grad) = ridge(array![1.0, 2.0].view(), 0.0, 3.0, 0);

        assert_eq!(penalty, 0.0);
        assert!(grad.iter().all(|&g| g == 0.0));
    }
}
