//! Feature pipeline shared by the trainers.
//!
//! Purpose
//! -------
//! Turn a raw feature matrix into the design matrix a model is fitted on,
//! and remember the transform so new rows are mapped identically.
//!
//! Key behaviors
//! -------------
//! - Standardization uses the column mean and the `n - 1` standard
//!   deviation. Columns with zero (or undefined) spread are only centered.
//! - Polynomial expansion produces every monomial whose per-variable
//!   exponent is at most the degree, the constant excluded, with the first
//!   variable's exponent varying fastest. The column count is
//!   `(degree + 1)^d - 1`, so high degrees are only practical for a handful
//!   of raw features.
//! - The intercept column, when requested, is the first column and is not
//!   expanded.
//!
//! Conventions
//! -----------
//! - Rows are examples, columns are raw features.
//! - [`FeatureSet::extract`] is the single-row path used for prediction.
use crate::models::{
    errors::{ModelError, ModelResult},
    options::TrainOptions,
};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use std::str::FromStr;

/// Polynomial expansion degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expansion {
    /// Raw (standardized) features only.
    #[default]
    Linear,
    Quadratic,
    Cubic,
    Quartic,
    Quintic,
    Sextic,
}

impl Expansion {
    pub fn degree(self) -> u32 {
        match self {
            Expansion::Linear => 1,
            Expansion::Quadratic => 2,
            Expansion::Cubic => 3,
            Expansion::Quartic => 4,
            Expansion::Quintic => 5,
            Expansion::Sextic => 6,
        }
    }
}

impl FromStr for Expansion {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(Expansion::Linear),
            "quadratic" => Ok(Expansion::Quadratic),
            "cubic" => Ok(Expansion::Cubic),
            "quartic" => Ok(Expansion::Quartic),
            "quintic" => Ok(Expansion::Quintic),
            "sextic" => Ok(Expansion::Sextic),
            _ => Err(ModelError::InvalidExpansion {
                name: s.to_string(),
                reason: "Expected linear, quadratic, cubic, quartic, quintic or sextic.",
            }),
        }
    }
}

/// Fitted feature transform.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    means: Array1<f64>,
    scales: Array1<f64>,
    terms: Vec<Vec<u32>>,
    intercept: bool,
}

impl FeatureSet {
    /// Learn the transform from the rows of `x`.
    ///
    /// # Errors
    /// - [`ModelError::EmptyData`] without rows or columns.
    /// - [`ModelError::NonFiniteFeature`] for a NaN/∞ entry.
    pub fn fit(x: &Array2<f64>, opts: &TrainOptions) -> ModelResult<Self> {
        validate_features(x)?;
        let d = x.ncols();
        let (means, scales) = if opts.standardize {
            let means = x
                .mean_axis(Axis(0))
                .ok_or(ModelError::EmptyData { rows: x.nrows(), cols: d })?;
            let scales = column_scales(x, &means);
            (means, scales)
        } else {
            (Array1::zeros(d), Array1::ones(d))
        };
        Ok(Self { means, scales, terms: monomial_terms(d, opts.expansion), intercept: opts.intercept })
    }

    /// Number of raw features a row must have.
    pub fn raw_dim(&self) -> usize {
        self.means.len()
    }

    /// Number of columns produced, intercept included.
    pub fn dim(&self) -> usize {
        self.terms.len() + usize::from(self.intercept)
    }

    pub fn has_intercept(&self) -> bool {
        self.intercept
    }

    pub fn means(&self) -> &Array1<f64> {
        &self.means
    }

    pub fn scales(&self) -> &Array1<f64> {
        &self.scales
    }

    /// Apply the transform to every row of `x`.
    ///
    /// # Errors
    /// [`ModelError::FeatureDimMismatch`] or [`ModelError::NonFiniteFeature`].
    pub fn transform(&self, x: &Array2<f64>) -> ModelResult<Array2<f64>> {
        if x.ncols() != self.raw_dim() {
            return Err(ModelError::FeatureDimMismatch { expected: self.raw_dim(), found: x.ncols() });
        }
        if let Some(((row, col), &value)) = x.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ModelError::NonFiniteFeature { row, col, value });
        }
        let mut out = Array2::zeros((x.nrows(), self.dim()));
        for (raw, mut dst) in x.rows().into_iter().zip(out.rows_mut()) {
            dst.assign(&self.expand_row(raw));
        }
        Ok(out)
    }

    /// Apply the transform to a single raw row.
    ///
    /// # Errors
    /// [`ModelError::FeatureDimMismatch`] or [`ModelError::NonFiniteFeature`]
    /// (reported with `row = 0`).
    pub fn extract(&self, row: ArrayView1<'_, f64>) -> ModelResult<Array1<f64>> {
        if row.len() != self.raw_dim() {
            return Err(ModelError::FeatureDimMismatch { expected: self.raw_dim(), found: row.len() });
        }
        if let Some((col, &value)) = row.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ModelError::NonFiniteFeature { row: 0, col, value });
        }
        Ok(self.expand_row(row))
    }

    fn expand_row(&self, raw: ArrayView1<'_, f64>) -> Array1<f64> {
        let z = (&raw - &self.means) / &self.scales;
        let mut out = Vec::with_capacity(self.dim());
        if self.intercept {
            out.push(1.0);
        }
        out.extend(self.terms.iter().map(|exps| {
            exps.iter()
                .zip(z.iter())
                .filter(|(&e, _)| e > 0)
                .map(|(&e, &v)| v.powi(e as i32))
                .product::<f64>()
        }));
        Array1::from(out)
    }
}

/// Build a feature matrix from row-oriented data.
///
/// # Errors
/// - [`ModelError::EmptyData`] for no rows or zero-length rows.
/// - [`ModelError::RaggedRows`] if rows differ in length.
pub fn design_matrix(rows: &[Vec<f64>]) -> ModelResult<Array2<f64>> {
    let cols = rows.first().map_or(0, Vec::len);
    if rows.is_empty() || cols == 0 {
        return Err(ModelError::EmptyData { rows: rows.len(), cols });
    }
    if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
        return Err(ModelError::RaggedRows { row, expected: cols, found: r.len() });
    }
    Ok(Array2::from_shape_fn((rows.len(), cols), |(i, j)| rows[i][j]))
}

pub(crate) fn validate_features(x: &Array2<f64>) -> ModelResult<()> {
    if x.nrows() == 0 || x.ncols() == 0 {
        return Err(ModelError::EmptyData { rows: x.nrows(), cols: x.ncols() });
    }
    if let Some(((row, col), &value)) = x.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(ModelError::NonFiniteFeature { row, col, value });
    }
    Ok(())
}

pub(crate) fn validate_targets(rows: usize, y: &Array1<f64>) -> ModelResult<()> {
    if y.len() != rows {
        return Err(ModelError::LengthMismatch { rows, targets: y.len() });
    }
    if let Some((index, &value)) = y.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ModelError::NonFiniteTarget { index, value });
    }
    Ok(())
}

pub(crate) fn validate_labels(rows: usize, y: &[bool]) -> ModelResult<()> {
    if y.len() != rows {
        return Err(ModelError::LengthMismatch { rows, targets: y.len() });
    }
    Ok(())
}

fn column_scales(x: &Array2<f64>, means: &Array1<f64>) -> Array1<f64> {
    let n = x.nrows();
    if n < 2 {
        return Array1::ones(x.ncols());
    }
    let mut scales = Array1::ones(x.ncols());
    for ((col, &mean), scale) in x.columns().into_iter().zip(means.iter()).zip(scales.iter_mut()) {
        let ss: f64 = col.iter().map(|v| (v - mean) * (v - mean)).sum();
        let sd = (ss / (n - 1) as f64).sqrt();
        if sd.is_finite() && sd > 0.0 {
            *scale = sd;
        }
    }
    scales
}

fn monomial_terms(d: usize, expansion: Expansion) -> Vec<Vec<u32>> {
    if expansion == Expansion::Linear {
        return (0..d)
            .map(|j| {
                let mut e = vec![0; d];
                e[j] = 1;
                e
            })
            .collect();
    }
    let p = expansion.degree();
    let mut terms = Vec::new();
    let mut exps = vec![0u32; d];
    loop {
        // Odometer increment, first variable fastest.
        let mut i = 0;
        loop {
            if i == d {
                return terms;
            }
            exps[i] += 1;
            if exps[i] > p {
                exps[i] = 0;
                i += 1;
            } else {
                break;
            }
        }
        terms.push(exps.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn opts(intercept: bool, standardize: bool, expansion: Expansion) -> TrainOptions {
        TrainOptions { intercept, standardize, expansion, ..TrainOptions::default() }
    }

    #[test]
    fn standardized_columns_have_zero_mean_unit_sd() {
        // Purpose
        // -------
        // Standardization uses the mean and the n-1 standard deviation.
        //
        // Given
        // -----
        // Two columns with different location and spread, no intercept.
        //
        // Expect
        // ------
        // Each transformed column has mean 0 and sample sd 1.
        let x = array![[1.0, 10.0], [2.0, 30.0], [3.0, 20.0], [6.0, 60.0]];
        let fs = FeatureSet::fit(&x, &opts(false, true, Expansion::Linear)).unwrap();

        let z = fs.transform(&x).unwrap();

        for col in z.columns() {
            let mean = col.sum() / 4.0;
            let var = col.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / 3.0;
            assert_abs_diff_eq!(mean, 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(var, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn constant_columns_are_only_centered() {
        let x = array![[5.0, 1.0], [5.0, 2.0], [5.0, 3.0]];
        let fs = FeatureSet::fit(&x, &opts(false, true, Expansion::Linear)).unwrap();

        let z = fs.transform(&x).unwrap();

        assert_eq!(fs.scales()[0], 1.0);
        assert!(z.column(0).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn intercept_is_first_and_unexpanded() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let fs = FeatureSet::fit(&x, &opts(true, false, Expansion::Quadratic)).unwrap();

        let z = fs.transform(&x).unwrap();

        assert_eq!(fs.dim(), 9);
        assert!(z.column(0).iter().all(|&v| v == 1.0));
    }

    #[test]
    fn quadratic_monomials_vary_first_variable_fastest() {
        // Purpose
        // -------
        // Column order of the polynomial expansion.
        //
        // Given
        // -----
        // One raw row (a, b) = (2, 3), no scaling, no intercept.
        //
        // Expect
        // ------
        // a, a², b, ab, a²b, b², ab², a²b².
        let x = array![[2.0, 3.0]];
        let fs = FeatureSet::fit(&x, &opts(false, false, Expansion::Quadratic)).unwrap();

        let row = fs.extract(x.row(0)).unwrap();

        let expected = [2.0, 4.0, 3.0, 6.0, 12.0, 9.0, 18.0, 36.0];
        assert_eq!(row.len(), expected.len());
        for (got, want) in row.iter().zip(expected) {
            assert_abs_diff_eq!(*got, want);
        }
    }

    #[test]
    fn expansion_names_parse() {
        assert_eq!(" Cubic ".parse::<Expansion>(), Ok(Expansion::Cubic));
        assert!(matches!("septic".parse::<Expansion>(), Err(ModelError::InvalidExpansion { .. })));
    }

    #[test]
    fn expansion_size_is_power_minus_one() {
        for (exp, p) in [(Expansion::Cubic, 3), (Expansion::Sextic, 6)] {
            assert_eq!(monomial_terms(3, exp).len(), (p + 1usize).pow(3) - 1);
        }
        assert_eq!(monomial_terms(4, Expansion::Linear).len(), 4);
    }

    #[test]
    fn extract_matches_transform() {
        let x = array![[1.0, -2.0], [0.5, 4.0], [3.0, 1.0]];
        let fs = FeatureSet::fit(&x, &opts(true, true, Expansion::Cubic)).unwrap();
        let z = fs.transform(&x).unwrap();

        for (i, raw) in x.rows().into_iter().enumerate() {
            let e = fs.extract(raw).unwrap();
            for (a, b) in e.iter().zip(z.row(i).iter()) {
                assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn input_validation() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let fs = FeatureSet::fit(&x, &TrainOptions::default()).unwrap();

        assert!(matches!(
            fs.extract(array![1.0].view()),
            Err(ModelError::FeatureDimMismatch { expected: 2, found: 1 })
        ));
        assert!(matches!(
            fs.extract(array![1.0, f64::NAN].view()),
            Err(ModelError::NonFiniteFeature { col: 1, .. })
        ));
        assert!(matches!(
            FeatureSet::fit(&Array2::zeros((0, 2)), &TrainOptions::default()),
            Err(ModelError::EmptyData { .. })
        ));
    }

    #[test]
    fn design_matrix_rejects_ragged_rows() {
        let ok = design_matrix(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(ok, array![[1.0, 2.0], [3.0, 4.0]]);

        assert!(matches!(
            design_matrix(&[vec![1.0, 2.0], vec![3.0]]),
            Err(ModelError::RaggedRows { row: 1, expected: 2, found: 1 })
        ));
        assert!(matches!(design_matrix(&[]), Err(ModelError::EmptyData { .. })));
    }
}
