use std::fmt;

use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::{
    LinearRegression, LinearRegressionParameters, LinearRegressionSolverName,
};

use super::{fit_error, predict_error, to_dense, ModelKind, Regressor};
use crate::error::Result;

/// Vanlig minste kvadraters regresjon har ingen parametre å tune.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearParams {}

type Ols = LinearRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// OLS med konstantledd (smartcore, SVD-løser).
#[derive(Serialize, Deserialize)]
pub struct LinearModel {
    model: Ols,
}

impl LinearModel {
    pub fn fit(x: &[Vec<f64>], y: &[f64], _params: &LinearParams) -> Result<Self> {
        let params =
            LinearRegressionParameters::default().with_solver(LinearRegressionSolverName::SVD);
        let model = LinearRegression::fit(&to_dense(x), &y.to_vec(), params)
            .map_err(|e| fit_error(ModelKind::LinearRegression, e))?;
        Ok(Self { model })
    }
}

impl Regressor for LinearModel {
    fn name(&self) -> &'static str {
        ModelKind::LinearRegression.name()
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        self.model
            .predict(&to_dense(x))
            .map_err(|e| predict_error(ModelKind::LinearRegression, e))
    }
}

impl fmt::Debug for LinearModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearModel").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_linear_relation() {
        // y = 3 + 2*a - b
        let x: Vec<Vec<f64>> = (0..20)
            .map(|i| vec![i as f64, ((i * 7) % 5) as f64])
            .collect();
        let y: Vec<f64> = x.iter().map(|r| 3.0 + 2.0 * r[0] - r[1]).collect();

        let m = LinearModel::fit(&x, &y, &LinearParams::default()).unwrap();
        let p = m.predict(&[vec![10.0, 1.0]]).unwrap();
        assert!((p[0] - 22.0).abs() < 1e-6);
    }
}
