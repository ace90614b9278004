use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::growth::{Growth, RegressionTree};
use super::{ModelKind, Regressor};
use crate::error::{CalorieError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub max_depth: Option<u16>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Seed for bootstrap-trekkene
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            seed: 42,
        }
    }
}

/// Random forest: bootstrap-utvalg per tre, alle features vurderes i hver splitt.
#[derive(Debug, Serialize, Deserialize)]
pub struct ForestModel {
    trees: Vec<RegressionTree>,
}

impl ForestModel {
    pub fn fit(x: &[Vec<f64>], y: &[f64], params: &ForestParams) -> Result<Self> {
        let n = x.len();
        let growth = Growth::cart(
            params.max_depth,
            params.min_samples_split,
            params.min_samples_leaf,
        );

        // trekkene tas sekvensielt fra én RNG, så skogen er lik uansett trådantall
        let mut rng = StdRng::seed_from_u64(params.seed);
        let draws: Vec<Vec<usize>> = (0..params.n_estimators)
            .map(|_| (0..n).map(|_| rng.random_range(0..n)).collect())
            .collect();

        let trees = draws
            .par_iter()
            .map(|rows| {
                let xb: Vec<Vec<f64>> = rows.iter().map(|&i| x[i].clone()).collect();
                let yb: Vec<f64> = rows.iter().map(|&i| y[i]).collect();
                RegressionTree::fit_cart(&xb, &yb, &growth)
            })
            .collect::<Vec<_>>();

        log::debug!("random forest: {} trær", trees.len());
        Ok(Self { trees })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Regressor for ForestModel {
    fn name(&self) -> &'static str {
        ModelKind::RandomForest.name()
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        if self.trees.is_empty() {
            return Err(CalorieError::Predict("random forest has no trees".into()));
        }
        let k = self.trees.len() as f64;
        Ok(x
            .iter()
            .map(|row| self.trees.iter().map(|t| t.predict_row(row)).sum::<f64>() / k)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> (Vec<Vec<f64>>, Vec<f64>) {
        let x: Vec<Vec<f64>> = (0..60).map(|i| vec![i as f64, (i % 4) as f64]).collect();
        let y: Vec<f64> = x.iter().map(|r| 2.0 * r[0] + 10.0 * r[1]).collect();
        (x, y)
    }

    #[test]
    fn same_seed_same_forest() {
        let (x, y) = data();
        let params = ForestParams {
            n_estimators: 10,
            ..ForestParams::default()
        };
        let a = ForestModel::fit(&x, &y, &params).unwrap().predict(&x).unwrap();
        let b = ForestModel::fit(&x, &y, &params).unwrap().predict(&x).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn depth_limit_applies_to_every_branch() {
        // fire grupper à 25 rader; med én tre og dybde 3 skilles alle gruppene
        let x: Vec<Vec<f64>> = (0..100).map(|i| vec![(i / 25) as f64]).collect();
        let y: Vec<f64> = (0..100).map(|i| (i / 25) as f64 * 100.0).collect();
        let params = ForestParams {
            n_estimators: 1,
            max_depth: Some(3),
            ..ForestParams::default()
        };
        let m = ForestModel::fit(&x, &y, &params).unwrap();
        let p = m.predict(&[vec![0.0], vec![1.0], vec![2.0], vec![3.0]]).unwrap();
        assert_eq!(p, vec![0.0, 100.0, 200.0, 300.0]);
    }

    #[test]
    fn zero_trees_cannot_predict() {
        let (x, y) = data();
        let params = ForestParams {
            n_estimators: 0,
            ..ForestParams::default()
        };
        let m = ForestModel::fit(&x, &y, &params).unwrap();
        assert_eq!(m.n_trees(), 0);
        assert!(m.predict(&x).is_err());
    }
}
