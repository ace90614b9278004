use serde::{Deserialize, Serialize};

use super::growth::{Ensemble, Growth};
use super::{ModelKind, Regressor};
use crate::error::Result;

/// Andre-ordens boosting i XGBoost-stil (eksakt grådig, L2-regularisert blad).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XgbParams {
    pub n_estimators: usize,
    pub learning_rate: f64,
    pub max_depth: u16,
    pub reg_lambda: f64,
    pub gamma: f64,
    pub min_child_weight: f64,
}

impl Default for XgbParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.3,
            max_depth: 6,
            reg_lambda: 1.0,
            gamma: 0.0,
            min_child_weight: 1.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct XgbModel {
    ensemble: Ensemble,
}

impl XgbModel {
    pub fn fit(x: &[Vec<f64>], y: &[f64], params: &XgbParams) -> Result<Self> {
        let growth = Growth {
            max_depth: params.max_depth,
            lambda: params.reg_lambda,
            gamma: params.gamma,
            min_child_weight: params.min_child_weight,
            min_samples_split: 2,
        };
        let ensemble = Ensemble::fit(x, y, params.n_estimators, params.learning_rate, &growth);
        log::debug!(
            "xgboost: {} runder, base_score={:.3}",
            ensemble.trees.len(),
            ensemble.base_score
        );
        Ok(Self { ensemble })
    }
}

impl Regressor for XgbModel {
    fn name(&self) -> &'static str {
        ModelKind::XGBoost.name()
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        Ok(self.ensemble.predict(x))
    }
}
