use serde::{Deserialize, Serialize};

use super::growth::{Ensemble, Growth};
use super::{ModelKind, Regressor};
use crate::error::Result;

/// Klassisk gradient boosting (kvadrert tap, grunne trær, krymping).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostingParams {
    pub n_estimators: usize,
    pub learning_rate: f64,
    pub max_depth: u16,
    pub min_samples_split: usize,
}

impl Default for BoostingParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.1,
            max_depth: 3,
            min_samples_split: 2,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BoostedModel {
    ensemble: Ensemble,
}

impl BoostedModel {
    pub fn fit(x: &[Vec<f64>], y: &[f64], params: &BoostingParams) -> Result<Self> {
        // λ = 0: bladene blir snitt-residualer, splitt på ren varians-reduksjon
        let growth = Growth {
            max_depth: params.max_depth,
            lambda: 0.0,
            gamma: 0.0,
            min_child_weight: 1.0,
            min_samples_split: params.min_samples_split,
        };
        let ensemble = Ensemble::fit(x, y, params.n_estimators, params.learning_rate, &growth);
        log::debug!(
            "gradient boosting: {} trær, init={:.3}",
            ensemble.trees.len(),
            ensemble.base_score
        );
        Ok(Self { ensemble })
    }
}

impl Regressor for BoostedModel {
    fn name(&self) -> &'static str {
        ModelKind::GradientBoosting.name()
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        Ok(self.ensemble.predict(x))
    }
}
