use serde::{Deserialize, Serialize};

use crate::error::{CalorieError, Result};
use crate::preprocessing::{FittedPreprocessor, Preprocessor};
use crate::regressors::{FittedModel, ModelKind, ModelSpec, Regressor};
use crate::table::FeatureTable;

/// Forbehandling → modell, trent og brukt som én enhet.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    pub preprocessor: Preprocessor,
    pub model: ModelSpec,
}

impl Pipeline {
    pub fn new(preprocessor: Preprocessor, model: ModelSpec) -> Self {
        Self {
            preprocessor,
            model,
        }
    }

    /// Samme forbehandling, annen modellkonfig (brukes av grid-søket).
    pub fn with_model(&self, model: ModelSpec) -> Self {
        Self::new(self.preprocessor.clone(), model)
    }

    pub fn fit(&self, x: &FeatureTable, y: &[f64]) -> Result<FittedPipeline> {
        if x.n_rows() != y.len() {
            return Err(CalorieError::InvalidData(format!(
                "{} feature rows but {} targets",
                x.n_rows(),
                y.len()
            )));
        }
        let preprocessor = self.preprocessor.fit(x)?;
        let design = preprocessor.transform(x)?;
        let model = self.model.fit(&design, y)?;
        Ok(FittedPipeline {
            preprocessor,
            spec: self.model.clone(),
            model,
        })
    }
}

/// Trent pipeline. Uforanderlig etter trening; det er denne som lagres til disk.
#[derive(Debug, Serialize, Deserialize)]
pub struct FittedPipeline {
    pub preprocessor: FittedPreprocessor,
    /// Konfigurasjonen modellen ble trent med
    pub spec: ModelSpec,
    pub model: FittedModel,
}

impl FittedPipeline {
    pub fn kind(&self) -> ModelKind {
        self.model.kind()
    }

    pub fn predict(&self, x: &FeatureTable) -> Result<Vec<f64>> {
        let design = self.preprocessor.transform(x)?;
        self.model.predict(&design)
    }
}
