//! Modellbanken: fem regresjonsalgoritmer bak ett felles `Regressor`-grensesnitt.
//!
//! `ModelSpec` er en utrent konfigurasjon (algoritme + hyperparametre),
//! `FittedModel` er den trente, serialiserbare modellen.

use std::fmt;

use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::error::{CalorieError, Result};

pub mod forest;
pub mod gbm;
mod growth;
pub mod linear;
pub mod tree;
pub mod xgb;

pub use forest::{ForestModel, ForestParams};
pub use gbm::{BoostedModel, BoostingParams};
pub use linear::{LinearModel, LinearParams};
pub use tree::{TreeModel, TreeParams};
pub use xgb::{XgbModel, XgbParams};

/// Felles prediksjonsevne for alle trente modeller.
pub trait Regressor {
    fn name(&self) -> &'static str;
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    LinearRegression,
    DecisionTree,
    RandomForest,
    GradientBoosting,
    XGBoost,
}

impl ModelKind {
    /// Katalogen i fast rekkefølge. Rekkefølgen avgjør uavgjort i modellvalget.
    pub const CATALOG: [ModelKind; 5] = [
        ModelKind::LinearRegression,
        ModelKind::DecisionTree,
        ModelKind::RandomForest,
        ModelKind::GradientBoosting,
        ModelKind::XGBoost,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::LinearRegression => "Linear Regression",
            ModelKind::DecisionTree => "Decision Tree",
            ModelKind::RandomForest => "Random Forest",
            ModelKind::GradientBoosting => "Gradient Boosting",
            ModelKind::XGBoost => "XGBoost",
        }
    }

    /// Standardoppsett uten tuning. Bare skogen trekker tilfeldige utvalg,
    /// de andre algoritmene er deterministiske uten seed.
    pub fn default_spec(&self, seed: u64) -> ModelSpec {
        match self {
            ModelKind::LinearRegression => ModelSpec::Linear(LinearParams::default()),
            ModelKind::DecisionTree => ModelSpec::DecisionTree(TreeParams::default()),
            ModelKind::RandomForest => ModelSpec::RandomForest(ForestParams {
                seed,
                ..ForestParams::default()
            }),
            ModelKind::GradientBoosting => {
                ModelSpec::GradientBoosting(BoostingParams::default())
            }
            ModelKind::XGBoost => ModelSpec::XGBoost(XgbParams::default()),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Utrent modell: algoritme + hyperparametre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModelSpec {
    Linear(LinearParams),
    DecisionTree(TreeParams),
    RandomForest(ForestParams),
    GradientBoosting(BoostingParams),
    XGBoost(XgbParams),
}

impl ModelSpec {
    pub fn kind(&self) -> ModelKind {
        match self {
            ModelSpec::Linear(_) => ModelKind::LinearRegression,
            ModelSpec::DecisionTree(_) => ModelKind::DecisionTree,
            ModelSpec::RandomForest(_) => ModelKind::RandomForest,
            ModelSpec::GradientBoosting(_) => ModelKind::GradientBoosting,
            ModelSpec::XGBoost(_) => ModelKind::XGBoost,
        }
    }

    pub fn fit(&self, x: &[Vec<f64>], y: &[f64]) -> Result<FittedModel> {
        check_training_shape(self.kind(), x, y)?;
        Ok(match self {
            ModelSpec::Linear(p) => FittedModel::Linear(LinearModel::fit(x, y, p)?),
            ModelSpec::DecisionTree(p) => FittedModel::DecisionTree(TreeModel::fit(x, y, p)?),
            ModelSpec::RandomForest(p) => FittedModel::RandomForest(ForestModel::fit(x, y, p)?),
            ModelSpec::GradientBoosting(p) => {
                FittedModel::GradientBoosting(BoostedModel::fit(x, y, p)?)
            }
            ModelSpec::XGBoost(p) => FittedModel::XGBoost(XgbModel::fit(x, y, p)?),
        })
    }

    /// Kort beskrivelse av hyperparametrene, for rapporter.
    pub fn describe(&self) -> String {
        match self {
            ModelSpec::Linear(_) => "{}".to_string(),
            ModelSpec::DecisionTree(p) => format!(
                "{{max_depth: {}, min_samples_split: {}}}",
                depth_str(p.max_depth),
                p.min_samples_split
            ),
            ModelSpec::RandomForest(p) => format!(
                "{{n_estimators: {}, max_depth: {}, min_samples_split: {}}}",
                p.n_estimators,
                depth_str(p.max_depth),
                p.min_samples_split
            ),
            ModelSpec::GradientBoosting(p) => format!(
                "{{n_estimators: {}, learning_rate: {}, max_depth: {}}}",
                p.n_estimators, p.learning_rate, p.max_depth
            ),
            ModelSpec::XGBoost(p) => format!(
                "{{n_estimators: {}, learning_rate: {}, max_depth: {}}}",
                p.n_estimators, p.learning_rate, p.max_depth
            ),
        }
    }
}

fn depth_str(d: Option<u16>) -> String {
    d.map(|v| v.to_string()).unwrap_or_else(|| "None".to_string())
}

/// Trent modell, én variant per algoritme.
#[derive(Debug, Serialize, Deserialize)]
pub enum FittedModel {
    Linear(LinearModel),
    DecisionTree(TreeModel),
    RandomForest(ForestModel),
    GradientBoosting(BoostedModel),
    XGBoost(XgbModel),
}

impl FittedModel {
    pub fn kind(&self) -> ModelKind {
        match self {
            FittedModel::Linear(_) => ModelKind::LinearRegression,
            FittedModel::DecisionTree(_) => ModelKind::DecisionTree,
            FittedModel::RandomForest(_) => ModelKind::RandomForest,
            FittedModel::GradientBoosting(_) => ModelKind::GradientBoosting,
            FittedModel::XGBoost(_) => ModelKind::XGBoost,
        }
    }

    fn inner(&self) -> &dyn Regressor {
        match self {
            FittedModel::Linear(m) => m as &dyn Regressor,
            FittedModel::DecisionTree(m) => m as &dyn Regressor,
            FittedModel::RandomForest(m) => m as &dyn Regressor,
            FittedModel::GradientBoosting(m) => m as &dyn Regressor,
            FittedModel::XGBoost(m) => m as &dyn Regressor,
        }
    }
}

impl Regressor for FittedModel {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        if x.is_empty() {
            return Ok(Vec::new());
        }
        self.inner().predict(x)
    }
}

fn check_training_shape(kind: ModelKind, x: &[Vec<f64>], y: &[f64]) -> Result<()> {
    let fail = |reason: String| CalorieError::Fit {
        model: kind.name().to_string(),
        reason,
    };
    if x.is_empty() {
        return Err(fail("no training rows".into()));
    }
    if x.len() != y.len() {
        return Err(fail(format!("{} rows but {} targets", x.len(), y.len())));
    }
    let width = x[0].len();
    if width == 0 || x.iter().any(|r| r.len() != width) {
        return Err(fail("design matrix rows must share a non-zero width".into()));
    }
    Ok(())
}

/// Rad-major matrise → smartcore `DenseMatrix`.
pub(crate) fn to_dense(x: &[Vec<f64>]) -> DenseMatrix<f64> {
    DenseMatrix::from_2d_vec(&x.to_vec())
}

pub(crate) fn fit_error(kind: ModelKind, e: impl fmt::Display) -> CalorieError {
    CalorieError::Fit {
        model: kind.name().to_string(),
        reason: e.to_string(),
    }
}

pub(crate) fn predict_error(kind: ModelKind, e: impl fmt::Display) -> CalorieError {
    CalorieError::Predict(format!("{}: {}", kind.name(), e))
}
