// core/src/selection.rs
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::dataset::KFold;
use crate::error::{CalorieError, Result};
use crate::metrics::mean_squared_error;
use crate::pipeline::Pipeline;
use crate::preprocessing::Preprocessor;
use crate::regressors::{ModelKind, ModelSpec};
use crate::table::FeatureTable;

/// Feil per fold fra én kryssvalidering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CvScore {
    pub fold_mse: Vec<f64>,
}

impl CvScore {
    pub fn fold_rmse(&self) -> Vec<f64> {
        self.fold_mse.iter().map(|m| m.sqrt()).collect()
    }

    /// Snitt av RMSE per fold (ikke rot av snitt-MSE).
    pub fn mean_rmse(&self) -> f64 {
        let r = self.fold_rmse();
        r.iter().sum::<f64>() / r.len() as f64
    }

    pub fn mean_mse(&self) -> f64 {
        self.fold_mse.iter().sum::<f64>() / self.fold_mse.len() as f64
    }
}

/// K-fold kryssvalidering. Forbehandlingen tilpasses på nytt i hver fold.
pub fn cross_validate(
    pipeline: &Pipeline,
    x: &FeatureTable,
    y: &[f64],
    folds: &KFold,
) -> Result<CvScore> {
    let mut fold_mse = Vec::with_capacity(folds.n_splits);
    for (train, valid) in folds.split(x.n_rows())? {
        let y_train: Vec<f64> = train.iter().map(|&i| y[i]).collect();
        let y_valid: Vec<f64> = valid.iter().map(|&i| y[i]).collect();

        let fitted = pipeline.fit(&x.take_rows(&train), &y_train)?;
        let pred = fitted.predict(&x.take_rows(&valid))?;
        let mse = mean_squared_error(&y_valid, &pred).ok_or_else(|| {
            CalorieError::InvalidData("validation fold produced no predictions".into())
        })?;
        fold_mse.push(mse);
    }
    Ok(CvScore { fold_mse })
}

/// Kandidatens resultat i modellvalget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateScore {
    pub kind: ModelKind,
    pub fold_rmse: Vec<f64>,
    pub mean_rmse: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    /// I katalogrekkefølge
    pub candidates: Vec<CandidateScore>,
    /// Indeks i `candidates` for vinneren
    pub best: usize,
    #[serde(skip)]
    pub best_spec: ModelSpec,
}

impl Selection {
    pub fn best_score(&self) -> &CandidateScore {
        &self.candidates[self.best]
    }

    pub fn best_kind(&self) -> ModelKind {
        self.best_score().kind
    }

    /// Kandidatene sortert på snitt-RMSE (stabil, lik score beholder katalogrekkefølge).
    pub fn ranked(&self) -> Vec<&CandidateScore> {
        let mut r: Vec<&CandidateScore> = self.candidates.iter().collect();
        r.sort_by_key(|c| OrderedFloat(c.mean_rmse));
        r
    }
}

/// Standardkatalogen: de fem algoritmene med standardparametre og felles seed.
pub fn default_catalog(seed: u64) -> Vec<ModelSpec> {
    ModelKind::CATALOG
        .iter()
        .map(|k| k.default_spec(seed))
        .collect()
}

/// Kryssvaliderer hver kandidat og velger lavest snitt-RMSE.
/// Første kandidat vinner ved likhet. En feilende kandidat stopper hele kjøringen.
pub fn select_model(
    preprocessor: &Preprocessor,
    catalog: &[ModelSpec],
    x: &FeatureTable,
    y: &[f64],
    folds: &KFold,
) -> Result<Selection> {
    if catalog.is_empty() {
        return Err(CalorieError::InvalidData("model catalog is empty".into()));
    }

    let mut candidates = Vec::with_capacity(catalog.len());
    for spec in catalog {
        let pipeline = Pipeline::new(preprocessor.clone(), spec.clone());
        let cv = cross_validate(&pipeline, x, y, folds)?;
        let score = CandidateScore {
            kind: spec.kind(),
            fold_rmse: cv.fold_rmse(),
            mean_rmse: cv.mean_rmse(),
        };
        log::info!("{}: snitt RMSE {:.2}", score.kind, score.mean_rmse);
        candidates.push(score);
    }

    let best = candidates
        .iter()
        .enumerate()
        .min_by_key(|(_, c)| OrderedFloat(c.mean_rmse))
        .map(|(i, _)| i)
        .unwrap_or(0);

    Ok(Selection {
        best_spec: catalog[best].clone(),
        candidates,
        best,
    })
}
