//! Hyperparameter-søk for vinnermodellen.
//!
//! Fullt grid-søk med k-fold CV på snitt-MSE, slik kalibreringen av CdA/Crr
//! tidligere gikk gjennom alle kombinasjoner og beholdt den beste. Kandidatene
//! evalueres parallelt med rayon. Resultatet er likevel deterministisk: valget
//! skjer etter at alle scorer er samlet, og første kombinasjon vinner ved likhet.

use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::Serialize;

use crate::dataset::KFold;
use crate::error::Result;
use crate::pipeline::{FittedPipeline, Pipeline};
use crate::regressors::{
    BoostingParams, ForestParams, ModelKind, ModelSpec, TreeParams, XgbParams,
};
use crate::selection::cross_validate;
use crate::table::FeatureTable;

const TREE_DEPTHS: [Option<u16>; 4] = [None, Some(5), Some(10), Some(20)];
const TREE_SPLITS: [usize; 3] = [2, 5, 10];
const FOREST_DEPTHS: [Option<u16>; 3] = [None, Some(10), Some(20)];
const FOREST_SPLITS: [usize; 2] = [2, 5];
const ESTIMATORS: [usize; 2] = [100, 200];
const LEARNING_RATES: [f64; 2] = [0.01, 0.1];
const BOOST_DEPTHS: [u16; 2] = [3, 5];

/// Søkerommet for en algoritme. Lineær regresjon har ingen parametre å tune.
///
/// Kombinasjonene kommer i fast rekkefølge (parameternavn alfabetisk, siste
/// parameter varierer raskest); rekkefølgen avgjør uavgjort.
pub fn param_grid(kind: ModelKind, seed: u64) -> Vec<ModelSpec> {
    let mut grid = Vec::new();
    match kind {
        ModelKind::LinearRegression => {}
        ModelKind::DecisionTree => {
            for max_depth in TREE_DEPTHS {
                for min_samples_split in TREE_SPLITS {
                    grid.push(ModelSpec::DecisionTree(TreeParams {
                        max_depth,
                        min_samples_split,
                        ..TreeParams::default()
                    }));
                }
            }
        }
        ModelKind::RandomForest => {
            for max_depth in FOREST_DEPTHS {
                for min_samples_split in FOREST_SPLITS {
                    for n_estimators in ESTIMATORS {
                        grid.push(ModelSpec::RandomForest(ForestParams {
                            n_estimators,
                            max_depth,
                            min_samples_split,
                            seed,
                            ..ForestParams::default()
                        }));
                    }
                }
            }
        }
        ModelKind::GradientBoosting => {
            for learning_rate in LEARNING_RATES {
                for max_depth in BOOST_DEPTHS {
                    for n_estimators in ESTIMATORS {
                        grid.push(ModelSpec::GradientBoosting(BoostingParams {
                            n_estimators,
                            learning_rate,
                            max_depth,
                            ..BoostingParams::default()
                        }));
                    }
                }
            }
        }
        ModelKind::XGBoost => {
            for learning_rate in LEARNING_RATES {
                for max_depth in BOOST_DEPTHS {
                    for n_estimators in ESTIMATORS {
                        grid.push(ModelSpec::XGBoost(XgbParams {
                            n_estimators,
                            learning_rate,
                            max_depth,
                            ..XgbParams::default()
                        }));
                    }
                }
            }
        }
    }
    grid
}

/// Score for én kombinasjon i grid-søket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridScore {
    pub params: String,
    pub mean_mse: f64,
}

#[derive(Debug)]
pub struct TunedPipeline {
    /// Endelig pipeline, trent på hele treningssettet
    pub pipeline: FittedPipeline,
    /// `None` når algoritmen ikke har noe søkerom
    pub best_spec: Option<ModelSpec>,
    pub best_cv_mse: Option<f64>,
    pub scores: Vec<GridScore>,
}

impl TunedPipeline {
    pub fn was_tuned(&self) -> bool {
        self.best_spec.is_some()
    }

    pub fn best_cv_rmse(&self) -> Option<f64> {
        self.best_cv_mse.map(f64::sqrt)
    }
}

/// Grid-søk over `grid` og retrening av beste kombinasjon på hele `x`.
/// Tomt grid betyr at `base` trenes én gang som den er.
pub fn tune(
    base: &Pipeline,
    grid: &[ModelSpec],
    x: &FeatureTable,
    y: &[f64],
    folds: &KFold,
) -> Result<TunedPipeline> {
    if grid.is_empty() {
        log::info!("ingen parametre å tune for {}", base.model.kind());
        return Ok(TunedPipeline {
            pipeline: base.fit(x, y)?,
            best_spec: None,
            best_cv_mse: None,
            scores: Vec::new(),
        });
    }

    log::info!(
        "grid-søk for {}: {} kombinasjoner × {} folds",
        base.model.kind(),
        grid.len(),
        folds.n_splits
    );

    let mse: Vec<f64> = grid
        .par_iter()
        .map(|spec| {
            cross_validate(&base.with_model(spec.clone()), x, y, folds).map(|cv| cv.mean_mse())
        })
        .collect::<Result<Vec<f64>>>()?;

    let (best, best_mse) = mse
        .iter()
        .copied()
        .enumerate()
        .min_by_key(|(_, m)| OrderedFloat(*m))
        .unwrap_or((0, f64::NAN));

    let scores = grid
        .iter()
        .zip(&mse)
        .map(|(spec, &mean_mse)| GridScore {
            params: spec.describe(),
            mean_mse,
        })
        .collect();

    let best_spec = grid[best].clone();
    log::debug!("beste kombinasjon: {} (MSE {:.3})", best_spec.describe(), best_mse);

    let pipeline = base.with_model(best_spec.clone()).fit(x, y)?;
    Ok(TunedPipeline {
        pipeline,
        best_spec: Some(best_spec),
        best_cv_mse: Some(best_mse),
        scores,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_sizes_match_search_space() {
        assert!(param_grid(ModelKind::LinearRegression, 42).is_empty());
        assert_eq!(param_grid(ModelKind::DecisionTree, 42).len(), 12);
        assert_eq!(param_grid(ModelKind::RandomForest, 42).len(), 12);
        assert_eq!(param_grid(ModelKind::GradientBoosting, 42).len(), 8);
        assert_eq!(param_grid(ModelKind::XGBoost, 42).len(), 8);
    }

    #[test]
    fn grid_keeps_algorithm_and_seed() {
        for spec in param_grid(ModelKind::RandomForest, 7) {
            match spec {
                ModelSpec::RandomForest(p) => assert_eq!(p.seed, 7),
                other => panic!("unexpected spec {other:?}"),
            }
        }
        assert!(param_grid(ModelKind::XGBoost, 0)
            .iter()
            .all(|s| s.kind() == ModelKind::XGBoost));
    }

    #[test]
    fn last_parameter_varies_fastest() {
        let grid = param_grid(ModelKind::GradientBoosting, 0);
        let first: Vec<String> = grid.iter().take(2).map(|s| s.describe()).collect();
        assert_eq!(
            first,
            vec![
                "{n_estimators: 100, learning_rate: 0.01, max_depth: 3}",
                "{n_estimators: 200, learning_rate: 0.01, max_depth: 3}",
            ]
        );
    }
}
