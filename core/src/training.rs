// core/src/training.rs
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli;
use crate::config::TrainConfig;
use crate::dataset::{load_table, split_features_target, train_test_split, KFold};
use crate::error::{CalorieError, Result};
use crate::metrics::{mean_absolute_error, r2, rmse};
use crate::pipeline::{FittedPipeline, Pipeline};
use crate::preprocessing::Preprocessor;
use crate::regressors::{ModelKind, ModelSpec};
use crate::selection::{default_catalog, select_model, CandidateScore, Selection};
use crate::storage::save_pipeline;
use crate::table::FeatureTable;
use crate::tuning::{param_grid, tune};

/// Resultat på det holdte-ut testsettet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestEvaluation {
    pub rmse: f64,
    pub mae: f64,
    /// `None` når fasiten er konstant
    pub r2: Option<f64>,
}

pub fn evaluate_test_set(
    pipeline: &FittedPipeline,
    x_test: &FeatureTable,
    y_test: &[f64],
) -> Result<TestEvaluation> {
    let pred = pipeline.predict(x_test)?;
    let empty = || CalorieError::InvalidData("test split is empty".into());
    Ok(TestEvaluation {
        rmse: rmse(y_test, &pred).ok_or_else(empty)?,
        mae: mean_absolute_error(y_test, &pred).ok_or_else(empty)?,
        r2: r2(y_test, &pred),
    })
}

/// Alt treningen produserer før noe skrives til disk.
#[derive(Debug)]
pub struct TrainingOutcome {
    pub pipeline: FittedPipeline,
    pub selection: Selection,
    pub best_params: Option<ModelSpec>,
    pub evaluation: TestEvaluation,
    pub n_train: usize,
    pub n_test: usize,
}

/// Kort oppsummering av en fullført kjøring.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingSummary {
    pub trained_at: DateTime<Utc>,
    pub n_train: usize,
    pub n_test: usize,
    pub model: ModelKind,
    pub best_params: Option<String>,
    pub candidates: Vec<CandidateScore>,
    pub test: TestEvaluation,
    pub model_path: PathBuf,
}

/// Split → modellvalg → tuning → evaluering på et allerede lastet datasett.
///
/// `catalog` er kandidatene i prioritert rekkefølge; `grid_for` gir søkerommet
/// for vinneren.
pub fn fit_best_pipeline<G>(
    cfg: &TrainConfig,
    table: &FeatureTable,
    catalog: &[ModelSpec],
    grid_for: G,
) -> Result<TrainingOutcome>
where
    G: Fn(&ModelSpec) -> Vec<ModelSpec>,
{
    let (x, y) = split_features_target(table, &cfg.id_column, &cfg.target_column)?;
    let (train_idx, test_idx) = train_test_split(x.n_rows(), cfg.test_size, cfg.seed)?;

    let x_train = x.take_rows(&train_idx);
    let y_train: Vec<f64> = train_idx.iter().map(|&i| y[i]).collect();
    let x_test = x.take_rows(&test_idx);
    let y_test: Vec<f64> = test_idx.iter().map(|&i| y[i]).collect();
    log::info!("split: {} train / {} test", train_idx.len(), test_idx.len());
    cli::print_data_preview(&x_train, 3);

    let folds = KFold::new(cfg.cv_folds);
    let preprocessor = Preprocessor::from_config(cfg);

    let selection = select_model(&preprocessor, catalog, &x_train, &y_train, &folds)?;
    cli::print_ranking(&selection);

    let base = Pipeline::new(preprocessor, selection.best_spec.clone());
    let grid = grid_for(&selection.best_spec);
    let tuned = tune(&base, &grid, &x_train, &y_train, &folds)?;
    cli::print_tuning(&tuned);

    let evaluation = evaluate_test_set(&tuned.pipeline, &x_test, &y_test)?;
    cli::print_evaluation(&evaluation);

    Ok(TrainingOutcome {
        pipeline: tuned.pipeline,
        selection,
        best_params: tuned.best_spec,
        evaluation,
        n_train: train_idx.len(),
        n_test: test_idx.len(),
    })
}

/// Hele treningskjøringen: last CSV, finn beste modell, lagre den.
pub fn run_training(cfg: &TrainConfig) -> Result<TrainingSummary> {
    let table = load_table(&cfg.data_path)?;
    let catalog = default_catalog(cfg.seed);
    let seed = cfg.seed;
    let outcome = fit_best_pipeline(cfg, &table, &catalog, |spec| {
        param_grid(spec.kind(), seed)
    })?;

    save_pipeline(&outcome.pipeline, &cfg.model_path)?;

    let summary = TrainingSummary {
        trained_at: Utc::now(),
        n_train: outcome.n_train,
        n_test: outcome.n_test,
        model: outcome.pipeline.kind(),
        best_params: outcome.best_params.as_ref().map(ModelSpec::describe),
        candidates: outcome.selection.candidates,
        test: outcome.evaluation,
        model_path: cfg.model_path.clone(),
    };
    cli::print_summary(&summary);
    Ok(summary)
}
