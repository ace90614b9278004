mod common;

use calorieburn_core::dataset::{split_features_target, KFold};
use calorieburn_core::pipeline::Pipeline;
use calorieburn_core::preprocessing::Preprocessor;
use calorieburn_core::selection::{cross_validate, default_catalog, select_model};
use calorieburn_core::{ModelKind, TrainConfig};

fn fixture() -> (tempfile::TempDir, calorieburn_core::table::FeatureTable, Vec<f64>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let table = common::fixture_table(dir.path());
    let (x, y) = split_features_target(&table, "User_ID", "Calories").expect("split");
    (dir, x, y)
}

#[test]
fn cv_rmse_is_reproducible_for_every_catalog_model() {
    let (_dir, x, y) = fixture();
    let pre = Preprocessor::from_config(&TrainConfig::default());
    let folds = KFold::new(5);

    for spec in default_catalog(42) {
        let pipeline = Pipeline::new(pre.clone(), spec.clone());
        let a = cross_validate(&pipeline, &x, &y, &folds).expect("cv a");
        let b = cross_validate(&pipeline, &x, &y, &folds).expect("cv b");
        assert_eq!(a.fold_mse.len(), 5, "{}", spec.kind());
        assert_eq!(a, b, "{} CV not reproducible", spec.kind());
        assert!(a.mean_rmse().is_finite() && a.mean_rmse() >= 0.0);
    }
}

#[test]
fn selection_ranks_all_candidates_and_picks_lowest_mean() {
    let (_dir, x, y) = fixture();
    let pre = Preprocessor::from_config(&TrainConfig::default());
    let catalog = common::quick_catalog(42);

    let sel = select_model(&pre, &catalog, &x, &y, &KFold::new(5)).expect("select");
    assert_eq!(sel.candidates.len(), 5);
    let kinds: Vec<ModelKind> = sel.candidates.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, ModelKind::CATALOG.to_vec());

    let best = sel.best_score().mean_rmse;
    assert!(sel.candidates.iter().all(|c| c.mean_rmse >= best));
    assert_eq!(sel.best_spec.kind(), sel.best_kind());

    let ranked = sel.ranked();
    assert!(ranked.windows(2).all(|w| w[0].mean_rmse <= w[1].mean_rmse));
    assert_eq!(ranked[0].kind, sel.best_kind());
}

#[test]
fn ties_go_to_first_in_catalog_order() {
    let (_dir, x, y) = fixture();
    let pre = Preprocessor::from_config(&TrainConfig::default());
    // to identiske kandidater gir identisk score
    let tree = ModelKind::DecisionTree.default_spec(42);
    let catalog = vec![tree.clone(), tree];

    let sel = select_model(&pre, &catalog, &x, &y, &KFold::new(5)).expect("select");
    assert_eq!(sel.candidates[0].mean_rmse, sel.candidates[1].mean_rmse);
    assert_eq!(sel.best, 0);
}

#[test]
fn missing_feature_column_aborts_selection() {
    let (_dir, mut x, y) = fixture();
    x.drop_column("Heart_Rate");
    let pre = Preprocessor::from_config(&TrainConfig::default());
    let err = select_model(&pre, &common::quick_catalog(42), &x, &y, &KFold::new(5));
    assert!(err.is_err());
}
