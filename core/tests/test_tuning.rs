mod common;

use calorieburn_core::dataset::{split_features_target, KFold};
use calorieburn_core::pipeline::Pipeline;
use calorieburn_core::preprocessing::Preprocessor;
use calorieburn_core::regressors::TreeParams;
use calorieburn_core::selection::cross_validate;
use calorieburn_core::tuning::{param_grid, tune};
use calorieburn_core::{ModelKind, ModelSpec, TrainConfig};

fn base(kind: ModelKind) -> Pipeline {
    Pipeline::new(
        Preprocessor::from_config(&TrainConfig::default()),
        kind.default_spec(42),
    )
}

#[test]
fn linear_regression_has_nothing_to_tune() {
    let dir = tempfile::tempdir().expect("tempdir");
    let table = common::fixture_table(dir.path());
    let (x, y) = split_features_target(&table, "User_ID", "Calories").expect("split");

    let grid = param_grid(ModelKind::LinearRegression, 42);
    assert!(grid.is_empty());

    let tuned = tune(&base(ModelKind::LinearRegression), &grid, &x, &y, &KFold::new(5))
        .expect("tune");
    assert!(!tuned.was_tuned());
    assert!(tuned.best_cv_mse.is_none());
    assert!(tuned.scores.is_empty());
    assert_eq!(tuned.pipeline.kind(), ModelKind::LinearRegression);
}

#[test]
fn tree_grid_picks_lowest_cv_mse_and_refits() {
    let dir = tempfile::tempdir().expect("tempdir");
    let table = common::fixture_table(dir.path());
    let (x, y) = split_features_target(&table, "User_ID", "Calories").expect("split");
    let folds = KFold::new(5);

    let grid = param_grid(ModelKind::DecisionTree, 42);
    let tuned = tune(&base(ModelKind::DecisionTree), &grid, &x, &y, &folds).expect("tune");

    assert_eq!(tuned.scores.len(), grid.len());
    let best = tuned.best_cv_mse.expect("searched");
    assert!(tuned.scores.iter().all(|s| s.mean_mse >= best));

    // første kombinasjon med laveste score vinner
    let first_best = tuned
        .scores
        .iter()
        .position(|s| s.mean_mse == best)
        .expect("best present");
    let spec = tuned.best_spec.clone().expect("spec");
    assert_eq!(spec, grid[first_best]);
    assert_eq!(tuned.pipeline.spec, spec);

    // scoren stemmer med en separat kryssvalidering av vinneren
    let cv = cross_validate(&base(ModelKind::DecisionTree).with_model(spec), &x, &y, &folds)
        .expect("cv");
    assert_eq!(cv.mean_mse(), best);
}

#[test]
fn parallel_search_is_deterministic() {
    let dir = tempfile::tempdir().expect("tempdir");
    let table = common::fixture_table(dir.path());
    let (x, y) = split_features_target(&table, "User_ID", "Calories").expect("split");
    let grid: Vec<ModelSpec> = [Some(2), Some(3), Some(4), None]
        .into_iter()
        .map(|max_depth| {
            ModelSpec::DecisionTree(TreeParams {
                max_depth,
                ..TreeParams::default()
            })
        })
        .collect();

    let a = tune(&base(ModelKind::DecisionTree), &grid, &x, &y, &KFold::new(5)).expect("a");
    let b = tune(&base(ModelKind::DecisionTree), &grid, &x, &y, &KFold::new(5)).expect("b");
    assert_eq!(a.scores, b.scores);
    assert_eq!(a.best_spec, b.best_spec);
}

#[test]
fn empty_grid_does_less_work_than_a_single_combination() {
    let dir = tempfile::tempdir().expect("tempdir");
    let table = common::fixture_table(dir.path());
    let (x, y) = split_features_target(&table, "User_ID", "Calories").expect("split");
    let folds = KFold::new(5);

    let single = vec![ModelSpec::DecisionTree(TreeParams {
        max_depth: Some(5),
        ..TreeParams::default()
    })];
    let one = tune(&base(ModelKind::DecisionTree), &single, &x, &y, &folds).expect("one");
    assert_eq!(one.scores.len(), 1);
    assert!(one.was_tuned());
    assert_eq!(one.best_spec.as_ref(), single.first());

    let none = tune(&base(ModelKind::LinearRegression), &[], &x, &y, &folds).expect("none");
    assert_eq!(none.scores.len(), 0);
    assert!(!none.was_tuned());
}
