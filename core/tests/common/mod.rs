#![allow(dead_code)]

use std::path::{Path, PathBuf};

use calorieburn_core::dataset::load_table;
use calorieburn_core::regressors::{
    BoostingParams, ForestParams, LinearParams, ModelSpec, TreeParams, XgbParams,
};
use calorieburn_core::table::FeatureTable;
use calorieburn_core::{SessionFeatures, TrainConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const FIXTURE_ROWS: usize = 100;

/// Syntetiske økter: kaloriforbruk øker med varighet, puls, vekt og temperatur.
pub fn write_fixture(dir: &Path, rows: usize) -> PathBuf {
    let path = dir.join("calories.csv");
    let mut w = csv::Writer::from_path(&path).expect("create fixture csv");
    w.write_record([
        "User_ID",
        "Gender",
        "Age",
        "Height",
        "Weight",
        "Duration",
        "Heart_Rate",
        "Body_Temp",
        "Calories",
    ])
    .expect("write header");

    let mut rng = StdRng::seed_from_u64(7);
    for i in 0..rows {
        let male = rng.random_bool(0.5);
        let age: i64 = rng.random_range(18..=75);
        let height: f64 = rng.random_range(150..=210) as f64;
        let weight: f64 = (height - 100.0 + rng.random_range(-15..=15) as f64).max(40.0);
        let duration: f64 = rng.random_range(5..=30) as f64;
        let heart_rate: f64 = 80.0 + 1.2 * duration + rng.random_range(0..=20) as f64;
        let body_temp: f64 = 37.0 + 0.06 * duration + rng.random_range(-3..=3) as f64 / 10.0;

        let intensity = 0.05 * heart_rate + 0.02 * weight + if male { 0.6 } else { 0.0 };
        let noise = rng.random_range(-40..=40) as f64 / 10.0;
        let calories = (duration * intensity - 0.05 * age as f64 + noise).max(1.0).round();

        w.write_record([
            (10_000_000 + i).to_string(),
            if male { "male" } else { "female" }.to_string(),
            age.to_string(),
            height.to_string(),
            weight.to_string(),
            duration.to_string(),
            heart_rate.to_string(),
            format!("{body_temp:.1}"),
            calories.to_string(),
        ])
        .expect("write row");
    }
    w.flush().expect("flush fixture");
    path
}

pub fn fixture_table(dir: &Path) -> FeatureTable {
    load_table(write_fixture(dir, FIXTURE_ROWS)).expect("load fixture")
}

pub fn quick_config(dir: &Path) -> TrainConfig {
    TrainConfig {
        data_path: write_fixture(dir, FIXTURE_ROWS),
        model_path: dir.join("saved_model").join("best_calories_model.json"),
        ..TrainConfig::default()
    }
}

/// Små modeller så testene går raskt.
pub fn quick_catalog(seed: u64) -> Vec<ModelSpec> {
    vec![
        ModelSpec::Linear(LinearParams::default()),
        ModelSpec::DecisionTree(TreeParams::default()),
        ModelSpec::RandomForest(ForestParams {
            n_estimators: 10,
            seed,
            ..ForestParams::default()
        }),
        ModelSpec::GradientBoosting(BoostingParams {
            n_estimators: 20,
            ..BoostingParams::default()
        }),
        ModelSpec::XGBoost(XgbParams {
            n_estimators: 20,
            ..XgbParams::default()
        }),
    ]
}

pub fn session() -> SessionFeatures {
    SessionFeatures {
        gender: "male".into(),
        age: 30,
        height: 175.0,
        weight: 75.0,
        duration: 30.0,
        heart_rate: 120.0,
        body_temp: 38.0,
    }
}
