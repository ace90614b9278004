use crate::selection::Selection;
use crate::table::{ColumnData, FeatureTable};
use crate::training::{TestEvaluation, TrainingSummary};
use crate::tuning::TunedPipeline;

/// Skriver de første radene av treningssettet.
pub fn print_data_preview(x: &FeatureTable, rows: usize) {
    let n = rows.min(x.n_rows());
    println!("--- Training data ({} rows) ---", x.n_rows());
    println!("{}", x.column_names().join("\t"));
    for i in 0..n {
        let cells: Vec<String> = x
            .columns()
            .iter()
            .map(|c| match &c.data {
                ColumnData::Categorical(v) => v[i].clone(),
                ColumnData::Numeric(v) => format!("{}", v[i]),
            })
            .collect();
        println!("{}", cells.join("\t"));
    }
}

pub fn print_ranking(selection: &Selection) {
    println!("--- Model comparison (5-fold CV) ---");
    for c in selection.ranked() {
        let folds: Vec<String> = c.fold_rmse.iter().map(|r| format!("{r:.2}")).collect();
        println!("{}: Mean RMSE = {:.2}", c.kind, c.mean_rmse);
        println!("  fold RMSE: [{}]", folds.join(", "));
    }
    let best = selection.best_score();
    println!("Best model: {} (RMSE = {:.2})", best.kind, best.mean_rmse);
}

pub fn print_tuning(tuned: &TunedPipeline) {
    let kind = tuned.pipeline.kind();
    match (&tuned.best_spec, tuned.best_cv_rmse()) {
        (Some(spec), Some(rmse)) => {
            println!("Best parameters for {}: {}", kind, spec.describe());
            println!("  CV RMSE with best parameters: {rmse:.2}");
        }
        _ => println!("No tuning parameters available for {kind}. Using base model."),
    }
}

pub fn print_evaluation(eval: &TestEvaluation) {
    println!("Final Test RMSE: {:.2}", eval.rmse);
    println!("  MAE: {:.2}", eval.mae);
    if let Some(r2) = eval.r2 {
        println!("  R²:  {r2:.4}");
    }
}

pub fn print_summary(summary: &TrainingSummary) {
    println!("--- Training summary ---");
    println!("Trained at: {}", summary.trained_at.to_rfc3339());
    println!(
        "Rows: {} train / {} test",
        summary.n_train, summary.n_test
    );
    println!("Model: {}", summary.model);
    match &summary.best_params {
        Some(p) => println!("Params: {p}"),
        None => println!("Params: defaults"),
    }
    println!("Saved to: {}", summary.model_path.display());
}
