use std::path::PathBuf;

use anyhow::Context;
use calorieburn_core::{load_config, run_training, TrainConfig};
use clap::Parser;

/// Trener kalorimodellen og lagrer beste pipeline.
#[derive(Parser, Debug)]
#[command(name = "calorie-train", version, about = "Train and persist the calorie-burn model")]
struct Args {
    /// JSON-konfig (mangler filen brukes defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV med treningsdata
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Hvor modellen skal lagres
    #[arg(short, long)]
    model: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut cfg: TrainConfig = load_config(args.config.as_deref())?;
    if let Some(d) = args.data {
        cfg.data_path = d;
    }
    if let Some(m) = args.model {
        cfg.model_path = m;
    }
    if let Some(s) = args.seed {
        cfg.seed = s;
    }

    let summary = run_training(&cfg)
        .with_context(|| format!("training on {} failed", cfg.data_path.display()))?;
    log::info!(
        "ferdig: {} med test-RMSE {:.2}",
        summary.model,
        summary.test.rmse
    );
    Ok(())
}
