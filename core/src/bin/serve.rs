use std::path::PathBuf;

use anyhow::Context;
use calorieburn_core::server::PredictServer;
use calorieburn_core::service::init_global;
use calorieburn_core::{load_config, ServeConfig};
use clap::Parser;

/// Prediksjonstjeneste over HTTP.
#[derive(Parser, Debug)]
#[command(name = "calorie-serve", version, about = "Serve calorie predictions over HTTP")]
struct Args {
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Trent modell (JSON)
    #[arg(short, long)]
    model: Option<PathBuf>,

    #[arg(long)]
    host: Option<String>,

    #[arg(short, long)]
    port: Option<u16>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut cfg: ServeConfig = load_config(args.config.as_deref())?;
    if let Some(m) = args.model {
        cfg.model_path = m;
    }
    if let Some(h) = args.host {
        cfg.host = h;
    }
    if let Some(p) = args.port {
        cfg.port = p;
    }

    let pipeline = init_global(&cfg.model_path)
        .with_context(|| format!("could not load model {}", cfg.model_path.display()))?;

    let addr = cfg.bind_addr();
    let server = PredictServer::bind(&addr, pipeline)
        .with_context(|| format!("could not bind {addr}"))?;
    println!("Calorie API listening on http://{}", server.local_addr()?);
    println!("  POST /Calories_predict/  - predict calories");
    println!("  GET  /health             - health check");
    println!("  GET  /metrics            - Prometheus metrics");
    server.serve()?;
    Ok(())
}
