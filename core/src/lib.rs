pub mod cli;
pub mod client;
pub mod config;
pub mod dataset;
pub mod equivalents;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod preprocessing;
pub mod regressors;
pub mod selection;
pub mod server;
pub mod service;
pub mod storage;
pub mod table;
pub mod telemetry;
pub mod training;
pub mod tuning;
pub mod types;

#[cfg(feature = "python")]
mod py;

pub use config::{load_config, ServeConfig, TrainConfig};
pub use error::{CalorieError, Result};
pub use pipeline::{FittedPipeline, Pipeline};
pub use regressors::{FittedModel, ModelKind, ModelSpec, Regressor};
pub use service::PredictionService;
pub use storage::{load_pipeline, save_pipeline};
pub use training::{run_training, TrainingSummary};
pub use types::{PredictResponse, SessionFeatures};
