use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const DEFAULT_MODEL_PATH: &str = "saved_model/best_calories_model.json";

/// Konfig for treningskjøringen. Alle felt har fornuftige defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub data_path: PathBuf,
    pub model_path: PathBuf,
    pub id_column: String,
    pub target_column: String,
    pub categorical_columns: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub test_size: f64,
    pub seed: u64,
    pub cv_folds: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("dataset/cleaned_data/cleaned_calories_burn.csv"),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            id_column: "User_ID".into(),
            target_column: "Calories".into(),
            categorical_columns: vec!["Gender".into()],
            numeric_columns: [
                "Age",
                "Height",
                "Weight",
                "Duration",
                "Heart_Rate",
                "Body_Temp",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            test_size: 0.2,
            seed: 42,
            cv_folds: 5,
        }
    }
}

/// Konfig for prediksjonstjenesten.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    pub model_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            host: "127.0.0.1".into(),
            port: 8000,
        }
    }
}

impl ServeConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Leser konfig fra disk (JSON).
/// Hvis filen ikke finnes (eller ingen sti er gitt), returneres default.
pub fn load_config<T>(path: Option<&Path>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match path {
        Some(p) if p.exists() => {
            let contents = std::fs::read_to_string(p)?;
            let cfg: T = serde_json::from_str(&contents)?;
            log::info!("konfig lastet fra {}", p.display());
            Ok(cfg)
        }
        Some(p) => {
            log::warn!("fant ikke konfig på {}, bruker default", p.display());
            Ok(T::default())
        }
        None => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: TrainConfig = serde_json::from_str(r#"{"seed": 7, "cv_folds": 3}"#).unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.cv_folds, 3);
        assert_eq!(cfg.target_column, "Calories");
        assert_eq!(cfg.numeric_columns.len(), 6);
    }

    #[test]
    fn missing_file_gives_default() {
        let cfg: ServeConfig = load_config(Some(Path::new("does/not/exist.json"))).unwrap();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8000");
    }
}
