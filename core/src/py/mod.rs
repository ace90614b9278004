// Python-bindinger for UI-et. Alt går inn og ut som JSON-strenger.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::config::TrainConfig;
use crate::error::CalorieError;
use crate::service::PredictionService;
use crate::storage::load_pipeline;
use crate::training::run_training;

fn to_py_err(e: CalorieError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Predikerer én økt. Returnerer `{"Prediction": n}` eller `{"error": "..."}`
/// som JSON; bare en modell som ikke kan lastes gir Python-unntak.
#[pyfunction]
fn predict_json(model_path: &str, json: &str) -> PyResult<String> {
    let pipeline = load_pipeline(model_path).map_err(to_py_err)?;
    let answer = PredictionService::new(&pipeline).respond_json(json);
    serde_json::to_string(&answer).map_err(|e| to_py_err(e.into()))
}

/// Kjører hele treningen med konfig gitt som JSON ("{}" = defaults).
/// Returnerer treningsoppsummeringen som JSON.
#[pyfunction]
fn train_json(config_json: &str) -> PyResult<String> {
    let de = &mut serde_json::Deserializer::from_str(config_json);
    let cfg: TrainConfig = serde_path_to_error::deserialize(de).map_err(|e| {
        PyValueError::new_err(format!("ugyldig konfig ved {}: {}", e.path(), e.inner()))
    })?;
    let summary = run_training(&cfg).map_err(to_py_err)?;
    serde_json::to_string(&summary).map_err(|e| to_py_err(e.into()))
}

#[pymodule]
fn calorieburn_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(predict_json, m)?)?;
    m.add_function(wrap_pyfunction!(train_json, m)?)?;
    Ok(())
}
