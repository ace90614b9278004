//! Prediksjonstjenesten: én trent pipeline per prosess, kun lesing etter lasting.

use std::path::Path;
use std::time::Instant;

use once_cell::sync::OnceCell;

use crate::error::{CalorieError, Result};
use crate::pipeline::FittedPipeline;
use crate::storage::load_pipeline;
use crate::telemetry;
use crate::types::{PredictResponse, SessionFeatures};

static PIPELINE: OnceCell<FittedPipeline> = OnceCell::new();

/// Laster modellen fra `path` første gang; senere kall returnerer den samme.
pub fn init_global<P: AsRef<Path>>(path: P) -> Result<&'static FittedPipeline> {
    PIPELINE.get_or_try_init(|| load_pipeline(path))
}

pub fn global() -> Result<&'static FittedPipeline> {
    PIPELINE.get().ok_or(CalorieError::NotLoaded)
}

/// Parser forespørselskroppen; feilen peker på feltet som ikke passet.
pub fn parse_request(body: &str) -> Result<SessionFeatures> {
    let de = &mut serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(de).map_err(|e| CalorieError::Request {
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })
}

/// Kalorier er aldri negative: negative modellverdier klippes til 0 før
/// avrunding, i stedet for å returneres som negative heltall.
/// Halvveis rundes til nærmeste partall.
pub fn round_prediction(kcal: f64) -> i64 {
    kcal.max(0.0).round_ties_even() as i64
}

#[derive(Debug, Clone, Copy)]
pub struct PredictionService<'a> {
    pipeline: &'a FittedPipeline,
}

impl<'a> PredictionService<'a> {
    pub fn new(pipeline: &'a FittedPipeline) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &'a FittedPipeline {
        self.pipeline
    }

    pub fn predict(&self, features: &SessionFeatures) -> Result<i64> {
        let table = features.to_table()?;
        let raw = self
            .pipeline
            .predict(&table)?
            .first()
            .copied()
            .ok_or_else(|| CalorieError::Predict("model returned no prediction".into()))?;
        if !raw.is_finite() {
            return Err(CalorieError::Predict(format!("non-finite prediction {raw}")));
        }
        Ok(round_prediction(raw))
    }

    /// Feil blir til `{"error": ...}`; tjenesten fortsetter.
    pub fn respond(&self, features: &SessionFeatures) -> PredictResponse {
        let started = Instant::now();
        let result = self.predict(features);
        telemetry::record_prediction(result.is_ok(), started.elapsed().as_secs_f64());
        into_response(result)
    }

    /// Rå JSON inn, svar ut. Ugyldig JSON gir også feilsvar.
    pub fn respond_json(&self, body: &str) -> PredictResponse {
        match parse_request(body) {
            Ok(features) => self.respond(&features),
            Err(e) => {
                log::debug!("avviste forespørsel: {e}");
                telemetry::record_prediction(false, 0.0);
                into_response(Err(e))
            }
        }
    }
}

fn into_response(result: Result<i64>) -> PredictResponse {
    match result {
        Ok(prediction) => PredictResponse::Prediction { prediction },
        Err(e) => PredictResponse::Error {
            error: e.to_string(),
        },
    }
}
