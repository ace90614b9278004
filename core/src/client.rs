// core/src/client.rs
use std::ops::RangeInclusive;

use ureq::Agent;

use crate::error::{CalorieError, Result};
use crate::types::{PredictResponse, SessionFeatures};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/Calories_predict";

pub const AGE_RANGE: RangeInclusive<i64> = 15..=80;
pub const HEIGHT_RANGE: RangeInclusive<f64> = 150.0..=220.0;
pub const WEIGHT_RANGE: RangeInclusive<f64> = 40.0..=150.0;
pub const HEART_RATE_RANGE: RangeInclusive<f64> = 60.0..=200.0;
pub const DURATION_RANGE: RangeInclusive<f64> = 5.0..=120.0;
pub const BODY_TEMP_RANGE: RangeInclusive<f64> = 36.0..=39.0;
pub const GENDERS: [&str; 2] = ["male", "female"];

/// Samme grenser som skjemaet i brukergrensesnittet.
pub fn validate_input(f: &SessionFeatures) -> Result<()> {
    fn check<T: PartialOrd + std::fmt::Display>(
        field: &str,
        v: T,
        range: &RangeInclusive<T>,
    ) -> Result<()> {
        if range.contains(&v) {
            Ok(())
        } else {
            Err(CalorieError::InvalidData(format!(
                "{field} {v} outside {}..={}",
                range.start(),
                range.end()
            )))
        }
    }

    if !GENDERS.contains(&f.gender.as_str()) {
        return Err(CalorieError::InvalidData(format!(
            "Gender must be male or female, got '{}'",
            f.gender
        )));
    }
    check("Age", f.age, &AGE_RANGE)?;
    check("Height", f.height, &HEIGHT_RANGE)?;
    check("Weight", f.weight, &WEIGHT_RANGE)?;
    check("Heart_Rate", f.heart_rate, &HEART_RATE_RANGE)?;
    check("Duration", f.duration, &DURATION_RANGE)?;
    check("Body_Temp", f.body_temp, &BODY_TEMP_RANGE)
}

/// Blocking klient mot prediksjonsendepunktet. Ingen retry, ingen timeout.
pub struct PredictClient {
    agent: Agent,
    url: String,
}

impl PredictClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Ikke-200 gir `HttpStatus`, nettverksfeil gir `Transport`.
    /// Et `{"error": ...}`-svar er et gyldig svar og returneres som `Ok`.
    pub fn predict(&self, features: &SessionFeatures) -> Result<PredictResponse> {
        let resp = match self.agent.post(&self.url).send_json(features) {
            Ok(r) => r,
            Err(ureq::Error::Status(code, _)) => return Err(CalorieError::HttpStatus(code)),
            Err(e) => return Err(CalorieError::Transport(e.to_string())),
        };
        if resp.status() != 200 {
            return Err(CalorieError::HttpStatus(resp.status()));
        }
        let body: PredictResponse = resp
            .into_json()
            .map_err(|e| CalorieError::Transport(e.to_string()))?;
        log::debug!("svar fra {}: {:?}", self.url, body);
        Ok(body)
    }
}

impl Default for PredictClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
