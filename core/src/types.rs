use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::table::{ColumnData, FeatureTable};

/// Én treningsøkt slik klienten sender den til `/Calories_predict/`.
/// Feltnavnene matcher CSV-kolonnene fra treningen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionFeatures {
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Age")]
    pub age: i64, // år
    #[serde(rename = "Height")]
    pub height: f64, // cm
    #[serde(rename = "Weight")]
    pub weight: f64, // kg
    #[serde(rename = "Duration")]
    pub duration: f64, // minutter
    #[serde(rename = "Heart_Rate")]
    pub heart_rate: f64, // bpm
    #[serde(rename = "Body_Temp")]
    pub body_temp: f64, // °C
}

impl SessionFeatures {
    /// Bygger en én-rads tabell med samme kolonnenavn/-typer som treningsdata.
    pub fn to_table(&self) -> Result<FeatureTable> {
        FeatureTable::new()
            .with_column("Gender", ColumnData::Categorical(vec![self.gender.clone()]))?
            .with_column("Age", ColumnData::Numeric(vec![self.age as f64]))?
            .with_column("Height", ColumnData::Numeric(vec![self.height]))?
            .with_column("Weight", ColumnData::Numeric(vec![self.weight]))?
            .with_column("Duration", ColumnData::Numeric(vec![self.duration]))?
            .with_column("Heart_Rate", ColumnData::Numeric(vec![self.heart_rate]))?
            .with_column("Body_Temp", ColumnData::Numeric(vec![self.body_temp]))
    }
}

/// Svaret fra prediksjonsendepunktet: `{"Prediction": n}` eller `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Prediction {
        #[serde(rename = "Prediction")]
        prediction: i64,
    },
    Error {
        error: String,
    },
}

impl PredictResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, PredictResponse::Error { .. })
    }

    pub fn prediction(&self) -> Option<i64> {
        match self {
            PredictResponse::Prediction { prediction } => Some(*prediction),
            PredictResponse::Error { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_wire_shape() {
        let ok = PredictResponse::Prediction { prediction: 231 };
        assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"Prediction":231}"#);

        let err = PredictResponse::Error {
            error: "boom".into(),
        };
        assert_eq!(serde_json::to_string(&err).unwrap(), r#"{"error":"boom"}"#);

        let back: PredictResponse = serde_json::from_str(r#"{"error":"x"}"#).unwrap();
        assert!(back.is_error());
    }

    #[test]
    fn one_row_table_uses_training_columns() {
        let f = SessionFeatures {
            gender: "male".into(),
            age: 30,
            height: 175.0,
            weight: 75.0,
            duration: 30.0,
            heart_rate: 120.0,
            body_temp: 38.0,
        };
        let t = f.to_table().unwrap();
        assert_eq!(t.n_rows(), 1);
        assert_eq!(
            t.column_names(),
            vec!["Gender", "Age", "Height", "Weight", "Duration", "Heart_Rate", "Body_Temp"]
        );
        assert_eq!(t.numeric("Age").unwrap(), &[30.0]);
    }
}
