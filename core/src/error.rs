use thiserror::Error;

/// Felles feiltype for hele kjernen.
#[derive(Debug, Error)]
pub enum CalorieError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("column '{0}' not found")]
    MissingColumn(String),

    #[error("column '{column}' is {found}, expected {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("found unknown category '{value}' in column '{column}' during transform")]
    UnknownCategory { column: String, value: String },

    #[error("{model} fit failed: {reason}")]
    Fit { model: String, reason: String },

    #[error("prediction failed: {0}")]
    Predict(String),

    #[error("invalid request at {path}: {message}")]
    Request { path: String, message: String },

    #[error("no model loaded")]
    NotLoaded,

    #[error("Error: {0}")]
    HttpStatus(u16),

    #[error("Exception: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, CalorieError>;
