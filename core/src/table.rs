use serde::{Deserialize, Serialize};

use crate::error::{CalorieError, Result};

/// Verdiene i én kolonne. Kategoriske kolonner holder strenger, numeriske f64.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
    Categorical(Vec<String>),
    Numeric(Vec<f64>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Categorical(v) => v.len(),
            ColumnData::Numeric(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ColumnData::Categorical(_) => "categorical",
            ColumnData::Numeric(_) => "numeric",
        }
    }

    fn take(&self, rows: &[usize]) -> ColumnData {
        match self {
            ColumnData::Categorical(v) => {
                ColumnData::Categorical(rows.iter().map(|&i| v[i].clone()).collect())
            }
            ColumnData::Numeric(v) => ColumnData::Numeric(rows.iter().map(|&i| v[i]).collect()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

/// Tabell med navngitte, typede kolonner i fast rekkefølge.
///
/// Kolonnenavn og -typer er en del av kontrakten mellom trening og inferens:
/// en én-rads tabell ved prediksjon må bruke samme navn og typer som treningen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    columns: Vec<Column>,
    n_rows: usize,
}

impl FeatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-variant av [`FeatureTable::push_column`].
    pub fn with_column(mut self, name: &str, data: ColumnData) -> Result<Self> {
        self.push_column(name, data)?;
        Ok(self)
    }

    pub fn push_column(&mut self, name: &str, data: ColumnData) -> Result<()> {
        if self.columns.iter().any(|c| c.name == name) {
            return Err(CalorieError::InvalidData(format!("duplicate column '{name}'")));
        }
        if !self.columns.is_empty() && data.len() != self.n_rows {
            return Err(CalorieError::InvalidData(format!(
                "column '{}' has {} rows, table has {}",
                name,
                data.len(),
                self.n_rows
            )));
        }
        self.n_rows = data.len();
        self.columns.push(Column {
            name: name.to_string(),
            data,
        });
        Ok(())
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Result<&ColumnData> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.data)
            .ok_or_else(|| CalorieError::MissingColumn(name.to_string()))
    }

    pub fn numeric(&self, name: &str) -> Result<&[f64]> {
        match self.column(name)? {
            ColumnData::Numeric(v) => Ok(v),
            other => Err(CalorieError::ColumnType {
                column: name.to_string(),
                expected: "numeric",
                found: other.kind(),
            }),
        }
    }

    pub fn categorical(&self, name: &str) -> Result<&[String]> {
        match self.column(name)? {
            ColumnData::Categorical(v) => Ok(v),
            other => Err(CalorieError::ColumnType {
                column: name.to_string(),
                expected: "categorical",
                found: other.kind(),
            }),
        }
    }

    /// Fjerner kolonnen og returnerer den (None hvis den ikke finnes).
    pub fn drop_column(&mut self, name: &str) -> Option<Column> {
        let pos = self.columns.iter().position(|c| c.name == name)?;
        let col = self.columns.remove(pos);
        if self.columns.is_empty() {
            self.n_rows = 0;
        }
        Some(col)
    }

    /// Ny tabell med radene i `rows`, i den rekkefølgen de er gitt.
    pub fn take_rows(&self, rows: &[usize]) -> FeatureTable {
        FeatureTable {
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    data: c.data.take(rows),
                })
                .collect(),
            n_rows: rows.len(),
        }
    }
}
