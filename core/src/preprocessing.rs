use serde::{Deserialize, Serialize};

use crate::config::TrainConfig;
use crate::error::{CalorieError, Result};
use crate::table::FeatureTable;

/// Uttilpasset forbehandling: hvilke kolonner som one-hot-kodes og hvilke som standardiseres.
/// Kolonner som ikke er nevnt droppes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preprocessor {
    pub categorical: Vec<String>,
    pub numeric: Vec<String>,
}

impl Preprocessor {
    pub fn new(categorical: Vec<String>, numeric: Vec<String>) -> Self {
        Self {
            categorical,
            numeric,
        }
    }

    pub fn from_config(cfg: &TrainConfig) -> Self {
        Self::new(cfg.categorical_columns.clone(), cfg.numeric_columns.clone())
    }

    /// Lærer vokabular og snitt/std fra treningsdata.
    pub fn fit(&self, x: &FeatureTable) -> Result<FittedPreprocessor> {
        if x.is_empty() {
            return Err(CalorieError::InvalidData(
                "cannot fit preprocessor on an empty table".into(),
            ));
        }

        let mut encoders = Vec::with_capacity(self.categorical.len());
        for name in &self.categorical {
            let mut levels: Vec<String> = x.categorical(name)?.to_vec();
            levels.sort();
            levels.dedup();
            encoders.push(CategoryEncoding {
                column: name.clone(),
                drop_first: levels.len() == 2,
                levels,
            });
        }

        let mut scalers = Vec::with_capacity(self.numeric.len());
        for name in &self.numeric {
            let col = x.numeric(name)?;
            let n = col.len() as f64;
            let mean = col.iter().sum::<f64>() / n;
            let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            let std = var.sqrt();
            scalers.push(ScalerStats {
                column: name.clone(),
                mean,
                // konstant kolonne: behold sentrering, ikke del på 0
                scale: if std > 0.0 { std } else { 1.0 },
            });
        }

        Ok(FittedPreprocessor { encoders, scalers })
    }
}

/// Lært vokabular for én kategorisk kolonne.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEncoding {
    pub column: String,
    /// Sortert, unike nivåer sett under fit.
    pub levels: Vec<String>,
    /// Binær kolonne: første nivå droppes, én indikator gjenstår.
    pub drop_first: bool,
}

impl CategoryEncoding {
    fn width(&self) -> usize {
        if self.drop_first {
            self.levels.len() - 1
        } else {
            self.levels.len()
        }
    }

    fn encode_into(&self, value: &str, out: &mut Vec<f64>) -> Result<()> {
        let pos = self
            .levels
            .iter()
            .position(|l| l == value)
            .ok_or_else(|| CalorieError::UnknownCategory {
                column: self.column.clone(),
                value: value.to_string(),
            })?;
        let skip = usize::from(self.drop_first);
        for k in skip..self.levels.len() {
            out.push(if k == pos { 1.0 } else { 0.0 });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerStats {
    pub column: String,
    pub mean: f64,
    pub scale: f64,
}

/// Tilpasset forbehandling. Brukes uendret ved inferens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPreprocessor {
    pub encoders: Vec<CategoryEncoding>,
    pub scalers: Vec<ScalerStats>,
}

impl FittedPreprocessor {
    /// Antall kolonner i designmatrisen.
    pub fn n_outputs(&self) -> usize {
        self.encoders.iter().map(|e| e.width()).sum::<usize>() + self.scalers.len()
    }

    pub fn output_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.n_outputs());
        for enc in &self.encoders {
            let skip = usize::from(enc.drop_first);
            for level in &enc.levels[skip..] {
                names.push(format!("{}_{}", enc.column, level));
            }
        }
        names.extend(self.scalers.iter().map(|s| s.column.clone()));
        names
    }

    /// Transformerer tabellen til en rad-major designmatrise:
    /// indikatorkolonner først, deretter standardiserte numeriske kolonner.
    pub fn transform(&self, x: &FeatureTable) -> Result<Vec<Vec<f64>>> {
        let cats = self
            .encoders
            .iter()
            .map(|e| x.categorical(&e.column))
            .collect::<Result<Vec<_>>>()?;
        let nums = self
            .scalers
            .iter()
            .map(|s| x.numeric(&s.column))
            .collect::<Result<Vec<_>>>()?;

        let width = self.n_outputs();
        let mut rows = Vec::with_capacity(x.n_rows());
        for i in 0..x.n_rows() {
            let mut row = Vec::with_capacity(width);
            for (enc, col) in self.encoders.iter().zip(&cats) {
                enc.encode_into(&col[i], &mut row)?;
            }
            for (s, col) in self.scalers.iter().zip(&nums) {
                row.push((col[i] - s.mean) / s.scale);
            }
            rows.push(row);
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnData;

    fn table(genders: &[&str], weights: &[f64]) -> FeatureTable {
        FeatureTable::new()
            .with_column(
                "Gender",
                ColumnData::Categorical(genders.iter().map(|g| g.to_string()).collect()),
            )
            .unwrap()
            .with_column("Weight", ColumnData::Numeric(weights.to_vec()))
            .unwrap()
    }

    fn prep() -> Preprocessor {
        Preprocessor::new(vec!["Gender".into()], vec!["Weight".into()])
    }

    #[test]
    fn binary_category_collapses_to_one_indicator() {
        let t = table(&["male", "female", "male", "female"], &[60.0, 70.0, 80.0, 90.0]);
        let fitted = prep().fit(&t).unwrap();
        assert_eq!(fitted.output_names(), vec!["Gender_male", "Weight"]);

        let m = fitted.transform(&t).unwrap();
        assert_eq!(m[0][0], 1.0);
        assert_eq!(m[1][0], 0.0);

        // standardisert: snitt 0, populasjons-std 1
        let col: Vec<f64> = m.iter().map(|r| r[1]).collect();
        let mean = col.iter().sum::<f64>() / 4.0;
        let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / 4.0;
        assert!(mean.abs() < 1e-12);
        assert!((var - 1.0).abs() < 1e-12);
    }

    #[test]
    fn three_levels_get_full_one_hot() {
        let t = table(&["a", "b", "c"], &[1.0, 2.0, 3.0]);
        let fitted = prep().fit(&t).unwrap();
        assert_eq!(fitted.n_outputs(), 4);
        let m = fitted.transform(&t).unwrap();
        assert_eq!(&m[1][..3], &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn unseen_category_fails_closed() {
        let train = table(&["male", "female"], &[60.0, 70.0]);
        let fitted = prep().fit(&train).unwrap();
        let err = fitted
            .transform(&table(&["other"], &[65.0]))
            .unwrap_err();
        assert!(matches!(err, CalorieError::UnknownCategory { .. }));
        assert!(err.to_string().contains("other"));
    }

    #[test]
    fn stats_come_from_fit_data_only() {
        let train = table(&["male", "female"], &[60.0, 80.0]);
        let fitted = prep().fit(&train).unwrap();
        let m = fitted.transform(&table(&["male"], &[100.0])).unwrap();
        // (100 - 70) / 10
        assert!((m[0][1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn constant_column_is_centered_not_scaled() {
        let t = table(&["male", "female"], &[70.0, 70.0]);
        let fitted = prep().fit(&t).unwrap();
        assert_eq!(fitted.scalers[0].scale, 1.0);
        assert_eq!(fitted.transform(&t).unwrap()[0][1], 0.0);
    }
}
