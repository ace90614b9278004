use std::path::Path;

use csv::ReaderBuilder;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{CalorieError, Result};
use crate::table::{ColumnData, FeatureTable};

/// Leser et CSV-datasett med header til en [`FeatureTable`].
///
/// En kolonne der alle verdier kan tolkes som f64 blir numerisk, ellers kategorisk.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<FeatureTable> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let mut raw: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

    for record in rdr.records() {
        let record = record?;
        for (j, val) in record.iter().enumerate() {
            raw[j].push(val.trim().to_string());
        }
    }

    let n_rows = raw.first().map(|c| c.len()).unwrap_or(0);
    if n_rows == 0 {
        return Err(CalorieError::InvalidData(format!(
            "dataset {} has no rows",
            path.display()
        )));
    }

    let mut table = FeatureTable::new();
    for (name, values) in headers.iter().zip(raw) {
        table.push_column(name, infer_column(values))?;
    }

    log::info!(
        "lastet {} rader x {} kolonner fra {}",
        table.n_rows(),
        table.n_cols(),
        path.display()
    );
    Ok(table)
}

fn infer_column(values: Vec<String>) -> ColumnData {
    let parsed: std::result::Result<Vec<f64>, _> = values.iter().map(|v| v.parse::<f64>()).collect();
    match parsed {
        Ok(nums) => ColumnData::Numeric(nums),
        Err(_) => ColumnData::Categorical(values),
    }
}

/// Skiller ut features og mål: dropper id-kolonnen (hvis den finnes) og målkolonnen.
pub fn split_features_target(
    table: &FeatureTable,
    id_column: &str,
    target_column: &str,
) -> Result<(FeatureTable, Vec<f64>)> {
    let y = table.numeric(target_column)?.to_vec();
    let mut x = table.clone();
    x.drop_column(id_column);
    x.drop_column(target_column);
    Ok((x, y))
}

/// Stokker radindeksene med fast seed og deler i (train, test).
/// Testandelen rundes opp, som i sklearn.
pub fn train_test_split(n: usize, test_size: f64, seed: u64) -> Result<(Vec<usize>, Vec<usize>)> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(CalorieError::InvalidData(format!(
            "test_size must be in (0, 1), got {test_size}"
        )));
    }
    let n_test = (n as f64 * test_size).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(CalorieError::InvalidData(format!(
            "cannot split {n} rows with test_size {test_size}"
        )));
    }

    let mut idx: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    idx.shuffle(&mut rng);

    let train = idx.split_off(n_test);
    Ok((train, idx))
}

/// K-fold uten stokking: sammenhengende folder, de første `n % k` får én ekstra rad.
#[derive(Debug, Clone, Copy)]
pub struct KFold {
    pub n_splits: usize,
}

impl KFold {
    pub fn new(n_splits: usize) -> Self {
        Self { n_splits }
    }

    /// Returnerer (train, validation) indekspar, én per fold.
    pub fn split(&self, n: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
        let k = self.n_splits;
        if k < 2 {
            return Err(CalorieError::InvalidData(format!(
                "k-fold needs at least 2 splits, got {k}"
            )));
        }
        if n < k {
            return Err(CalorieError::InvalidData(format!(
                "cannot make {k} folds from {n} rows"
            )));
        }

        let base = n / k;
        let extra = n % k;
        let mut folds = Vec::with_capacity(k);
        let mut start = 0;
        for f in 0..k {
            let size = base + usize::from(f < extra);
            let stop = start + size;
            let valid: Vec<usize> = (start..stop).collect();
            let train: Vec<usize> = (0..start).chain(stop..n).collect();
            folds.push((train, valid));
            start = stop;
        }
        Ok(folds)
    }
}
