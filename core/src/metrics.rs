//! Regresjonsmetrikker. Alle returnerer `None` ved tomme eller ulike lengder.

/// MSE = snitt av kvadrert avvik
pub fn mean_squared_error(y_true: &[f64], y_pred: &[f64]) -> Option<f64> {
    if y_true.is_empty() || y_true.len() != y_pred.len() {
        return None;
    }
    let sum: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    Some(sum / y_true.len() as f64)
}

/// RMSE = kvadratrot av MSE
pub fn rmse(y_true: &[f64], y_pred: &[f64]) -> Option<f64> {
    mean_squared_error(y_true, y_pred).map(f64::sqrt)
}

pub fn mean_absolute_error(y_true: &[f64], y_pred: &[f64]) -> Option<f64> {
    if y_true.is_empty() || y_true.len() != y_pred.len() {
        return None;
    }
    let sum: f64 = y_true.iter().zip(y_pred).map(|(t, p)| (t - p).abs()).sum();
    Some(sum / y_true.len() as f64)
}

/// R² = 1 - SS_res / SS_tot. Konstant fasit gir None.
pub fn r2(y_true: &[f64], y_pred: &[f64]) -> Option<f64> {
    if y_true.is_empty() || y_true.len() != y_pred.len() {
        return None;
    }
    let mean = mean(y_true)?;
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();
    if ss_tot <= 0.0 {
        return None;
    }
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    Some(1.0 - ss_res / ss_tot)
}

pub fn mean(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        None
    } else {
        Some(xs.iter().sum::<f64>() / xs.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rmse_of_known_errors() {
        let t = [1.0, 2.0, 3.0, 4.0];
        let p = [2.0, 2.0, 3.0, 2.0];
        assert_eq!(mean_squared_error(&t, &p), Some(1.25));
        assert!((rmse(&t, &p).unwrap() - 1.25f64.sqrt()).abs() < 1e-12);
        assert_eq!(mean_absolute_error(&t, &p), Some(0.75));
    }

    #[test]
    fn perfect_fit_and_degenerate_inputs() {
        let t = [3.0, 5.0, 7.0];
        assert_eq!(rmse(&t, &t), Some(0.0));
        assert_eq!(r2(&t, &t), Some(1.0));
        assert_eq!(rmse(&[], &[]), None);
        assert_eq!(rmse(&t, &[1.0]), None);
        assert_eq!(r2(&[2.0, 2.0], &[1.0, 3.0]), None);
    }
}
