//! Tellere for HTTP-grensen, eksponert på `GET /metrics`.

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter_vec, Encoder, Histogram, IntCounterVec, TextEncoder,
};

// Registrering feiler bare ved duplikate navn i samme registry.
static HTTP_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "calorieburn_http_requests_total",
        "HTTP requests by route and status code",
        &["route", "status"]
    )
    .expect("register calorieburn_http_requests_total")
});

static PREDICTIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "calorieburn_predictions_total",
        "Prediction requests by outcome",
        &["outcome"]
    )
    .expect("register calorieburn_predictions_total")
});

static PREDICT_LATENCY: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "calorieburn_predict_duration_seconds",
        "Time spent producing one prediction",
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]
    )
    .expect("register calorieburn_predict_duration_seconds")
});

pub fn record_request(route: &str, status: u16) {
    HTTP_REQUESTS
        .with_label_values(&[route, &status.to_string()])
        .inc();
}

pub fn record_prediction(ok: bool, seconds: f64) {
    let outcome = if ok { "ok" } else { "error" };
    PREDICTIONS.with_label_values(&[outcome]).inc();
    PREDICT_LATENCY.observe(seconds);
}

pub fn prediction_count(outcome: &str) -> u64 {
    PREDICTIONS.with_label_values(&[outcome]).get()
}

/// Prometheus tekstformat for alle registrerte metrikker.
pub fn render() -> Result<String, prometheus::Error> {
    // sørg for at seriene finnes før første forespørsel
    Lazy::force(&HTTP_REQUESTS);
    Lazy::force(&PREDICTIONS);
    Lazy::force(&PREDICT_LATENCY);

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&prometheus::gather(), &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
