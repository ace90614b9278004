mod common;

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use calorieburn_core::client::PredictClient;
use calorieburn_core::dataset::split_features_target;
use calorieburn_core::pipeline::{FittedPipeline, Pipeline};
use calorieburn_core::preprocessing::Preprocessor;
use calorieburn_core::server::{route, PredictServer};
use calorieburn_core::{CalorieError, PredictResponse, TrainConfig};

fn leaked_pipeline() -> &'static FittedPipeline {
    let dir = tempfile::tempdir().expect("tempdir");
    let table = common::fixture_table(dir.path());
    let (x, y) = split_features_target(&table, "User_ID", "Calories").expect("split");
    let spec = common::quick_catalog(42).remove(0);
    let fitted = Pipeline::new(Preprocessor::from_config(&TrainConfig::default()), spec)
        .fit(&x, &y)
        .expect("fit");
    Box::leak(Box::new(fitted))
}

fn start_server() -> String {
    let server = PredictServer::bind("127.0.0.1:0", leaked_pipeline()).expect("bind");
    let addr = server.local_addr().expect("addr").to_string();
    thread::spawn(move || server.serve());
    addr
}

fn raw_request(addr: &str, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream.write_all(request.as_bytes()).expect("write");
    let mut out = String::new();
    stream.read_to_string(&mut out).expect("read");
    out
}

#[test]
fn routes_answer_with_expected_status() {
    let p = leaked_pipeline();
    let body = serde_json::to_string(&common::session()).expect("json");

    for path in ["/Calories_predict/", "/Calories_predict"] {
        let r = route(p, "POST", path, &body);
        assert_eq!(r.status, 200);
        assert!(r.body.starts_with(r#"{"Prediction":"#), "{}", r.body);
    }

    // feil i forespørselen er fortsatt 200
    let r = route(p, "POST", "/Calories_predict/", "{}");
    assert_eq!(r.status, 200);
    assert!(r.body.starts_with(r#"{"error":"#), "{}", r.body);

    assert_eq!(route(p, "OPTIONS", "/anything", "").status, 204);
    assert_eq!(route(p, "GET", "/health", "").status, 200);

    let missing = route(p, "GET", "/nope", "");
    assert_eq!(missing.status, 404);
    assert_eq!(missing.body, r#"{"detail":"Not Found"}"#);

    let metrics = route(p, "GET", "/metrics", "");
    assert_eq!(metrics.status, 200);
    assert!(metrics.body.contains("calorieburn_predictions_total"));
}

#[test]
fn server_speaks_http_with_cors() {
    let addr = start_server();
    let body = serde_json::to_string(&common::session()).expect("json");

    let resp = raw_request(
        &addr,
        &format!(
            "POST /Calories_predict/ HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        ),
    );
    assert!(resp.starts_with("HTTP/1.1 200 OK"), "{resp}");
    assert!(resp.contains("Access-Control-Allow-Origin: *"));
    assert!(resp.contains(r#"{"Prediction":"#));

    let preflight = raw_request(
        &addr,
        &format!("OPTIONS /Calories_predict/ HTTP/1.1\r\nHost: {addr}\r\n\r\n"),
    );
    assert!(preflight.starts_with("HTTP/1.1 204"), "{preflight}");
    assert!(preflight.contains("Access-Control-Allow-Origin: *"));
}

#[test]
fn client_round_trip_against_live_server() {
    let addr = start_server();
    let client = PredictClient::new(format!("http://{addr}/Calories_predict/"));
    match client.predict(&common::session()).expect("predict") {
        PredictResponse::Prediction { prediction } => assert!(prediction >= 0),
        other => panic!("expected prediction, got {other:?}"),
    }

    let wrong_route = PredictClient::new(format!("http://{addr}/elsewhere"));
    assert!(matches!(
        wrong_route.predict(&common::session()),
        Err(CalorieError::HttpStatus(404))
    ));
}

#[test]
fn client_reports_transport_errors() {
    // ledig port som ingen lytter på
    let port = TcpListener::bind("127.0.0.1:0")
        .expect("bind")
        .local_addr()
        .expect("addr")
        .port();
    let client = PredictClient::new(format!("http://127.0.0.1:{port}/Calories_predict/"));
    match client.predict(&common::session()) {
        Err(CalorieError::Transport(msg)) => assert!(!msg.is_empty()),
        other => panic!("expected transport error, got {other:?}"),
    }
}
