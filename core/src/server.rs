//! Enkel HTTP/1.1-server for prediksjonsendepunktet.
//!
//! - POST /Calories_predict/  - prediksjon (200 også ved feil i forespørselen)
//! - OPTIONS *                - CORS preflight
//! - GET  /health             - helsesjekk
//! - GET  /metrics            - Prometheus-tellere

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;

use crate::error::{CalorieError, Result};
use crate::pipeline::FittedPipeline;
use crate::service::PredictionService;
use crate::telemetry;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Svar før det skrives til socketen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Response {
    fn json(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "application/json",
            body,
        }
    }

    fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: String::new(),
        }
    }
}

pub struct PredictServer {
    listener: TcpListener,
    pipeline: &'static FittedPipeline,
}

impl PredictServer {
    pub fn bind(addr: &str, pipeline: &'static FittedPipeline) -> Result<Self> {
        let listener = TcpListener::bind(addr)?;
        Ok(Self { listener, pipeline })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Blokkerer og betjener hver tilkobling på egen tråd.
    pub fn serve(self) -> Result<()> {
        log::info!(
            "lytter på http://{} ({})",
            self.local_addr()?,
            self.pipeline.kind()
        );
        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    let pipeline = self.pipeline;
                    thread::spawn(move || {
                        if let Err(e) = handle_connection(stream, pipeline) {
                            log::warn!("feil i tilkobling: {e}");
                        }
                    });
                }
                Err(e) => log::warn!("kunne ikke akseptere tilkobling: {e}"),
            }
        }
        Ok(())
    }
}

fn handle_connection(mut stream: TcpStream, pipeline: &FittedPipeline) -> Result<()> {
    let request = {
        let mut reader = BufReader::new(&stream);
        read_request(&mut reader)
    };
    let response = match request {
        Ok((method, path, body)) => route(pipeline, &method, &path, &body),
        Err(e) => {
            log::debug!("ugyldig forespørsel: {e}");
            let status = match e {
                CalorieError::Request { .. } => 413,
                _ => 400,
            };
            Response::json(status, r#"{"detail":"Bad Request"}"#.to_string())
        }
    };
    write_response(&mut stream, &response)
}

fn read_request<R: BufRead>(reader: &mut R) -> Result<(String, String, String)> {
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target)) = (parts.next(), parts.next()) else {
        return Err(CalorieError::InvalidData("malformed request line".into()));
    };
    let method = method.to_string();
    let path = target.split('?').next().unwrap_or(target).to_string();

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 || line.trim().is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().map_err(|_| {
                    CalorieError::InvalidData(format!("bad Content-Length '{}'", value.trim()))
                })?;
            }
        }
    }
    if content_length > MAX_BODY_BYTES {
        return Err(CalorieError::Request {
            path: path.clone(),
            message: format!("body of {content_length} bytes is too large"),
        });
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;
    Ok((method, path, String::from_utf8_lossy(&body).into_owned()))
}

/// Ruter én forespørsel. Ren funksjon av (metode, sti, kropp) og modellen.
pub fn route(pipeline: &FittedPipeline, method: &str, path: &str, body: &str) -> Response {
    let (label, response) = match (method, path) {
        ("POST", "/Calories_predict/") | ("POST", "/Calories_predict") => {
            let answer = PredictionService::new(pipeline).respond_json(body);
            let json = serde_json::to_string(&answer)
                .unwrap_or_else(|e| format!(r#"{{"error":"{e}"}}"#));
            ("predict", Response::json(200, json))
        }
        ("OPTIONS", _) => ("preflight", Response::empty(204)),
        ("GET", "/health") => (
            "health",
            Response::json(
                200,
                format!(
                    r#"{{"status":"ok","model":"{}"}}"#,
                    pipeline.kind().name()
                ),
            ),
        ),
        ("GET", "/metrics") => match telemetry::render() {
            Ok(text) => (
                "metrics",
                Response {
                    status: 200,
                    content_type: "text/plain; version=0.0.4",
                    body: text,
                },
            ),
            Err(e) => (
                "metrics",
                Response::json(500, format!(r#"{{"detail":"{e}"}}"#)),
            ),
        },
        _ => (
            "other",
            Response::json(404, r#"{"detail":"Not Found"}"#.to_string()),
        ),
    };
    telemetry::record_request(label, response.status);
    response
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        413 => "Payload Too Large",
        _ => "Internal Server Error",
    }
}

fn write_response(stream: &mut TcpStream, response: &Response) -> Result<()> {
    let head = format!(
        "HTTP/1.1 {} {}\r\n\
         Content-Type: {}\r\n\
         Content-Length: {}\r\n\
         Access-Control-Allow-Origin: *\r\n\
         Access-Control-Allow-Methods: *\r\n\
         Access-Control-Allow-Headers: *\r\n\
         Connection: close\r\n\r\n",
        response.status,
        status_text(response.status),
        response.content_type,
        response.body.len(),
    );
    stream.write_all(head.as_bytes())?;
    stream.write_all(response.body.as_bytes())?;
    stream.flush()?;
    Ok(())
}
