//! Demo request routing
//!
//! Every route builds its answer through a [`ResponseBuilder`]:
//! - `OPTIONS *`: CORS preflight
//! - `GET /json`: server status as JSON
//! - `GET /download?file=<name>`: file from the download directory
//! - `GET /view/<name>?k=v`: rendered view, query pairs as bindings
//! - anything else: JSON 404

use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body as _, Bytes, Incoming};
use hyper::{Method, Request, Response};
use serde_json::{json, Value};
use url::form_urlencoded;

use crate::config::Config;
use crate::error::{ResponseError, Result};
use crate::logger::{self, AccessLogEntry};
use crate::response::{Download, Responder, ResponseBuilder};
use crate::view::Bindings;

const VIEW_PREFIX: &str = "/view/";

/// Shared state for request handling
pub struct AppState {
    pub responder: &'static Responder,
    pub access_log: bool,
    pub access_log_format: String,
    pub download_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(config: &Config, responder: &'static Responder) -> Self {
        Self {
            responder,
            access_log: config.logging.access_log,
            access_log_format: config.logging.access_log_format.clone(),
            download_dir: config.download.directory.as_ref().map(PathBuf::from),
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> std::result::Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let response = route(&method, &path, query.as_deref(), &state).await;

    if state.access_log {
        let mut entry =
            AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), path);
        entry.query = query;
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.user_agent = user_agent;
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.access_log_format);
    }

    Ok(response)
}

async fn route(
    method: &Method,
    path: &str,
    query: Option<&str>,
    state: &AppState,
) -> Response<Full<Bytes>> {
    let mut res = state.responder.response();

    let outcome = match (method, path) {
        (&Method::OPTIONS, _) => preflight(&mut res),
        (&Method::GET, "/json") => status_json(&mut res),
        (&Method::GET, "/download") => serve_download(&mut res, query, state).await,
        (&Method::GET, p) if p.starts_with(VIEW_PREFIX) => {
            serve_view(&mut res, &p[VIEW_PREFIX.len()..], query).await
        }
        _ => res
            .json_with(&json!({"error": "Not Found"}), 404u16)
            .map(drop),
    };

    match outcome {
        Ok(()) => res.finish(),
        Err(err) => error_response(state.responder, &err),
    }
}

fn preflight(res: &mut ResponseBuilder<'_>) -> Result<()> {
    res.access_control_allow_origin(&["*"])?
        .access_control_allow_methods(&["GET", "OPTIONS"])?
        .access_control_allow_headers(&["Content-Type", "Range"])?
        .access_control_max_age(86_400)?;
    res.code(204, true);
    Ok(())
}

fn status_json(res: &mut ResponseBuilder<'_>) -> Result<()> {
    res.access_control_allow_origin(&["*"])?;
    res.json(&json!({
        "status": "ok",
        "time": chrono::Local::now().to_rfc3339(),
    }))?;
    Ok(())
}

async fn serve_download(
    res: &mut ResponseBuilder<'_>,
    query: Option<&str>,
    state: &AppState,
) -> Result<()> {
    let Some(dir) = &state.download_dir else {
        res.json_with(&json!({"error": "Downloads are disabled"}), 404u16)?;
        return Ok(());
    };
    let Some(name) = query_pairs(query).find(|(k, _)| k == "file").map(|(_, v)| v) else {
        res.json_with(&json!({"error": "Missing 'file' parameter"}), 400u16)?;
        return Ok(());
    };

    // Security: ensure the file stays within the download directory
    let dir_canonical = tokio::fs::canonicalize(dir).await?;
    let file_canonical = tokio::fs::canonicalize(dir.join(&name)).await?;
    if !file_canonical.starts_with(&dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {name} -> {}",
            file_canonical.display()
        ));
        res.json_with(&json!({"error": "Forbidden"}), 403u16)?;
        return Ok(());
    }

    res.download(&file_canonical, Download::new()).await
}

async fn serve_view(
    res: &mut ResponseBuilder<'_>,
    name: &str,
    query: Option<&str>,
) -> Result<()> {
    let bindings: Bindings = query_pairs(query)
        .map(|(k, v)| (k, Value::String(v)))
        .collect();
    res.add_header("Content-Type", "text/html; charset=utf-8")?;
    res.send_file(name, &bindings).await?;
    Ok(())
}

/// Map an error to a JSON response on a fresh builder
fn error_response(responder: &Responder, err: &ResponseError) -> Response<Full<Bytes>> {
    let (code, message) = match err {
        ResponseError::ViewNotFound { .. } => (404u16, "View not found".to_string()),
        ResponseError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
            (404, "File not found".to_string())
        }
        other => {
            logger::log_error(&format!("Request failed: {other}"));
            (500, "Internal server error".to_string())
        }
    };

    let mut res = responder.response();
    if let Err(e) = res.json_with(&json!({"error": message}), code) {
        logger::log_error(&format!("Failed to build error response: {e}"));
    }
    res.finish()
}

/// Split a query string into decoded key/value pairs
fn query_pairs(query: Option<&str>) -> impl Iterator<Item = (String, String)> + '_ {
    form_urlencoded::parse(query.unwrap_or_default().as_bytes()).into_owned()
}
