//! Access log format module
//!
//! Supports `combined`, `common` and `json`. Unknown format names fall back to `combined`.

use chrono::{DateTime, Local};
use serde::Serialize;

/// One served request
#[derive(Debug, Clone, Serialize)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    #[serde(serialize_with = "serialize_time")]
    pub time: DateTime<Local>,
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub status: u16,
    pub body_bytes: usize,
    pub user_agent: Option<String>,
    /// Request processing time in microseconds
    pub request_time_us: u64,
}

fn serialize_time<S: serde::Serializer>(time: &DateTime<Local>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&time.to_rfc3339())
}

impl AccessLogEntry {
    /// Create a new entry stamped with the current local time
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            status: 200,
            body_bytes: 0,
            user_agent: None,
            request_time_us: 0,
        }
    }

    pub fn format(&self, format: &str) -> String {
        match format {
            "common" => self.format_common(),
            "json" => self.format_json(),
            _ => self.format_combined(),
        }
    }

    fn request_line(&self) -> String {
        match &self.query {
            Some(q) => format!("{} {}?{q} HTTP/1.1", self.method, self.path),
            None => format!("{} {} HTTP/1.1", self.method, self.path),
        }
    }

    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    /// Common format plus user agent and request time in seconds
    fn format_combined(&self) -> String {
        #[allow(clippy::cast_precision_loss)]
        let seconds = self.request_time_us as f64 / 1_000_000.0;
        format!(
            "{} \"{}\" {seconds:.3}",
            self.format_common(),
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!(r#"{{"error":"{e}"}}"#))
    }
}
