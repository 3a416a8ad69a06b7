// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub views: ViewConfig,
    pub download: DownloadConfig,
}

/// Demo server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common or json)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// View resolution settings
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Directory holding templates; logical names resolve relative to it
    #[serde(default)]
    pub base_path: Option<String>,
    /// Extension tried before the `.html` fallback
    #[serde(default = "default_script_extension")]
    pub script_extension: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_script_extension() -> String {
    "tpl".to_string()
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            base_path: None,
            script_extension: default_script_extension(),
        }
    }
}

impl ViewConfig {
    pub fn with_base_path(base_path: impl Into<String>) -> Self {
        Self {
            base_path: Some(base_path.into()),
            ..Self::default()
        }
    }
}

/// File download settings
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DownloadConfig {
    #[serde(default = "default_disposition")]
    pub default_disposition: String,
    /// Emit `Content-Encoding: base64` on downloads even though the body is sent raw
    #[serde(default = "default_legacy_content_encoding")]
    pub legacy_content_encoding: bool,
    /// Directory the demo server's `/download` route serves from
    #[serde(default)]
    pub directory: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_disposition() -> String {
    "attachment".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_legacy_content_encoding() -> bool {
    true
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            default_disposition: default_disposition(),
            legacy_content_encoding: default_legacy_content_encoding(),
            directory: None,
        }
    }
}
