// Configuration module entry point
// Loads server, logging, view and download settings

mod types;

use std::net::SocketAddr;

// Re-export public types
pub use types::{Config, DownloadConfig, LoggingConfig, ServerConfig, ViewConfig};

/// Default config file (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "responder";

impl Config {
    /// Load configuration from the default `responder.toml`
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// Environment variables prefixed with `RESPONDER` override the file,
    /// e.g. `RESPONDER_VIEWS__BASE_PATH=/srv/views`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("RESPONDER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("views.script_extension", "tpl")?
            .set_default("download.default_disposition", "attachment")?
            .set_default("download.legacy_content_encoding", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("does-not-exist/responder").expect("defaults should load");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.views.script_extension, "tpl");
        assert_eq!(cfg.views.base_path, None);
        assert_eq!(cfg.download.default_disposition, "attachment");
        assert!(cfg.download.legacy_content_encoding);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::load_from("does-not-exist/responder").expect("defaults should load");
        let addr = cfg.get_socket_addr().expect("valid address");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_view_config_with_base_path() {
        let views = ViewConfig::with_base_path("/views");
        assert_eq!(views.base_path.as_deref(), Some("/views"));
        assert_eq!(views.script_extension, "tpl");
    }
}
