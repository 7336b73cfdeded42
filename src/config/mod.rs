// Configuration module entry point
// Loads layered configuration and exposes the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, FilesConfig, LoggingConfig, PerformanceConfig, ScriptConfig, ServerConfig};

impl Config {
    /// Load configuration from "config.toml" in the working directory
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension)
    ///
    /// The file is optional; environment variables prefixed with `SERVER_`
    /// override it, and the defaults below fill the rest.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("files.root_dir", ".")?
            .set_default("files.directory_listing", true)?
            .set_default("script.extension", ".js")?
            .set_default("script.mime_type", "application/javascript")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::load_from("does-not-exist").expect("defaults should load");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.files.root_dir, ".");
        assert_eq!(cfg.script.extension, ".js");
        assert_eq!(cfg.script.mime_type, "application/javascript");
        assert_eq!(
            cfg.files.index_files,
            vec!["index.html".to_string(), "index.htm".to_string()]
        );
        assert!(cfg.files.directory_listing);
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::load_from("does-not-exist").expect("defaults should load");
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 9000;
        let addr = cfg.socket_addr().expect("valid address");
        assert_eq!(addr.to_string(), "127.0.0.1:9000");
    }
}
