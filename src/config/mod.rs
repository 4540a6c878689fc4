// Configuration module entry point
// Loads settings from an optional file, the environment and built-in defaults

mod types;

use std::net::SocketAddr;

pub use types::{
    AssetsConfig, AuthConfig, Config, DataConfig, HttpConfig, LoggingConfig, PerformanceConfig,
    ServerConfig,
};

use crate::error::Result;

/// Environment prefix, e.g. `PEOPLEHUB_SERVER__PORT=8080`
const ENV_PREFIX: &str = "PEOPLEHUB";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> std::result::Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "short")?
            .set_default("logging.json", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "peoplehub")?
            .set_default("http.max_body_size", 102_400)? // 100KB
            .set_default("static.dir", "./methods-public")?
            .set_default("static.index_files", vec!["index.html"])?
            .build()?;

        settings.try_deserialize()
    }

    pub fn load() -> std::result::Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.server.host, self.server.port).parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("definitely-missing-config-file").unwrap();
        let defaults = Config::default();

        assert_eq!(cfg.server.port, defaults.server.port);
        assert_eq!(cfg.server.host, defaults.server.host);
        assert_eq!(cfg.http.max_body_size, defaults.http.max_body_size);
        assert_eq!(cfg.assets.dir, defaults.assets.dir);
        assert_eq!(cfg.assets.index_files, defaults.assets.index_files);
        assert_eq!(cfg.auth, AuthConfig::default());
        assert!(cfg.data.catalog_file.is_none());
    }

    #[test]
    fn test_file_overrides() {
        let dir = std::env::temp_dir().join(format!("peoplehub-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("custom.toml");
        std::fs::write(
            &path,
            "[server]\nport = 8081\n\n[auth]\nallowed_user = \"ann\"\nidentity_name = \"Ann\"\nidentity_id = 2\n",
        )
        .unwrap();

        let cfg = Config::load_from(path.with_extension("").to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 8081);
        assert_eq!(cfg.auth.allowed_user, "ann");
        assert_eq!(cfg.auth.identity_id, 2);
        assert_eq!(cfg.logging.access_log_format, "short");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::default();
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 5000);

        cfg.server.host = "not an ip".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
