// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    /// `[static]` section
    #[serde(rename = "static")]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub data: DataConfig,
}

/// Server configuration
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
    /// Access line format (short, common or json)
    pub access_log_format: String,
    /// Emit every log record as JSON
    #[serde(default)]
    pub json: bool,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub max_body_size: usize,
}

/// Static asset configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    /// Directory served verbatim; `None` disables static serving
    pub dir: Option<String>,
    pub index_files: Vec<String>,
}

/// Identity gate configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub allowed_user: String,
    pub identity_name: String,
    pub identity_id: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            allowed_user: "john".to_string(),
            identity_name: "John".to_string(),
            identity_id: 4,
        }
    }
}

/// Data source configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DataConfig {
    /// TOML file with `[[products]]` and `[[people]]`; built-in data when unset
    pub catalog_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                workers: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: true,
                access_log_format: "short".to_string(),
                json: false,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
                max_connections: None,
            },
            http: HttpConfig {
                server_name: "peoplehub".to_string(),
                max_body_size: 102_400,
            },
            assets: AssetsConfig {
                dir: Some("./methods-public".to_string()),
                index_files: vec!["index.html".to_string()],
            },
            auth: AuthConfig::default(),
            data: DataConfig::default(),
        }
    }
}
