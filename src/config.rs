//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dashboard::FallbackStats;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub fallback: FallbackStats,

    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream stats endpoints configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the backend serving the four stats endpoints
    #[serde(default = "default_upstream_url")]
    pub base_url: String,

    /// Bearer credential sent with every stats request
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_upstream_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> u64 {
    5000 // 5 seconds
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_url(),
            auth_token: None,
            request_timeout_ms: default_request_timeout(),
        }
    }
}

/// Land registry contract configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// Enable the land registry client
    #[serde(default)]
    pub enabled: bool,

    /// JSON-RPC endpoint of the ledger node
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Deployed contract address for this environment
    #[serde(default)]
    pub contract_address: String,

    /// Chain id; queried from the node when unset
    #[serde(default)]
    pub chain_id: Option<u64>,

    /// Signing key for the portal account. Required for the contract flow;
    /// when unset the registry client refuses to connect.
    #[serde(default)]
    pub signer_key: Option<String>,
}

fn default_rpc_url() -> String {
    "http://localhost:8545".to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            rpc_url: default_rpc_url(),
            contract_address: String::new(),
            chain_id: None,
            signer_key: None,
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("motportal").join("config.toml")),
            Some(PathBuf::from("/etc/motportal/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Upstream overrides
        if let Ok(url) = std::env::var("MOTPORTAL_UPSTREAM_URL") {
            self.upstream.base_url = url;
        }
        if let Ok(token) = std::env::var("MOTPORTAL_AUTH_TOKEN") {
            self.upstream.auth_token = Some(token);
        }

        // API overrides
        if let Ok(host) = std::env::var("MOTPORTAL_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("MOTPORTAL_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Registry overrides
        if let Ok(url) = std::env::var("MOTPORTAL_REGISTRY_RPC_URL") {
            self.registry.rpc_url = url;
        }
        if let Ok(address) = std::env::var("MOTPORTAL_REGISTRY_ADDRESS") {
            self.registry.contract_address = address;
        }
        if let Ok(key) = std::env::var("MOTPORTAL_SIGNER_KEY") {
            self.registry.signer_key = Some(key);
        }

        // Logging overrides
        if let Ok(level) = std::env::var("MOTPORTAL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("MOTPORTAL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upstream: UpstreamConfig::default(),
            fallback: FallbackStats::default(),
            registry: RegistryConfig::default(),
            api: ApiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# MoT Portal Configuration
#
# Environment variables override these settings:
# - MOTPORTAL_UPSTREAM_URL
# - MOTPORTAL_AUTH_TOKEN
# - MOTPORTAL_API_HOST
# - MOTPORTAL_API_PORT
# - MOTPORTAL_REGISTRY_RPC_URL
# - MOTPORTAL_REGISTRY_ADDRESS
# - MOTPORTAL_SIGNER_KEY
# - MOTPORTAL_LOG_LEVEL
# - MOTPORTAL_LOG_FORMAT

[upstream]
# Base URL of the backend serving the stats endpoints
base_url = "http://localhost:5000"

# Bearer credential for the stats endpoints
# auth_token = ""

# Per-request timeout (ms)
request_timeout_ms = 5000

# Values shown for a resource group while its endpoint is unreachable
[fallback.users]
total = 245
active = 198
admins = 8

[fallback.vehicles]
total = 156
pending = 23
approved = 112
rejected = 21

[fallback.licenses]
total = 342
pending = 45
approved = 287
rejected = 10

[fallback.land]
total = 45
pending = 12
approved = 28
rejected = 5

[registry]
# Enable the land registry client
enabled = false

# JSON-RPC endpoint of the ledger node
rpc_url = "http://localhost:8545"

# Deployed LandRegistry address (from the migration output)
contract_address = ""

# Chain id; leave unset to query the node
# chain_id = 1337

# Portal signing key; required for register/lookup operations
# signer_key = ""

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8090

# Allowed CORS origins
cors_origins = ["http://localhost:3000", "http://127.0.0.1:3000"]

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_complete() {
        let config = Config::default();
        assert_eq!(config.upstream.base_url, "http://localhost:5000");
        assert_eq!(config.upstream.request_timeout_ms, 5000);
        assert_eq!(config.api.port, 8090);
        assert!(!config.registry.enabled);
        assert_eq!(config.fallback.users.total, 245);
    }

    #[test]
    fn generated_default_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.fallback.licenses.approved, 287);
        assert_eq!(config.registry.rpc_url, "http://localhost:8545");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[upstream]
base_url = "https://portal.example.gov"

[fallback.users]
total = 1
active = 1
admins = 1
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.upstream.base_url, "https://portal.example.gov");
        assert_eq!(config.upstream.request_timeout_ms, 5000);
        // overridden group
        assert_eq!(config.fallback.users.total, 1);
        // untouched group keeps its default
        assert_eq!(config.fallback.vehicles.total, 156);
    }
}
