use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SERVERPROPS_CONFIG";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub source: SourceConfig,
    pub extraction: ExtractionConfig,
    pub logging: LoggingConfig,
}

/// HTTP API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the API listens on.
    pub bind: String,
    /// Compress responses with gzip when the client accepts it.
    pub gzip: bool,
}

/// Where the documentation and the arithmetic service live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// English `server.properties` wiki page.
    pub wiki_url: String,
    /// Localized page URL with a `{lang}` placeholder, used when a
    /// cross-language link has no `href`.
    pub localized_url_template: String,
    /// mathjs-compatible evaluation endpoint.
    pub math_api_url: String,
    /// Value of the `data-description` attribute marking the English table.
    pub table_marker: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

/// Extraction policy switches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Fail instead of using the first match when several localized
    /// tables have the documentation table's shape.
    pub strict_table_selection: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub filter: String,
    /// Directory for daily-rolling JSON logs. No file logging when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            gzip: true,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            wiki_url: "https://minecraft.wiki/w/Server.properties".to_string(),
            localized_url_template: "https://{lang}.minecraft.wiki/w/Server.properties".to_string(),
            math_api_url: "https://api.mathjs.org/v4/".to_string(),
            table_marker: "Server properties".to_string(),
            request_timeout_secs: 30,
            user_agent: format!("{}/{}", crate::NAME, crate::VERSION),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from `$SERVERPROPS_CONFIG` or
    /// `~/.config/serverprops/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(Self::config_path);
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}, using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("serverprops").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
