use std::path::Path;

use cardstmt_extract::config::read_optional;
use cardstmt_extract::{ConfigError, ParserConfig};
use serde::Deserialize;

/// Environment variable naming the TOML settings file.
pub const CONFIG_ENV: &str = "CARDSTMT_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "cardstmt.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// Upper bound on a request body, uploads included.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: "0.0.0.0:5000".to_string(), max_upload_bytes: 16 * 1024 * 1024 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub server: ServerConfig,
    pub parser: ParserConfig,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    server: ServerConfig,
}

impl Settings {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let file: SettingsFile = toml::from_str(content)?;
        Ok(Self { server: file.server, parser: ParserConfig::from_toml(content)? })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match read_optional(path)? {
            Some(content) => Self::from_toml(&content),
            None => Ok(Self::default()),
        }
    }

    /// Load from `$CARDSTMT_CONFIG`, falling back to `./cardstmt.toml`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(Path::new(&path))
    }
}
