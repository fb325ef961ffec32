use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for text parsing and batch output, read from the `[parser]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Characters of input echoed back when the issuer cannot be identified.
    pub preview_chars: usize,
    /// Primary PDF text shorter than this triggers the secondary extractor.
    pub min_text_chars: usize,
    /// File name written into the processed folder by batch runs.
    pub results_file: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            preview_chars: 500,
            min_text_chars: 100,
            results_file: "parsing_results.json".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    parser: ParserConfig,
}

impl ParserConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(toml_content)?;
        Ok(file.parser)
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match read_optional(path)? {
            Some(content) => Self::from_toml(&content),
            None => Ok(Self::default()),
        }
    }
}

/// Read a config file, treating "not found" as absent rather than an error.
pub fn read_optional(path: &Path) -> Result<Option<String>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Read { path: path.to_path_buf(), source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(ParserConfig::from_toml("").unwrap(), ParserConfig::default());
    }

    #[test]
    fn partial_parser_table_keeps_other_defaults() {
        let cfg = ParserConfig::from_toml("[parser]\npreview_chars = 120\n").unwrap();
        assert_eq!(cfg.preview_chars, 120);
        assert_eq!(cfg.min_text_chars, 100);
        assert_eq!(cfg.results_file, "parsing_results.json");
    }

    #[test]
    fn unrelated_tables_are_ignored() {
        let cfg = ParserConfig::from_toml("[server]\nbind = \"127.0.0.1:8080\"\n").unwrap();
        assert_eq!(cfg, ParserConfig::default());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let err = ParserConfig::from_toml("[parser\npreview_chars = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ParserConfig::load(&dir.path().join("cardstmt.toml")).unwrap();
        assert_eq!(cfg, ParserConfig::default());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cardstmt.toml");
        std::fs::write(&path, "[parser]\nresults_file = \"out.json\"\n").unwrap();
        assert_eq!(ParserConfig::load(&path).unwrap().results_file, "out.json");
    }
}
