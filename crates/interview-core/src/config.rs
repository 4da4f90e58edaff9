//! Ingestion configuration: file-backed settings with environment overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

pub const DEFAULT_INPUT_DIR: &str = "data/uploads";
pub const DEFAULT_EXTENSIONS: &[&str] = &["pdf", "txt"];

/// Settings for batch ingestion of interview documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Directory scanned for report and transcript files.
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    /// File extensions (without the dot) that are picked up.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Skip files whose body text hashes to an already-seen document.
    #[serde(default = "default_skip_duplicates")]
    pub skip_duplicates: bool,
    /// Descend into subdirectories of `input_dir`.
    #[serde(default)]
    pub recursive: bool,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_DIR)
}
fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}
fn default_skip_duplicates() -> bool {
    true
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            extensions: default_extensions(),
            skip_duplicates: true,
            recursive: false,
        }
    }
}

impl IngestConfig {
    /// Read a config file strictly. Missing fields take their defaults.
    pub fn from_file(config_path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(config_path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Load config from a JSON file, falling back to defaults, then apply env overrides.
    pub fn load(config_path: &Path) -> Self {
        let mut config = match Self::from_file(config_path) {
            Ok(config) => config,
            Err(Error::Io(_)) => {
                debug!("No config at {}, using defaults", config_path.display());
                IngestConfig::default()
            }
            Err(e) => {
                warn!("Ignoring malformed config {}: {}", config_path.display(), e);
                IngestConfig::default()
            }
        };
        config.apply_env();
        config
    }

    /// Defaults plus environment overrides, no file.
    pub fn from_env() -> Self {
        let mut config = IngestConfig::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var("INTERVIEWS_INPUT_DIR") {
            if !dir.trim().is_empty() {
                self.input_dir = PathBuf::from(dir);
            }
        }
        if let Ok(exts) = std::env::var("INTERVIEWS_EXTENSIONS") {
            let parsed = parse_extensions(&exts);
            if !parsed.is_empty() {
                self.extensions = parsed;
            }
        }
        if let Some(v) = env_flag("INTERVIEWS_SKIP_DUPLICATES") {
            self.skip_duplicates = v;
        }
        if let Some(v) = env_flag("INTERVIEWS_RECURSIVE") {
            self.recursive = v;
        }
    }

    /// Whether a file extension is one this config picks up (case-insensitive).
    pub fn accepts_extension(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.');
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Split a comma list like `"pdf, .TXT"` into normalized extensions.
fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    parse_flag(&value)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IngestConfig::default();
        assert_eq!(config.input_dir, PathBuf::from("data/uploads"));
        assert!(config.accepts_extension("pdf"));
        assert!(config.accepts_extension(".TXT"));
        assert!(!config.accepts_extension("docx"));
        assert!(config.skip_duplicates);
        assert!(!config.recursive);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ingest.json");
        std::fs::write(&path, r#"{"recursive": true}"#).unwrap();

        let config = IngestConfig::from_file(&path).unwrap();
        assert!(config.recursive);
        assert_eq!(config.extensions, vec!["pdf", "txt"]);
        assert!(config.skip_duplicates);
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(IngestConfig::from_file(&missing), Err(Error::Io(_))));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ recursive").unwrap();
        assert!(matches!(IngestConfig::from_file(&broken), Err(Error::Json(_))));
    }

    #[test]
    fn test_parse_extensions() {
        assert_eq!(parse_extensions("pdf, .TXT ,,"), vec!["pdf", "txt"]);
        assert!(parse_extensions(" , ").is_empty());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
