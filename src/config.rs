//! Category mapping configuration.
//!
//! The mapping from category names to extension lists is supplied as a JSON
//! document, by default `config.json` in the working directory. It is loaded
//! once at startup and compiled into a [`CategoryMap`] for lookups; a missing
//! or unparsable file aborts the run before any file is touched.
//!
//! # Configuration File Format
//!
//! ```json
//! {
//!   "images": [".jpg", ".png", ".gif"],
//!   "docs": [".txt", ".pdf"]
//! }
//! ```
//!
//! Extensions include the leading dot and are matched case-insensitively.
//! The mapping contents are not validated beyond being well-formed JSON.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::category::CategoryMap;

/// Default mapping file, resolved relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Errors that can occur while loading the category mapping.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Mapping file not found at the given path.
    ConfigNotFound(PathBuf),
    /// Mapping file exists but is not valid JSON of the expected shape.
    ConfigInvalid(String),
    /// IO error while reading the mapping file.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Raw category → extensions mapping as deserialized from the JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct CategoryConfig {
    pub categories: HashMap<String, Vec<String>>,
}

impl CategoryConfig {
    /// Loads the mapping from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file does not exist,
    /// `ConfigError::ConfigInvalid` if JSON parsing fails, and
    /// `ConfigError::IoError` if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Compiles the raw mapping into an immutable lookup table.
    pub fn compile(self) -> CategoryMap {
        CategoryMap::new(self.categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).expect("Failed to create config file");
        file.write_all(content.as_bytes())
            .expect("Failed to write config file");
        path
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_config(
            &dir,
            "config.json",
            r#"{"images": [".jpg", ".png"], "docs": [".txt"]}"#,
        );

        let config = CategoryConfig::load(&path).expect("Config should load");
        assert_eq!(config.categories.len(), 2);
        assert_eq!(
            config.categories["images"],
            vec![".jpg".to_string(), ".png".to_string()]
        );
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let result = CategoryConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_config(&dir, "config.json", "{not valid json");

        let result = CategoryConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::ConfigInvalid(_))));
    }

    #[test]
    fn test_load_wrong_shape() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_config(&dir, "config.json", r#"{"images": ".jpg"}"#);

        let result = CategoryConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::ConfigInvalid(_))));
    }

    #[test]
    fn test_compile_produces_working_map() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_config(&dir, "config.json", r#"{"docs": [".txt"]}"#);

        let map = CategoryConfig::load(&path)
            .expect("Config should load")
            .compile();
        assert_eq!(map.resolve(".txt"), "docs");
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::ConfigNotFound(PathBuf::from("config.json"));
        assert!(err.to_string().contains("config.json"));

        let err = ConfigError::ConfigInvalid("bad".to_string());
        assert!(err.to_string().contains("bad"));
    }
}
