//! Application configuration.
//!
//! Values are resolved in this order, later sources winning:
//! 1. Built-in defaults
//! 2. TOML file (`$CAMPUS_CONFIG`, or `campus.toml` in the working directory when present)
//! 3. Environment variables (`CAMPUS_*`)

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "campus.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value '{value}' for {key}")]
    InvalidOverride { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub log_level: String,
    /// Log to this file instead of stderr.
    pub log_file: Option<PathBuf>,
    /// Populate a freshly created database with demo records.
    pub seed_demo_data: bool,
    pub open_browser: bool,
    /// Maximum accepted JSON body size in bytes.
    pub json_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_path: PathBuf::from("campus.sqlite"),
            log_level: "info".to_string(),
            log_file: None,
            seed_demo_data: true,
            open_browser: false,
            json_limit: 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from the config file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var_os("CAMPUS_CONFIG").map(PathBuf::from);
        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `CAMPUS_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("CAMPUS_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("CAMPUS_PORT") {
            self.port = port.trim().parse().map_err(|_| ConfigError::InvalidOverride {
                key: "CAMPUS_PORT",
                value: port.clone(),
            })?;
        }
        if let Some(path) = lookup("CAMPUS_DATABASE") {
            self.database_path = PathBuf::from(path);
        }
        if let Some(level) = lookup("CAMPUS_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(path) = lookup("CAMPUS_LOG_FILE") {
            self.log_file = if path.is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }
        if let Some(value) = lookup("CAMPUS_SEED") {
            self.seed_demo_data = parse_flag("CAMPUS_SEED", &value)?;
        }
        if let Some(value) = lookup("CAMPUS_OPEN_BROWSER") {
            self.open_browser = parse_flag("CAMPUS_OPEN_BROWSER", &value)?;
        }
        Ok(())
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidOverride {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.url(), "http://127.0.0.1:8080");
        assert_eq!(config.database_path, PathBuf::from("campus.sqlite"));
        assert!(config.seed_demo_data);
        assert!(!config.open_browser);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 9000\ndatabase_path = \"data/app.sqlite\"").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.database_path, PathBuf::from("data/app.sqlite"));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup_from(&[
                ("CAMPUS_HOST", "0.0.0.0"),
                ("CAMPUS_PORT", "5000"),
                ("CAMPUS_SEED", "false"),
                ("CAMPUS_LOG_FILE", "logging.txt"),
            ]))
            .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert!(!config.seed_demo_data);
        assert_eq!(config.log_file, Some(PathBuf::from("logging.txt")));
    }

    #[test]
    fn test_bad_override_is_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(lookup_from(&[("CAMPUS_PORT", "eighty")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid value 'eighty' for CAMPUS_PORT");

        let err = config
            .apply_overrides(lookup_from(&[("CAMPUS_OPEN_BROWSER", "maybe")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidOverride {
                key: "CAMPUS_OPEN_BROWSER",
                ..
            }
        ));
    }
}
