use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DataServiceConfig {
    pub base_url: String,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Aggregation service the dashboards are fetched from. Absent means the
    /// default local service address.
    #[serde(default)]
    pub data_service: Option<DataServiceConfig>,
    /// Directory of fallback JSON files.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Pin the market comparison window instead of deriving it from the
    /// elapsed reference term.
    #[serde(default)]
    pub window_days: Option<i64>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "polisight", "polisight")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn service_url(&self) -> &str {
        self.data_service
            .as_ref()
            .map_or(DEFAULT_SERVICE_URL, |s| &s.base_url)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
data_service:
  base_url: "http://example.com:9000"
data_dir: "/var/lib/polisight/data"
window_days: 365
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.service_url(), "http://example.com:9000");
        assert_eq!(config.data_dir(), PathBuf::from("/var/lib/polisight/data"));
        assert_eq!(config.window_days, Some(365));
    }

    #[test]
    fn test_empty_config_falls_back_to_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.service_url(), DEFAULT_SERVICE_URL);
        assert_eq!(config.data_dir(), PathBuf::from(DEFAULT_DATA_DIR));
        assert!(config.window_days.is_none());
    }
}
