use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, Context, anyhow};
use tracing::info;

/// Translation used when neither the command line nor the config names one.
pub const FALLBACK_TRANSLATION: &str = "BSB";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub default_translation: Option<String>,
    /// Overrides the platform data directory for translation databases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let config: Config = serde_json::from_str(&config_content)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, config_content)?;
        info!(path = %config_path.display(), "saved config");
        Ok(())
    }

    /// The translation to use: an explicit choice, else the configured
    /// default, else [`FALLBACK_TRANSLATION`].
    pub fn translation(&self, explicit: Option<&str>) -> String {
        explicit
            .or(self.default_translation.as_deref())
            .unwrap_or(FALLBACK_TRANSLATION)
            .to_string()
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("berea").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::new());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            default_translation: Some("KJV".to_string()),
            data_dir: None,
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
        assert!(!fs::read_to_string(&path).unwrap().contains("data_dir"));
    }

    #[test]
    fn test_translation_resolution() {
        let mut config = Config::new();
        assert_eq!(config.translation(None), "BSB");

        config.default_translation = Some("KJV".to_string());
        assert_eq!(config.translation(None), "KJV");
        assert_eq!(config.translation(Some("LEB")), "LEB");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
