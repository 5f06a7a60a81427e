use crate::error::{CouncilError, Result};
use crate::settings::SiteSettings;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "council.json";
const DEFAULT_TEXT_LIMIT: usize = 500;

/// Environment variable naming the config directory.
pub const CONFIG_DIR_ENV: &str = "COUNCIL_CONFIG_DIR";

/// Configuration for the admin panel, stored in `council.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CouncilConfig {
    /// Maximum length of free-text content fields, in characters
    #[serde(default = "default_text_limit")]
    pub text_limit: usize,

    /// Site settings a session starts with
    #[serde(default)]
    pub site: SiteSettings,
}

fn default_text_limit() -> usize {
    DEFAULT_TEXT_LIMIT
}

impl Default for CouncilConfig {
    fn default() -> Self {
        Self {
            text_limit: DEFAULT_TEXT_LIMIT,
            site: SiteSettings::default(),
        }
    }
}

impl CouncilConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: CouncilConfig = serde_json::from_str(&content)?;
        if config.text_limit == 0 {
            return Err(CouncilError::Config(format!(
                "text_limit must be positive in {}",
                config_path.display()
            )));
        }
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }
}

/// Where config lives: the explicit directory, else `COUNCIL_CONFIG_DIR`,
/// else the platform config directory.
pub fn resolve_config_dir(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = explicit {
        return Some(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    ProjectDirs::from("gov", "council", "council").map(|dirs| dirs.config_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = CouncilConfig::default();
        assert_eq!(config.text_limit, 500);
        assert_eq!(config.site, SiteSettings::default());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempdir().unwrap();
        let config = CouncilConfig::load(dir.path()).unwrap();
        assert_eq!(config, CouncilConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("council");

        let mut config = CouncilConfig {
            text_limit: 280,
            ..CouncilConfig::default()
        };
        config.site.general.site_name = "Municipal Council Thanesar".to_string();
        config.save(&nested).unwrap();

        let loaded = CouncilConfig::load(&nested).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"text_limit": 120}"#).unwrap();

        let config = CouncilConfig::load(dir.path()).unwrap();
        assert_eq!(config.text_limit, 120);
        assert_eq!(config.site, SiteSettings::default());
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"text_limit": 0}"#).unwrap();

        assert!(matches!(
            CouncilConfig::load(dir.path()),
            Err(CouncilError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_a_serialization_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{ not json").unwrap();

        assert!(matches!(
            CouncilConfig::load(dir.path()),
            Err(CouncilError::Serialization(_))
        ));
    }

    #[test]
    fn test_explicit_dir_wins() {
        let dir = tempdir().unwrap();
        assert_eq!(
            resolve_config_dir(Some(dir.path())),
            Some(dir.path().to_path_buf())
        );
    }
}
