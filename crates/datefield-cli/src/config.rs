use crate::error::{Error, Result};
use datefield_core::{Locale, Pattern};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "DATEFIELD_CONFIG";

pub const DEFAULT_PATTERN: &str = "yyyy-MM-dd HH:mm";

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. DATEFIELD_CONFIG environment variable (with tilde expansion)
/// 3. XDG config directory (recommended default)
/// 4. ~/.config/datefield (fallback for systems without XDG)
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR)
        && !env_path.is_empty()
    {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("datefield").join("config.toml"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home)
            .join(".config")
            .join("datefield")
            .join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no HOME directory or XDG config directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Locale tag; the process default locale when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            locale: None,
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Command-line values take precedence over the file
    pub fn with_overrides(mut self, pattern: Option<String>, locale: Option<Locale>) -> Self {
        if let Some(pattern) = pattern {
            self.pattern = pattern;
        }
        if locale.is_some() {
            self.locale = locale;
        }
        self
    }

    /// Check that the pattern compiles
    pub fn validate(&self) -> Result<()> {
        Pattern::compile(&self.pattern).map_err(datefield_core::Error::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.pattern, "yyyy-MM-dd HH:mm");
        assert!(config.locale.is_none());
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let config = Config {
            pattern: "dd.MM.yyyy HH:mm".to_string(),
            locale: Some(Locale::parse("de-DE")?),
        };
        config.save_to(&config_path)?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_missing_file_loads_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let loaded = Config::load_from(&temp_dir.path().join("absent.toml"))?;
        assert_eq!(loaded, Config::default());
        Ok(())
    }

    #[test]
    fn test_partial_file_uses_default_pattern() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "locale = \"fr-FR\"\n")?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded.pattern, DEFAULT_PATTERN);
        assert_eq!(loaded.locale, Some(Locale::parse("fr_FR")?));
        Ok(())
    }

    #[test]
    fn test_unknown_locale_in_file_is_config_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "locale = \"xx-XX\"\n")?;

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("xx-XX")));
        Ok(())
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(Some("HH:mm".to_string()), None);
        assert_eq!(config.pattern, "HH:mm");
        assert!(config.locale.is_none());

        let config = Config {
            pattern: "yyyy".to_string(),
            locale: Some(Locale::EN_US),
        }
        .with_overrides(None, None);
        assert_eq!(config.locale, Some(Locale::EN_US));
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let config = Config::default().with_overrides(Some("yyyy [MM]".to_string()), None);
        assert!(matches!(
            config.validate(),
            Err(Error::Core(datefield_core::Error::Format(_)))
        ));
    }

    #[test]
    fn test_explicit_path_wins() -> Result<()> {
        let path = resolve_config_path(Some("/tmp/datefield-test/config.toml"))?;
        assert_eq!(path, PathBuf::from("/tmp/datefield-test/config.toml"));
        Ok(())
    }
}
