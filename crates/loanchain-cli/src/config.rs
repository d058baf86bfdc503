//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use loanchain_extractor::ExtractorConfig;
use loanchain_llm::GroqConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Extraction mode used when `--mode` is not given
    #[serde(default)]
    pub mode: ModeSetting,

    /// Credential for remote extraction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Where saved deals are written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_dir: Option<PathBuf>,

    /// Remote endpoint settings
    #[serde(default)]
    pub remote: GroqConfig,

    /// Page caps and prompt excerpt size
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Persisted extraction mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeSetting {
    /// Pattern rules on this machine
    #[default]
    Local,
    /// Remote model
    Remote,
}

impl ModeSetting {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModeSetting::Local => "local",
            ModeSetting::Remote => "remote",
        }
    }
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".loanchain").join("config.toml"))
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.extractor.validate().map_err(CliError::Config)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Directory saved deals go to.
    pub fn vault_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.vault_dir {
            return Ok(dir.clone());
        }
        let data = dirs::data_dir()
            .ok_or_else(|| CliError::Config("Could not find data directory".into()))?;
        Ok(data.join("loanchain").join("deals"))
    }

    /// Copy of the configuration safe to print.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.api_key = copy.api_key.as_deref().map(mask_key);
        copy
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: ModeSetting::Local,
            api_key: None,
            vault_dir: None,
            remote: GroqConfig::default(),
            extractor: ExtractorConfig::default(),
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

/// Show only the last four characters of a credential.
pub fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = key.chars().skip(count - 4).collect();
    format!("****{}", tail)
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.mode, ModeSetting::Local);
        assert!(config.api_key.is_none());
        assert!(config.settings.color);
        assert_eq!(config.extractor.local_page_cap, 50);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.mode = ModeSetting::Remote;
        config.api_key = Some("gsk_abcdef123456".to_string());
        config.remote.model = "llama-3.1-8b-instant".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "mode = \"remote\"\n\n[remote]\nmodel = \"custom\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.mode, ModeSetting::Remote);
        assert_eq!(config.remote.model, "custom");
        assert_eq!(config.remote.endpoint, loanchain_llm::groq::DEFAULT_ENDPOINT);
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_invalid_page_cap_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[extractor]\nlocal_page_cap = 0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(CliError::Config(_))));
    }

    #[test]
    fn test_vault_dir_override() {
        let mut config = Config::default();
        config.vault_dir = Some(PathBuf::from("/srv/deals"));
        assert_eq!(config.vault_dir().unwrap(), PathBuf::from("/srv/deals"));
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("gsk_abcdef123456"), "****3456");
        assert_eq!(mask_key("abc"), "****");
    }

    #[test]
    fn test_redacted_hides_key() {
        let mut config = Config::default();
        config.api_key = Some("gsk_secretvalue".to_string());
        let shown = toml::to_string_pretty(&config.redacted()).unwrap();
        assert!(!shown.contains("gsk_secretvalue"));
        assert!(shown.contains("****alue"));
    }
}
