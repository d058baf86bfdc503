//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Pages read from a document on the local path
pub const DEFAULT_LOCAL_PAGE_CAP: usize = 50;

/// Pages read from a document on the remote path (bounds prompt size)
pub const DEFAULT_REMOTE_PAGE_CAP: usize = 30;

/// Characters of document text sent in the remote prompt
pub const DEFAULT_REMOTE_EXCERPT_CHARS: usize = 15_000;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum pages read when extracting locally
    #[serde(default = "default_local_page_cap")]
    pub local_page_cap: usize,

    /// Maximum pages read when extracting remotely
    #[serde(default = "default_remote_page_cap")]
    pub remote_page_cap: usize,

    /// Maximum characters of text placed in the remote prompt
    #[serde(default = "default_remote_excerpt_chars")]
    pub remote_excerpt_chars: usize,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.local_page_cap == 0 {
            return Err("local_page_cap must be greater than 0".to_string());
        }
        if self.remote_page_cap == 0 {
            return Err("remote_page_cap must be greater than 0".to_string());
        }
        if self.remote_excerpt_chars == 0 {
            return Err("remote_excerpt_chars must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            local_page_cap: DEFAULT_LOCAL_PAGE_CAP,
            remote_page_cap: DEFAULT_REMOTE_PAGE_CAP,
            remote_excerpt_chars: DEFAULT_REMOTE_EXCERPT_CHARS,
        }
    }
}

fn default_local_page_cap() -> usize {
    DEFAULT_LOCAL_PAGE_CAP
}

fn default_remote_page_cap() -> usize {
    DEFAULT_REMOTE_PAGE_CAP
}

fn default_remote_excerpt_chars() -> usize {
    DEFAULT_REMOTE_EXCERPT_CHARS
}
