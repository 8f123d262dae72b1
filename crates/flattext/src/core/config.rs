//! Configuration loading and management.
//!
//! Extraction itself is stateless; the only knobs are the ones remote fetches
//! need. Configuration can be built programmatically, loaded from TOML, YAML
//! or JSON, or discovered as `flattext.toml` in the working directory hierarchy.

use crate::{FlattextError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Browser-like identification string sent with web page fetches.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main extraction configuration.
///
/// # Example
///
/// ```rust
/// use flattext::ExtractionConfig;
///
/// let config = ExtractionConfig::default();
/// assert_eq!(config.fetch_timeout_secs, 30);
/// assert_eq!(config.transcript_languages, vec!["en".to_string()]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionConfig {
    /// Timeout applied to every remote request, in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// User-Agent header used for web page and transcript fetches.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Caption languages to try, in order of preference.
    #[serde(default = "default_transcript_languages")]
    pub transcript_languages: Vec<String>,

    /// Maximum number of redirects followed for a single fetch.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_transcript_languages() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_max_redirects() -> usize {
    10
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout_secs(),
            user_agent: default_user_agent(),
            transcript_languages: default_transcript_languages(),
            max_redirects: default_max_redirects(),
        }
    }
}

impl ExtractionConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            FlattextError::validation(format!("Failed to read config file {}: {}", path.as_ref().display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| FlattextError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            FlattextError::validation(format!("Failed to read config file {}: {}", path.as_ref().display(), e))
        })?;

        serde_yaml_ng::from_str(&content)
            .map_err(|e| FlattextError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            FlattextError::validation(format!("Failed to read config file {}: {}", path.as_ref().display(), e))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| FlattextError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration, choosing the parser from the file extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("toml") => Self::from_toml_file(path),
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(FlattextError::validation(format!(
                "Unsupported config file format: {}. Use .toml, .yaml or .json",
                path.display()
            ))),
        }
    }

    /// Discover configuration file in parent directories.
    ///
    /// Searches for `flattext.toml` in current directory and parent directories.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(FlattextError::Io)?;

        loop {
            let flattext_toml = current.join("flattext.toml");
            if flattext_toml.exists() {
                tracing::debug!("Discovered config file at {}", flattext_toml.display());
                return Ok(Some(Self::from_toml_file(flattext_toml)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }
}
