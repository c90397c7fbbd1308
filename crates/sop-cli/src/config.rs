//! Guide configuration
//!
//! Read from TOML. Every field has a default, so an empty file (or no file
//! at all) yields a working setup against the built-in dataset and the
//! local assistant service.

use serde::{Deserialize, Serialize};
use sop_assistant::AssistantConfig;
use std::path::{Path, PathBuf};

/// File picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "sop-guide.toml";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`GuideConfig`]
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Guide configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// QA service settings
    pub assistant: AssistantConfig,
    /// Alternative dataset file; built-in SOPs when unset
    pub catalog_path: Option<PathBuf>,
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Print the advisory banner on startup
    pub show_banner: bool,
}

impl GuideConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With assistant endpoint
    #[inline]
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.assistant = self.assistant.with_endpoint(endpoint);
        self
    }

    /// With dataset file
    #[inline]
    #[must_use]
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on malformed TOML or mistyped fields.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Load `explicit` if given, else [`DEFAULT_CONFIG_FILE`] from `dir` if
    /// present, else defaults
    ///
    /// # Errors
    /// Returns error if a chosen file cannot be read or parsed.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(candidate)
        } else {
            Ok(Self::default())
        }
    }
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            assistant: AssistantConfig::default(),
            catalog_path: None,
            log_filter: "warn".to_string(),
            show_banner: true,
        }
    }
}
