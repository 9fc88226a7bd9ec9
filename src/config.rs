//! YAML configuration for raw-text compaction.
//!
//! A template compiler usually wants one boundary policy for a whole template:
//! whether the text before the first directive, after the last directive and
//! between directives should lose its line-broken edges. This module loads that
//! policy from YAML.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "html templates"
//!
//! normalize:
//!   trim_prefix: true   # text before the first directive
//!   trim_suffix: true   # text after the last directive
//!   trim_inner: true    # text between two directives
//! ```

use std::fs;
use std::path::Path;

use rawtext::TrimConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct RawTextConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Boundary trimming policy
    #[serde(default)]
    pub normalize: NormalizeYamlConfig,
}

impl RawTextConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: RawTextConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ConfigLoadError::Validation(
                    "name must not be blank when present".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Flags for a template consisting of a single raw-text span.
    pub fn to_trim_config(&self) -> TrimConfig {
        TrimConfig::new(self.normalize.trim_prefix, self.normalize.trim_suffix)
    }

    /// Flags for span `index` out of `count` spans separated by directives.
    ///
    /// The outer edges of the first and last span follow `trim_prefix` and
    /// `trim_suffix`; every edge that touches a directive follows `trim_inner`.
    pub fn trim_for_span(&self, index: usize, count: usize) -> TrimConfig {
        let n = &self.normalize;
        let first = index == 0;
        let last = index + 1 >= count;
        TrimConfig::new(
            if first { n.trim_prefix } else { n.trim_inner },
            if last { n.trim_suffix } else { n.trim_inner },
        )
    }
}

impl Default for RawTextConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            normalize: NormalizeYamlConfig::default(),
        }
    }
}

/// `normalize:` section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizeYamlConfig {
    #[serde(default)]
    pub trim_prefix: bool,

    #[serde(default)]
    pub trim_suffix: bool,

    #[serde(default = "true_value")]
    pub trim_inner: bool,
}

impl Default for NormalizeYamlConfig {
    fn default() -> Self {
        Self {
            trim_prefix: false,
            trim_suffix: false,
            trim_inner: true,
        }
    }
}

fn true_value() -> bool {
    true
}
