//! YAML configuration for the search pipeline.
//!
//! One file describes every component: criteria rules, lookup filter,
//! profile store and the compatibility chart.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "chennai-branch"
//!
//! criteria:
//!   version: 1
//!   gothram_field: true
//!   age_policy:
//!     min_seeker_age: 18
//!     max_seeker_age: 100
//!     min_partner_age: 18
//!     max_partner_age: 75
//!
//! filter:
//!   gender_match: normalized
//!   date_format: "%Y-%m-%d"
//!
//! store:
//!   backend: json_file
//!   path: "data/profiles.json"
//!
//! compatibility:
//!   nakshatra:
//!     "4": ["4", "7", "12"]
//!   rasi:
//!     Mesha: ["Simha", "Dhanu"]
//! ```

use std::fs;
use std::path::Path;

use criteria::CriteriaConfig;
use matcher::{CompatibilityChart, FilterConfig};
use serde::{Deserialize, Serialize};
use store::StoreConfig;
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

/// Top-level YAML configuration for the search pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VivahaConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub criteria: CriteriaConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub compatibility: CompatibilityChart,
}

impl VivahaConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: VivahaConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.criteria
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("criteria: {e}")))?;
        self.filter
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("filter: {e}")))?;

        for (key, values) in self
            .compatibility
            .nakshatra
            .iter()
            .chain(self.compatibility.rasi.iter())
        {
            if key.trim().is_empty() {
                return Err(ConfigLoadError::Validation(
                    "compatibility: empty chart key".into(),
                ));
            }
            if values.is_empty() {
                return Err(ConfigLoadError::Validation(format!(
                    "compatibility: '{key}' lists no compatible values"
                )));
            }
        }

        Ok(())
    }
}

impl Default for VivahaConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            criteria: CriteriaConfig::default(),
            filter: FilterConfig::default(),
            store: StoreConfig::default(),
            compatibility: CompatibilityChart::default(),
        }
    }
}
