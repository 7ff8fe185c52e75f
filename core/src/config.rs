#![deny(missing_docs)]

//! # Configuration
//!
//! Knobs for a generation pass. Every field has a default, so an empty
//! YAML document is a valid configuration.

use crate::error::AppResult;
use crate::filter::FilterPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Metadata name of the disposal interface.
pub const DEFAULT_DISPOSAL_INTERFACE: &str = "System.IDisposable";

/// Suffix marking an artifact as generated source.
pub const DEFAULT_ARTIFACT_SUFFIX: &str = ".g.cs";

/// Settings shared by the filter, resolver and generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GeneratorConfig {
    /// Strictness of the syntactic candidate filter.
    pub filter_policy: FilterPolicy,
    /// Fully qualified name of the disposal interface.
    pub disposal_interface: String,
    /// Appended to `{namespace}.{class}.Dispose` to form artifact keys.
    pub artifact_suffix: String,
    /// Report a warning for types with nothing to clean up.
    pub report_empty_work: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            filter_policy: FilterPolicy::default(),
            disposal_interface: DEFAULT_DISPOSAL_INTERFACE.to_string(),
            artifact_suffix: DEFAULT_ARTIFACT_SUFFIX.to_string(),
            report_empty_work: false,
        }
    }
}

impl GeneratorConfig {
    /// Parses a YAML (or JSON, which is valid YAML) configuration document.
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}
