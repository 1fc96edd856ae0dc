//! Inspector configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{AncestorStrategy, BoundedPathMode, ShiftClickStrategy};

/// Appearance applied to hovered and selected elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightStyle {
    pub background: String,
    pub shadow: String,
    pub transition: String,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            background: "rgba(255, 0, 0, 0.15)".to_string(),
            shadow: "0 0 0 3px rgb(255, 0, 0) inset".to_string(),
            transition: "background-color 0.4s ease, box-shadow 0.4s ease".to_string(),
        }
    }
}

/// Inspector configuration options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    pub highlight: HighlightStyle,

    /// What a shift click does once a common ancestor is found
    pub shift_click: ShiftClickStrategy,

    /// How the common ancestor of two elements is searched
    pub ancestor: AncestorStrategy,

    /// Whether bounded paths keep the index on the ancestor's direct child
    pub bounded_path: BoundedPathMode,

    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            highlight: HighlightStyle::default(),
            shift_click: ShiftClickStrategy::default(),
            ancestor: AncestorStrategy::default(),
            bounded_path: BoundedPathMode::default(),
            log_level: "info".to_string(),
        }
    }
}

impl InspectorConfig {
    /// Parse a JSON configuration. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}
