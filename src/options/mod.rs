//! Centralized client and viewer options with TOML preset support.
//!
//! Endpoints, retry behavior, highlight styling and color palettes are
//! consolidated here. Options serialize to/from TOML so a deployment can
//! point at a mirror or tune backoff without rebuilding.

mod client;
mod colors;
mod viewer;

use std::path::Path;

pub use client::ClientOptions;
pub use colors::ColorOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use viewer::{HighlightOptions, ViewerOptions};

use crate::error::FoldscopeError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[client]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Remote endpoints and retry behavior.
    pub client: ClientOptions,
    /// Viewer appearance and interaction.
    pub viewer: ViewerOptions,
    /// Color palette options.
    #[schemars(skip)]
    pub colors: ColorOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`FoldscopeError::Io`] if the file cannot be read and
    /// [`FoldscopeError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, FoldscopeError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| FoldscopeError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed), creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// [`FoldscopeError::OptionsParse`] if serialization fails and
    /// [`FoldscopeError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), FoldscopeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FoldscopeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
