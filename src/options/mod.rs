//! Centralized viewer options with TOML preset support.
//!
//! Camera, lighting, helper geometry, highlight appearance, picking and
//! display settings live here. Options serialize to/from TOML so a viewer can
//! ship presets next to its models.

mod camera;
mod display;
mod helpers;
mod highlight;
mod lighting;
mod picking;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use helpers::HelperOptions;
pub use highlight::HighlightOptions;
pub use lighting::LightingOptions;
pub use picking::PickingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::HoverError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[highlight]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Initial camera placement and projection.
    pub camera: CameraOptions,
    /// Scene lights.
    pub lighting: LightingOptions,
    /// Grid and axes helpers.
    pub helpers: HelperOptions,
    /// Hover highlight appearance.
    pub highlight: HighlightOptions,
    /// Hover picking behavior.
    pub picking: PickingOptions,
    /// Render-loop settings.
    pub display: DisplayOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, HoverError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| HoverError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), HoverError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HoverError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(HoverError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
