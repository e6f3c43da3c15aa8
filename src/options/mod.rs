//! Centralized viewer options with TOML preset support.
//!
//! All tweakable settings (transition timing, input thresholds, hover tilt,
//! stage poses, companion mesh, overlay texts, keybindings) are consolidated
//! here. Options serialize to/from TOML so presets can be kept as files.

mod animation;
mod companion;
mod input;
mod keybindings;
mod overlays;
mod stages;
mod tilt;

use std::path::Path;

pub use animation::AnimationOptions;
pub use companion::CompanionOptions;
pub use input::InputOptions;
pub use keybindings::KeybindingOptions;
pub use overlays::OverlayOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use stages::{PoseConfig, StageOptions};
pub use tilt::TiltOptions;

use crate::error::ViewerError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[tilt]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Stage transition timing.
    pub animation: AnimationOptions,
    /// Wheel and touch step thresholds.
    pub input: InputOptions,
    /// Hover tilt parameters.
    pub tilt: TiltOptions,
    /// Pose per stage.
    #[schemars(skip)]
    pub stages: StageOptions,
    /// Secondary mesh parameters.
    #[schemars(skip)]
    pub companion: CompanionOptions,
    /// Overlay text per stage.
    #[schemars(skip)]
    pub overlays: OverlayOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ViewerError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        options.validate()?;
        Ok(options)
    }

    /// Reject unusable poses and clamp rates that cannot go negative.
    fn validate(&mut self) -> Result<(), ViewerError> {
        let poses = [
            ("stages.default_pose", &self.stages.default_pose),
            ("stages.state1", &self.stages.state1),
            ("stages.state2", &self.stages.state2),
            ("companion.default_pose", &self.companion.default_pose),
        ];
        for (name, pose) in poses {
            if !pose.to_pose().is_valid() {
                return Err(ViewerError::OptionsParse(format!(
                    "{name}: components must be finite and scale positive"
                )));
            }
        }
        let rate = self.companion.fade_rate;
        if rate.is_nan() || rate < 0.0 {
            log::warn!(
                "companion.fade_rate {rate} clamped to 0"
            );
            self.companion.fade_rate = 0.0;
        }
        Ok(())
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let content =
            std::fs::read_to_string(path).map_err(ViewerError::Io)?;
        let options = Self::from_toml_str(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ViewerError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ViewerError::Io)?;
        }
        std::fs::write(path, content).map_err(ViewerError::Io)
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
                        path.file_stem().and_then(std::ffi::OsStr::to_str)
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
