//! Runtime options with TOML preset support.
//!
//! All tweakable settings (camera feel, spotlight shape, animation rates,
//! material swatches, keybindings) are consolidated here. Options serialize
//! to/from TOML so a preset file can override any subset of them.

mod animation;
mod camera;
mod keybindings;
mod lighting;
mod materials;

use std::path::Path;

pub use animation::AnimationOptions;
pub use camera::CameraOptions;
pub use keybindings::KeybindingOptions;
pub use lighting::LightingOptions;
pub use materials::MaterialOptions;
use serde::{Deserialize, Serialize};

use crate::error::HeartError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[lighting]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Spotlight shape and intensity parameters.
    pub lighting: LightingOptions,
    /// Pulse and spin animation parameters.
    pub animation: AnimationOptions,
    /// Material swatch table.
    pub materials: MaterialOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, HeartError> {
        let content = std::fs::read_to_string(path).map_err(HeartError::Io)?;
        toml::from_str(&content)
            .map_err(|e| HeartError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), HeartError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HeartError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(HeartError::Io)?;
        }
        std::fs::write(path, content).map_err(HeartError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[lighting]
ambient = 0.5

[animation]
spin_speed_deg = 45.0
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.lighting.ambient, 0.5);
        assert_eq!(opts.animation.spin_speed_deg, 45.0);
        // Everything else should be default
        assert_eq!(opts.lighting.cutoff_deg, 12.5);
        assert_eq!(opts.camera.fov, 90.0);
        assert_eq!(opts.materials.swatches.len(), 8);
    }

    #[test]
    fn keybinding_lookup() {
        use crate::input::KeyAction;
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("KeyF"),
            Some(KeyAction::PinSpotlight)
        );
        assert_eq!(
            opts.keybindings.lookup("KeyM"),
            Some(KeyAction::CycleMaterial)
        );
        assert_eq!(opts.keybindings.lookup("Escape"), Some(KeyAction::Quit));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn rebound_action_replaces_default_table() {
        let toml_str = r#"
[keybindings.bindings]
pin_spotlight = "KeyP"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(
            opts.keybindings.lookup("KeyP"),
            Some(crate::input::KeyAction::PinSpotlight)
        );
        // The bindings table is replaced wholesale, not merged.
        assert_eq!(opts.keybindings.lookup("KeyM"), None);
    }

    #[test]
    fn material_cycling_wraps() {
        let materials = MaterialOptions::default();
        assert_eq!(materials.next_index(0), 1);
        assert_eq!(materials.next_index(7), 0);
        assert_eq!(
            materials.swatch(0).map(|m| m.name.as_str()),
            Some("Red Heart")
        );
        assert!(materials.swatch(8).is_none());
    }
}
