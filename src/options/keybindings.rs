use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping actions to key codes.
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `PinSpotlight` → `"KeyF"`).
    pub bindings: HashMap<KeyAction, String>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        Self {
            bindings: HashMap::from([
                (KeyAction::PinSpotlight, "KeyF".into()),
                (KeyAction::CycleMaterial, "KeyM".into()),
                (KeyAction::Quit, "Escape".into()),
            ]),
        }
    }
}

impl KeybindingOptions {
    /// Look up the action bound to a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.bindings
            .iter()
            .find_map(|(action, bound)| (bound == key).then_some(*action))
    }
}
