use serde::{Deserialize, Serialize};

/// Keys that drive continuous camera movement while held.
///
/// The set is fixed (WASD); discrete actions go through [`KeyAction`]
/// bindings instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementKey {
    /// Move along the camera front vector.
    Forward,
    /// Move against the camera front vector.
    Backward,
    /// Strafe against the camera right vector.
    Left,
    /// Strafe along the camera right vector.
    Right,
}

impl MovementKey {
    /// Maps a winit physical-key debug name (e.g. `"KeyW"`) to a movement
    /// key.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" => Some(Self::Forward),
            "KeyS" => Some(Self::Backward),
            "KeyA" => Some(Self::Left),
            "KeyD" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Which movement keys are currently held, plus the sprint modifier.
///
/// Held state is edge-driven (press/release events); the engine samples it
/// once per frame to integrate camera motion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementState {
    /// Forward key held.
    pub forward: bool,
    /// Backward key held.
    pub backward: bool,
    /// Left strafe key held.
    pub left: bool,
    /// Right strafe key held.
    pub right: bool,
    /// Shift held: movement speed is multiplied while set.
    pub sprint: bool,
}

impl MovementState {
    /// Records a movement key press or release.
    pub fn apply(&mut self, key: MovementKey, pressed: bool) {
        match key {
            MovementKey::Forward => self.forward = pressed,
            MovementKey::Backward => self.backward = pressed,
            MovementKey::Left => self.left = pressed,
            MovementKey::Right => self.right = pressed,
        }
    }

    /// True when no movement key is held.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }
}

/// Discrete engine actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// pin_spotlight = "KeyF"
/// cycle_material = "KeyM"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Freeze the spotlight at the current camera pose, or resume
    /// following the camera.
    PinSpotlight,
    /// Switch the heart to the next material swatch.
    CycleMaterial,
    /// Close the viewer.
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_maps_to_movement_keys() {
        assert_eq!(MovementKey::from_code("KeyW"), Some(MovementKey::Forward));
        assert_eq!(MovementKey::from_code("KeyS"), Some(MovementKey::Backward));
        assert_eq!(MovementKey::from_code("KeyA"), Some(MovementKey::Left));
        assert_eq!(MovementKey::from_code("KeyD"), Some(MovementKey::Right));
        assert_eq!(MovementKey::from_code("KeyF"), None);
        assert_eq!(MovementKey::from_code("Escape"), None);
    }

    #[test]
    fn held_state_tracks_press_and_release() {
        let mut state = MovementState::default();
        assert!(state.is_idle());
        state.apply(MovementKey::Forward, true);
        state.apply(MovementKey::Left, true);
        assert!(state.forward && state.left);
        assert!(!state.is_idle());
        state.apply(MovementKey::Forward, false);
        assert!(!state.forward);
        assert!(state.left);
    }
}
