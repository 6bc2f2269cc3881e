use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera projection and control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees at startup.
    pub fov: f32,
    /// Base movement speed in world units per second.
    pub move_speed: f32,
    /// Movement speed multiplier while Shift is held.
    pub sprint_multiplier: f32,
    /// Mouse look sensitivity in degrees per pixel.
    pub look_sensitivity: f32,
    /// Field-of-view change in degrees per scroll line.
    pub zoom_step: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fov: 90.0,
            move_speed: 1.5,
            sprint_multiplier: 2.0,
            look_sensitivity: 0.1,
            zoom_step: 2.0,
        }
    }
}
