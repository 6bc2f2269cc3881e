use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Pulse and spin animation parameters.
pub struct AnimationOptions {
    /// Smallest pulse scale.
    pub pulse_min: f32,
    /// Largest pulse scale.
    pub pulse_max: f32,
    /// Pulse scale change per second.
    pub pulse_speed: f32,
    /// Spin rate around the world Y axis in degrees per second.
    pub spin_speed_deg: f32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            pulse_min: 0.8,
            pulse_max: 1.0,
            pulse_speed: 0.3,
            spin_speed_deg: 10.0,
        }
    }
}
