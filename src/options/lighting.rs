use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Spotlight cone shape, intensity and attenuation parameters.
pub struct LightingOptions {
    /// Inner cone half-angle in degrees; full intensity inside.
    pub cutoff_deg: f32,
    /// Outer cone half-angle in degrees; intensity fades to zero here.
    pub outer_cutoff_deg: f32,
    /// Ambient intensity per channel.
    pub ambient: f32,
    /// Diffuse intensity per channel.
    pub diffuse: f32,
    /// Specular intensity per channel.
    pub specular: f32,
    /// Constant term of the distance attenuation polynomial.
    pub attenuation_constant: f32,
    /// Linear term of the distance attenuation polynomial.
    pub attenuation_linear: f32,
    /// Quadratic term of the distance attenuation polynomial.
    pub attenuation_quadratic: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            cutoff_deg: 12.5,
            outer_cutoff_deg: 32.5,
            ambient: 0.2,
            diffuse: 0.7,
            specular: 1.0,
            attenuation_constant: 1.0,
            attenuation_linear: 0.09,
            attenuation_quadratic: 0.032,
        }
    }
}
