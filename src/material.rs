//! Material swatches for the heart surface.
//!
//! A fixed, immutable table of Phong materials the user cycles through at
//! runtime. The table is plain configuration data: it is built here (or
//! overridden from a TOML preset) and passed into render setup, never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

/// One Phong material: ambient/diffuse/specular reflectivity and a
/// shininess exponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Display name, logged when the user cycles swatches.
    pub name: String,
    /// Ambient reflectivity (rgb).
    pub ambient: [f32; 3],
    /// Diffuse reflectivity (rgb).
    pub diffuse: [f32; 3],
    /// Specular reflectivity (rgb).
    pub specular: [f32; 3],
    /// Specular exponent; higher means tighter highlights.
    pub shininess: f32,
}

impl Material {
    fn new(
        name: &str,
        ambient: [f32; 3],
        diffuse: [f32; 3],
        specular: [f32; 3],
        shininess: f32,
    ) -> Self {
        Self {
            name: name.to_owned(),
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    /// The built-in swatch table. The first entry is the startup look.
    #[must_use]
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::new(
                "Red Heart",
                [1.0, 0.2, 0.4],
                [1.0, 0.2, 0.4],
                [0.8, 0.8, 0.8],
                48.0,
            ),
            Self::new(
                "Some Orange",
                [1.0, 0.5, 0.31],
                [1.0, 0.5, 0.31],
                [0.5, 0.5, 0.5],
                32.0,
            ),
            Self::new(
                "Green Emerald",
                [0.0215, 0.1745, 0.0215],
                [0.07568, 0.61424, 0.07568],
                [0.633, 0.727_811, 0.633],
                76.8,
            ),
            Self::new(
                "Cyan Plastic",
                [0.0, 0.1, 0.06],
                [0.0, 0.509_803_9, 0.509_803_9],
                [0.501_960_8, 0.501_960_8, 0.501_960_8],
                32.0,
            ),
            Self::new(
                "Green Rubber",
                [0.0, 0.05, 0.0],
                [0.4, 0.5, 0.4],
                [0.04, 0.7, 0.04],
                10.0,
            ),
            Self::new(
                "Bronze",
                [0.2125, 0.1275, 0.054],
                [0.714, 0.4284, 0.18144],
                [0.393_548, 0.271_906, 0.166_721],
                25.6,
            ),
            Self::new(
                "Silver",
                [0.19225, 0.19225, 0.19225],
                [0.50754, 0.50754, 0.50754],
                [0.508_273, 0.508_273, 0.508_273],
                51.2,
            ),
            Self::new(
                "Black Rubber",
                [0.02, 0.02, 0.02],
                [0.01, 0.01, 0.01],
                [0.4, 0.4, 0.4],
                10.0,
            ),
        ]
    }
}

/// GPU block mirroring the WGSL material uniform.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    /// Ambient reflectivity.
    pub ambient: [f32; 3],
    pub(crate) _pad0: f32,
    /// Diffuse reflectivity.
    pub diffuse: [f32; 3],
    pub(crate) _pad1: f32,
    /// Specular reflectivity.
    pub specular: [f32; 3],
    /// Specular exponent.
    pub shininess: f32,
}

impl From<&Material> for MaterialUniform {
    fn from(material: &Material) -> Self {
        Self {
            ambient: material.ambient,
            _pad0: 0.0,
            diffuse: material.diffuse,
            _pad1: 0.0,
            specular: material.specular,
            shininess: material.shininess,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_has_eight_swatches() {
        let table = Material::builtin();
        assert_eq!(table.len(), 8);
        assert_eq!(table[0].name, "Red Heart");
        assert_eq!(table[0].diffuse, [1.0, 0.2, 0.4]);
        assert_eq!(table[7].name, "Black Rubber");
    }

    #[test]
    fn uniform_matches_wgsl_block_size() {
        assert_eq!(size_of::<MaterialUniform>(), 48);
    }

    #[test]
    fn uniform_copies_material_fields() {
        let bronze = &Material::builtin()[5];
        let uniform = MaterialUniform::from(bronze);
        assert_eq!(uniform.ambient, bronze.ambient);
        assert_eq!(uniform.diffuse, bronze.diffuse);
        assert_eq!(uniform.specular, bronze.specular);
        assert_eq!(uniform.shininess, 25.6);
    }
}
