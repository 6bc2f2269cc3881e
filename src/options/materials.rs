use serde::{Deserialize, Serialize};

use crate::material::Material;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Material swatch table cycled through at runtime.
pub struct MaterialOptions {
    /// Ordered swatches; the first is applied at startup.
    pub swatches: Vec<Material>,
}

impl Default for MaterialOptions {
    fn default() -> Self {
        Self {
            swatches: Material::builtin(),
        }
    }
}

impl MaterialOptions {
    /// Swatch at `index`, if the table is that large.
    #[must_use]
    pub fn swatch(&self, index: usize) -> Option<&Material> {
        self.swatches.get(index)
    }

    /// Index following `current`, wrapping past the end of the table.
    #[must_use]
    pub fn next_index(&self, current: usize) -> usize {
        if self.swatches.is_empty() {
            0
        } else {
            (current + 1) % self.swatches.len()
        }
    }
}
