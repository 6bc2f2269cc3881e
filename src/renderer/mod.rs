//! Forward rendering of the heart mesh.
//!
//! One pipeline, one indexed draw: position+normal vertices lit by the
//! spotlight shader, depth-tested against a shared depth attachment.

/// Heart mesh draw pass plus model and material uniforms.
pub mod heart;
pub(crate) mod pipeline_util;

pub use heart::HeartRenderer;
