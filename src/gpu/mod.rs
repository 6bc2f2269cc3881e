//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization and the depth attachment
//! shared by the forward pass.

/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth attachment creation.
pub mod texture;
