// Lint policy lives in the [lints] tables in Cargo.toml.

//! Interactive pulsing-heart demo built on wgpu.
//!
//! Loads a Wavefront OBJ heart mesh, lights it with a camera-following
//! spotlight, and animates a pulse and spin while the user flies around
//! with WASD movement and mouse look.
//!
//! # Key entry points
//!
//! - [`HeartRenderEngine`] - the rendering engine driving the frame loop
//! - [`TriangleMesh`] - OBJ loading and triangulated geometry
//! - [`Options`] - runtime configuration (camera feel, spotlight shape,
//!   animation rates, material swatches, keybindings)
//! - [`Viewer`] - standalone winit window (behind the `viewer` feature)

/// Heartbeat pulse and spin animation.
pub mod animation;
/// Free-fly camera and its GPU uniform.
pub mod camera;
/// The render engine and per-frame loop.
pub mod engine;
/// Crate-wide error type.
pub mod error;
/// GPU context, surface, and depth texture.
pub mod gpu;
/// Platform-agnostic input events and key state.
pub mod input;
/// Spotlight state and GPU plumbing.
pub mod lighting;
/// Phong material swatches.
pub mod material;
/// Triangle-mesh model loading.
pub mod mesh;
/// Runtime options with TOML presets.
pub mod options;
/// Forward render pipeline for the heart mesh.
pub mod renderer;
/// Small shared utilities.
pub mod util;
/// Standalone winit window.
#[cfg(feature = "viewer")]
pub mod viewer;

pub use camera::core::Camera;
pub use engine::HeartRenderEngine;
pub use error::HeartError;
pub use input::{InputEvent, KeyAction, MovementKey, MovementState};
pub use material::Material;
pub use mesh::{ObjError, TriangleMesh};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
