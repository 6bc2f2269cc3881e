//! Free-fly camera: Euler-angle state, matrix derivation, and the
//! controller that maps input deltas onto it.

/// Movement/look/zoom application and GPU uniform plumbing.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
