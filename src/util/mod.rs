//! Small shared utilities.

/// Per-frame delta time, FPS limiting, and a smoothed FPS readout.
pub mod frame_timing;
