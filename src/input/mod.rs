//! Input handling: platform-agnostic event types, held-key movement
//! state, and cursor-delta tracking.

/// Platform-agnostic input events.
pub mod event;
/// Movement keys, held-key state, and bindable discrete actions.
pub mod keyboard;
/// Cursor position tracking with a first-move guard.
pub mod mouse;

pub use event::InputEvent;
pub use keyboard::{KeyAction, MovementKey, MovementState};
pub use mouse::MouseLook;
