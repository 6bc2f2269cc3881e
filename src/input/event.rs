use super::keyboard::MovementKey;

/// Platform-agnostic input events.
///
/// The viewer translates raw window events into these before handing them
/// to [`HeartRenderEngine::handle_input`](crate::HeartRenderEngine::handle_input),
/// so the engine never depends on a windowing library. Cursor positions
/// are absolute; the engine derives look deltas itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to an absolute position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Scroll wheel (positive = scrolled away from the user).
    Scroll {
        /// Scroll amount in lines.
        delta: f32,
    },
    /// A movement key was pressed or released.
    MovementKey {
        /// Which key changed.
        key: MovementKey,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Modifier key state changed.
    ModifiersChanged {
        /// Whether the shift key is held.
        shift: bool,
    },
}
