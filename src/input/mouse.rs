/// Derives look deltas from absolute cursor positions.
///
/// The first observed position establishes a reference and yields a zero
/// delta; without that guard the jump from the OS cursor position to the
/// window center on grab would whip the camera around.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseLook {
    last: Option<(f32, f32)>,
}

impl MouseLook {
    /// Creates a tracker with no reference position yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a cursor position and returns the delta from the previous
    /// one, `(0, 0)` for the first observation.
    pub fn observe(&mut self, x: f32, y: f32) -> (f32, f32) {
        let delta = match self.last {
            Some((px, py)) => (x - px, y - py),
            None => (0.0, 0.0),
        };
        self.last = Some((x, y));
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_yields_zero_delta() {
        let mut look = MouseLook::new();
        assert_eq!(look.observe(640.0, 360.0), (0.0, 0.0));
    }

    #[test]
    fn subsequent_observations_yield_deltas() {
        let mut look = MouseLook::new();
        let _ = look.observe(100.0, 200.0);
        assert_eq!(look.observe(106.5, 198.0), (6.5, -2.0));
        assert_eq!(look.observe(106.5, 198.0), (0.0, 0.0));
    }
}
