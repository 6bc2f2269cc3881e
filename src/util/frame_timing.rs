use std::time::{Duration, Instant};

/// Longest simulation step handed out by [`FrameTiming::delta`], in seconds.
/// Long stalls (window drags, debugger pauses) are clamped to this so the
/// animation and camera never leap.
const MAX_DELTA: f32 = 0.1;

/// Frame timing: per-frame delta time, FPS calculation and optional frame
/// limiting.
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Last [`delta`](Self::delta) timestamp
    last_delta: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        let now = Instant::now();
        Self {
            target_fps,
            min_frame_duration,
            last_frame: now,
            last_delta: now,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,    /* 5% new value, 95% old value for smooth
                                 * display */
        }
    }

    /// Seconds since the previous call, clamped to [`MAX_DELTA`].
    pub fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_delta).as_secs_f32();
        self.last_delta = now;
        dt.min(MAX_DELTA)
    }

    /// Call at the start of each frame. Returns true if enough time has passed
    /// to render.
    #[must_use]
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Call after rendering to update timing.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        // Calculate instantaneous FPS
        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            // Exponential moving average for smooth display
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_target_always_renders() {
        let timing = FrameTiming::new(0);
        assert!(timing.should_render());
    }

    #[test]
    fn delta_is_nonnegative_and_clamped() {
        let mut timing = FrameTiming::new(0);
        std::thread::sleep(Duration::from_millis(2));
        let dt = timing.delta();
        assert!(dt > 0.0, "Expected a positive delta, got {dt}");
        assert!(dt <= MAX_DELTA);
    }

    #[test]
    fn end_frame_updates_smoothed_fps() {
        let mut timing = FrameTiming::new(0);
        std::thread::sleep(Duration::from_millis(2));
        timing.end_frame();
        assert!(timing.fps() > 0.0);
    }
}
