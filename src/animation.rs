//! Heartbeat animation: the pulse and spin applied to the mesh each frame.

use glam::{Mat4, Vec3};

use crate::options::AnimationOptions;

/// Pulse/spin state stepped once per frame and baked into a model matrix.
///
/// The pulse bounces the uniform scale between its configured bounds; the
/// spin accumulates yaw around the world Y axis. Both are framerate
/// independent through the `dt` passed to [`advance`](Self::advance).
#[derive(Debug, Clone)]
pub struct Heartbeat {
    scale: f32,
    growing: bool,
    spin_deg: f32,
    pulse_min: f32,
    pulse_max: f32,
    pulse_speed: f32,
    spin_speed_deg: f32,
}

impl Heartbeat {
    /// Starts at full scale (about to contract) with no spin.
    #[must_use]
    pub fn new(options: &AnimationOptions) -> Self {
        Self {
            scale: options.pulse_max,
            growing: false,
            spin_deg: 0.0,
            pulse_min: options.pulse_min,
            pulse_max: options.pulse_max,
            pulse_speed: options.pulse_speed,
            spin_speed_deg: options.spin_speed_deg,
        }
    }

    /// Steps the animation by `dt` seconds. The pulse direction flips
    /// when the scale is at or past a bound, before the step is applied,
    /// so a single frame can overshoot by at most one step.
    pub fn advance(&mut self, dt: f32) {
        if self.scale <= self.pulse_min {
            self.growing = true;
        }
        if self.scale >= self.pulse_max {
            self.growing = false;
        }
        let step = self.pulse_speed * dt;
        if self.growing {
            self.scale += step;
        } else {
            self.scale -= step;
        }

        self.spin_deg += self.spin_speed_deg * dt;
        if self.spin_deg >= 360.0 {
            self.spin_deg -= 360.0;
        }
    }

    /// Current uniform scale factor.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Accumulated yaw in degrees, wrapped to a single turn.
    #[must_use]
    pub fn spin_deg(&self) -> f32 {
        self.spin_deg
    }

    /// Model matrix for the current pose: scale first, then yaw.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.spin_deg.to_radians())
            * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn heartbeat() -> Heartbeat {
        Heartbeat::new(&AnimationOptions::default())
    }

    #[test]
    fn pulse_starts_by_contracting() {
        let mut beat = heartbeat();
        let before = beat.scale();
        beat.advance(DT);
        assert!(
            beat.scale() < before,
            "Expected contraction from full scale, got {} -> {}",
            before,
            beat.scale()
        );
    }

    #[test]
    fn pulse_stays_near_bounds() {
        let options = AnimationOptions::default();
        let slack = options.pulse_speed * DT;
        let mut beat = heartbeat();

        // Several full pulse periods worth of frames.
        for _ in 0..10_000 {
            beat.advance(DT);
            assert!(
                beat.scale() >= options.pulse_min - slack
                    && beat.scale() <= options.pulse_max + slack,
                "Scale {} escaped [{}, {}]",
                beat.scale(),
                options.pulse_min,
                options.pulse_max
            );
        }
    }

    #[test]
    fn pulse_direction_flips_at_lower_bound() {
        let mut beat = heartbeat();

        // Contract until the lower bound is reached.
        while beat.scale() > AnimationOptions::default().pulse_min {
            beat.advance(DT);
        }

        let bottom = beat.scale();
        beat.advance(DT);
        assert!(
            beat.scale() > bottom,
            "Expected growth after hitting the lower bound, got {} -> {}",
            bottom,
            beat.scale()
        );
    }

    #[test]
    fn spin_accumulates_and_wraps() {
        let mut beat = heartbeat();

        beat.advance(1.0);
        assert!((beat.spin_deg() - 10.0).abs() < 1e-4);

        // 36.5 simulated seconds at 10 deg/s crosses a full turn.
        for _ in 0..355 {
            beat.advance(0.1);
        }
        assert!(
            beat.spin_deg() >= 0.0 && beat.spin_deg() < 360.0,
            "Spin {} not wrapped to a single turn",
            beat.spin_deg()
        );
        assert!((beat.spin_deg() - 5.0).abs() < 1e-2);
    }

    #[test]
    fn model_matrix_scales_then_rotates() {
        let mut beat = heartbeat();
        // Force a known pose: quarter turn at half scale.
        beat.spin_deg = 90.0;
        beat.scale = 0.5;

        let moved = beat.model_matrix().transform_point3(Vec3::X);
        assert!(
            moved.distance(Vec3::new(0.0, 0.0, -0.5)) < 1e-6,
            "Unexpected transform result {moved:?}"
        );
    }
}
