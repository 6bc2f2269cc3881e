use glam::{Mat4, Vec3};

/// Fixed near clip distance in world units.
pub const ZNEAR: f32 = 0.01;
/// Fixed far clip distance in world units.
pub const ZFAR: f32 = 100.0;

/// World vertical axis the yaw rotation and the basis derivation hang off.
const WORLD_UP: Vec3 = Vec3::Y;

/// Pitch never reaches the vertical, so the look direction cannot flip
/// through the world up axis.
const PITCH_LIMIT_DEG: f32 = 89.0;
const FOV_MIN_DEG: f32 = 1.0;
const FOV_MAX_DEG: f32 = 90.0;

/// Free-fly perspective camera driven by Euler angles.
///
/// Yaw, pitch, and field of view are stored in radians and exposed in
/// degrees. The front/right/up basis is recomputed from the angles on
/// every orientation change rather than integrated incrementally, so it
/// stays orthonormal and never drifts.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye position in world space, driven externally by movement input.
    pub position: Vec3,
    /// Viewport aspect ratio (width / height), supplied on resize.
    pub aspect: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    yaw: f32,
    pitch: f32,
    fov: f32,
}

impl Camera {
    /// Creates a camera at `position` looking down the negative Z axis
    /// (yaw −90°, pitch 0°) with a 90° field of view.
    #[must_use]
    pub fn new(position: Vec3, aspect: f32) -> Self {
        let mut camera = Self {
            position,
            aspect,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            yaw: (-90.0f32).to_radians(),
            pitch: 0.0,
            fov: 90.0f32.to_radians(),
        };
        camera.update_basis();
        camera
    }

    /// Unit look direction.
    #[must_use]
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Unit vector to the camera's right, orthogonal to `front`.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit up vector of the camera frame (not the world up).
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Yaw in degrees. Unbounded; grows with accumulated mouse travel.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw.to_degrees()
    }

    /// Sets yaw in degrees without wrapping and rebuilds the basis.
    pub fn set_yaw(&mut self, degrees: f32) {
        self.yaw = degrees.to_radians();
        self.update_basis();
    }

    /// Pitch in degrees.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch.to_degrees()
    }

    /// Sets pitch in degrees, clamped to ±89°, and rebuilds the basis.
    pub fn set_pitch(&mut self, degrees: f32) {
        self.pitch = degrees
            .clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG)
            .to_radians();
        self.update_basis();
    }

    /// Vertical field of view in degrees.
    #[must_use]
    pub fn fov(&self) -> f32 {
        self.fov.to_degrees()
    }

    /// Sets the field of view in degrees, clamped to [1°, 90°]. The basis
    /// is independent of fov, so nothing is rebuilt.
    pub fn set_fov(&mut self, degrees: f32) {
        self.fov = degrees.clamp(FOV_MIN_DEG, FOV_MAX_DEG).to_radians();
    }

    /// Look-at transform from the current position and orientation.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Perspective projection from the current fov and aspect ratio.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(self.fov, self.aspect, ZNEAR, ZFAR)
    }

    /// Rederives front/right/up from yaw and pitch.
    fn update_basis(&mut self) {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        self.front = Vec3::new(
            cos_pitch * cos_yaw,
            sin_pitch,
            cos_pitch * sin_yaw,
        )
        .normalize();
        // Pitch is clamped short of vertical, so front is never parallel
        // to WORLD_UP and both crosses are well defined.
        self.right = self.front.cross(WORLD_UP).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and eye position.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position, for specular lighting.
    pub position: [f32; 3],
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Creates a camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            _pad: 0.0,
        }
    }

    /// Refreshes the uniform from the camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        let view_proj = camera.projection_matrix() * camera.view_matrix();
        self.view_proj = view_proj.to_cols_array_2d();
        self.position = camera.position.to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_vec3_near(a: Vec3, b: Vec3) {
        assert!(
            (a - b).length() < EPS,
            "expected {b:?}, got {a:?}"
        );
    }

    #[test]
    fn default_orientation_looks_down_negative_z() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 1.2), 4.0 / 3.0);
        assert_vec3_near(camera.front(), Vec3::NEG_Z);
        assert_vec3_near(camera.right(), Vec3::X);
        assert_vec3_near(camera.up(), Vec3::Y);
    }

    #[test]
    fn pitch_clamps_to_vertical_limits() {
        let mut camera = Camera::new(Vec3::ZERO, 1.0);
        camera.set_pitch(120.0);
        assert!((camera.pitch() - 89.0).abs() < EPS);
        camera.set_pitch(-300.0);
        assert!((camera.pitch() + 89.0).abs() < EPS);
        camera.set_pitch(15.0);
        assert!((camera.pitch() - 15.0).abs() < EPS);
    }

    #[test]
    fn fov_clamps_to_valid_range() {
        let mut camera = Camera::new(Vec3::ZERO, 1.0);
        camera.set_fov(0.0);
        assert!((camera.fov() - 1.0).abs() < EPS);
        camera.set_fov(170.0);
        assert!((camera.fov() - 90.0).abs() < EPS);
        camera.set_fov(45.0);
        assert!((camera.fov() - 45.0).abs() < EPS);
    }

    #[test]
    fn yaw_is_unbounded() {
        let mut camera = Camera::new(Vec3::ZERO, 1.0);
        camera.set_yaw(725.0);
        assert!((camera.yaw() - 725.0).abs() < 1e-3);
        camera.set_yaw(-1234.5);
        assert!((camera.yaw() + 1234.5).abs() < 1e-3);
    }

    #[test]
    fn basis_stays_orthonormal_across_angles() {
        let mut camera = Camera::new(Vec3::ZERO, 1.0);
        for yaw_step in 0..12 {
            for pitch_step in -4..=4 {
                camera.set_yaw(yaw_step as f32 * 65.0 - 400.0);
                camera.set_pitch(pitch_step as f32 * 21.0);
                let (f, r, u) = (camera.front(), camera.right(), camera.up());
                assert!((f.length() - 1.0).abs() < EPS);
                assert!((r.length() - 1.0).abs() < EPS);
                assert!((u.length() - 1.0).abs() < EPS);
                assert!(f.dot(r).abs() < EPS);
                assert!(f.dot(u).abs() < EPS);
                assert!(r.dot(u).abs() < EPS);
                // Right-handed frame: right × up points backward.
                assert_vec3_near(r.cross(u), -f);
            }
        }
    }

    #[test]
    fn view_matrix_is_idempotent() {
        let mut camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), 1.5);
        camera.set_yaw(-37.0);
        camera.set_pitch(12.0);
        assert_eq!(camera.view_matrix(), camera.view_matrix());
    }

    #[test]
    fn projection_matrix_is_idempotent_and_tracks_fov() {
        let mut camera = Camera::new(Vec3::ZERO, 1.5);
        assert_eq!(camera.projection_matrix(), camera.projection_matrix());
        let wide = camera.projection_matrix();
        camera.set_fov(30.0);
        assert_ne!(wide, camera.projection_matrix());
    }

    #[test]
    fn uniform_tracks_camera_state() {
        let mut camera = Camera::new(Vec3::new(0.5, -1.0, 2.0), 1.25);
        camera.set_yaw(-120.0);
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);
        let expected = camera.projection_matrix() * camera.view_matrix();
        assert_eq!(uniform.view_proj, expected.to_cols_array_2d());
        assert_eq!(uniform.position, [0.5, -1.0, 2.0]);
    }
}
