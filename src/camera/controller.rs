use glam::{Vec2, Vec3};
use wgpu::util::DeviceExt;

use crate::camera::core::{Camera, CameraUniform};
use crate::gpu::render_context::RenderContext;
use crate::input::MovementState;
use crate::options::CameraOptions;

/// Startup eye position, slightly in front of the model.
const START_EYE: Vec3 = Vec3::new(0.0, 0.0, 1.2);

/// Owns the camera, its GPU uniform resources, and the mapping from input
/// deltas onto camera state.
pub struct CameraController {
    /// Camera state driven by this controller.
    pub camera: Camera,
    /// CPU-side copy of the camera uniform.
    pub uniform: CameraUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout, shared with pipeline construction.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group binding the camera uniform.
    pub bind_group: wgpu::BindGroup,

    move_speed: f32,
    sprint_multiplier: f32,
    look_sensitivity: f32,
    zoom_step: f32,
}

impl CameraController {
    /// Creates the camera at the startup pose and allocates its uniform
    /// buffer and bind group on `context`'s device.
    #[must_use]
    pub fn new(context: &RenderContext, options: &CameraOptions) -> Self {
        let mut camera = Camera::new(
            START_EYE,
            context.config.width as f32 / context.config.height as f32,
        );
        camera.set_fov(options.fov);

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);

        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                    label: Some("Camera Bind Group"),
                });

        Self {
            camera,
            uniform,
            buffer,
            layout,
            bind_group,
            move_speed: options.move_speed,
            sprint_multiplier: options.sprint_multiplier,
            look_sensitivity: options.look_sensitivity,
            zoom_step: options.zoom_step,
        }
    }

    /// Applies a cursor delta as yaw/pitch rotation, in degrees per pixel.
    /// Upward cursor motion pitches the view up.
    pub fn look(&mut self, delta: Vec2) {
        self.camera
            .set_yaw(self.camera.yaw() + delta.x * self.look_sensitivity);
        self.camera
            .set_pitch(self.camera.pitch() - delta.y * self.look_sensitivity);
    }

    /// Integrates held movement keys over `dt` seconds.
    pub fn advance(&mut self, movement: &MovementState, dt: f32) {
        if movement.is_idle() {
            return;
        }
        self.camera.position += movement_delta(
            &self.camera,
            movement,
            self.move_speed,
            self.sprint_multiplier,
            dt,
        );
    }

    /// Narrows or widens the field of view from a scroll delta.
    pub fn zoom(&mut self, scroll: f32) {
        self.camera
            .set_fov(self.camera.fov() - self.zoom_step * scroll);
    }

    /// Updates the stored aspect ratio after a surface resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.aspect = width as f32 / height as f32;
    }

    /// Uploads the current view-projection and eye position to the GPU.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(&self.camera);
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }
}

/// Displacement for one frame of held-key movement. Opposing keys cancel;
/// diagonals are not normalized.
fn movement_delta(
    camera: &Camera,
    movement: &MovementState,
    move_speed: f32,
    sprint_multiplier: f32,
    dt: f32,
) -> Vec3 {
    let speed = if movement.sprint {
        move_speed * sprint_multiplier
    } else {
        move_speed
    };
    let mut delta = Vec3::ZERO;
    if movement.forward {
        delta += camera.front();
    }
    if movement.backward {
        delta -= camera.front();
    }
    if movement.right {
        delta += camera.right();
    }
    if movement.left {
        delta -= camera.right();
    }
    delta * speed * dt
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn forward_displacement_follows_front() {
        let camera = Camera::new(Vec3::ZERO, 1.0);
        let movement = MovementState {
            forward: true,
            ..Default::default()
        };
        let delta = movement_delta(&camera, &movement, 1.5, 2.0, 0.5);
        assert!((delta - Vec3::NEG_Z * 0.75).length() < EPS);
    }

    #[test]
    fn opposing_keys_cancel() {
        let camera = Camera::new(Vec3::ZERO, 1.0);
        let movement = MovementState {
            forward: true,
            backward: true,
            left: true,
            right: true,
            sprint: false,
        };
        let delta = movement_delta(&camera, &movement, 1.5, 2.0, 1.0);
        assert!(delta.length() < EPS);
    }

    #[test]
    fn sprint_scales_displacement() {
        let camera = Camera::new(Vec3::ZERO, 1.0);
        let walk = MovementState {
            right: true,
            ..Default::default()
        };
        let sprint = MovementState {
            right: true,
            sprint: true,
            ..Default::default()
        };
        let walked = movement_delta(&camera, &walk, 1.5, 2.0, 1.0);
        let sprinted = movement_delta(&camera, &sprint, 1.5, 2.0, 1.0);
        assert!((sprinted - walked * 2.0).length() < EPS);
    }

    #[test]
    fn diagonal_is_not_normalized() {
        let camera = Camera::new(Vec3::ZERO, 1.0);
        let movement = MovementState {
            forward: true,
            right: true,
            ..Default::default()
        };
        let delta = movement_delta(&camera, &movement, 1.0, 2.0, 1.0);
        assert!((delta.length() - 2.0f32.sqrt()).abs() < EPS);
    }
}
