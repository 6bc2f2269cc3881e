//! Spotlight state and GPU plumbing.
//!
//! The cone follows the camera like a headlamp until the user pins it;
//! while pinned the uniform freezes at the pose it was captured in, so
//! the user can walk around inside (or out of) the beam.

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;
use crate::options::LightingOptions;

/// Spotlight configuration uploaded to the fragment shader.
/// NOTE: Must match WGSL struct layout exactly (80 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpotlightUniform {
    /// Cone apex position in world space.
    pub position: [f32; 3],
    /// Cosine of the inner cone angle.
    pub cut_off: f32,
    /// Cone axis direction (normalized).
    pub direction: [f32; 3],
    /// Cosine of the outer cone angle, where intensity reaches zero.
    pub outer_cut_off: f32,
    /// Ambient intensity (rgb).
    pub ambient: [f32; 3],
    /// Constant attenuation coefficient.
    pub constant: f32,
    /// Diffuse intensity (rgb).
    pub diffuse: [f32; 3],
    /// Linear attenuation coefficient.
    pub linear: f32,
    /// Specular intensity (rgb).
    pub specular: [f32; 3],
    /// Quadratic attenuation coefficient.
    pub quadratic: f32,
}

impl SpotlightUniform {
    /// Builds the uniform from configured angles and intensities. Cone
    /// angles arrive in degrees and are stored as cosines, which is what
    /// the cone test compares against.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        Self {
            position: [0.0; 3],
            cut_off: options.cutoff_deg.to_radians().cos(),
            direction: Vec3::NEG_Z.to_array(),
            outer_cut_off: options.outer_cutoff_deg.to_radians().cos(),
            ambient: [options.ambient; 3],
            constant: options.attenuation_constant,
            diffuse: [options.diffuse; 3],
            linear: options.attenuation_linear,
            specular: [options.specular; 3],
            quadratic: options.attenuation_quadratic,
        }
    }

    /// Points the cone from `position` along `direction`.
    pub fn aim(&mut self, position: Vec3, direction: Vec3) {
        self.position = position.to_array();
        self.direction = direction.to_array();
    }
}

/// Spotlight uniform plus its GPU buffer and bind group.
pub struct Spotlight {
    /// CPU copy of the uniform.
    pub uniform: SpotlightUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout (group 1 in the forward pipeline).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group binding the uniform.
    pub bind_group: wgpu::BindGroup,
    pinned: bool,
}

impl Spotlight {
    /// Allocates the uniform buffer and bind group with configured
    /// intensities.
    #[must_use]
    pub fn new(context: &RenderContext, options: &LightingOptions) -> Self {
        let uniform = SpotlightUniform::from_options(options);

        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Spotlight Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Spotlight Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
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
                    label: Some("Spotlight Bind Group"),
                });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
            pinned: false,
        }
    }

    /// Uploads the current uniform state.
    pub fn update_gpu(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Aims the cone from the camera pose. No-op while pinned, which is
    /// exactly what freezes the beam in place.
    pub fn follow(&mut self, position: Vec3, direction: Vec3) {
        if self.pinned {
            return;
        }
        self.uniform.aim(position, direction);
    }

    /// Toggles pinning and returns the new state (`true` = frozen).
    pub fn toggle_pinned(&mut self) -> bool {
        self.pinned = !self.pinned;
        self.pinned
    }

    /// Whether the cone is currently frozen in place.
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_matches_wgsl_block_size() {
        assert_eq!(size_of::<SpotlightUniform>(), 80);
    }

    #[test]
    fn cone_angles_are_stored_as_cosines() {
        let uniform = SpotlightUniform::from_options(&LightingOptions::default());
        assert!((uniform.cut_off - 12.5f32.to_radians().cos()).abs() < 1e-6);
        assert!(
            (uniform.outer_cut_off - 32.5f32.to_radians().cos()).abs() < 1e-6
        );
        // Inner cone cosine is the larger of the two.
        assert!(uniform.cut_off > uniform.outer_cut_off);
    }

    #[test]
    fn intensities_splat_to_rgb() {
        let uniform = SpotlightUniform::from_options(&LightingOptions::default());
        assert_eq!(uniform.ambient, [0.2; 3]);
        assert_eq!(uniform.diffuse, [0.7; 3]);
        assert_eq!(uniform.specular, [1.0; 3]);
        assert_eq!(
            [uniform.constant, uniform.linear, uniform.quadratic],
            [1.0, 0.09, 0.032]
        );
    }

    #[test]
    fn aim_overwrites_pose() {
        let mut uniform =
            SpotlightUniform::from_options(&LightingOptions::default());
        uniform.aim(Vec3::new(1.0, 2.0, 3.0), Vec3::X);
        assert_eq!(uniform.position, [1.0, 2.0, 3.0]);
        assert_eq!(uniform.direction, [1.0, 0.0, 0.0]);
    }
}
