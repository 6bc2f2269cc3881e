//! Indexed draw pass for the heart mesh.
//!
//! Owns the render pipeline, the vertex/index buffers built from the
//! parsed mesh, and the model-transform and material uniforms. The camera
//! and spotlight bind groups are external so the engine can update them
//! independently of the geometry.

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;
use crate::material::{Material, MaterialUniform};
use crate::mesh::TriangleMesh;
use crate::renderer::pipeline_util;

// ==================== VERTEX FORMAT ====================

/// 24-byte vertex matching the interleaved mesh layout: position then
/// normal.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct HeartVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

pub(crate) fn heart_vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static>
{
    wgpu::VertexBufferLayout {
        array_stride: size_of::<HeartVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1,
            },
        ],
    }
}

// ==================== UNIFORMS ====================

/// Per-frame model transform pair.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    /// Object-to-world transform.
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of `model`, which carries normals to world space
    /// correctly even under non-uniform scale.
    pub normal: [[f32; 4]; 4],
}

impl ModelUniform {
    /// Derives the uniform pair from an object-to-world matrix.
    #[must_use]
    pub fn from_model(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal: model.inverse().transpose().to_cols_array_2d(),
        }
    }
}

// ==================== DRAW PASS ====================

/// The heart draw pass: pipeline, mesh buffers, model/material uniforms.
pub struct HeartRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    material_buffer: wgpu::Buffer,
    material_bind_group: wgpu::BindGroup,
}

impl HeartRenderer {
    /// Uploads the mesh and the startup material and builds the forward
    /// pipeline against the camera and spotlight layouts.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        light_layout: &wgpu::BindGroupLayout,
        mesh: &TriangleMesh,
        material: &Material,
    ) -> Self {
        let interleaved = mesh.interleaved();
        let vertex_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Heart Vertex Buffer"),
                contents: bytemuck::cast_slice(&interleaved),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );
        let index_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Heart Index Buffer"),
                contents: bytemuck::cast_slice(&mesh.triangle_indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        let model_uniform = ModelUniform::from_model(Mat4::IDENTITY);
        let model_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Model Buffer"),
                contents: bytemuck::cast_slice(&[model_uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );
        let model_layout = uniform_layout(
            context,
            "Model Bind Group Layout",
            wgpu::ShaderStages::VERTEX,
        );
        let model_bind_group = uniform_bind_group(
            context,
            "Model Bind Group",
            &model_layout,
            &model_buffer,
        );

        let material_uniform = MaterialUniform::from(material);
        let material_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Material Buffer"),
                contents: bytemuck::cast_slice(&[material_uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );
        let material_layout = uniform_layout(
            context,
            "Material Bind Group Layout",
            wgpu::ShaderStages::FRAGMENT,
        );
        let material_bind_group = uniform_bind_group(
            context,
            "Material Bind Group",
            &material_layout,
            &material_buffer,
        );

        let pipeline = create_heart_pipeline(
            context,
            "Heart Pipeline",
            &[
                camera_layout,
                light_layout,
                &model_layout,
                &material_layout,
            ],
            heart_vertex_buffer_layout(),
        );

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: mesh.triangle_indices.len() as u32,
            model_buffer,
            model_bind_group,
            material_buffer,
            material_bind_group,
        }
    }

    /// Uploads a new object-to-world transform.
    pub fn write_model(&self, queue: &wgpu::Queue, model: Mat4) {
        let uniform = ModelUniform::from_model(model);
        queue.write_buffer(
            &self.model_buffer,
            0,
            bytemuck::cast_slice(&[uniform]),
        );
    }

    /// Uploads a new material.
    pub fn write_material(&self, queue: &wgpu::Queue, material: &Material) {
        let uniform = MaterialUniform::from(material);
        queue.write_buffer(
            &self.material_buffer,
            0,
            bytemuck::cast_slice(&[uniform]),
        );
    }

    /// Records the heart draw into `render_pass`.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
        light_bind_group: &'a wgpu::BindGroup,
    ) {
        if self.index_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, light_bind_group, &[]);
        render_pass.set_bind_group(2, &self.model_bind_group, &[]);
        render_pass.set_bind_group(3, &self.material_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Single-entry uniform bind group layout.
fn uniform_layout(
    context: &RenderContext,
    label: &str,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayout {
    context
        .device
        .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
}

fn uniform_bind_group(
    context: &RenderContext,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    context
        .device
        .create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        })
}

/// Create the forward render pipeline for the heart pass.
fn create_heart_pipeline(
    context: &RenderContext,
    label: &str,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    vertex_layout: wgpu::VertexBufferLayout<'static>,
) -> wgpu::RenderPipeline {
    let shader =
        context
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(label),
                source: wgpu::ShaderSource::Wgsl(
                    include_str!("../../assets/shaders/heart.wgsl").into(),
                ),
            });

    let pipeline_layout = context.device.create_pipeline_layout(
        &wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{label} Layout")),
            bind_group_layouts,
            push_constant_ranges: &[],
        },
    );

    context
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &pipeline_util::surface_fragment_targets(
                    context.format(),
                ),
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(pipeline_util::depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn vertex_layout_matches_interleaved_stride() {
        let layout = heart_vertex_buffer_layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 12);
    }

    #[test]
    fn rotation_keeps_normal_matrix_equal_to_model() {
        let model = Mat4::from_rotation_y(1.1);
        let uniform = ModelUniform::from_model(model);
        for (a, b) in uniform
            .model
            .iter()
            .flatten()
            .zip(uniform.normal.iter().flatten())
        {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn scale_inverts_in_normal_matrix() {
        let uniform =
            ModelUniform::from_model(Mat4::from_scale(Vec3::splat(2.0)));
        let normal = Mat4::from_cols_array_2d(&uniform.normal);
        let carried = normal * Vec4::new(0.0, 1.0, 0.0, 0.0);
        assert!((carried.y - 0.5).abs() < 1e-6);
    }
}
