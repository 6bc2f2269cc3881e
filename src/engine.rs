//! The heart render engine.
//!
//! Owns the GPU context, camera, spotlight, mesh renderer, and animation
//! state, and drives the per-frame loop the windowing shell calls into.

use std::path::Path;

use glam::Vec2;

use crate::animation::Heartbeat;
use crate::camera::controller::CameraController;
use crate::error::HeartError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::DepthTexture;
use crate::input::{InputEvent, KeyAction, MouseLook, MovementState};
use crate::lighting::Spotlight;
use crate::mesh::TriangleMesh;
use crate::options::Options;
use crate::renderer::HeartRenderer;
use crate::util::frame_timing::FrameTiming;

/// Target FPS limit
const TARGET_FPS: u32 = 300;

/// Bundled heart model, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "assets/models/heart.obj";

/// Clear color behind the heart (dark gray, linear space).
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.02,
    a: 1.0,
};

/// The rendering engine for the pulsing heart.
///
/// # Construction
///
/// Use [`HeartRenderEngine::new`] for the bundled model or
/// [`HeartRenderEngine::new_with_path`] to load a specific `.obj` file.
///
/// # Frame loop
///
/// Each frame, call [`render`](Self::render) to step the animation, draw,
/// and present. Call [`resize`](Self::resize) when the window size changes.
/// Input is forwarded via [`handle_input`](Self::handle_input); discrete
/// actions go through [`KeyAction::execute`].
pub struct HeartRenderEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    /// Free-fly camera and its GPU uniform.
    pub camera_controller: CameraController,
    /// Spotlight uniform, bind group, and pin state.
    pub spotlight: Spotlight,
    /// Heart mesh pipeline and buffers.
    renderer: HeartRenderer,
    /// Pulse and spin animation state.
    heartbeat: Heartbeat,
    /// Movement keys currently held.
    movement: MovementState,
    /// Cursor tracking for mouse look deltas.
    mouse: MouseLook,
    /// Runtime options the engine was built with.
    options: Options,
    /// Index of the active material swatch.
    material_index: usize,
    /// Depth buffer matching the surface size.
    depth: DepthTexture,
    /// Per-frame timing and FPS tracking.
    frame_timing: FrameTiming,
}

// =============================================================================
// Core
// =============================================================================

impl HeartRenderEngine {
    /// Engine with the bundled heart model and default options.
    ///
    /// # Errors
    ///
    /// Returns [`HeartError`] if GPU initialization or model loading fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
    ) -> Result<Self, HeartError> {
        Self::new_with_path(
            window,
            size,
            Path::new(DEFAULT_MODEL_PATH),
            Options::default(),
        )
        .await
    }

    /// Engine with a specified model path and options.
    ///
    /// # Errors
    ///
    /// Returns [`HeartError`] if GPU initialization or model loading fails.
    pub async fn new_with_path(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        model_path: &Path,
        options: Options,
    ) -> Result<Self, HeartError> {
        let context = RenderContext::new(window, size).await?;
        let mesh = TriangleMesh::from_obj_file(model_path)?;
        Self::init_with_context(context, &mesh, options)
    }

    /// Shared construction logic once the GPU context and mesh exist.
    fn init_with_context(
        context: RenderContext,
        mesh: &TriangleMesh,
        options: Options,
    ) -> Result<Self, HeartError> {
        let camera_controller =
            CameraController::new(&context, &options.camera);
        let mut spotlight = Spotlight::new(&context, &options.lighting);
        let material = options.materials.swatch(0).ok_or_else(|| {
            HeartError::OptionsParse(
                "material swatch table is empty".to_owned(),
            )
        })?;
        let renderer = HeartRenderer::new(
            &context,
            &camera_controller.layout,
            &spotlight.layout,
            mesh,
            material,
        );
        let depth = DepthTexture::new(
            &context.device,
            context.config.width,
            context.config.height,
        );

        // Aim the beam from the starting pose so the first frame is lit.
        spotlight.follow(
            camera_controller.camera.position,
            camera_controller.camera.front(),
        );

        log::info!(
            "engine ready: {} triangles, material \"{}\"",
            mesh.triangle_count(),
            material.name
        );

        Ok(Self {
            context,
            camera_controller,
            spotlight,
            renderer,
            heartbeat: Heartbeat::new(&options.animation),
            movement: MovementState::default(),
            mouse: MouseLook::new(),
            options,
            material_index: 0,
            depth,
            frame_timing: FrameTiming::new(TARGET_FPS),
        })
    }

    /// Per-frame updates: animation ticks, camera integration, uniform
    /// uploads.
    fn pre_render(&mut self) {
        let dt = self.frame_timing.delta();

        self.heartbeat.advance(dt);
        self.camera_controller.advance(&self.movement, dt);

        // Headlamp mode: the beam tracks the camera until pinned.
        self.spotlight.follow(
            self.camera_controller.camera.position,
            self.camera_controller.camera.front(),
        );

        self.camera_controller.update_gpu(&self.context.queue);
        self.spotlight.update_gpu(&self.context.queue);
        self.renderer
            .write_model(&self.context.queue, self.heartbeat.model_matrix());
    }

    /// Encode the forward pass: clear color and depth, then draw the heart.
    fn encode_heart_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    ) {
        let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("heart render pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                },
            ),
            ..Default::default()
        });

        self.renderer.draw(
            &mut rp,
            &self.camera_controller.bind_group,
            &self.spotlight.bind_group,
        );
    }

    /// Execute one frame: step animation and camera, draw, and present.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // Check if we should render based on FPS limit
        if !self.frame_timing.should_render() {
            return Ok(());
        }

        self.pre_render();

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();
        self.encode_heart_pass(&mut encoder, &view);
        self.context.submit(encoder);
        frame.present();

        self.frame_timing.end_frame();

        Ok(())
    }

    /// Resize the surface, camera projection, and depth buffer to match the
    /// new window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.context.resize(width, height);
            self.camera_controller.resize(width, height);
            self.depth =
                DepthTexture::new(&self.context.device, width, height);
        }
    }
}

// =============================================================================
// Input
// =============================================================================

impl HeartRenderEngine {
    /// Process a platform-agnostic input event.
    ///
    /// This is the primary input entry point. Consumers forward raw window
    /// events as [`InputEvent`] variants; the engine internally dispatches
    /// to mouse look, scroll zoom, and held movement keys.
    ///
    /// # Example
    ///
    /// ```ignore
    /// engine.handle_input(InputEvent::CursorMoved { x, y });
    /// engine.handle_input(InputEvent::Scroll { delta: 1.0 });
    /// ```
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::CursorMoved { x, y } => {
                let (dx, dy) = self.mouse.observe(x, y);
                self.camera_controller.look(Vec2::new(dx, dy));
            }
            InputEvent::Scroll { delta } => {
                self.camera_controller.zoom(delta);
            }
            InputEvent::MovementKey { key, pressed } => {
                self.movement.apply(key, pressed);
            }
            InputEvent::ModifiersChanged { shift } => {
                self.movement.sprint = shift;
            }
        }
    }

    /// Switch the heart to the next material swatch, wrapping at the end of
    /// the table.
    pub fn cycle_material(&mut self) {
        self.material_index =
            self.options.materials.next_index(self.material_index);
        if let Some(material) =
            self.options.materials.swatch(self.material_index)
        {
            self.renderer
                .write_material(&self.context.queue, material);
            log::debug!("material: {}", material.name);
        }
    }

    /// Runtime options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }
}

// =============================================================================
// KeyAction execution
// =============================================================================

impl KeyAction {
    /// Execute this action on the given engine.
    pub fn execute(self, engine: &mut HeartRenderEngine) {
        match self {
            Self::PinSpotlight => {
                let pinned = engine.spotlight.toggle_pinned();
                log::info!(
                    "spotlight {}",
                    if pinned {
                        "pinned in place"
                    } else {
                        "following camera"
                    }
                );
            }
            Self::CycleMaterial => engine.cycle_material(),
            // Quit is handled by the windowing shell, which owns the loop.
            Self::Quit => {}
        }
    }
}
