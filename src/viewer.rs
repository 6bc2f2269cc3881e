//! Standalone heart window backed by winit.
//!
//! Grabs and hides the cursor for FPS-style mouse look, and forwards
//! window events to the engine.
//!
//! ```no_run
//! # use redheart::Viewer;
//! Viewer::builder()
//!     .with_path("assets/models/heart.obj")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::{
    engine::DEFAULT_MODEL_PATH, error::HeartError, options::Options,
    HeartRenderEngine, InputEvent, KeyAction, MovementKey,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    path: Option<String>,
    options: Option<Options>,
    title: String,
    size: (u32, u32),
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "Red Heart", the
    /// bundled model, default options, a 1024x768 window).
    fn new() -> Self {
        Self {
            path: None,
            options: None,
            title: "Red Heart".into(),
            size: (1024, 768),
        }
    }

    /// Set the model file path (`.obj`).
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            path: self.path,
            options: self.options,
            title: self.title,
            size: self.size,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the pulsing heart.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    path: Option<String>,
    options: Option<Options>,
    title: String,
    size: (u32, u32),
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`HeartError`] if the event loop cannot be created or exits
    /// abnormally.
    pub fn run(self) -> Result<(), HeartError> {
        let event_loop =
            EventLoop::new().map_err(|e| HeartError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            path: self.path,
            options: self.options,
            title: self.title,
            size: self.size,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| HeartError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<HeartRenderEngine>,
    path: Option<String>,
    options: Option<Options>,
    title: String,
    size: (u32, u32),
}

/// Compute the wgpu surface size from window dimensions.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

/// Capture and hide the cursor for mouse look. Confined grabs are
/// preferred; compositors that only support locked grabs get those.
fn grab_cursor(window: &Window) {
    if let Err(e) = window
        .set_cursor_grab(CursorGrabMode::Confined)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
    {
        log::warn!("cursor grab unavailable: {e}");
    }
    window.set_cursor_visible(false);
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.size;
        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        grab_cursor(&window);

        let inner = window.inner_size();
        let (vp_w, vp_h) = viewport_size(inner);

        let model_path = self
            .path
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_owned());
        let options = self.options.take().unwrap_or_default();
        let engine_result = pollster::block_on(
            HeartRenderEngine::new_with_path(
                window.clone(),
                (vp_w, vp_h),
                Path::new(&model_path),
                options,
            ),
        );

        let engine = match engine_result {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(vp_w, vp_h);
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(engine) = &mut self.engine {
                    match engine.render() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            if let Some(w) = &self.window {
                                let inner = w.inner_size();
                                let (vp_w, vp_h) = viewport_size(inner);
                                engine.resize(vp_w, vp_h);
                            }
                        }
                        Err(e) => {
                            log::error!("render error: {:?}", e);
                        }
                    }
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(engine) = &mut self.engine {
                    #[allow(clippy::cast_possible_truncation)]
                    engine.handle_input(InputEvent::CursorMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    });
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let scroll_delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::Scroll {
                        delta: scroll_delta,
                    });
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::ModifiersChanged {
                        shift: modifiers.state().shift_key(),
                    });
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                use winit::keyboard::PhysicalKey;
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key_str = format!("{code:?}");
                let pressed = event.state == ElementState::Pressed;

                let Some(engine) = &mut self.engine else {
                    return;
                };

                // Movement keys track both edges; bound actions fire once
                // on press and ignore OS key repeat.
                if let Some(key) = MovementKey::from_code(&key_str) {
                    engine.handle_input(InputEvent::MovementKey {
                        key,
                        pressed,
                    });
                } else if pressed && !event.repeat {
                    if let Some(action) =
                        engine.options().keybindings.lookup(&key_str)
                    {
                        if action == KeyAction::Quit {
                            event_loop.exit();
                        } else {
                            action.execute(engine);
                        }
                    }
                }
            }

            _ => (),
        }
    }
}
