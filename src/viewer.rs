//! Standalone story window backed by winit.
//!
//! The window drives a [`ScrollStory`] from native wheel, keyboard, touch and
//! cursor events and writes the composed transform into an in-memory
//! [`SceneGraph`] each frame. Rendering belongs to the host; the window title
//! shows the current stage and overlay text.
//!
//! ```no_run
//! # use scrollstage::Viewer;
//! Viewer::builder()
//!     .with_title("Scroll story")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    error::ViewerError,
    options::Options,
    scene::{NodeId, SceneGraph},
    util::frame_timing::FrameTiming,
    InputEvent, ScrollStory,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
    reduced_motion: bool,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "Scroll Stage",
    /// default options, full motion).
    fn new() -> Self {
        Self {
            options: None,
            title: "Scroll Stage".into(),
            reduced_motion: false,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title prefix.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Apply every transition immediately.
    #[must_use]
    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
            reduced_motion: self.reduced_motion,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that plays the scroll story.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
    reduced_motion: bool,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    pub fn run(self) -> Result<(), ViewerError> {
        let event_loop =
            EventLoop::new().map_err(|e| ViewerError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut scene = SceneGraph::new();
        let model_node = scene.add_node("logo", None);
        let companion_node = scene.add_node("ct_machine", None);

        let mut app = ViewerApp {
            window: None,
            story: ScrollStory::with_reduced_motion(
                &self.options,
                self.reduced_motion,
            ),
            timing: FrameTiming::new(),
            scene,
            model_node,
            companion_node,
            title: self.title,
            shown_title: String::new(),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| ViewerError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    story: ScrollStory,
    timing: FrameTiming,
    scene: SceneGraph,
    model_node: NodeId,
    companion_node: NodeId,
    title: String,
    /// Last title pushed to the window.
    shown_title: String,
}

impl ViewerApp {
    fn feed(&mut self, event: &InputEvent) {
        if let Some(outcome) = self.story.handle_input(event) {
            log::debug!("input step: {outcome:?}");
        }
    }

    fn frame_title(&self) -> String {
        let stage = self.story.current_stage().label();
        match self.story.presentation().visible_overlay() {
            Some(overlay) => format!("{} · {stage} · {}", self.title, overlay.text),
            None => format!("{} · {stage}", self.title),
        }
    }

    fn redraw(&mut self) {
        let tick = self.timing.tick();
        self.story.update(tick);
        self.story
            .sync_scene(&mut self.scene, self.model_node, Some(self.companion_node));

        let title = self.frame_title();
        if title != self.shown_title {
            if let Some(w) = &self.window {
                w.set_title(&title);
            }
            self.shown_title = title;
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        self.feed(&InputEvent::Resized {
            width: inner.width as f32,
            height: inner.height as f32,
        });

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            self.story.teardown();
            event_loop.exit();
            return;
        }

        if self.window.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                self.feed(&InputEvent::Resized {
                    width: size.width as f32,
                    height: size.height as f32,
                });
            }

            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::CursorEntered { .. } => {
                self.feed(&InputEvent::PointerEntered);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.feed(&InputEvent::PointerMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::CursorLeft { .. } => {
                self.feed(&InputEvent::PointerLeft);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.feed(&InputEvent::from(delta));
            }

            WindowEvent::Touch(touch) => {
                self.feed(&InputEvent::from(&touch));
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };

                let key_str = format!("{code:?}");
                if let Some(outcome) = self.story.handle_key(&key_str, event.repeat) {
                    log::debug!("key {key_str}: {outcome:?}");
                }
            }

            _ => (),
        }
    }
}
