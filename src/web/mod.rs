//! Browser frontend.
//!
//! [`WebViewer`] binds a [`ScrollStory`] to a page: wheel, key and touch
//! listeners on the window, pointer listeners on the canvas, and a document
//! scroll lock held for as long as the viewer is alive. The page drives
//! frames from its own `requestAnimationFrame` loop and applies the returned
//! transform to whatever renderer it uses.
//!
//! ```js
//! const viewer = new WebViewer(canvas, optionsToml);
//! function loop(now) {
//!   const [x, y, z, rx, ry, rz, s] = viewer.frame(dt(now));
//!   // ...
//!   requestAnimationFrame(loop);
//! }
//! ```

mod scroll_lock;

use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::prelude::{wasm_bindgen, JsValue};
use wasm_bindgen::JsCast;
use web_sys::{
    Event, EventTarget, HtmlCanvasElement, KeyboardEvent, PointerEvent,
    TouchEvent, WheelEvent,
};

use self::scroll_lock::ScrollLock;
use crate::control::ControlField;
use crate::error::ViewerError;
use crate::input::{DeltaMode, InputEvent};
use crate::options::Options;
use crate::util::frame_timing::FrameTick;
use crate::ScrollStory;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Install the panic hook and route `log` to the browser console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

impl From<ViewerError> for JsValue {
    fn from(e: ViewerError) -> Self {
        Self::from_str(&e.to_string())
    }
}

/// Whether the page asked for reduced motion. Read once at construction.
fn prefers_reduced_motion(window: &web_sys::Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .is_some_and(|query| web_sys::MediaQueryList::matches(&query))
}

/// Scroll story bound to a browser page.
#[wasm_bindgen]
pub struct WebViewer {
    story: Rc<RefCell<ScrollStory>>,
    listeners: Vec<EventListener>,
    scroll_lock: Option<ScrollLock>,
    elapsed: f32,
}

#[wasm_bindgen]
impl WebViewer {
    /// Attach to `canvas`. `options_toml` overrides the default options.
    #[wasm_bindgen(constructor)]
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(
        canvas: &HtmlCanvasElement,
        options_toml: Option<String>,
    ) -> Result<Self, JsValue> {
        let window = web_sys::window()
            .ok_or_else(|| ViewerError::Web("no global window".into()))?;
        let options = match options_toml {
            Some(text) => Options::from_toml_str(&text)?,
            None => Options::default(),
        };

        let reduced_motion = prefers_reduced_motion(&window);
        let story = Rc::new(RefCell::new(ScrollStory::with_reduced_motion(
            &options,
            reduced_motion,
        )));
        feed(&story, &canvas_size(canvas), None);

        let scroll_lock = match ScrollLock::acquire(&window) {
            Ok(lock) => Some(lock),
            Err(e) => {
                log::warn!("document scroll left unlocked: {e}");
                None
            }
        };

        let mut viewer = Self {
            story,
            listeners: Vec::new(),
            scroll_lock,
            elapsed: 0.0,
        };
        viewer.install_listeners(&window, canvas);
        log::info!(
            "web viewer attached ({} listeners)",
            viewer.listeners.len()
        );
        Ok(viewer)
    }

    /// Run one frame with the host-measured `dt` in seconds and return the
    /// composed transform as `[x, y, z, rx, ry, rz, scale]`.
    pub fn frame(&mut self, dt: f32) -> Vec<f32> {
        let Ok(mut story) = self.story.try_borrow_mut() else {
            return Vec::new();
        };
        let tick = FrameTick::from_host_delta(self.elapsed, dt);
        self.elapsed += tick.delta;
        story.update(tick);
        story.model().to_array().to_vec()
    }

    /// Overlays that are not fully hidden, as a JSON array.
    #[wasm_bindgen(js_name = overlayJson)]
    pub fn overlay_json(&self) -> String {
        self.story.try_borrow().map_or_else(
            |_| "[]".to_owned(),
            |story| {
                serde_json::to_string(&story.presentation().views())
                    .unwrap_or_else(|_| "[]".to_owned())
            },
        )
    }

    /// Companion pose and opacity, as a JSON object.
    #[wasm_bindgen(js_name = companionState)]
    pub fn companion_state(&self) -> String {
        let Ok(story) = self.story.try_borrow() else {
            return "null".to_owned();
        };
        let companion = story.companion();
        let pose = companion.pose();
        serde_json::json!({
            "position": pose.position.to_array(),
            "rotation_deg": pose.rotation_degrees().to_array(),
            "scale": pose.scale,
            "opacity": companion.opacity(),
            "visible": companion.is_visible(),
        })
        .to_string()
    }

    /// Label of the last committed stage.
    #[wasm_bindgen(js_name = currentStage)]
    pub fn current_stage(&self) -> String {
        self.story
            .try_borrow()
            .map(|story| story.current_stage().label().to_owned())
            .unwrap_or_default()
    }

    /// Whether a transition is in flight.
    #[wasm_bindgen(js_name = isTransitioning)]
    pub fn is_transitioning(&self) -> bool {
        self.story
            .try_borrow()
            .is_ok_and(|story| story.is_transitioning())
    }

    /// Apply free-form control input. `panel` is `"logo"` or `"companion"`,
    /// `field` a name like `"rotation.y"`.
    #[wasm_bindgen(js_name = setControl)]
    pub fn set_control(
        &self,
        panel: &str,
        field: &str,
        text: &str,
    ) -> Result<(), JsValue> {
        let field = parse_field(field)?;
        let mut story = self.borrow_story()?;
        let result = match panel {
            "logo" => story.input_edit(field, text),
            "companion" => story.companion_input_edit(field, text),
            _ => return Err(unknown_panel(panel)),
        };
        result.map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Apply a slider value, snapped to the panel's range and step.
    /// Rotation values are in degrees.
    #[wasm_bindgen(js_name = setSlider)]
    pub fn set_slider(
        &self,
        panel: &str,
        field: &str,
        value: f32,
    ) -> Result<(), JsValue> {
        let field = parse_field(field)?;
        let mut story = self.borrow_story()?;
        let result = match panel {
            "logo" => story.slider_edit(field, value),
            "companion" => story.companion_slider_edit(field, value),
            _ => return Err(unknown_panel(panel)),
        };
        result.map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Return the companion to its default pose.
    #[wasm_bindgen(js_name = resetCompanion)]
    pub fn reset_companion(&self) {
        if let Ok(mut story) = self.story.try_borrow_mut() {
            story.reset_companion();
        }
    }

    /// Detach every listener, release the scroll lock and stop the story.
    pub fn teardown(&mut self) {
        self.listeners.clear();
        self.scroll_lock = None;
        if let Ok(mut story) = self.story.try_borrow_mut() {
            story.teardown();
        }
    }
}

impl WebViewer {
    fn borrow_story(&self) -> Result<RefMut<'_, ScrollStory>, JsValue> {
        self.story
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("viewer busy"))
    }

    fn install_listeners(
        &mut self,
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
    ) {
        let story = Rc::clone(&self.story);
        self.listen(window, "wheel", move |event| {
            let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            let input = InputEvent::Wheel {
                delta_y: wheel.delta_y() as f32,
                mode: DeltaMode::from_dom(wheel.delta_mode()),
            };
            feed(&story, &input, Some(event));
        });

        let story = Rc::clone(&self.story);
        self.listen(window, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let Ok(mut story) = story.try_borrow_mut() else {
                return;
            };
            let code = key.code();
            if story.prevents_default_key(&code) {
                event.prevent_default();
            }
            let _ = story.handle_key(&code, key.repeat());
        });

        for name in ["touchstart", "touchmove"] {
            let story = Rc::clone(&self.story);
            self.listen(window, name, move |event| {
                let Some(touch) = event
                    .dyn_ref::<TouchEvent>()
                    .and_then(|t| t.touches().get(0))
                else {
                    return;
                };
                let y = touch.client_y() as f32;
                let input = if event.type_() == "touchstart" {
                    InputEvent::TouchStart { y }
                } else {
                    InputEvent::TouchMove { y }
                };
                feed(&story, &input, Some(event));
            });
        }

        for name in ["touchend", "touchcancel"] {
            let story = Rc::clone(&self.story);
            self.listen(window, name, move |event| {
                feed(&story, &InputEvent::TouchEnd, Some(event));
            });
        }

        let story = Rc::clone(&self.story);
        let target = canvas.clone();
        self.listen(window, "resize", move |_| {
            feed(&story, &canvas_size(&target), None);
        });

        let story = Rc::clone(&self.story);
        self.listen(canvas, "pointerenter", move |_| {
            feed(&story, &InputEvent::PointerEntered, None);
        });

        let story = Rc::clone(&self.story);
        let target = canvas.clone();
        self.listen(canvas, "pointermove", move |event| {
            let Some(pointer) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let rect = target.get_bounding_client_rect();
            let input = InputEvent::PointerMoved {
                x: (f64::from(pointer.client_x()) - rect.left()) as f32,
                y: (f64::from(pointer.client_y()) - rect.top()) as f32,
            };
            feed(&story, &input, None);
        });

        let story = Rc::clone(&self.story);
        self.listen(canvas, "pointerleave", move |_| {
            feed(&story, &InputEvent::PointerLeft, None);
        });
    }

    /// Register a non-passive listener so the handler may cancel the
    /// browser default.
    fn listen<F>(&mut self, target: &EventTarget, name: &'static str, callback: F)
    where
        F: FnMut(&Event) + 'static,
    {
        self.listeners.push(EventListener::new_with_options(
            target,
            name,
            EventListenerOptions::enable_prevent_default(),
            callback,
        ));
    }
}

/// Route one event into the story, cancelling the browser default when the
/// story consumes it.
fn feed(story: &Rc<RefCell<ScrollStory>>, input: &InputEvent, raw: Option<&Event>) {
    let Ok(mut story) = story.try_borrow_mut() else {
        return;
    };
    if let Some(raw) = raw {
        if story.prevents_default(input) {
            raw.prevent_default();
        }
    }
    if let Some(outcome) = story.handle_input(input) {
        log::debug!("input step: {outcome:?}");
    }
}

fn parse_field(name: &str) -> Result<ControlField, JsValue> {
    ControlField::parse(name)
        .ok_or_else(|| JsValue::from_str(&format!("unknown control: {name}")))
}

fn unknown_panel(panel: &str) -> JsValue {
    JsValue::from_str(&format!("unknown panel: {panel}"))
}

fn canvas_size(canvas: &HtmlCanvasElement) -> InputEvent {
    InputEvent::Resized {
        width: canvas.client_width() as f32,
        height: canvas.client_height() as f32,
    }
}
