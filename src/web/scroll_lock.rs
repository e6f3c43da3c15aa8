use wasm_bindgen::JsValue;
use web_sys::HtmlElement;

use crate::error::ViewerError;

/// Hides document overflow while held; restores the previous value on drop.
pub(super) struct ScrollLock {
    body: HtmlElement,
    previous: String,
}

impl ScrollLock {
    pub(super) fn acquire(window: &web_sys::Window) -> Result<Self, ViewerError> {
        let body = window
            .document()
            .ok_or_else(|| ViewerError::Web("window has no document".into()))?
            .body()
            .ok_or_else(|| ViewerError::Web("document has no body".into()))?;
        let style = body.style();
        let previous = style.get_property_value("overflow").map_err(js_error)?;
        style.set_property("overflow", "hidden").map_err(js_error)?;
        Ok(Self { body, previous })
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        let style = self.body.style();
        let restored = if self.previous.is_empty() {
            style.remove_property("overflow").map(drop)
        } else {
            style.set_property("overflow", &self.previous)
        };
        if restored.is_err() {
            log::warn!("failed to restore document overflow");
        }
    }
}

fn js_error(value: JsValue) -> ViewerError {
    ViewerError::Web(format!("{value:?}"))
}
