//! Clipboard writes and the "copied" acknowledgement shared by the contact
//! modal and the standalone copy buttons.

use crate::frame::Clock;
use folio_core::{CopyFeedback, CopyLabels, FallbackView};
use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// `navigator.clipboard.writeText`, looked up at call time. A browser without
/// the API fails the same way a refused write does.
pub async fn write_text(text: &str) -> Result<(), JsValue> {
    let window = web::window().ok_or("no window")?;
    let navigator = window.navigator();
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err("clipboard API unavailable".into());
    }
    let write = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))?
        .dyn_into::<js_sys::Function>()?;
    let promise = write
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into::<js_sys::Promise>()?;
    JsFuture::from(promise).await?;
    Ok(())
}

pub fn open_fallback(view: &FallbackView) {
    let url = view.url_with(|s| String::from(js_sys::encode_uri_component(s)));
    let opened = web::window()
        .map(|w| w.open_with_url_and_target_and_features(&url, view.target, view.features));
    if let Some(Err(e)) = opened {
        log::warn!("[clipboard] fallback window failed: {:?}", e);
    }
}

/// Something that shows copy feedback on a label element.
pub trait CopySite: 'static {
    fn labels(&self) -> CopyLabels;
    fn feedback_mut(&mut self) -> &mut CopyFeedback;
    fn label_element(&self) -> Option<&web::Element>;
    fn reset_timer(&mut self) -> &mut Option<Timeout>;
    fn clock(&self) -> Clock;
    /// False once the site has gone away (e.g. the modal closed mid-write).
    fn accepts_feedback(&self) -> bool {
        true
    }

    fn refresh_label(&mut self) {
        let now = self.clock().now();
        let labels = self.labels();
        let label = self.feedback_mut().label(now, labels);
        if let Some(el) = self.label_element() {
            el.set_text_content(Some(label));
        }
    }
}

/// Write `text` and report back to `site`, which may be gone by then.
pub fn copy_to<S: CopySite>(site: Weak<RefCell<S>>, text: String) {
    spawn_local(async move {
        let result = write_text(&text).await;
        let Some(site_rc) = site.upgrade() else {
            return;
        };
        let mut s = site_rc.borrow_mut();
        match result {
            Ok(()) => {
                if !s.accepts_feedback() {
                    return;
                }
                let now = s.clock().now();
                s.feedback_mut().copy_succeeded(now);
                s.refresh_label();
                let weak = site.clone();
                let window_ms = CopyFeedback::WINDOW.as_millis() as u32;
                // replacing the previous timer cancels it
                *s.reset_timer() = Some(Timeout::new(window_ms, move || {
                    if let Some(site) = weak.upgrade() {
                        let mut s = site.borrow_mut();
                        s.feedback_mut().reset();
                        s.refresh_label();
                    }
                }));
            }
            Err(e) => {
                log::warn!("[clipboard] write failed: {:?}", e);
                let view = s.feedback_mut().copy_failed(&text);
                drop(s);
                open_fallback(&view);
            }
        }
    });
}
