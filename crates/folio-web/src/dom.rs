use anyhow::anyhow;
use folio_core::lanyard::{css_to_device, device_pixels};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow!(format!("{:?}", e))
}

/// Attribute lookup closure in the shape the core `from_attributes` parsers take.
pub fn attr_lookup(el: &web::Element) -> impl Fn(&str) -> Option<String> + '_ {
    move |name| el.get_attribute(name)
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<Option<web::HtmlCanvasElement>> {
    let Some(el) = document.get_element_by_id(id) else {
        return Ok(None);
    };
    let canvas = el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow!("#{id} is not a canvas"))?;
    Ok(Some(canvas))
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or_else(|| anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(js_err)
}

/// Window inner size in CSS pixels.
pub fn viewport_size() -> (f64, f64) {
    let Some(w) = web::window() else {
        return (1.0, 1.0);
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    (width, height)
}

/// Backing store matches the window in CSS pixels; the effects draw in that space.
pub fn fit_canvas_to_viewport(canvas: &web::HtmlCanvasElement) -> (f64, f64) {
    let (w, h) = viewport_size();
    canvas.set_width((w as u32).max(1));
    canvas.set_height((h as u32).max(1));
    (w, h)
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window()
        .map(|w| w.device_pixel_ratio())
        .filter(|dpr| *dpr > 0.0)
        .unwrap_or(1.0)
}

/// Backing store in device pixels; returns that size. Pointer offsets (CSS
/// pixels) go through [`css_to_backing`] to land in the same space.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (f64, f64) {
    let dpr = device_pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    let w_px = device_pixels(rect.width(), dpr);
    let h_px = device_pixels(rect.height(), dpr);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    (w_px as f64, h_px as f64)
}

#[inline]
pub fn css_to_backing(css: Vec2) -> Vec2 {
    css_to_device(css, device_pixel_ratio() as f32)
}

/// `(tag, role)` for the element and each ancestor, innermost first.
pub fn ancestor_chain(start: Option<web::Element>) -> Vec<(String, Option<String>)> {
    let mut chain = Vec::new();
    let mut cur = start;
    while let Some(el) = cur {
        chain.push((el.tag_name().to_ascii_lowercase(), el.get_attribute("role")));
        cur = el.parent_element();
    }
    chain
}

pub fn event_target_element(ev: &web::Event) -> Option<web::Element> {
    ev.target().and_then(|t| t.dyn_into::<web::Element>().ok())
}

pub fn create_element(
    document: &web::Document,
    tag: &str,
    attrs: &[(&str, &str)],
    text: Option<&str>,
) -> anyhow::Result<web::Element> {
    let el = document.create_element(tag).map_err(js_err)?;
    for (name, value) in attrs {
        el.set_attribute(name, value).map_err(js_err)?;
    }
    if text.is_some() {
        el.set_text_content(text);
    }
    Ok(el)
}
