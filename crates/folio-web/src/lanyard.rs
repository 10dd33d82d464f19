use crate::constants::*;
use crate::dom::{self, js_err};
use crate::frame::AnimationLoop;
use crate::paint::{self, Ctx};
use anyhow::anyhow;
use folio_core::lanyard::{
    is_sandboxed_preview, ndc_to_pixel, pixel_to_ndc, Band, CursorHint, LanyardConfig, RapierWorld,
};
use glam::{Vec2, Vec3};
use gloo::events::EventListener;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Element this component appended; removed again on drop.
struct Attached(web::Element);

impl Drop for Attached {
    fn drop(&mut self) {
        self.0.remove();
    }
}

/// `document.body.style.cursor` while the card is hovered; back to `auto`
/// when the hover ends or the badge is dropped.
struct BodyCursor {
    body: Option<web::HtmlElement>,
    current: Option<CursorHint>,
}

impl BodyCursor {
    fn set(&mut self, hint: Option<CursorHint>) {
        if hint == self.current {
            return;
        }
        self.current = hint;
        if let Some(body) = &self.body {
            let _ = body
                .style()
                .set_property("cursor", hint.map(CursorHint::css).unwrap_or("auto"));
        }
    }
}

impl Drop for BodyCursor {
    fn drop(&mut self) {
        self.set(None);
    }
}

struct Scene {
    band: Band<RapierWorld>,
    pointer: Vec2, // NDC
    size: Vec2,    // backing store pixels
    cursor: BodyCursor,
}

impl Scene {
    /// Track the pointer in NDC; returns the pointer id for capture.
    fn pointer_from(&mut self, ev: &web::Event) -> Option<i32> {
        let pe = ev.dyn_ref::<web::PointerEvent>()?;
        let css = Vec2::new(pe.offset_x() as f32, pe.offset_y() as f32);
        self.pointer = pixel_to_ndc(dom::css_to_backing(css), self.size);
        Some(pe.pointer_id())
    }

    fn resize(&mut self, (w, h): (f64, f64)) {
        self.size = Vec2::new(w as f32, h as f32);
        self.band.camera_mut().set_aspect(self.size.x / self.size.y.max(1.0));
    }
}

/// Either the live badge or, in editor previews, a note in its place.
pub struct Lanyard {
    _note: Option<Attached>,
    _badge: Option<LanyardBadge>,
}

struct LanyardBadge {
    _frames: AnimationLoop,
    _listeners: Vec<EventListener>,
    _scene: Rc<RefCell<Scene>>,
    _canvas: Attached,
}

pub fn mount(document: &web::Document) -> anyhow::Result<Option<Lanyard>> {
    let Some(root) = document.get_element_by_id(LANYARD_ROOT_ID) else {
        return Ok(None);
    };
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let location = window.location();
    let href = location.href().unwrap_or_default();
    let host = location.host().unwrap_or_default();
    if is_sandboxed_preview(&href, &host) {
        log::info!("[lanyard] preview host {}; showing placeholder", host);
        let note = dom::create_element(document, "p", &[("class", "lanyard__note")], Some(LANYARD_PREVIEW_NOTE))?;
        root.append_child(&note).map_err(js_err)?;
        return Ok(Some(Lanyard {
            _note: Some(Attached(note)),
            _badge: None,
        }));
    }

    let config = LanyardConfig::from_attributes(dom::attr_lookup(&root)).unwrap_or_else(|e| {
        log::warn!("[lanyard] {}; using defaults", e);
        LanyardConfig::default()
    });

    let canvas = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(js_err)?;
    let _ = canvas.set_attribute(
        "style",
        "display:block; width:100%; height:100vh; touch-action:none; pointer-events:auto;",
    );
    root.append_child(&canvas).map_err(js_err)?;
    let attached = Attached(canvas.clone().into());
    let ctx = dom::context_2d(&canvas)?;
    let (w, h) = dom::sync_canvas_backing_size(&canvas);

    let band_texture = load_image(LANYARD_BAND_TEXTURE)?;
    let card_image = load_image(LANYARD_CARD_IMAGE)?;

    let scene = Rc::new(RefCell::new(Scene {
        band: Band::from_config(&config, (w / h) as f32),
        pointer: Vec2::ZERO,
        size: Vec2::new(w as f32, h as f32),
        cursor: BodyCursor {
            body: document.body(),
            current: None,
        },
    }));

    let mut listeners = Vec::with_capacity(7);
    for (img, path) in [(&band_texture, LANYARD_BAND_TEXTURE), (&card_image, LANYARD_CARD_IMAGE)] {
        listeners.push(EventListener::new(img, "error", move |_| {
            log::warn!("[lanyard] failed to load {}; drawing placeholder", path);
        }));
    }

    let s = scene.clone();
    listeners.push(EventListener::new(&canvas, "pointermove", move |ev| {
        let mut scene = s.borrow_mut();
        if scene.pointer_from(ev).is_none() {
            return;
        }
        let hovered = scene.band.is_dragging() || scene.band.hit_test(scene.pointer);
        scene.band.set_hovered(hovered);
        let hint = scene.band.cursor_hint();
        scene.cursor.set(hint);
    }));

    let s = scene.clone();
    let c = canvas.clone();
    listeners.push(EventListener::new(&canvas, "pointerdown", move |ev| {
        let mut scene = s.borrow_mut();
        let Some(id) = scene.pointer_from(ev) else {
            return;
        };
        let pointer = scene.pointer;
        if !scene.band.hit_test(pointer) {
            return;
        }
        let _ = c.set_pointer_capture(id);
        scene.band.begin_drag(pointer);
        let hint = scene.band.cursor_hint();
        scene.cursor.set(hint);
    }));

    for kind in ["pointerup", "pointercancel"] {
        let s = scene.clone();
        let c = canvas.clone();
        listeners.push(EventListener::new(&canvas, kind, move |ev| {
            if let Some(pe) = ev.dyn_ref::<web::PointerEvent>() {
                let _ = c.release_pointer_capture(pe.pointer_id());
            }
            let mut scene = s.borrow_mut();
            scene.band.end_drag();
            let hint = scene.band.cursor_hint();
            scene.cursor.set(hint);
        }));
    }

    let s = scene.clone();
    listeners.push(EventListener::new(&canvas, "pointerleave", move |_| {
        let mut scene = s.borrow_mut();
        if scene.band.is_dragging() {
            return;
        }
        scene.band.set_hovered(false);
        scene.cursor.set(None);
    }));

    let s = scene.clone();
    let c = canvas.clone();
    listeners.push(EventListener::new(&window, "resize", move |_| {
        s.borrow_mut().resize(dom::sync_canvas_backing_size(&c));
    }));

    let s = scene.clone();
    let transparent = config.transparent;
    let frames = AnimationLoop::start(move |tick| {
        let mut scene = s.borrow_mut();
        let pointer = scene.pointer;
        scene.band.frame(tick.dt_sec(), pointer);
        let images = Images {
            band: &band_texture,
            card: &card_image,
        };
        if let Err(e) = draw(&ctx, &scene, &images, transparent) {
            log::debug!("[lanyard] draw failed: {:?}", e);
        }
    });

    log::info!(
        "[lanyard] mounted camera=({:.1},{:.1},{:.1}) fov={} gravity.y={}",
        config.position.x,
        config.position.y,
        config.position.z,
        config.fov,
        config.gravity.y
    );
    Ok(Some(Lanyard {
        _note: None,
        _badge: Some(LanyardBadge {
            _frames: frames,
            _listeners: listeners,
            _scene: scene,
            _canvas: attached,
        }),
    }))
}

fn load_image(src: &str) -> anyhow::Result<web::HtmlImageElement> {
    let img = web::HtmlImageElement::new().map_err(js_err)?;
    img.set_src(src);
    Ok(img)
}

#[inline]
fn is_loaded(img: &web::HtmlImageElement) -> bool {
    img.complete() && img.natural_width() > 0
}

struct Images<'a> {
    band: &'a web::HtmlImageElement,
    card: &'a web::HtmlImageElement,
}

fn draw(ctx: &Ctx, scene: &Scene, images: &Images, transparent: bool) -> Result<(), JsValue> {
    let size = scene.size;
    let (w, h) = (size.x as f64, size.y as f64);
    ctx.clear_rect(0.0, 0.0, w, h);
    if !transparent {
        paint::set_fill(ctx, &JsValue::from_str("#000"));
        ctx.fill_rect(0.0, 0.0, w, h);
    }

    let camera = scene.band.camera();
    let to_px = |p: Vec3| {
        let ndc = camera.project(p);
        ndc_to_pixel(Vec2::new(ndc.x, ndc.y), size)
    };

    // band, card end first
    let pattern = if is_loaded(images.band) {
        ctx.create_pattern_with_html_image_element(images.band, "repeat")?
    } else {
        None
    };
    match &pattern {
        Some(p) => paint::set_stroke(ctx, p),
        None => paint::set_stroke(ctx, &JsValue::from_str(LANYARD_PLACEHOLDER_COLOR)),
    }
    ctx.set_line_width(LANYARD_BAND_WIDTH_PX * dom::device_pixel_ratio());
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.begin_path();
    let clip = to_px(scene.band.card_clip());
    ctx.move_to(clip.x as f64, clip.y as f64);
    for p in scene.band.points() {
        let px = to_px(*p);
        ctx.line_to(px.x as f64, px.y as f64);
    }
    ctx.stroke();

    // card face as the affine image of the unit square, so it tilts with the body
    let [tl, tr, bl] = scene.band.card_corners().map(to_px);
    let (across, down) = (tr - tl, bl - tl);
    ctx.save();
    ctx.set_transform(
        across.x as f64,
        across.y as f64,
        down.x as f64,
        down.y as f64,
        tl.x as f64,
        tl.y as f64,
    )?;
    let drawn = if is_loaded(images.card) {
        ctx.draw_image_with_html_image_element_and_dw_and_dh(images.card, 0.0, 0.0, 1.0, 1.0)
    } else {
        paint::set_fill(ctx, &JsValue::from_str(LANYARD_PLACEHOLDER_COLOR));
        ctx.fill_rect(0.0, 0.0, 1.0, 1.0);
        Ok(())
    };
    ctx.restore();
    drawn
}
