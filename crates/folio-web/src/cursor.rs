use crate::constants::*;
use crate::dom::{self, js_err};
use crate::frame::AnimationLoop;
use crate::paint::{self, Ctx};
use anyhow::anyhow;
use folio_core::constants::{GLYPH_OFFSET, HALO_OFFSET, TRAIL_LIGHT_OFFSET};
use folio_core::{is_interactive, Animate, CursorEffect, CursorLayers, Particle, Ripple};
use glam::Vec2;
use gloo::events::EventListener;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Global `cursor: none` override; the style element is removed on drop.
pub struct CursorStyleGuard {
    style: web::Element,
}

impl CursorStyleGuard {
    pub fn install(document: &web::Document) -> anyhow::Result<Self> {
        let style = document.create_element("style").map_err(js_err)?;
        style.set_text_content(Some(CURSOR_HIDE_CSS));
        let parent = document
            .query_selector("head")
            .ok()
            .flatten()
            .or_else(|| document.document_element())
            .ok_or_else(|| anyhow!("no element to host the cursor style"))?;
        parent.append_child(&style).map_err(js_err)?;
        Ok(Self { style })
    }
}

impl Drop for CursorStyleGuard {
    fn drop(&mut self) {
        self.style.remove();
    }
}

pub struct CursorOverlay {
    _frames: AnimationLoop,
    _listeners: Vec<EventListener>,
    _style: CursorStyleGuard,
}

pub fn mount(document: &web::Document) -> anyhow::Result<Option<CursorOverlay>> {
    let Some(canvas) = dom::canvas_by_id(document, CURSOR_CANVAS_ID)? else {
        return Ok(None);
    };
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let ctx = dom::context_2d(&canvas)?;
    let _ = canvas.style().set_property("pointer-events", "none");
    dom::fit_canvas_to_viewport(&canvas);

    let effect = Rc::new(RefCell::new(CursorEffect::new(StdRng::from_entropy())));
    let style = CursorStyleGuard::install(document)?;
    let mut listeners = Vec::with_capacity(3);

    let e = effect.clone();
    listeners.push(EventListener::new(&window, "pointermove", move |ev| {
        let Some(mouse) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let chain = dom::ancestor_chain(dom::event_target_element(ev));
        let interactive = is_interactive(chain.iter().map(|(tag, role)| (tag.as_str(), role.as_deref())));
        let pos = Vec2::new(mouse.client_x() as f32, mouse.client_y() as f32);
        e.borrow_mut().pointer_moved(pos, interactive);
    }));

    // window never sees mouseleave; the root element does when the pointer exits the page
    let root = document
        .document_element()
        .ok_or_else(|| anyhow!("no document element"))?;
    let e = effect.clone();
    listeners.push(EventListener::new(&root, "mouseleave", move |_| {
        e.borrow_mut().pointer_left();
    }));

    let c = canvas.clone();
    listeners.push(EventListener::new(&window, "resize", move |_| {
        dom::fit_canvas_to_viewport(&c);
    }));

    let frames = AnimationLoop::start(move |tick| {
        let mut effect = effect.borrow_mut();
        effect.advance(tick);
        if let Err(e) = draw(&ctx, &canvas, &effect) {
            log::debug!("[cursor] draw failed: {:?}", e);
        }
    });

    log::info!("[cursor] mounted");
    Ok(Some(CursorOverlay {
        _frames: frames,
        _listeners: listeners,
        _style: style,
    }))
}

fn draw(ctx: &Ctx, canvas: &web::HtmlCanvasElement, effect: &CursorEffect) -> Result<(), JsValue> {
    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    let layers = effect.layers();

    ctx.set_global_alpha(layers.halo_opacity as f64);
    let c = layers.halo_center;
    paint::radial_glow(ctx, c.x as f64, c.y as f64, HALO_OFFSET as f64, CURSOR_HALO_INNER, CURSOR_HALO_OUTER)?;

    ctx.set_global_alpha(layers.trail_light_opacity as f64);
    let c = layers.trail_light_center;
    paint::radial_glow(
        ctx,
        c.x as f64,
        c.y as f64,
        TRAIL_LIGHT_OFFSET as f64,
        CURSOR_TRAIL_INNER,
        CURSOR_TRAIL_OUTER,
    )?;

    for p in effect.trail().iter() {
        draw_particle(ctx, p)?;
    }

    if let Some(ripple) = layers.ripple {
        draw_ripple(ctx, &ripple)?;
    }

    if layers.glyph_opacity > 0.0 {
        draw_glyph(ctx, &layers)?;
    }
    ctx.set_global_alpha(1.0);
    Ok(())
}

fn draw_particle(ctx: &Ctx, p: &Particle) -> Result<(), JsValue> {
    let colour = JsValue::from_str(&format!("hsl({:.0}, 80%, 60%)", p.hue));
    ctx.set_global_alpha(p.opacity() as f64);
    ctx.set_shadow_blur((p.size * 2.0) as f64);
    ctx.set_shadow_color(&format!("hsl({:.0}, 80%, 60%)", p.hue));
    paint::circle(ctx, p.position.x as f64, p.position.y as f64, (p.size * p.scale() / 2.0) as f64)?;
    paint::set_fill(ctx, &colour);
    ctx.fill();
    ctx.set_shadow_blur(0.0);
    Ok(())
}

fn draw_ripple(ctx: &Ctx, ripple: &Ripple) -> Result<(), JsValue> {
    if ripple.radius <= 0.0 {
        return Ok(());
    }
    ctx.set_global_alpha(ripple.opacity as f64);
    ctx.set_line_width(2.0);
    paint::set_stroke(ctx, &JsValue::from_str(CURSOR_RING_COLOR));
    paint::circle(ctx, ripple.center.x as f64, ripple.center.y as f64, ripple.radius as f64)?;
    ctx.stroke();
    Ok(())
}

fn draw_glyph(ctx: &Ctx, layers: &CursorLayers) -> Result<(), JsValue> {
    let r = GLYPH_OFFSET as f64;
    let pose = &layers.pose;
    ctx.save();
    ctx.set_global_alpha(layers.glyph_opacity as f64);
    ctx.translate(layers.glyph_center.x as f64, layers.glyph_center.y as f64)?;
    ctx.scale(layers.glyph_scale as f64, layers.glyph_scale as f64)?;

    // holographic glow behind the rings
    paint::radial_glow(
        ctx,
        0.0,
        0.0,
        (layers.inner_glow_diameter / 2.0) as f64,
        CURSOR_INNER_GLOW_INNER,
        CURSOR_INNER_GLOW_OUTER,
    )?;

    // outer ring with a bright arc marking the rotation
    ctx.set_line_width(2.0);
    paint::set_stroke(ctx, &JsValue::from_str(CURSOR_RING_COLOR));
    paint::circle(ctx, 0.0, 0.0, r - 1.0)?;
    ctx.stroke();
    ctx.begin_path();
    let start = pose.ring_rotation as f64;
    ctx.arc(0.0, 0.0, r - 1.0, start, start + std::f64::consts::FRAC_PI_2)?;
    paint::set_stroke(ctx, &JsValue::from_str(CURSOR_PULSE_COLOR));
    ctx.stroke();

    ctx.set_global_alpha((layers.glyph_opacity * pose.pulse_opacity) as f64);
    ctx.set_line_width(1.0);
    paint::circle(ctx, 0.0, 0.0, (r - 4.0) * pose.pulse_scale as f64)?;
    ctx.stroke();

    ctx.set_global_alpha(layers.glyph_opacity as f64);
    paint::set_fill(ctx, &JsValue::from_str(CURSOR_ORBIT_COLOR));
    for dot in pose.orbit {
        paint::circle(ctx, dot.x as f64, dot.y as f64, 2.0)?;
        ctx.fill();
    }

    ctx.set_shadow_blur(10.0);
    ctx.set_shadow_color(CURSOR_CORE_COLOR);
    paint::set_fill(ctx, &JsValue::from_str(CURSOR_CORE_COLOR));
    paint::circle(ctx, 0.0, 0.0, 4.0)?;
    ctx.fill();
    ctx.restore();
    Ok(())
}
