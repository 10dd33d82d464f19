use crate::constants::HOLO_CANVAS_ID;
use crate::dom;
use crate::frame::AnimationLoop;
use crate::paint::{self, Ctx};
use anyhow::anyhow;
use folio_core::{Animate, HoloBackground, HoloFrame, BACKDROP_STOPS, GLOW_CORE, GLOW_EDGE, GRID_CENTER, GRID_EDGE};
use gloo::events::EventListener;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys as web;

pub struct HoloCanvas {
    _frames: AnimationLoop,
    _resize: EventListener,
}

pub fn mount(document: &web::Document) -> anyhow::Result<Option<HoloCanvas>> {
    let Some(canvas) = dom::canvas_by_id(document, HOLO_CANVAS_ID)? else {
        return Ok(None);
    };
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let ctx = dom::context_2d(&canvas)?;
    let (w, h) = dom::fit_canvas_to_viewport(&canvas);
    let background = Rc::new(RefCell::new(HoloBackground::new(w, h)));

    let bg = background.clone();
    let c = canvas.clone();
    let resize = EventListener::new(&window, "resize", move |_| {
        let (w, h) = dom::fit_canvas_to_viewport(&c);
        bg.borrow_mut().resize(w, h);
    });

    let frames = AnimationLoop::start(move |tick| {
        let mut bg = background.borrow_mut();
        bg.advance(tick);
        if let Some(frame) = bg.frame() {
            if let Err(e) = draw(&ctx, frame) {
                log::debug!("[holo] draw failed: {:?}", e);
            }
        }
    });

    log::info!("[holo] mounted {}x{}", w, h);
    Ok(Some(HoloCanvas {
        _frames: frames,
        _resize: resize,
    }))
}

fn line_gradient(ctx: &Ctx, x1: f64, y1: f64) -> Result<web::CanvasGradient, JsValue> {
    let g = ctx.create_linear_gradient(0.0, 0.0, x1, y1);
    g.add_color_stop(0.0, &GRID_EDGE.css())?;
    g.add_color_stop(0.5, &GRID_CENTER.css())?;
    g.add_color_stop(1.0, &GRID_EDGE.css())?;
    Ok(g)
}

fn draw(ctx: &Ctx, frame: &HoloFrame) -> Result<(), JsValue> {
    let (w, h) = (frame.width, frame.height);
    ctx.clear_rect(0.0, 0.0, w, h);

    let b = &frame.backdrop;
    let backdrop = ctx.create_radial_gradient(b.cx, b.cy, b.inner_radius, b.cx, b.cy, b.outer_radius)?;
    for (offset, colour) in BACKDROP_STOPS {
        backdrop.add_color_stop(offset as f32, &colour.css())?;
    }
    paint::set_fill(ctx, &backdrop);
    ctx.fill_rect(0.0, 0.0, w, h);

    ctx.set_line_width(1.0);
    paint::set_stroke(ctx, &line_gradient(ctx, w, 0.0)?);
    for y in &frame.horizontal {
        ctx.begin_path();
        ctx.move_to(0.0, *y);
        ctx.line_to(w, *y);
        ctx.stroke();
    }
    paint::set_stroke(ctx, &line_gradient(ctx, 0.0, h)?);
    for x in &frame.vertical {
        ctx.begin_path();
        ctx.move_to(*x, 0.0);
        ctx.line_to(*x, h);
        ctx.stroke();
    }

    let (core, edge) = (GLOW_CORE.css(), GLOW_EDGE.css());
    for g in &frame.glows {
        paint::radial_glow(ctx, g.x, g.y, g.radius, &core, &edge)?;
    }
    Ok(())
}
