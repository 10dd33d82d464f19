//! Small 2D canvas helpers shared by the overlay renderers.

use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys as web;

pub type Ctx = web::CanvasRenderingContext2d;

// fill/stroke setters taking `&JsValue` are deprecated in newer web-sys but
// are the only ones that accept strings, gradients and patterns alike
#[allow(deprecated)]
#[inline]
pub fn set_fill(ctx: &Ctx, style: &JsValue) {
    ctx.set_fill_style(style);
}

#[allow(deprecated)]
#[inline]
pub fn set_stroke(ctx: &Ctx, style: &JsValue) {
    ctx.set_stroke_style(style);
}

pub fn circle(ctx: &Ctx, x: f64, y: f64, r: f64) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(x, y, r.max(0.0), 0.0, TAU)
}

/// Filled disc whose colour fades from `inner` at the centre to `outer` at `r`.
pub fn radial_glow(ctx: &Ctx, x: f64, y: f64, r: f64, inner: &str, outer: &str) -> Result<(), JsValue> {
    if r <= 0.0 {
        return Ok(());
    }
    let gradient = ctx.create_radial_gradient(x, y, 0.0, x, y, r)?;
    gradient.add_color_stop(0.0, inner)?;
    gradient.add_color_stop(1.0, outer)?;
    circle(ctx, x, y, r)?;
    set_fill(ctx, &gradient);
    ctx.fill();
    Ok(())
}
