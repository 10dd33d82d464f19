#![cfg(target_arch = "wasm32")]
//! Browser front-end: mounts the portfolio effects into the host page.
//!
//! Every browser resource (listener, animation frame, observer, style
//! override, overlay element) is owned by [`App`]; `unmount()` drops it and
//! the page is left as it was.

mod clipboard;
mod constants;
mod cursor;
mod dom;
mod frame;
mod holo;
mod lanyard;
mod modal;
mod paint;
mod reveal;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use web_sys as web;

struct App {
    _cursor: Option<cursor::CursorOverlay>,
    _holo: Option<holo::HoloCanvas>,
    _reveal: Option<reveal::RevealRegistry>,
    _contact: Option<modal::ContactWiring>,
    _lanyard: Option<lanyard::Lanyard>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// A component that fails to mount is logged and left out; the rest still run.
fn mount_or_skip<T>(name: &str, result: anyhow::Result<Option<T>>) -> Option<T> {
    match result {
        Ok(Some(mounted)) => Some(mounted),
        Ok(None) => {
            log::warn!("[{}] mount point missing; skipped", name);
            None
        }
        Err(e) => {
            log::warn!("[{}] mount failed: {:?}", name, e);
            None
        }
    }
}

impl App {
    fn mount(document: &web::Document) -> Self {
        Self {
            _cursor: mount_or_skip("cursor", cursor::mount(document)),
            _holo: mount_or_skip("holo", holo::mount(document)),
            _reveal: mount_or_skip("reveal", reveal::mount(document)),
            _contact: mount_or_skip("contact", modal::mount(document)),
            _lanyard: mount_or_skip("lanyard", lanyard::mount(document)),
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    // a second start tears the first one down before mounting again
    unmount();
    let app = App::mount(&document);
    APP.with(|slot| *slot.borrow_mut() = Some(app));
    Ok(())
}

/// Tear down every mounted effect and restore the page.
#[wasm_bindgen]
pub fn unmount() {
    let app = APP.with(|slot| slot.borrow_mut().take());
    if let Some(app) = app {
        drop(app);
        log::info!("folio-web unmounted");
    }
}
