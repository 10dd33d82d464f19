use crate::constants::{REDUCED_MOTION_QUERY, REVEAL_ID_ATTR, REVEAL_SELECTOR};
use crate::dom::{self, js_err};
use fnv::FnvHashMap;
use folio_core::constants::REVEAL_ROOT_MARGIN;
use folio_core::{LatchChange, RevealConfig, RevealLatch, REVEAL_VISIBLE_CLASS};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>;
type Latches = Rc<RefCell<FnvHashMap<u32, RevealLatch>>>;

/// A `.reveal` element and the inline style it had before mounting.
struct Tracked {
    id: u32,
    el: web::Element,
    original_style: Option<String>,
}

/// Every `.reveal` element on the page, keyed by its `data-reveal-id`.
/// Elements sharing a threshold share one observer. Dropping the registry
/// shows anything still hidden and restores the inline styles.
pub struct RevealRegistry {
    observers: Vec<(u64, web::IntersectionObserver)>,
    tracked: Vec<Tracked>,
    latches: Latches,
    _callback: ObserverCallback,
}

impl Drop for RevealRegistry {
    fn drop(&mut self) {
        for (_, observer) in self.observers.drain(..) {
            observer.disconnect();
        }
        let mut latches = self.latches.borrow_mut();
        for t in self.tracked.drain(..) {
            if let Some(latch) = latches.get_mut(&t.id) {
                if let LatchChange::Revealed { .. } = latch.release() {
                    set_visible(&t.el, true);
                }
            }
            let _ = match &t.original_style {
                Some(style) => t.el.set_attribute("style", style),
                None => t.el.remove_attribute("style"),
            };
            let _ = t.el.remove_attribute(REVEAL_ID_ATTR);
        }
        latches.clear();
    }
}

pub fn prefers_reduced_motion() -> bool {
    web::window()
        .and_then(|w| w.match_media(REDUCED_MOTION_QUERY).ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn set_visible(el: &web::Element, visible: bool) {
    let _ = el.class_list().toggle_with_force(REVEAL_VISIBLE_CLASS, visible);
}

fn apply_latch(el: &web::Element, latch: &RevealLatch) {
    let classes = el.class_list();
    for class in latch.class_names() {
        let _ = classes.add_1(class);
    }
    let transition = latch.config().transition_style();
    let style = match el.get_attribute("style") {
        Some(existing) if !existing.trim().is_empty() => {
            format!("{}; {}", existing.trim().trim_end_matches(';'), transition)
        }
        _ => transition,
    };
    let _ = el.set_attribute("style", &style);
}

fn observer_for<'a>(
    observers: &'a mut Vec<(u64, web::IntersectionObserver)>,
    threshold: f64,
    callback: &ObserverCallback,
) -> anyhow::Result<&'a web::IntersectionObserver> {
    let key = threshold.to_bits();
    if let Some(i) = observers.iter().position(|(k, _)| *k == key) {
        return Ok(&observers[i].1);
    }
    let init = web::IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    init.set_root_margin(REVEAL_ROOT_MARGIN);
    let observer =
        web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(js_err)?;
    observers.push((key, observer));
    Ok(&observers[observers.len() - 1].1)
}

pub fn mount(document: &web::Document) -> anyhow::Result<Option<RevealRegistry>> {
    let nodes = document
        .query_selector_all(REVEAL_SELECTOR)
        .map_err(js_err)?;
    if nodes.length() == 0 {
        return Ok(None);
    }
    let reduced_motion = prefers_reduced_motion();
    let latches: Latches = Rc::new(RefCell::new(FnvHashMap::default()));

    let registry = latches.clone();
    let callback: ObserverCallback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: web::IntersectionObserver| {
            let mut latches = registry.borrow_mut();
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(id) = target
                    .get_attribute(REVEAL_ID_ATTR)
                    .and_then(|id| id.parse::<u32>().ok())
                else {
                    continue;
                };
                let Some(latch) = latches.get_mut(&id) else {
                    continue;
                };
                match latch.on_intersection(entry.is_intersecting(), entry.intersection_ratio()) {
                    LatchChange::Unchanged => {}
                    LatchChange::Revealed { unobserve } => {
                        set_visible(&target, true);
                        if unobserve {
                            observer.unobserve(&target);
                        }
                    }
                    LatchChange::Hidden => set_visible(&target, false),
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let mut observers = Vec::new();
    let mut tracked = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let config = RevealConfig::from_attributes(dom::attr_lookup(&el)).unwrap_or_else(|e| {
            log::warn!("[reveal] element {}: {}; using defaults", i, e);
            RevealConfig::default()
        });
        let threshold = config.threshold;
        let latch = RevealLatch::mount(config, reduced_motion);
        let original_style = el.get_attribute("style");
        let _ = el.set_attribute(REVEAL_ID_ATTR, &i.to_string());
        apply_latch(&el, &latch);
        if latch.observing() {
            observer_for(&mut observers, threshold, &callback)?.observe(&el);
        }
        latches.borrow_mut().insert(i, latch);
        tracked.push(Tracked {
            id: i,
            el,
            original_style,
        });
    }

    log::info!(
        "[reveal] mounted {} elements, {} observers, reduced_motion={}",
        latches.borrow().len(),
        observers.len(),
        reduced_motion
    );
    Ok(Some(RevealRegistry {
        observers,
        tracked,
        latches,
        _callback: callback,
    }))
}
