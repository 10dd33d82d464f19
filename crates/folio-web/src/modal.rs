use crate::clipboard::{self, CopySite};
use crate::constants::*;
use crate::dom::{self, js_err};
use crate::frame::Clock;
use anyhow::anyhow;
use folio_core::{
    ClickTarget, ContactModal, CopyFeedback, CopyLabels, ModalCommand, BUTTON_COPY_LABELS,
    MODAL_COPY_LABELS,
};
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Overlay DOM for an open modal. Dropping it detaches the element and the
/// listeners, including the Escape handler.
struct Overlay {
    root: web::Element,
    copy_button: web::Element,
    _listeners: [EventListener; 2],
}

impl Drop for Overlay {
    fn drop(&mut self) {
        self.root.remove();
    }
}

struct ContactState {
    modal: ContactModal,
    overlay: Option<Overlay>,
    reset_timer: Option<Timeout>,
    clock: Clock,
}

impl CopySite for ContactState {
    fn labels(&self) -> CopyLabels {
        MODAL_COPY_LABELS
    }
    fn feedback_mut(&mut self) -> &mut CopyFeedback {
        self.modal.feedback_mut()
    }
    fn label_element(&self) -> Option<&web::Element> {
        self.overlay.as_ref().map(|o| &o.copy_button)
    }
    fn reset_timer(&mut self) -> &mut Option<Timeout> {
        &mut self.reset_timer
    }
    fn clock(&self) -> Clock {
        self.clock
    }
    fn accepts_feedback(&self) -> bool {
        self.modal.is_open()
    }
}

struct ButtonState {
    button: web::Element,
    feedback: CopyFeedback,
    reset_timer: Option<Timeout>,
    clock: Clock,
}

impl CopySite for ButtonState {
    fn labels(&self) -> CopyLabels {
        BUTTON_COPY_LABELS
    }
    fn feedback_mut(&mut self) -> &mut CopyFeedback {
        &mut self.feedback
    }
    fn label_element(&self) -> Option<&web::Element> {
        Some(&self.button)
    }
    fn reset_timer(&mut self) -> &mut Option<Timeout> {
        &mut self.reset_timer
    }
    fn clock(&self) -> Clock {
        self.clock
    }
}

/// Contact triggers, the modal they open and the standalone copy buttons.
pub struct ContactWiring {
    state: Rc<RefCell<ContactState>>,
    _buttons: Vec<Rc<RefCell<ButtonState>>>,
    _listeners: Vec<EventListener>,
}

impl Drop for ContactWiring {
    fn drop(&mut self) {
        close(&self.state);
    }
}

fn email_of(el: &web::Element) -> String {
    el.get_attribute(EMAIL_ATTR)
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EMAIL.to_string())
}

pub fn mount(document: &web::Document) -> anyhow::Result<Option<ContactWiring>> {
    let triggers = document
        .query_selector_all(CONTACT_OPEN_SELECTOR)
        .map_err(js_err)?;
    let copy_buttons = document
        .query_selector_all(COPY_EMAIL_SELECTOR)
        .map_err(js_err)?;
    if triggers.length() == 0 && copy_buttons.length() == 0 {
        return Ok(None);
    }
    let clock = Clock::default();
    let state = Rc::new(RefCell::new(ContactState {
        modal: ContactModal::new(DEFAULT_EMAIL),
        overlay: None,
        reset_timer: None,
        clock,
    }));

    let mut listeners = Vec::new();
    for i in 0..triggers.length() {
        let Some(el) = triggers.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let email = email_of(&el);
        let weak = Rc::downgrade(&state);
        listeners.push(EventListener::new(&el, "click", move |ev| {
            ev.prevent_default();
            if let Some(state) = weak.upgrade() {
                if let Err(e) = open(&state, email.clone()) {
                    log::warn!("[contact] open failed: {}", e);
                }
            }
        }));
    }

    let mut buttons = Vec::new();
    for i in 0..copy_buttons.length() {
        let Some(el) = copy_buttons.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let email = email_of(&el);
        let button = Rc::new(RefCell::new(ButtonState {
            button: el.clone(),
            feedback: CopyFeedback::default(),
            reset_timer: None,
            clock,
        }));
        button.borrow_mut().refresh_label();
        let weak = Rc::downgrade(&button);
        listeners.push(EventListener::new(&el, "click", move |_| {
            clipboard::copy_to(weak.clone(), email.clone());
        }));
        buttons.push(button);
    }

    log::info!(
        "[contact] mounted {} triggers, {} copy buttons",
        triggers.length(),
        buttons.len()
    );
    Ok(Some(ContactWiring {
        state,
        _buttons: buttons,
        _listeners: listeners,
    }))
}

fn open(state: &Rc<RefCell<ContactState>>, email: String) -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow!("no document"))?;
    let mut s = state.borrow_mut();
    if s.modal.is_open() {
        return Ok(());
    }
    s.modal = ContactModal::new(email);
    s.modal.set_open(true);
    let label = s.modal.copy_label(s.clock.now());
    match build_overlay(&document, s.modal.email(), label, Rc::downgrade(state)) {
        Ok(overlay) => s.overlay = Some(overlay),
        Err(e) => {
            s.modal.set_open(false);
            return Err(e);
        }
    }
    log::info!("[contact] modal opened");
    Ok(())
}

fn close(state: &Rc<RefCell<ContactState>>) {
    // detach outside the borrow; overlay listeners may be mid-dispatch
    let (overlay, timer) = {
        let mut s = state.borrow_mut();
        if !s.modal.is_open() {
            return;
        }
        s.modal.set_open(false);
        (s.overlay.take(), s.reset_timer.take())
    };
    drop(timer);
    drop(overlay);
    log::info!("[contact] modal closed");
}

/// Ask the modal what an input means, then act on it with the borrow released.
fn dispatch(
    state: &Weak<RefCell<ContactState>>,
    decide: impl FnOnce(&ContactModal) -> Option<ModalCommand>,
) {
    let Some(rc) = state.upgrade() else {
        return;
    };
    let command = decide(&rc.borrow().modal);
    match command {
        None => {}
        Some(ModalCommand::Close) => close(&rc),
        Some(ModalCommand::Copy(text)) => clipboard::copy_to(state.clone(), text),
    }
}

fn click_target(ev: &web::Event) -> ClickTarget {
    let Some(el) = dom::event_target_element(ev) else {
        return ClickTarget::Backdrop;
    };
    let within = |id: &str| {
        el.closest(&format!("#{id}"))
            .ok()
            .flatten()
            .is_some()
    };
    if within(MODAL_CLOSE_ID) {
        ClickTarget::CloseButton
    } else if within(MODAL_COPY_ID) {
        ClickTarget::CopyButton
    } else if within(MODAL_PANEL_ID) {
        ClickTarget::Panel
    } else {
        ClickTarget::Backdrop
    }
}

fn build_overlay(
    document: &web::Document,
    email: &str,
    copy_label: &str,
    state: Weak<RefCell<ContactState>>,
) -> anyhow::Result<Overlay> {
    let body = document.body().ok_or_else(|| anyhow!("no <body>"))?;
    let root = dom::create_element(
        document,
        "div",
        &[
            ("id", MODAL_ROOT_ID),
            ("role", "dialog"),
            ("aria-modal", "true"),
            ("aria-label", "Contact"),
            ("style", MODAL_ROOT_STYLE),
        ],
        None,
    )?;
    let backdrop = dom::create_element(document, "div", &[("style", MODAL_BACKDROP_STYLE)], None)?;
    let panel = dom::create_element(
        document,
        "div",
        &[("id", MODAL_PANEL_ID), ("style", MODAL_PANEL_STYLE)],
        None,
    )?;
    let title = dom::create_element(document, "h3", &[], Some("Contact"))?;
    let close_button = dom::create_element(
        document,
        "button",
        &[("id", MODAL_CLOSE_ID), ("type", "button"), ("aria-label", "Close")],
        Some("\u{00d7}"),
    )?;
    let address = dom::create_element(document, "span", &[("style", "user-select:all")], Some(email))?;
    let copy_button = dom::create_element(
        document,
        "button",
        &[("id", MODAL_COPY_ID), ("type", "button"), ("aria-label", "Copy email")],
        Some(copy_label),
    )?;
    for child in [&title, &close_button, &address, &copy_button] {
        panel.append_child(child).map_err(js_err)?;
    }
    root.append_child(&backdrop).map_err(js_err)?;
    root.append_child(&panel).map_err(js_err)?;

    let weak = state.clone();
    let click = EventListener::new(&root, "click", move |ev| {
        let target = click_target(ev);
        dispatch(&weak, |modal| modal.handle_click(target));
    });

    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let keydown = EventListener::new(&window, "keydown", move |ev| {
        let Some(key) = ev.dyn_ref::<web::KeyboardEvent>().map(|k| k.key()) else {
            return;
        };
        dispatch(&state, |modal| modal.handle_key(&key));
    });

    body.append_child(&root).map_err(js_err)?;
    Ok(Overlay {
        root,
        copy_button,
        _listeners: [click, keydown],
    })
}
