// Host-side tests for the contact modal state and copy feedback.

use folio_core::*;
use std::time::Duration;

const EMAIL: &str = "hello@example.dev";

fn open_modal() -> ContactModal {
    let mut modal = ContactModal::new(EMAIL);
    modal.set_open(true);
    modal
}

#[test]
fn escape_closes_once_while_open() {
    let mut modal = open_modal();
    let mut closes = 0;
    for _ in 0..3 {
        if let Some(ModalCommand::Close) = modal.handle_key("Escape") {
            closes += 1;
            // the caller flips the flag in response to the close callback
            modal.set_open(false);
        }
    }
    assert_eq!(closes, 1);
}

#[test]
fn other_keys_are_ignored() {
    let modal = open_modal();
    for key in ["Enter", "Esc", "escape", " ", "q"] {
        assert_eq!(modal.handle_key(key), None, "{key}");
    }
}

#[test]
fn closed_modal_ignores_input() {
    let modal = ContactModal::new(EMAIL);
    assert!(!modal.is_open());
    assert_eq!(modal.handle_key("Escape"), None);
    assert_eq!(modal.handle_click(ClickTarget::Backdrop), None);
    assert_eq!(modal.handle_click(ClickTarget::CopyButton), None);
}

#[test]
fn backdrop_closes_but_panel_does_not() {
    let modal = open_modal();
    assert_eq!(
        modal.handle_click(ClickTarget::Backdrop),
        Some(ModalCommand::Close)
    );
    assert_eq!(
        modal.handle_click(ClickTarget::CloseButton),
        Some(ModalCommand::Close)
    );
    assert_eq!(modal.handle_click(ClickTarget::Panel), None);
}

#[test]
fn copy_button_requests_the_configured_address() {
    let modal = open_modal();
    assert_eq!(
        modal.handle_click(ClickTarget::CopyButton),
        Some(ModalCommand::Copy(EMAIL.to_string()))
    );
}

#[test]
fn copied_label_lasts_exactly_two_seconds() {
    let mut modal = open_modal();
    let t0 = Duration::from_millis(10_000);
    assert_eq!(modal.copy_label(t0), "Copy");
    modal.feedback_mut().copy_succeeded(t0);
    assert_eq!(modal.copy_label(t0), "Copied");
    assert_eq!(modal.copy_label(t0 + Duration::from_millis(1_999)), "Copied");
    assert_eq!(modal.copy_label(t0 + Duration::from_millis(2_000)), "Copy");
}

#[test]
fn clipboard_failure_yields_plain_text_view() {
    let mut modal = open_modal();
    let view = modal.feedback_mut().copy_failed(EMAIL);
    assert_eq!(view.text, EMAIL);
    assert_eq!(view.target, "_blank");
    assert_eq!(view.features, "noopener");
    let url = view.url_with(|s| s.replace('@', "%40"));
    assert_eq!(url, "data:text/plain,hello%40example.dev");
    assert!(!modal.feedback().is_copied(Duration::ZERO));
}

#[test]
fn closing_clears_the_acknowledgement() {
    let mut modal = open_modal();
    modal.feedback_mut().copy_succeeded(Duration::from_millis(5));
    modal.set_open(false);
    modal.set_open(true);
    assert_eq!(modal.copy_label(Duration::from_millis(6)), "Copy");
}

#[test]
fn standalone_button_uses_its_own_labels() {
    let mut feedback = CopyFeedback::default();
    let now = Duration::from_secs(1);
    assert_eq!(feedback.label(now, BUTTON_COPY_LABELS), "Copy email");
    feedback.copy_succeeded(now);
    assert_eq!(feedback.label(now, BUTTON_COPY_LABELS), "Copied!");
}
