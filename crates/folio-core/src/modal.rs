use crate::constants::COPIED_FEEDBACK_MS;
use std::time::Duration;

pub const ESCAPE_KEY: &str = "Escape";
pub const FALLBACK_URL_PREFIX: &str = "data:text/plain,";

/// Where a click inside the open overlay landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Panel,
    CloseButton,
    CopyButton,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalCommand {
    Close,
    Copy(String),
}

/// Button captions for the idle and acknowledged states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CopyLabels {
    pub idle: &'static str,
    pub copied: &'static str,
}

pub const MODAL_COPY_LABELS: CopyLabels = CopyLabels {
    idle: "Copy",
    copied: "Copied",
};

pub const BUTTON_COPY_LABELS: CopyLabels = CopyLabels {
    idle: "Copy email",
    copied: "Copied!",
};

/// Plain-text view opened when the clipboard refuses the write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FallbackView {
    pub text: String,
    pub target: &'static str,
    pub features: &'static str,
}

impl FallbackView {
    /// Builds the `data:` URL with a caller-supplied component encoder.
    pub fn url_with(&self, encode: impl Fn(&str) -> String) -> String {
        format!("{FALLBACK_URL_PREFIX}{}", encode(&self.text))
    }
}

/// Transient "copied" acknowledgement, measured on a caller-supplied clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct CopyFeedback {
    copied_at: Option<Duration>,
}

impl CopyFeedback {
    pub const WINDOW: Duration = Duration::from_millis(COPIED_FEEDBACK_MS);

    pub fn copy_succeeded(&mut self, now: Duration) {
        self.copied_at = Some(now);
    }

    pub fn copy_failed(&mut self, text: &str) -> FallbackView {
        self.copied_at = None;
        FallbackView {
            text: text.to_string(),
            target: "_blank",
            features: "noopener",
        }
    }

    pub fn is_copied(&self, now: Duration) -> bool {
        match self.copied_at {
            Some(at) => now.saturating_sub(at) < Self::WINDOW,
            None => false,
        }
    }

    pub fn label(&self, now: Duration, labels: CopyLabels) -> &'static str {
        if self.is_copied(now) {
            labels.copied
        } else {
            labels.idle
        }
    }

    pub fn reset(&mut self) {
        self.copied_at = None;
    }
}

#[derive(Clone, Debug)]
pub struct ContactModal {
    open: bool,
    email: String,
    feedback: CopyFeedback,
}

impl ContactModal {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            open: false,
            email: email.into(),
            feedback: CopyFeedback::default(),
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[inline]
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_open(&mut self, open: bool) {
        if !open {
            self.feedback.reset();
        }
        self.open = open;
    }

    pub fn handle_key(&self, key: &str) -> Option<ModalCommand> {
        (self.open && key == ESCAPE_KEY).then_some(ModalCommand::Close)
    }

    pub fn handle_click(&self, target: ClickTarget) -> Option<ModalCommand> {
        if !self.open {
            return None;
        }
        match target {
            ClickTarget::Backdrop | ClickTarget::CloseButton => Some(ModalCommand::Close),
            ClickTarget::CopyButton => Some(ModalCommand::Copy(self.email.clone())),
            ClickTarget::Panel => None,
        }
    }

    pub fn feedback(&self) -> &CopyFeedback {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut CopyFeedback {
        &mut self.feedback
    }

    pub fn copy_label(&self, now: Duration) -> &'static str {
        self.feedback.label(now, MODAL_COPY_LABELS)
    }
}
