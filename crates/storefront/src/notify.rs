//! Notification collaborator contract.
//!
//! Storefront operations report every outcome through a [`Notifier`] instead
//! of rendering anything themselves. Front ends supply the implementation: the
//! HTTP surface collects notices into the response, the CLI prints them.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Title used when a caller has none.
pub const DEFAULT_TITLE: &str = "Notice";

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Warn,
    Error,
}

impl NoticeKind {
    /// Lowercase name, as used in styling hooks.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// A transient, auto-dismissing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub title: String,
}

impl Notice {
    /// A notice with an explicit title.
    #[must_use]
    pub fn new(kind: NoticeKind, message: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            title: title.into(),
        }
    }

    /// A notice titled [`DEFAULT_TITLE`].
    #[must_use]
    pub fn untitled(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self::new(kind, message, DEFAULT_TITLE)
    }

    #[must_use]
    pub fn success(message: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message, title)
    }

    #[must_use]
    pub fn warn(message: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warn, message, title)
    }

    #[must_use]
    pub fn error(message: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message, title)
    }
}

/// Presentation side of the storefront.
pub trait Notifier: Send + Sync {
    /// Show a notice. Fire-and-forget.
    fn notify(&self, notice: Notice);

    /// Ask a yes/no question. The caller runs its accept path only when this
    /// returns `true`; a decline does nothing.
    fn confirm(&self, message: &str) -> bool;
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }

    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }
}

/// Records notices and answers every confirmation with a preset answer.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    notices: Mutex<Vec<Notice>>,
    prompts: Mutex<Vec<String>>,
    answer: bool,
}

impl CollectingNotifier {
    /// A notifier that declines every confirmation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier that answers every confirmation with `answer`.
    #[must_use]
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }

    /// Notices shown so far.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }

    /// Confirmation prompts asked so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }

    /// The most recent notice.
    #[must_use]
    pub fn last(&self) -> Option<Notice> {
        self.notices().pop()
    }

    /// Take and clear the recorded notices.
    #[must_use]
    pub fn drain(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|mut notices| std::mem::take(&mut *notices))
            .unwrap_or_default()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }

    fn confirm(&self, message: &str) -> bool {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(message.to_owned());
        }
        self.answer
    }
}
