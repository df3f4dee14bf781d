//! Seams to the presentation layer: per-field error display and banner
//! notifications, plus console implementations for the CLI.

pub mod console;
pub mod style;

pub use console::{ConsoleFieldErrors, ConsoleNotifier};

use crate::validation::ErrorMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// A banner shown to the user after a flow finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn failure(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failure,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.kind == NoticeKind::Failure
    }
}

/// Shows validation messages next to the fields they belong to.
pub trait FieldErrorDisplay: Send + Sync {
    fn show_field_errors(&self, errors: &ErrorMap);

    fn clear_field_errors(&self);
}

/// Surfaces success and failure banners.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}
