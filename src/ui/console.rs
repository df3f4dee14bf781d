use super::style;
use super::{FieldErrorDisplay, Notice, NoticeKind, Notifier};
use crate::validation::ErrorMap;

/// Prints banners to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn render(notice: &Notice) -> String {
        let title = match notice.kind {
            NoticeKind::Success => style::success(format!("✓ {}", notice.title)),
            NoticeKind::Failure => style::failure(format!("✗ {}", notice.title)),
        };
        format!("{title}\n  {}", notice.message)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        println!("{}", Self::render(notice));
    }
}

/// Prints one line per invalid field to stderr.
///
/// A terminal has nothing to clear, so [`FieldErrorDisplay::clear_field_errors`]
/// is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleFieldErrors;

impl ConsoleFieldErrors {
    pub fn render(errors: &ErrorMap) -> Vec<String> {
        errors
            .iter()
            .map(|(field, message)| format!("  {}: {}", style::cyan(field), style::error(message)))
            .collect()
    }
}

impl FieldErrorDisplay for ConsoleFieldErrors {
    fn show_field_errors(&self, errors: &ErrorMap) {
        for line in Self::render(errors) {
            eprintln!("{line}");
        }
    }

    fn clear_field_errors(&self) {}
}
