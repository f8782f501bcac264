//! User-facing notifications, decoupled from any UI toolkit.
//!
//! Controllers report outcomes ("Case created successfully", "Failed to
//! load clients") through a [`Notifier`] injected at construction time. The
//! presentation layer decides how to render them; tests record them.

use tracing::{error, info};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Sink for user-facing messages emitted by controllers.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Notifier that writes to the tracing log. A reasonable default for
/// headless hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Success => info!("{message}"),
            NoticeLevel::Error => error!("{message}"),
        }
    }
}
