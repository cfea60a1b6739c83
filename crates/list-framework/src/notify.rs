//! Notification sink (toasts). Fire-and-forget: nothing is returned.

use tracing::{error, info};

pub trait Notifier: Send + Sync + 'static {
    fn display_success(&self, message: &str);
    fn display_error(&self, message: &str, detail: Option<&str>);
}

/// Sends notifications to the log. Used when no UI toast layer is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn display_success(&self, message: &str) {
        info!(message, "Notification");
    }

    fn display_error(&self, message: &str, detail: Option<&str>) {
        error!(message, detail = detail.unwrap_or(""), "Notification");
    }
}
