//! Notifications surfaced through the log

use tracing::{info, warn};

use crate::application::ports::outbound::NotificationPort;

/// Writes user notifications to the tracing subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationPort for TracingNotifier {
    fn info(&self, message: &str) {
        info!(target: "inline_roll_cmd::notifications", "{message}");
    }

    fn warn(&self, message: &str) {
        warn!(target: "inline_roll_cmd::notifications", "{message}");
    }
}
