use crate::core::Notifier;
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use std::time::Duration;

/// Prints notifications to the terminal and mirrors them in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, duration: Duration) {
        tracing::info!("🔔 {} ({} ms)", message, duration.as_millis());
        println!("🔔 {}", message);
    }

    fn alert(&self, message: &str) {
        tracing::warn!("⚠️ {}", message);
        eprintln!("⚠️ {}", message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub duration: Duration,
    pub issued_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        // Zero duration means "until acknowledged".
        if self.duration.is_zero() {
            return false;
        }
        match chrono::Duration::from_std(self.duration) {
            Ok(duration) => now >= self.issued_at + duration,
            Err(_) => false,
        }
    }
}

/// In-memory notification history.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<Vec<Notification>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|n| n.message).collect()
    }

    /// Notifications still on screen at `now`.
    pub fn active_at(&self, now: DateTime<Utc>) -> Vec<Notification> {
        self.entries()
            .into_iter()
            .filter(|n| !n.is_expired_at(now))
            .collect()
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, message: &str, duration: Duration) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(Notification {
                message: message.to_string(),
                duration,
                issued_at: Utc::now(),
            });
        }
    }
}
