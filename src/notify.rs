//! User-facing outcome notifications.

use parking_lot::Mutex;

/// Receives the outcome of a submission. Fire-and-forget.
pub trait Notifier: Send + Sync {
    fn notify_success(&self, message: &str);
    fn notify_failure(&self, message: &str);
}

/// A recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Failure(String),
}

impl Notification {
    pub fn message(&self) -> &str {
        match self {
            Notification::Success(m) | Notification::Failure(m) => m,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notification::Success(_))
    }
}

/// Emits notifications as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_success(&self, message: &str) {
        tracing::info!(notification = message, "submission succeeded");
    }

    fn notify_failure(&self, message: &str) {
        tracing::warn!(notification = message, "submission failed");
    }
}

/// Queues notifications for a UI that polls with [`drain`](Self::drain).
#[derive(Debug, Default)]
pub struct BufferedNotifier {
    queue: Mutex<Vec<Notification>>,
}

impl BufferedNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every queued notification, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.queue.lock())
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}

impl Notifier for BufferedNotifier {
    fn notify_success(&self, message: &str) {
        self.queue
            .lock()
            .push(Notification::Success(message.to_string()));
    }

    fn notify_failure(&self, message: &str) {
        self.queue
            .lock()
            .push(Notification::Failure(message.to_string()));
    }
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify_success(&self, message: &str) {
        (**self).notify_success(message)
    }

    fn notify_failure(&self, message: &str) {
        (**self).notify_failure(message)
    }
}
