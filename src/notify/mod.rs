//! Transient user-facing messages.
//!
//! At most one message is active. Publishing replaces whatever is showing;
//! there is no queue.

use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub visible: bool,
}

pub struct NotificationChannel {
    tx: watch::Sender<Option<Notification>>,
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationChannel {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn publish(&self, text: impl Into<String>) {
        self.tx.send_replace(Some(Notification {
            text: text.into(),
            visible: true,
        }));
    }

    pub fn dismiss(&self) {
        self.tx.send_if_modified(|current| match current {
            Some(notification) if notification.visible => {
                notification.visible = false;
                true
            }
            _ => false,
        });
    }

    pub fn current(&self) -> Option<Notification> {
        self.tx.borrow().clone()
    }

    /// Text of the message, if one is showing.
    pub fn visible_text(&self) -> Option<String> {
        self.tx
            .borrow()
            .as_ref()
            .filter(|n| n.visible)
            .map(|n| n.text.clone())
    }

    /// Observe message changes, e.g. from a view that re-renders on each one.
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.tx.subscribe()
    }
}
