//! Global user-visible notifications.
//!
//! Containers report through a [`NotificationSink`]. The bundled
//! [`Toaster`] keeps a bounded stack of visible toasts: when full, the
//! oldest is dismissed to make room. Identical messages are not merged.

use std::collections::VecDeque;
use std::fmt;

use parking_lot::Mutex;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Success,
    Error,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Success => f.write_str("success"),
            Variant::Error => f.write_str("error"),
        }
    }
}

/// `{message, variant}` as accepted by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserNotice {
    pub message: String,
    pub variant: Variant,
}

impl UserNotice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            variant: Variant::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            variant: Variant::Error,
        }
    }
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: UserNotice);
}

/// A notice currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notice: UserNotice,
}

struct ToasterInner {
    visible: VecDeque<Toast>,
    next_id: u64,
    history: Vec<UserNotice>,
}

pub struct Toaster {
    max_visible: usize,
    inner: Mutex<ToasterInner>,
    events: broadcast::Sender<Toast>,
}

const EVENT_BUFFER: usize = 64;

impl Toaster {
    pub fn new(max_visible: usize) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            max_visible: max_visible.max(1),
            inner: Mutex::new(ToasterInner {
                visible: VecDeque::new(),
                next_id: 1,
                history: Vec::new(),
            }),
            events,
        }
    }

    /// Toasts on screen, oldest first.
    pub fn visible(&self) -> Vec<Toast> {
        self.inner.lock().visible.iter().cloned().collect()
    }

    /// Every notice ever dispatched, oldest first.
    pub fn history(&self) -> Vec<UserNotice> {
        self.inner.lock().history.clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.inner
            .lock()
            .history
            .iter()
            .filter(|n| n.variant == Variant::Error)
            .map(|n| n.message.clone())
            .collect()
    }

    /// Returns whether a toast with `id` was still visible.
    pub fn dismiss(&self, id: u64) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.visible.len();
        inner.visible.retain(|t| t.id != id);
        inner.visible.len() != before
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.events.subscribe()
    }
}

impl NotificationSink for Toaster {
    fn notify(&self, notice: UserNotice) {
        let toast = {
            let mut inner = self.inner.lock();
            let toast = Toast {
                id: inner.next_id,
                notice: notice.clone(),
            };
            inner.next_id += 1;
            inner.history.push(notice);
            while inner.visible.len() >= self.max_visible {
                inner.visible.pop_front();
            }
            inner.visible.push_back(toast.clone());
            toast
        };

        match toast.notice.variant {
            Variant::Error => tracing::warn!(message = %toast.notice.message, "Error notification"),
            Variant::Success => tracing::info!(message = %toast.notice.message, "Notification"),
        }
        // No subscribers is fine.
        let _ = self.events.send(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_toast_is_dropped_when_full() {
        let toaster = Toaster::new(2);
        toaster.notify(UserNotice::error("one"));
        toaster.notify(UserNotice::error("two"));
        toaster.notify(UserNotice::success("three"));

        let visible: Vec<_> = toaster
            .visible()
            .into_iter()
            .map(|t| t.notice.message)
            .collect();
        assert_eq!(visible, vec!["two", "three"]);
        assert_eq!(toaster.history().len(), 3);
    }

    #[test]
    fn duplicates_are_kept() {
        let toaster = Toaster::new(3);
        toaster.notify(UserNotice::error("Conflict"));
        toaster.notify(UserNotice::error("Conflict"));
        assert_eq!(toaster.visible().len(), 2);
        assert_eq!(toaster.errors(), vec!["Conflict", "Conflict"]);
    }

    #[test]
    fn dismiss_removes_visible_toast() {
        let toaster = Toaster::new(3);
        toaster.notify(UserNotice::success("Saved"));
        let id = toaster.visible()[0].id;
        assert!(toaster.dismiss(id));
        assert!(!toaster.dismiss(id));
        assert!(toaster.visible().is_empty());
    }

    #[tokio::test]
    async fn subscribers_receive_toasts() {
        let toaster = Toaster::new(3);
        let mut rx = toaster.subscribe();
        toaster.notify(UserNotice::error("Boom"));
        let toast = rx.recv().await.unwrap();
        assert_eq!(toast.notice, UserNotice::error("Boom"));
    }
}
