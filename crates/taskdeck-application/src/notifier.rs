//! Notifier - the single ephemeral notification slot.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use taskdeck_core::config::DEFAULT_NOTIFICATION_DISMISS_MS;
use taskdeck_core::notification::Notification;
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;

const EVENT_CAPACITY: usize = 32;

/// Shows at most one notification at a time and dismisses it after a delay.
///
/// A new notification replaces the current one and restarts the timer. The
/// notifier is an owned context object: clone it into every view that reports
/// outcomes.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
}

struct Inner {
    current: watch::Sender<Option<Notification>>,
    events: broadcast::Sender<Notification>,
    dismiss_after: Duration,
    generation: AtomicU64,
    timer: Mutex<Option<CancellationToken>>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_NOTIFICATION_DISMISS_MS))
    }
}

impl Notifier {
    pub fn new(dismiss_after: Duration) -> Self {
        let (current, _) = watch::channel(None);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                current,
                events,
                dismiss_after,
                generation: AtomicU64::new(0),
                timer: Mutex::new(None),
            }),
        }
    }

    pub fn show_error(&self, message: impl Into<String>) {
        self.show(Notification::error(message));
    }

    pub fn show_success(&self, message: impl Into<String>) {
        self.show(Notification::success(message));
    }

    /// The visible notification, if any.
    pub fn current(&self) -> Option<Notification> {
        self.inner.current.borrow().clone()
    }

    /// Follows the visible slot, including dismissals.
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.inner.current.subscribe()
    }

    /// Every notification emitted from now on, in order.
    pub fn events(&self) -> broadcast::Receiver<Notification> {
        self.inner.events.subscribe()
    }

    /// Clears the slot and stops the pending timer.
    pub fn dismiss(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.replace_timer(None);
        self.inner.current.send_replace(None);
    }

    fn show(&self, notification: Notification) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(
            target: "taskdeck::notify",
            "{:?}: {}",
            notification.kind,
            notification.message
        );
        self.inner.current.send_replace(Some(notification.clone()));
        // No receivers is fine.
        let _ = self.inner.events.send(notification);

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!(
                    target: "taskdeck::notify",
                    "No async runtime; notification will not auto-dismiss"
                );
                self.replace_timer(None);
                return;
            }
        };

        let token = CancellationToken::new();
        self.replace_timer(Some(token.clone()));
        let inner = Arc::clone(&self.inner);
        handle.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(inner.dismiss_after) => {
                    // A newer notification may have landed after this timer
                    // was replaced but before it was cancelled.
                    inner.current.send_if_modified(|slot| {
                        if inner.generation.load(Ordering::SeqCst) == generation && slot.is_some() {
                            *slot = None;
                            true
                        } else {
                            false
                        }
                    });
                }
            }
        });
    }

    fn replace_timer(&self, token: Option<CancellationToken>) {
        let mut timer = match self.inner.timer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(previous) = std::mem::replace(&mut *timer, token) {
            previous.cancel();
        }
    }
}
