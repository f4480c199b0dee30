// ABOUTME: Toast queue holding transient alerts with independent expiry timers
// Each toast owns a cancellable tokio task that removes it when its duration elapses

use crate::models::{NewToast, Toast, DEFAULT_TOAST_DURATION};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Default)]
struct ToastState {
    toasts: Vec<Toast>,
    timers: HashMap<Uuid, JoinHandle<()>>,
}

impl ToastState {
    fn prune_expired(&mut self, now: Instant) {
        let timers = &mut self.timers;
        self.toasts.retain(|toast| {
            if toast.is_expired_at(now) {
                if let Some(handle) = timers.remove(&toast.id) {
                    handle.abort();
                }
                false
            } else {
                true
            }
        });
    }
}

/// Cheap to clone; clones share the same active set.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    state: Arc<Mutex<ToastState>>,
    default_duration: Duration,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::with_default_duration(DEFAULT_TOAST_DURATION)
    }

    pub fn with_default_duration(default_duration: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(ToastState::default())),
            default_duration,
        }
    }

    /// Appends a toast and schedules its removal after its duration.
    ///
    /// Outside a tokio runtime no timer can be spawned; the toast still drops
    /// out of [`ToastQueue::active`] at its deadline and is pruned lazily.
    pub fn show(&self, toast: NewToast) -> Toast {
        let toast = Toast::from_new(toast, self.default_duration);
        let mut state = self.state.lock();
        state.prune_expired(Instant::now());
        state.toasts.push(toast.clone());

        match Handle::try_current() {
            Ok(handle) => {
                let shared = Arc::downgrade(&self.state);
                let id = toast.id;
                let deadline = toast.deadline();
                let timer = handle.spawn(async move {
                    tokio::time::sleep_until(deadline).await;
                    if let Some(state) = shared.upgrade() {
                        let mut state = state.lock();
                        state.timers.remove(&id);
                        state.toasts.retain(|t| t.id != id);
                        debug!("Toast {} expired", id);
                    }
                });
                state.timers.insert(id, timer);
            }
            Err(_) => {
                warn!("No tokio runtime available, toast {} will expire lazily", toast.id);
            }
        }

        toast
    }

    /// Removes a toast immediately and cancels its timer. Safe to call twice.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut state = self.state.lock();
        if let Some(timer) = state.timers.remove(&id) {
            timer.abort();
        }
        let before = state.toasts.len();
        state.toasts.retain(|t| t.id != id);
        before != state.toasts.len()
    }

    /// Removes every toast and cancels every pending timer.
    pub fn dismiss_all(&self) {
        let mut state = self.state.lock();
        for (_, timer) in state.timers.drain() {
            timer.abort();
        }
        state.toasts.clear();
    }

    /// Active toasts in the order they were shown.
    pub fn active(&self) -> Vec<Toast> {
        let mut state = self.state.lock();
        state.prune_expired(Instant::now());
        state.toasts.clone()
    }

    pub fn get(&self, id: Uuid) -> Option<Toast> {
        self.active().into_iter().find(|t| t.id == id)
    }

    pub fn pending_timers(&self) -> usize {
        self.state.lock().timers.len()
    }

    pub fn len(&self) -> usize {
        self.active().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}
