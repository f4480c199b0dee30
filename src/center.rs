// ABOUTME: Notification center owning the notification list, toast queue and mounted feed
// Consumer views read snapshots from it and dispatch mutations through it

use crate::config::NotifyConfig;
use crate::error::NotifyError;
use crate::feed::{FeedEvent, FeedSource};
use crate::models::{NewNotification, NewToast, Notification, Toast};
use crate::store::{NotificationStore, ToastQueue};
use futures_util::StreamExt;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

const EVENT_CAPACITY: usize = 64;

/// Change notifications for consumer views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CenterEvent {
    Added(Notification),
    ReadChanged { id: Uuid, is_read: bool },
    AllRead,
    Removed(Uuid),
    Cleared,
    ToastShown(Toast),
    ToastDismissed(Uuid),
    FeedEnded(String),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterSnapshot {
    pub notifications: Vec<Notification>,
    pub toasts: Vec<Toast>,
    pub unread_count: usize,
}

#[derive(Debug)]
struct Shared {
    store: Mutex<NotificationStore>,
    toasts: ToastQueue,
    events: broadcast::Sender<CenterEvent>,
}

impl Shared {
    fn emit(&self, event: CenterEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn add(&self, entry: NewNotification) -> Notification {
        let notification = self.store.lock().add(entry);
        self.emit(CenterEvent::Added(notification.clone()));
        notification
    }

    fn show(&self, toast: NewToast) -> Toast {
        let toast = self.toasts.show(toast);
        self.emit(CenterEvent::ToastShown(toast.clone()));
        toast
    }

    fn deliver(&self, event: FeedEvent) {
        let toast = event.toast();
        let notification = self.add(event.notification);
        debug!("Delivered feed notification {}", notification.id);
        if let Some(toast) = toast {
            self.show(toast);
        }
    }
}

#[derive(Debug)]
struct MountedFeed {
    name: String,
    task: JoinHandle<()>,
}

#[derive(Debug)]
pub struct NotificationCenter {
    shared: Arc<Shared>,
    feed: Option<MountedFeed>,
}

impl NotificationCenter {
    pub fn new(config: &NotifyConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                store: Mutex::new(NotificationStore::new()),
                toasts: ToastQueue::with_default_duration(config.toasts.default_duration()),
                events,
            }),
            feed: None,
        }
    }

    /// Starts draining `feed` into the store and toast queue.
    pub fn mount(&mut self, feed: Box<dyn FeedSource>) -> Result<(), NotifyError> {
        if let Some(mounted) = &self.feed {
            if !mounted.task.is_finished() {
                return Err(NotifyError::AlreadyMounted(mounted.name.clone()));
            }
        }
        let handle = Handle::try_current().map_err(|_| NotifyError::NoRuntime)?;

        let name = feed.name().to_string();
        let mut stream = feed.into_stream();
        let shared = Arc::clone(&self.shared);
        let feed_name = name.clone();
        let task = handle.spawn(async move {
            while let Some(event) = stream.next().await {
                shared.deliver(event);
            }
            info!("Feed '{}' ended", feed_name);
            shared.emit(CenterEvent::FeedEnded(feed_name));
        });

        info!("Mounted feed '{}'", name);
        self.feed = Some(MountedFeed { name, task });
        Ok(())
    }

    /// Stops the feed and cancels every toast timer. The notification list is
    /// kept until the center itself is dropped.
    pub fn teardown(&mut self) {
        if let Some(mounted) = self.feed.take() {
            mounted.task.abort();
            info!("Tore down feed '{}'", mounted.name);
        }
        self.shared.toasts.dismiss_all();
    }

    pub fn is_mounted(&self) -> bool {
        self.feed.as_ref().is_some_and(|m| !m.task.is_finished())
    }

    pub fn feed_name(&self) -> Option<&str> {
        self.feed.as_ref().map(|m| m.name.as_str())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CenterEvent> {
        self.shared.events.subscribe()
    }

    pub fn add(&self, entry: NewNotification) -> Notification {
        self.shared.add(entry)
    }

    /// Records `event` as if it had arrived from the mounted feed.
    pub fn deliver(&self, event: FeedEvent) {
        self.shared.deliver(event);
    }

    pub fn mark_read(&self, id: Uuid) -> bool {
        self.set_read(id, true)
    }

    pub fn mark_unread(&self, id: Uuid) -> bool {
        self.set_read(id, false)
    }

    fn set_read(&self, id: Uuid, is_read: bool) -> bool {
        let changed = {
            let mut store = self.shared.store.lock();
            if is_read {
                store.mark_read(id)
            } else {
                store.mark_unread(id)
            }
        };
        if changed {
            self.shared.emit(CenterEvent::ReadChanged { id, is_read });
        }
        changed
    }

    pub fn mark_all_read(&self) {
        self.shared.store.lock().mark_all_read();
        self.shared.emit(CenterEvent::AllRead);
    }

    pub fn remove(&self, id: Uuid) -> Option<Notification> {
        let removed = self.shared.store.lock().remove(id);
        if removed.is_some() {
            self.shared.emit(CenterEvent::Removed(id));
        }
        removed
    }

    pub fn clear(&self) {
        self.shared.store.lock().clear();
        self.shared.emit(CenterEvent::Cleared);
    }

    pub fn show(&self, toast: NewToast) -> Toast {
        self.shared.show(toast)
    }

    pub fn dismiss(&self, id: Uuid) -> bool {
        let removed = self.shared.toasts.dismiss(id);
        if removed {
            self.shared.emit(CenterEvent::ToastDismissed(id));
        }
        removed
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.shared.store.lock().notifications()
    }

    pub fn notification(&self, id: Uuid) -> Option<Notification> {
        self.shared.store.lock().get(id).cloned()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.shared.toasts.active()
    }

    pub fn unread_count(&self) -> usize {
        self.shared.store.lock().unread_count()
    }

    /// Runs `f` against a copy of the store for derived views such as
    /// per-category badges. The lock is released before `f` runs, so `f` may
    /// call back into the center.
    pub fn with_store<R>(&self, f: impl FnOnce(&NotificationStore) -> R) -> R {
        let store = self.shared.store.lock().clone();
        f(&store)
    }

    pub fn snapshot(&self) -> CenterSnapshot {
        let (notifications, unread_count) = {
            let store = self.shared.store.lock();
            (store.notifications(), store.unread_count())
        };
        CenterSnapshot {
            notifications,
            toasts: self.toasts(),
            unread_count,
        }
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(&NotifyConfig::default())
    }
}

impl Drop for NotificationCenter {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::channel;
    use crate::models::NotificationCategory;
    use std::time::Duration;

    #[tokio::test]
    async fn test_scenario_add_two_mark_first() {
        let center = NotificationCenter::default();
        let a = center.add(NewNotification::new("A", ""));
        center.add(NewNotification::new("B", ""));
        center.mark_read(a.id);

        assert_eq!(center.unread_count(), 1);
        let titles: Vec<_> = center.notifications().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn test_mount_twice_is_rejected() {
        let mut center = NotificationCenter::default();
        let (_tx1, first) = channel::channel("first");
        let (_tx2, second) = channel::channel("second");

        center.mount(Box::new(first)).unwrap();
        let err = center.mount(Box::new(second)).unwrap_err();
        assert!(matches!(err, NotifyError::AlreadyMounted(name) if name == "first"));
    }

    #[test]
    fn test_mount_without_runtime_fails() {
        let mut center = NotificationCenter::default();
        let (_tx, feed) = channel::channel("app");
        assert!(matches!(center.mount(Box::new(feed)), Err(NotifyError::NoRuntime)));
    }

    #[tokio::test]
    async fn test_subscribers_see_mutations() {
        let center = NotificationCenter::default();
        let mut events = center.subscribe();

        let n = center.add(NewNotification::new("A", ""));
        center.mark_read(n.id);
        center.mark_read(Uuid::new_v4());
        center.remove(n.id);

        assert!(matches!(events.recv().await.unwrap(), CenterEvent::Added(added) if added.id == n.id));
        assert_eq!(
            events.recv().await.unwrap(),
            CenterEvent::ReadChanged { id: n.id, is_read: true }
        );
        assert_eq!(events.recv().await.unwrap(), CenterEvent::Removed(n.id));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deliver_adds_and_announces() {
        let center = NotificationCenter::default();
        center.deliver(FeedEvent::announced(
            NewNotification::new("Grade Released", "").with_category(NotificationCategory::Grade),
        ));

        assert_eq!(center.notifications().len(), 1);
        assert_eq!(center.toasts().len(), 1);
        assert_eq!(center.with_store(|s| s.unread_count_for(NotificationCategory::Grade)), 1);

        tokio::time::advance(Duration::from_millis(5000)).await;
        assert!(center.toasts().is_empty());
        assert_eq!(center.notifications().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_toasts_and_keeps_notifications() {
        let mut center = NotificationCenter::default();
        let (_tx, feed) = channel::channel("app");
        center.mount(Box::new(feed)).unwrap();
        center.add(NewNotification::new("kept", ""));
        center.show(NewToast::info("gone", ""));

        center.teardown();
        center.teardown();

        assert!(!center.is_mounted());
        assert!(center.toasts().is_empty());
        assert_eq!(center.notifications().len(), 1);
    }

    #[tokio::test]
    async fn test_with_store_closure_can_reenter_center() {
        let center = NotificationCenter::default();
        center.add(NewNotification::new("A", "").with_category(NotificationCategory::Grade));

        let (grade, total) = center.with_store(|store| {
            (store.unread_count_for(NotificationCategory::Grade), center.unread_count())
        });
        assert_eq!((grade, total), (1, 1));
    }

    #[tokio::test]
    async fn test_snapshot_serializes_unread_count() {
        let center = NotificationCenter::default();
        center.add(NewNotification::new("A", ""));
        let json = serde_json::to_value(center.snapshot()).unwrap();
        assert_eq!(json["unreadCount"], 1);
        assert_eq!(json["notifications"].as_array().unwrap().len(), 1);
    }
}
