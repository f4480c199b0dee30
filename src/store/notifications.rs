// ABOUTME: In-memory notification list for the current session
// Keeps entries most-recent-first and derives unread counts on demand

use crate::models::{NewNotification, Notification, NotificationCategory};
use std::collections::VecDeque;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct NotificationStore {
    /// Front is the most recently added entry.
    entries: VecDeque<Notification>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns an id and timestamp, then inserts at the head.
    pub fn add(&mut self, entry: NewNotification) -> Notification {
        let notification = Notification::from_new(entry);
        self.entries.push_front(notification.clone());
        notification
    }

    pub fn mark_read(&mut self, id: Uuid) -> bool {
        self.set_read(id, true)
    }

    pub fn mark_unread(&mut self, id: Uuid) -> bool {
        self.set_read(id, false)
    }

    fn set_read(&mut self, id: Uuid, is_read: bool) -> bool {
        match self.entries.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.is_read = is_read;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for notification in &mut self.entries {
            notification.is_read = true;
        }
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Notification> {
        let index = self.entries.iter().position(|n| n.id == id)?;
        self.entries.remove(index)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, id: Uuid) -> Option<&Notification> {
        self.entries.iter().find(|n| n.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.entries.iter().cloned().collect()
    }

    pub fn by_category(&self, category: NotificationCategory) -> Vec<&Notification> {
        self.entries.iter().filter(|n| n.category == category).collect()
    }

    /// Counted on every call so it always matches the entries exactly.
    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.is_read).count()
    }

    pub fn unread_count_for(&self, category: NotificationCategory) -> usize {
        self.entries
            .iter()
            .filter(|n| n.category == category && !n.is_read)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
