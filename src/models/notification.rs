// ABOUTME: Notification record model for the per-session notification list
// Notifications carry read/unread state and keep their creation time for display

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationType {
    pub fn indicator(&self) -> &'static str {
        match self {
            NotificationType::Info => "ℹ",
            NotificationType::Success => "✓",
            NotificationType::Warning => "⚠",
            NotificationType::Error => "✗",
        }
    }
}

/// Drives grouping in the notification center and per-category badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Assignment,
    Grade,
    Announcement,
    #[default]
    System,
    Reminder,
}

impl NotificationCategory {
    pub const ALL: [NotificationCategory; 5] = [
        NotificationCategory::Assignment,
        NotificationCategory::Grade,
        NotificationCategory::Announcement,
        NotificationCategory::System,
        NotificationCategory::Reminder,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NotificationCategory::Assignment => "assignment",
            NotificationCategory::Grade => "grade",
            NotificationCategory::Announcement => "announcement",
            NotificationCategory::System => "system",
            NotificationCategory::Reminder => "reminder",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub category: NotificationCategory,
    pub is_read: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_text: Option<String>,
}

impl Notification {
    /// Materializes a pending entry with a fresh id and the current time.
    pub fn from_new(entry: NewNotification) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: entry.title,
            message: entry.message,
            notification_type: entry.notification_type,
            category: entry.category,
            is_read: entry.is_read,
            timestamp: Utc::now(),
            action_url: entry.action_url,
            action_text: entry.action_text,
        }
    }

    pub fn has_action(&self) -> bool {
        self.action_url.is_some()
    }
}

/// A notification before the store has assigned its id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub notification_type: NotificationType,
    #[serde(default)]
    pub category: NotificationCategory,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub action_url: Option<String>,
    #[serde(default)]
    pub action_text: Option<String>,
}

impl NewNotification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, notification_type: NotificationType) -> Self {
        self.notification_type = notification_type;
        self
    }

    pub fn with_category(mut self, category: NotificationCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_action(mut self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self.action_text = Some(text.into());
        self
    }

    pub fn read(mut self) -> Self {
        self.is_read = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_new_assigns_unique_ids() {
        let a = Notification::from_new(NewNotification::new("A", "first"));
        let b = Notification::from_new(NewNotification::new("A", "first"));
        assert_ne!(a.id, b.id);
        assert!(!a.is_read);
        assert_eq!(a.category, NotificationCategory::System);
    }

    #[test]
    fn test_builder_carries_action() {
        let entry = NewNotification::new("Reply", "Someone replied to your post")
            .with_type(NotificationType::Success)
            .with_category(NotificationCategory::Announcement)
            .with_action("/courses/42/discussions/7", "View post");
        let notification = Notification::from_new(entry);

        assert!(notification.has_action());
        assert_eq!(notification.action_text.as_deref(), Some("View post"));
        assert_eq!(notification.notification_type, NotificationType::Success);
    }

    #[test]
    fn test_serializes_with_view_field_names() {
        let notification = Notification::from_new(
            NewNotification::new("Grade Released", "Quiz 3 graded")
                .with_type(NotificationType::Success)
                .with_category(NotificationCategory::Grade),
        );
        let json = serde_json::to_value(&notification).unwrap();

        assert_eq!(json["type"], "success");
        assert_eq!(json["category"], "grade");
        assert_eq!(json["isRead"], false);
        assert!(json.get("actionUrl").is_none());
    }

    #[test]
    fn test_new_notification_deserializes_with_defaults() {
        let entry: NewNotification =
            serde_json::from_str(r#"{"title":"Hi","message":"there"}"#).unwrap();
        assert_eq!(entry.notification_type, NotificationType::Info);
        assert_eq!(entry.category, NotificationCategory::System);
        assert!(!entry.is_read);
    }
}
