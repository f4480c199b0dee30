// ABOUTME: Toast model for short-lived alerts that dismiss themselves
// Provides the toast record and its pending form with automatic expiry

use super::NotificationType;
use serde::{Serialize, Serializer};
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(5000);

/// Longer durations are capped so the deadline always fits in an `Instant`.
pub const MAX_TOAST_DURATION: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub toast_type: NotificationType,
    #[serde(rename = "durationMs", serialize_with = "serialize_millis")]
    pub duration: Duration,
    #[serde(skip)]
    pub created_at: Instant,
}

impl Toast {
    pub fn from_new(toast: NewToast, default_duration: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: toast.title,
            message: toast.message,
            toast_type: toast.toast_type,
            duration: toast.duration.unwrap_or(default_duration).min(MAX_TOAST_DURATION),
            created_at: Instant::now(),
        }
    }

    pub fn deadline(&self) -> Instant {
        self.created_at
            .checked_add(self.duration)
            .unwrap_or_else(|| self.created_at + MAX_TOAST_DURATION)
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.deadline()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToast {
    pub title: String,
    pub message: String,
    pub toast_type: NotificationType,
    pub duration: Option<Duration>,
}

impl NewToast {
    pub fn new(title: impl Into<String>, message: impl Into<String>, toast_type: NotificationType) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            toast_type,
            duration: None,
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NotificationType::Success)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NotificationType::Error)
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NotificationType::Info)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NotificationType::Warning)
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}
