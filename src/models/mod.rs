// ABOUTME: Core data models for notifications and toasts shown to LMS users

pub mod notification;
pub mod toast;

pub use notification::{NewNotification, Notification, NotificationCategory, NotificationType};
pub use toast::{NewToast, Toast, DEFAULT_TOAST_DURATION, MAX_TOAST_DURATION};
