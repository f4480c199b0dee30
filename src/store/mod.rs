// ABOUTME: Session-scoped state containers for notifications and toasts
// The notification list and the toast queue are kept separate so toasts never touch read state

pub mod notifications;
pub mod toasts;

pub use notifications::NotificationStore;
pub use toasts::ToastQueue;
