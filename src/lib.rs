// ABOUTME: Library crate for campus-notify exposing the session notification center

pub mod center;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod store;

pub use center::{CenterEvent, CenterSnapshot, NotificationCenter};
pub use config::{ConfigError, NotifyConfig};
pub use error::NotifyError;
