// ABOUTME: Error types for the notification center lifecycle
// Store operations themselves are total; only mounting and configuration can fail

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("A feed is already mounted: {0}")]
    AlreadyMounted(String),

    #[error("No tokio runtime available to run the feed")]
    NoRuntime,

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
