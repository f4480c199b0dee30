// ABOUTME: Upstream event sources that push new notifications into the center
// A live push feed and the demo generator implement the same FeedSource trait

pub mod channel;
pub mod simulated;

pub use channel::{ChannelFeed, FeedSender};
pub use simulated::SimulatedFeed;

use crate::models::{NewNotification, NewToast};
use futures_util::stream::{self, BoxStream, StreamExt};

/// One upstream event: a notification to record and, when `announce` is set,
/// a toast to show alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEvent {
    pub notification: NewNotification,
    pub announce: bool,
}

impl FeedEvent {
    pub fn announced(notification: NewNotification) -> Self {
        Self {
            notification,
            announce: true,
        }
    }

    pub fn silent(notification: NewNotification) -> Self {
        Self {
            notification,
            announce: false,
        }
    }

    pub fn toast(&self) -> Option<NewToast> {
        self.announce.then(|| {
            NewToast::new(
                self.notification.title.clone(),
                self.notification.message.clone(),
                self.notification.notification_type,
            )
        })
    }
}

pub trait FeedSource: Send + 'static {
    fn name(&self) -> &str;

    /// Consumes the source. The stream ending means the feed is exhausted.
    fn into_stream(self: Box<Self>) -> BoxStream<'static, FeedEvent>;
}

/// Interleaves several sources into one, ending when all of them end.
pub struct MergedFeed {
    name: String,
    sources: Vec<Box<dyn FeedSource>>,
}

impl MergedFeed {
    pub fn new(sources: Vec<Box<dyn FeedSource>>) -> Self {
        let name = sources
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join("+");
        Self { name, sources }
    }
}

impl FeedSource for MergedFeed {
    fn name(&self) -> &str {
        &self.name
    }

    fn into_stream(self: Box<Self>) -> BoxStream<'static, FeedEvent> {
        stream::select_all(self.sources.into_iter().map(|source| source.into_stream())).boxed()
    }
}
