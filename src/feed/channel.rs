// ABOUTME: Channel-backed feed for explicit application events
// Application code publishes through a FeedSender; the center drains the receiving end

use super::{FeedEvent, FeedSource};
use crate::models::NewNotification;
use futures_util::stream::{BoxStream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

#[derive(Debug)]
pub struct ChannelFeed {
    name: String,
    receiver: mpsc::UnboundedReceiver<FeedEvent>,
}

#[derive(Debug, Clone)]
pub struct FeedSender {
    sender: mpsc::UnboundedSender<FeedEvent>,
}

pub fn channel(name: impl Into<String>) -> (FeedSender, ChannelFeed) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (
        FeedSender { sender },
        ChannelFeed {
            name: name.into(),
            receiver,
        },
    )
}

impl FeedSender {
    /// Returns false once the receiving feed has been torn down.
    pub fn publish(&self, event: FeedEvent) -> bool {
        self.sender.send(event).is_ok()
    }

    pub fn notify(&self, notification: NewNotification) -> bool {
        self.publish(FeedEvent::announced(notification))
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl FeedSource for ChannelFeed {
    fn name(&self) -> &str {
        &self.name
    }

    fn into_stream(self: Box<Self>) -> BoxStream<'static, FeedEvent> {
        UnboundedReceiverStream::new(self.receiver).boxed()
    }
}
