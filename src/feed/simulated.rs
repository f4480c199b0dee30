// ABOUTME: Demo feed that randomly synthesizes LMS notifications on a fixed interval
// Stands in for a live push feed when no backend is connected

use super::{FeedEvent, FeedSource};
use crate::config::FeedConfig;
use crate::models::{NewNotification, NotificationCategory, NotificationType};
use async_stream::stream;
use futures_util::stream::BoxStream;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

struct Template {
    title: &'static str,
    message: &'static str,
    notification_type: NotificationType,
    category: NotificationCategory,
}

static TEMPLATES: [Template; 5] = [
    Template {
        title: "New Assignment Posted",
        message: "A new assignment is available in one of your courses.",
        notification_type: NotificationType::Info,
        category: NotificationCategory::Assignment,
    },
    Template {
        title: "Grade Released",
        message: "Your latest submission has been graded.",
        notification_type: NotificationType::Success,
        category: NotificationCategory::Grade,
    },
    Template {
        title: "Course Announcement",
        message: "Your instructor posted a new announcement.",
        notification_type: NotificationType::Info,
        category: NotificationCategory::Announcement,
    },
    Template {
        title: "Deadline Approaching",
        message: "An assignment is due within the next 24 hours.",
        notification_type: NotificationType::Warning,
        category: NotificationCategory::Reminder,
    },
    Template {
        title: "Scheduled Maintenance",
        message: "The platform will be briefly unavailable tonight.",
        notification_type: NotificationType::Warning,
        category: NotificationCategory::System,
    },
];

impl Template {
    fn to_notification(&self) -> NewNotification {
        NewNotification::new(self.title, self.message)
            .with_type(self.notification_type)
            .with_category(self.category)
    }
}

pub struct SimulatedFeed {
    interval: Duration,
    probability: f64,
    rng: StdRng,
}

impl SimulatedFeed {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);
    pub const DEFAULT_PROBABILITY: f64 = 0.3;

    pub fn new(interval: Duration, probability: f64) -> Self {
        Self::with_rng(interval, probability, StdRng::from_entropy())
    }

    pub fn seeded(interval: Duration, probability: f64, seed: u64) -> Self {
        Self::with_rng(interval, probability, StdRng::seed_from_u64(seed))
    }

    fn with_rng(interval: Duration, probability: f64, rng: StdRng) -> Self {
        let probability = if probability.is_nan() {
            warn!("Simulated feed probability is NaN, feed will stay silent");
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self {
            interval: interval.max(Duration::from_millis(1)),
            probability,
            rng,
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        let interval = config.interval();
        match config.seed {
            Some(seed) => Self::seeded(interval, config.probability, seed),
            None => Self::new(interval, config.probability),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn template_titles() -> impl Iterator<Item = &'static str> {
        TEMPLATES.iter().map(|t| t.title)
    }
}

impl Default for SimulatedFeed {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL, Self::DEFAULT_PROBABILITY)
    }
}

impl FeedSource for SimulatedFeed {
    fn name(&self) -> &str {
        "simulated"
    }

    fn into_stream(self: Box<Self>) -> BoxStream<'static, FeedEvent> {
        let SimulatedFeed {
            interval,
            probability,
            mut rng,
        } = *self;

        Box::pin(stream! {
            // First tick fires one full interval after mounting.
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !rng.gen_bool(probability) {
                    continue;
                }
                let template = &TEMPLATES[rng.gen_range(0..TEMPLATES.len())];
                debug!("Simulated feed emitting '{}'", template.title);
                yield FeedEvent::announced(template.to_notification());
            }
        })
    }
}
