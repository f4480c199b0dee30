// ABOUTME: Main entry point for the campus-notify demo CLI
// Runs a notification center against the simulated feed and reports what it received

use anyhow::{Context, Result};
use campus_notify::feed::{self, FeedEvent, FeedSource, MergedFeed, SimulatedFeed};
use campus_notify::models::{NewNotification, NotificationCategory, NotificationType};
use campus_notify::{CenterEvent, NotificationCenter, NotifyConfig};
use clap::{Args, Parser, Subcommand};
use directories::ProjectDirs;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "campus-notify", version, about = "Session notification center for the campus LMS client")]
struct Cli {
    /// Path to a config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Mount the simulated feed and watch notifications arrive
    Demo(DemoArgs),
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Debug, Args)]
struct DemoArgs {
    /// How long to run, in seconds
    #[arg(long, default_value_t = 60)]
    duration: u64,

    /// Seed for the simulated feed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the feed interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Override the per-tick emission probability
    #[arg(long)]
    probability: Option<f64>,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => NotifyConfig::load_from(path)?,
        None => NotifyConfig::load()?,
    };

    match cli.command {
        Command::Demo(args) => run_demo(config, args).await,
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

async fn run_demo(mut config: NotifyConfig, args: DemoArgs) -> Result<()> {
    if let Some(seed) = args.seed {
        config.feed.seed = Some(seed);
    }
    if let Some(interval_ms) = args.interval_ms {
        config.feed.interval_ms = interval_ms;
    }
    if let Some(probability) = args.probability {
        config.feed.probability = probability;
    }
    config.validate().context("Invalid demo options")?;

    let mut center = NotificationCenter::new(&config);
    let mut events = center.subscribe();

    let (sender, app_feed) = feed::channel::channel("app");
    let source: Box<dyn FeedSource> = if config.feed.enabled {
        Box::new(MergedFeed::new(vec![
            Box::new(SimulatedFeed::from_config(&config.feed)),
            Box::new(app_feed),
        ]))
    } else {
        Box::new(app_feed)
    };
    center.mount(source)?;

    sender.publish(FeedEvent::announced(
        NewNotification::new("New Discussion Post", "A classmate replied to your thread.")
            .with_type(NotificationType::Info)
            .with_category(NotificationCategory::Announcement)
            .with_action("/discussions", "View discussion"),
    ));

    let deadline = tokio::time::sleep(Duration::from_secs(args.duration));
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            () = &mut deadline => break,
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    warn!("Failed to listen for Ctrl-C: {}", e);
                }
                break;
            }
            event = events.recv() => match event {
                Ok(event) => report(&event, args.json),
                Err(RecvError::Lagged(skipped)) => warn!("Skipped {} center events", skipped),
                Err(RecvError::Closed) => break,
            },
        }
    }

    center.teardown();
    info!("Demo finished with {} notifications", center.notifications().len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&center.snapshot())?);
    } else {
        println!(
            "{} notifications, {} unread",
            center.notifications().len(),
            center.unread_count()
        );
        for category in NotificationCategory::ALL {
            let unread = center.with_store(|store| store.unread_count_for(category));
            if unread > 0 {
                println!("  {:<13} {}", category.label(), unread);
            }
        }
    }

    Ok(())
}

fn report(event: &CenterEvent, quiet: bool) {
    if quiet {
        return;
    }
    match event {
        CenterEvent::Added(n) => {
            println!(
                "{} [{}] {}: {}",
                n.notification_type.indicator(),
                n.category.label(),
                n.title,
                n.message
            );
            if n.has_action() {
                println!(
                    "  -> {} ({})",
                    n.action_text.as_deref().unwrap_or("Open"),
                    n.action_url.as_deref().unwrap_or_default()
                );
            }
        }
        CenterEvent::ToastShown(t) => println!("  toast {} for {}ms", t.id, t.duration.as_millis()),
        CenterEvent::FeedEnded(name) => println!("feed '{}' ended", name),
        _ => {}
    }
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use tracing_subscriber::prelude::*;

    let log_dir = ProjectDirs::from("", "", "campus-notify")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from(".campus-notify/logs"));
    let _ = std::fs::create_dir_all(&log_dir);

    let log_file = log_dir.join(format!(
        "campus-notify-{}.log",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "campus_notify=info".into());

    match OpenOptions::new().create(true).append(true).open(&log_file) {
        Ok(file) => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(file)
                    .with_ansi(false),
            )
            .with(filter)
            .init(),
        Err(_) => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .init(),
    }
}
