//! Headless demo host for the CareLink messaging core.
//!
//! Seeds the shell from fixture data, runs the simulated activity feed and
//! recording ticker against the command channel for a bounded number of
//! arrivals, then prints the final snapshot as JSON.

mod config;
mod feed;
mod logging;
mod mock;

use std::time::Duration;

use chrono::Utc;
use config::InboxConfig;
use messaging_core::{MessagingShell, ShellChannels, ShellCommand};
use tracing::info;

#[tokio::main]
async fn main() {
    logging::init();

    let config = match InboxConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };
    info!(?config, "starting inbox demo");

    let source = mock::MockDataSource::new(&config.current_user_id, Utc::now());
    let mut shell = MessagingShell::new(&config.current_user_id, config.start_viewport);
    let (channels, mut command_rx) = ShellChannels::new(32, 64);

    for event in shell.load_from(&source) {
        info!(?event, "shell event");
        channels.emit(event);
    }

    let activity = feed::activity_feed(
        channels.command_sender(),
        Duration::from_millis(config.feed_interval_ms),
    );
    let ticker = feed::recording_ticker(
        channels.command_sender(),
        Duration::from_millis(config.recording_tick_ms),
    );

    let mut arrivals: u32 = 0;
    while arrivals < config.demo_ticks {
        let Some(command) = command_rx.recv().await else {
            break;
        };
        if matches!(command, ShellCommand::MessageArrived { .. }) {
            arrivals += 1;
        }
        for event in shell.apply(command, Utc::now()) {
            info!(?event, "shell event");
            channels.emit(event);
        }
    }

    activity.dispose().await;
    ticker.dispose().await;

    let snapshot = shell.snapshot(Utc::now());
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("failed to serialize snapshot: {err}"),
    }
}
