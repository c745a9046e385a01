//! Periodic host callbacks: the simulated activity feed and the recording
//! ticker.
//!
//! Both are cancellable tokio tasks pushing commands through the shell
//! channel pair; owners must call [`PeriodicTask::dispose`] on teardown so
//! no orphaned tick can mutate discarded state.

use std::time::Duration;

use chrono::Utc;
use messaging_core::ShellCommand;
use tokio::{sync::mpsc, task::JoinHandle, time};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::mock;

/// Handle to a running periodic command producer.
#[derive(Debug)]
pub struct PeriodicTask {
    stop: CancellationToken,
    task: JoinHandle<()>,
}

impl PeriodicTask {
    /// Spawn a task emitting `factory(tick)` on every interval until
    /// cancelled or the command receiver goes away.
    pub fn spawn<F>(
        command_tx: mpsc::Sender<ShellCommand>,
        interval: Duration,
        mut factory: F,
    ) -> Self
    where
        F: FnMut(u64) -> ShellCommand + Send + 'static,
    {
        let stop = CancellationToken::new();
        let stop_child = stop.child_token();
        let task = tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(time::MissedTickBehavior::Skip);
            let mut tick: u64 = 0;

            loop {
                tokio::select! {
                    _ = stop_child.cancelled() => break,
                    _ = ticker.tick() => {
                        let command = factory(tick);
                        tick += 1;
                        if command_tx.send(command).await.is_err() {
                            warn!("command receiver dropped, stopping periodic task");
                            break;
                        }
                    }
                }
            }
        });

        Self { stop, task }
    }

    /// Cancel the task and wait for it to finish.
    pub async fn dispose(self) {
        self.stop.cancel();
        let _ = self.task.await;
    }
}

/// Simulated new-activity feed delivering inbound fixture messages.
pub fn activity_feed(
    command_tx: mpsc::Sender<ShellCommand>,
    interval: Duration,
) -> PeriodicTask {
    PeriodicTask::spawn(command_tx, interval, |tick| ShellCommand::MessageArrived {
        message: mock::feed_message(tick, Utc::now()),
    })
}

/// One-second heartbeat driving the recording elapsed counter.
pub fn recording_ticker(
    command_tx: mpsc::Sender<ShellCommand>,
    interval: Duration,
) -> PeriodicTask {
    PeriodicTask::spawn(command_tx, interval, |_| ShellCommand::RecordingTick)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emits_ticks_until_disposed() {
        let (tx, mut rx) = mpsc::channel(16);
        let ticker = recording_ticker(tx, Duration::from_millis(5));

        let first = rx.recv().await.expect("first tick should arrive");
        assert_eq!(first, ShellCommand::RecordingTick);
        let second = rx.recv().await.expect("second tick should arrive");
        assert_eq!(second, ShellCommand::RecordingTick);

        ticker.dispose().await;
        while rx.try_recv().is_ok() {}

        time::sleep(Duration::from_millis(25)).await;
        assert!(
            rx.try_recv().is_err(),
            "no tick may arrive after dispose"
        );
    }

    #[tokio::test]
    async fn feed_rotates_target_conversations() {
        let (tx, mut rx) = mpsc::channel(16);
        let feed = activity_feed(tx, Duration::from_millis(5));

        let first = rx.recv().await.expect("first arrival expected");
        let second = rx.recv().await.expect("second arrival expected");
        feed.dispose().await;

        match (first, second) {
            (
                ShellCommand::MessageArrived { message: a },
                ShellCommand::MessageArrived { message: b },
            ) => {
                assert_ne!(a.conversation_id, b.conversation_id);
            }
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[tokio::test]
    async fn stops_when_receiver_is_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let ticker = recording_ticker(tx, Duration::from_millis(1));
        // The task exits on its own once the send fails; dispose must still
        // return cleanly.
        ticker.dispose().await;
    }
}
