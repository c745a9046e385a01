use thiserror::Error;
use tokio::sync::{broadcast, mpsc};

use crate::types::{ShellCommand, ShellEvent};

/// Broadcast event stream type used by presentation subscribers.
pub type EventStream = broadcast::Receiver<ShellEvent>;

/// Errors returned by shell channel operations.
#[derive(Debug, Error)]
pub enum ShellChannelError {
    /// The command receiver side is closed.
    #[error("command channel is closed")]
    CommandChannelClosed,
}

/// Command/event channel pair connecting host input sources (UI callbacks,
/// periodic tickers, simulated feeds) to the shell reducer loop.
#[derive(Clone, Debug)]
pub struct ShellChannels {
    command_tx: mpsc::Sender<ShellCommand>,
    event_tx: broadcast::Sender<ShellEvent>,
}

impl ShellChannels {
    /// Create a new channel set and return it with the command receiver.
    pub fn new(
        command_buffer: usize,
        event_buffer: usize,
    ) -> (Self, mpsc::Receiver<ShellCommand>) {
        let (command_tx, command_rx) = mpsc::channel(command_buffer.max(1));
        let (event_tx, _) = broadcast::channel(event_buffer.max(1));

        (
            Self {
                command_tx,
                event_tx,
            },
            command_rx,
        )
    }

    /// Clone the command sender.
    pub fn command_sender(&self) -> mpsc::Sender<ShellCommand> {
        self.command_tx.clone()
    }

    /// Subscribe to emitted shell events.
    pub fn subscribe(&self) -> EventStream {
        self.event_tx.subscribe()
    }

    /// Send one command to the reducer loop.
    pub async fn send_command(&self, command: ShellCommand) -> Result<(), ShellChannelError> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| ShellChannelError::CommandChannelClosed)
    }

    /// Emit an event to all subscribers.
    ///
    /// Emission is best-effort; lagged subscribers are handled by `broadcast`.
    pub fn emit(&self, event: ShellEvent) {
        let _ = self.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::PanelLayout;

    #[tokio::test]
    async fn sends_commands_to_receiver() {
        let (channels, mut rx) = ShellChannels::new(8, 8);
        channels
            .send_command(ShellCommand::Search {
                query: "chen".to_owned(),
            })
            .await
            .expect("command send should work");

        let command = rx.recv().await.expect("receiver should have a command");
        match command {
            ShellCommand::Search { query } => assert_eq!(query, "chen"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[tokio::test]
    async fn fans_out_events_to_subscribers() {
        let (channels, _rx) = ShellChannels::new(4, 16);
        let mut a = channels.subscribe();
        let mut b = channels.subscribe();

        channels.emit(ShellEvent::LayoutChanged {
            layout: PanelLayout::ThreadOnly,
        });

        let event_a = a.recv().await.expect("subscriber a should receive event");
        let event_b = b.recv().await.expect("subscriber b should receive event");
        assert_eq!(event_a, event_b);
    }

    #[tokio::test]
    async fn reports_closed_command_channel() {
        let (channels, rx) = ShellChannels::new(1, 1);
        drop(rx);

        let err = channels
            .send_command(ShellCommand::Back)
            .await
            .expect_err("send into closed channel should fail");
        assert!(matches!(err, ShellChannelError::CommandChannelClosed));
    }
}
