use serde::{Deserialize, Serialize};

/// Delivery state of a persisted message.
///
/// States form a forward-only chain: `Sent` → `Delivered` → `Read`. A message
/// never moves backward along the chain, and acknowledgements that skip a
/// state coerce the message directly to the furthest state reached.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    /// Constructed locally and handed to the transport hook.
    Sent,
    /// Acknowledged as delivered to the recipient's client.
    Delivered,
    /// Acknowledged as read by the recipient.
    Read,
}

impl MessageStatus {
    /// Position of this status in the delivery chain.
    pub fn rank(self) -> u8 {
        match self {
            Self::Sent => 0,
            Self::Delivered => 1,
            Self::Read => 2,
        }
    }

    /// Resolve an incoming acknowledgement against the current status.
    ///
    /// Returns the new status for a strict forward move (including forward
    /// jumps such as `Sent` → `Read`), and `None` when the acknowledgement is
    /// stale or redundant and must be ignored.
    pub fn advance(self, incoming: MessageStatus) -> Option<MessageStatus> {
        if incoming.rank() > self.rank() {
            Some(incoming)
        } else {
            None
        }
    }
}
