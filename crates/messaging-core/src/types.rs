use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::MessageStatus;
use crate::view::PanelLayout;

/// Role of the remote participant in a conversation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    Doctor,
    Patient,
    Nurse,
    Coordinator,
}

impl ParticipantRole {
    /// Display label, also the haystack for role search matches.
    pub fn label(self) -> &'static str {
        match self {
            Self::Doctor => "Doctor",
            Self::Patient => "Patient",
            Self::Nurse => "Nurse",
            Self::Coordinator => "Coordinator",
        }
    }
}

/// Remote participant shown in the inbox list and thread header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    /// Stable participant ID.
    pub id: String,
    /// Name rendered in the list and thread header.
    pub display_name: String,
    /// Avatar asset reference resolved by the presentation layer.
    pub avatar_ref: Option<String>,
    /// Participant role.
    pub role: ParticipantRole,
    /// Whether the participant is currently online.
    pub online: bool,
    /// Presence label such as "Active 2h ago" when offline.
    pub last_active_label: Option<String>,
}

/// Last-message summary rendered on an inbox row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessagePreview {
    /// Display-ready preview text.
    pub content: String,
    /// Timestamp of the previewed message.
    pub timestamp: DateTime<Utc>,
    /// Sender of the previewed message.
    pub sender_id: String,
    /// Delivery status of the previewed message.
    pub status: MessageStatus,
}

/// One inbox entry: a participant plus aggregated metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Conversation {
    /// Opaque conversation ID, unique and stable for its lifetime.
    pub id: String,
    /// Remote participant.
    pub participant: Participant,
    /// Preview of the most recent message.
    pub last_preview: MessagePreview,
    /// Count of unread inbound messages; cleared to zero on activation.
    pub unread_count: u32,
}

/// Payload kind of a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Text,
    Image,
    File,
    Voice,
    /// Ephemeral reply-candidate chip; never persisted and never assigned a
    /// delivery status transition.
    Suggestion,
}

/// File payload attached to an `Image` or `File` message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    /// Resolvable content URL.
    pub url: String,
    /// MIME content type, for example `image/png`.
    pub mime_type: String,
    /// Display file name.
    pub name: String,
    /// Size in bytes when known.
    pub size_bytes: Option<u64>,
}

/// One entry in a conversation's message history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Message ID, unique within its conversation.
    pub id: String,
    /// Owning conversation (back-reference only).
    pub conversation_id: String,
    /// Sender participant ID.
    pub sender_id: String,
    /// Receiver participant ID.
    pub receiver_id: String,
    /// Display-ready body text.
    pub content: String,
    /// Creation instant; non-decreasing within a conversation.
    pub timestamp: DateTime<Utc>,
    /// Current position in the delivery chain.
    pub status: MessageStatus,
    /// Payload kind.
    pub kind: MessageKind,
    /// Ordered attachments; non-empty exactly for `Image`/`File` messages.
    pub attachments: Vec<Attachment>,
}

/// Voice-note capture state inside the composer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordingState {
    /// Whether capture is currently running.
    pub active: bool,
    /// Seconds elapsed since capture started.
    pub elapsed_seconds: u32,
}

/// Unsent composition state for the active thread.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DraftComposition {
    /// Current unsent input text.
    pub text: String,
    /// Voice-note capture state.
    pub recording: RecordingState,
    /// Attachments staged for the next send.
    pub pending_attachments: Vec<Attachment>,
    /// Reply candidates, visible until a send or explicit dismissal.
    pub suggestions: Vec<String>,
}

/// Binary viewport classification supplied by the host on resize.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViewportClass {
    Narrow,
    Wide,
}

/// Inbox list filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConversationFilter {
    /// Every conversation.
    All,
    /// Conversations with at least one unread message.
    Unread,
    /// Conversations whose participant has one of the given roles.
    Role(Vec<ParticipantRole>),
}

impl Default for ConversationFilter {
    fn default() -> Self {
        Self::All
    }
}

/// User-input and host-signal commands accepted by the shell reducer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ShellCommand {
    /// Make a conversation active and focus its thread.
    SelectConversation {
        /// Target conversation ID.
        conversation_id: String,
    },
    /// Leave the thread view (narrow layouts only).
    Back,
    /// Show or hide the participant profile panel (wide layouts only).
    ToggleProfile,
    /// Viewport classification changed on host resize.
    ViewportChanged {
        /// New viewport class.
        class: ViewportClass,
    },
    /// Update the inbox search predicate.
    Search {
        /// Raw query text; matched case-insensitively.
        query: String,
    },
    /// Replace the inbox list filter.
    SetFilter {
        /// New filter.
        filter: ConversationFilter,
    },
    /// Replace the draft input text.
    UpdateDraftText {
        /// New draft text.
        text: String,
    },
    /// Start voice-note capture.
    StartRecording,
    /// Stop voice-note capture.
    StopRecording,
    /// One-second heartbeat from the host recording ticker.
    RecordingTick,
    /// Copy a suggestion chip into the draft.
    ApplySuggestion {
        /// Chip text to adopt.
        text: String,
    },
    /// Send whatever the draft currently holds.
    Send,
    /// A new message arrived from the data feed.
    MessageArrived {
        /// The arrived message.
        message: Message,
    },
    /// External delivery acknowledgement for a known message.
    StatusAck {
        /// Owning conversation ID.
        conversation_id: String,
        /// Target message ID.
        message_id: String,
        /// Acknowledged status.
        status: MessageStatus,
    },
}

/// Notifications emitted by the shell reducer for host consumption.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ShellEvent {
    /// A conversation became active and its unread count was cleared.
    ConversationActivated {
        /// Newly active conversation ID.
        conversation_id: String,
    },
    /// The active conversation selection was cleared.
    SelectionCleared,
    /// Visible-panel layout changed.
    LayoutChanged {
        /// New layout.
        layout: PanelLayout,
    },
    /// A locally constructed message is ready for a transport layer.
    OutboundMessage {
        /// The constructed message, already appended to the thread.
        message: Message,
    },
    /// The suggestion chip set changed.
    SuggestionsUpdated {
        /// Current chips, possibly empty.
        suggestions: Vec<String>,
    },
}

/// Inbox row projection consumed by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationView {
    pub conversation_id: String,
    pub display_name: String,
    pub role_label: String,
    pub online: bool,
    pub preview_text: String,
    pub preview_timestamp: DateTime<Utc>,
    pub unread_count: u32,
    pub is_active: bool,
}

/// Thread row projection consumed by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageView {
    pub message_id: String,
    pub sender_id: String,
    pub content: String,
    pub kind: MessageKind,
    pub status: MessageStatus,
    pub timestamp: DateTime<Utc>,
    pub is_own: bool,
}

/// One rendered date bucket of the active thread.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageGroupView {
    /// `"Today"`, `"Yesterday"`, or a long-form date label.
    pub date_label: String,
    /// Messages on that calendar date, in arrival order.
    pub messages: Vec<MessageView>,
}

/// Full read-only projection emitted after state transitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShellSnapshot {
    /// Filtered, ordered inbox rows.
    pub conversations: Vec<ConversationView>,
    /// Date-grouped rows of the active thread; empty without a selection.
    pub groups: Vec<MessageGroupView>,
    /// Current composition state.
    pub draft: DraftComposition,
    /// Active conversation, when any.
    pub active_conversation_id: Option<String>,
    /// Current panel layout.
    pub layout: PanelLayout,
}
