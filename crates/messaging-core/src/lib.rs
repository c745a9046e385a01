//! State and behavioral core of the CareLink telehealth messaging inbox.
//!
//! This crate models the client-visible messaging state machine: the
//! conversation list, the active thread and its composition state, the
//! forward-only message delivery chain, date-grouped rendering input, reply
//! suggestions, and the panel-visibility coordinator. It has no network or
//! storage surface; conversations and messages are supplied by an external
//! data source and rendering is left to the host.

/// Command/event channel primitives for host integration.
pub mod channel;
/// Calendar-date bucketing of ordered message sequences.
pub mod grouping;
/// Composition root wiring store, thread, view, and suggestions.
pub mod shell;
/// Forward-only message delivery chain.
pub mod status;
/// Conversation list ownership, search, and unread bookkeeping.
pub mod store;
/// Reply-suggestion strategy seam and the default keyword table.
pub mod suggestions;
/// Active-thread message cache and composition state.
pub mod thread;
/// Shared model and protocol types.
pub mod types;
/// Panel-visibility state machine.
pub mod view;

pub use channel::{EventStream, ShellChannelError, ShellChannels};
pub use grouping::{DateGroup, group_by_date};
pub use shell::{DataSource, MessagingShell};
pub use status::MessageStatus;
pub use store::ConversationStore;
pub use suggestions::{KeywordSuggestions, MAX_SUGGESTIONS, SuggestionStrategy};
pub use thread::ThreadController;
pub use types::{
    Attachment, Conversation, ConversationFilter, ConversationView, DraftComposition, Message,
    MessageGroupView, MessageKind, MessagePreview, MessageView, Participant, ParticipantRole,
    RecordingState, ShellCommand, ShellEvent, ShellSnapshot, ViewportClass,
};
pub use view::{Panel, PanelLayout, ViewCoordinator};
