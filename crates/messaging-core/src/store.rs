use std::cmp::Reverse;

use tracing::{debug, warn};

use crate::types::{Conversation, ConversationFilter, Message};

/// Owns the inbox conversation list, its search/filter state, and the
/// active-conversation selection.
///
/// The active-conversation ID held here is the single source of truth for
/// every collaborator; nothing else caches it.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    conversations: Vec<Conversation>,
    active_id: Option<String>,
    query: String,
    filter: ConversationFilter,
}

impl ConversationStore {
    /// Create a store over an externally supplied conversation set.
    pub fn new(conversations: Vec<Conversation>) -> Self {
        Self {
            conversations,
            active_id: None,
            query: String::new(),
            filter: ConversationFilter::All,
        }
    }

    /// Replace the conversation set, keeping the selection when it survives.
    pub fn replace(&mut self, conversations: Vec<Conversation>) {
        self.conversations = conversations;
        debug!(conversation_count = self.conversations.len(), "conversation list replaced");

        if let Some(active_id) = &self.active_id
            && !self
                .conversations
                .iter()
                .any(|conversation| conversation.id == *active_id)
        {
            warn!(conversation_id = %active_id, "active conversation disappeared from list");
            self.active_id = None;
        }
    }

    /// Currently active conversation ID, when any.
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// Look up one conversation by ID.
    pub fn get(&self, conversation_id: &str) -> Option<&Conversation> {
        self.conversations
            .iter()
            .find(|conversation| conversation.id == conversation_id)
    }

    /// Current search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Update the search predicate used by [`ConversationStore::list`].
    pub fn search(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Replace the list filter.
    pub fn set_filter(&mut self, filter: ConversationFilter) {
        self.filter = filter;
    }

    /// Filtered, searched, most-recent-first view of the conversation list.
    ///
    /// Pure with respect to store state: no side effects, stable order for
    /// equal preview timestamps.
    pub fn list(&self) -> Vec<Conversation> {
        let needle = self.query.trim().to_lowercase();
        let mut rows: Vec<Conversation> = self
            .conversations
            .iter()
            .filter(|conversation| self.matches_filter(conversation))
            .filter(|conversation| matches_query(conversation, &needle))
            .cloned()
            .collect();
        rows.sort_by_key(|conversation| Reverse(conversation.last_preview.timestamp));
        rows
    }

    /// Make a conversation active and clear its unread count.
    ///
    /// Returns `true` when the selection actually changed. Unknown IDs are
    /// ignored (selection can race a list refresh) and re-activating the
    /// already-active conversation is an idempotent no-op; both return
    /// `false` so callers skip redundant downstream reloads.
    pub fn activate(&mut self, conversation_id: &str) -> bool {
        if self.active_id.as_deref() == Some(conversation_id) {
            return false;
        }

        let Some(conversation) = self
            .conversations
            .iter_mut()
            .find(|conversation| conversation.id == conversation_id)
        else {
            debug!(%conversation_id, "ignoring activation of unknown conversation");
            return false;
        };

        conversation.unread_count = 0;
        self.active_id = Some(conversation_id.to_owned());
        debug!(%conversation_id, "conversation activated");
        true
    }

    /// Drop the active selection (narrow-layout back navigation).
    pub fn clear_active(&mut self) {
        self.active_id = None;
    }

    /// Fold one arrived or locally sent message into list bookkeeping.
    ///
    /// Updates the owning conversation's preview and increments its unread
    /// count when the message is inbound and the conversation is not active.
    pub fn apply_message(&mut self, message: &Message, current_user_id: &str) {
        let is_active = self.active_id.as_deref() == Some(message.conversation_id.as_str());
        let Some(conversation) = self
            .conversations
            .iter_mut()
            .find(|conversation| conversation.id == message.conversation_id)
        else {
            debug!(
                conversation_id = %message.conversation_id,
                "dropping message bookkeeping for unknown conversation"
            );
            return;
        };

        conversation.last_preview.content = message.content.clone();
        conversation.last_preview.timestamp = message.timestamp;
        conversation.last_preview.sender_id = message.sender_id.clone();
        conversation.last_preview.status = message.status;

        if !is_active && message.sender_id != current_user_id {
            conversation.unread_count += 1;
        }
    }

    fn matches_filter(&self, conversation: &Conversation) -> bool {
        match &self.filter {
            ConversationFilter::All => true,
            ConversationFilter::Unread => conversation.unread_count > 0,
            ConversationFilter::Role(roles) => roles.contains(&conversation.participant.role),
        }
    }
}

fn matches_query(conversation: &Conversation, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    conversation
        .participant
        .display_name
        .to_lowercase()
        .contains(needle)
        || conversation
            .participant
            .role
            .label()
            .to_lowercase()
            .contains(needle)
}
