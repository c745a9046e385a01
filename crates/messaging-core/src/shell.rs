use chrono::{DateTime, Utc};
use tracing::debug;

use crate::grouping::group_by_date;
use crate::store::ConversationStore;
use crate::suggestions::{KeywordSuggestions, SuggestionStrategy};
use crate::thread::ThreadController;
use crate::types::{
    Conversation, ConversationView, Message, MessageGroupView, MessageKind, MessageView,
    ShellCommand, ShellEvent, ShellSnapshot, ViewportClass,
};
use crate::view::{PanelLayout, ViewCoordinator};

/// Collaborator supplying already validated, time-ordered records.
///
/// Strict timestamp ordering within a conversation is a documented
/// precondition of this core, not an internally enforced invariant.
pub trait DataSource {
    /// Conversation set for the current user.
    fn conversations(&self) -> Vec<Conversation>;
    /// Message history for one conversation, oldest first.
    fn messages(&self, conversation_id: &str) -> Vec<Message>;
}

/// Composition root of the messaging core.
///
/// Wires selection events from the conversation store into the thread
/// controller, refreshes suggestion chips from incoming state, and exposes
/// the view coordinator's visibility decisions. State transitions run
/// through [`MessagingShell::apply`]; rendering reads the separate
/// [`MessagingShell::snapshot`] projection.
pub struct MessagingShell {
    current_user_id: String,
    store: ConversationStore,
    thread: ThreadController,
    view: ViewCoordinator,
    strategy: Box<dyn SuggestionStrategy>,
}

impl MessagingShell {
    /// Create a shell with the default keyword suggestion strategy.
    pub fn new(current_user_id: impl Into<String>, viewport: ViewportClass) -> Self {
        Self::with_strategy(current_user_id, viewport, Box::new(KeywordSuggestions))
    }

    /// Create a shell with an injected suggestion strategy.
    pub fn with_strategy(
        current_user_id: impl Into<String>,
        viewport: ViewportClass,
        strategy: Box<dyn SuggestionStrategy>,
    ) -> Self {
        let current_user_id = current_user_id.into();
        Self {
            thread: ThreadController::new(current_user_id.clone()),
            store: ConversationStore::default(),
            view: ViewCoordinator::new(viewport),
            strategy,
            current_user_id,
        }
    }

    /// Seed conversations and message histories from the data source.
    ///
    /// When nothing is active yet and the (possibly filtered) list is
    /// non-empty, the first conversation is auto-activated so the shell
    /// never starts on an empty thread pane.
    pub fn load_from(&mut self, source: &dyn DataSource) -> Vec<ShellEvent> {
        let conversations = source.conversations();
        for conversation in &conversations {
            self.thread
                .load_messages(&conversation.id, source.messages(&conversation.id));
        }
        self.store.replace(conversations);

        if self.store.active_id().is_none()
            && let Some(first_id) = self
                .store
                .list()
                .first()
                .map(|conversation| conversation.id.clone())
        {
            return self.activate(&first_id);
        }
        Vec::new()
    }

    /// Feed one command into the reducer and collect resulting events.
    ///
    /// `now` is injected by the host; the shell never reads ambient time.
    pub fn apply(&mut self, command: ShellCommand, now: DateTime<Utc>) -> Vec<ShellEvent> {
        match command {
            ShellCommand::SelectConversation { conversation_id } => {
                self.activate(&conversation_id)
            }
            ShellCommand::Back => {
                if !self.view.on_back() {
                    return Vec::new();
                }
                self.store.clear_active();
                self.thread.reset_composition();
                vec![
                    ShellEvent::SelectionCleared,
                    ShellEvent::LayoutChanged {
                        layout: self.view.layout(),
                    },
                ]
            }
            ShellCommand::ToggleProfile => {
                let before = self.view.layout();
                self.view.on_toggle_profile();
                self.layout_change_events(before)
            }
            ShellCommand::ViewportChanged { class } => {
                let before = self.view.layout();
                let thread_active = self.store.active_id().is_some();
                self.view.on_viewport_changed(class, thread_active);
                self.layout_change_events(before)
            }
            ShellCommand::Search { query } => {
                self.store.search(query);
                Vec::new()
            }
            ShellCommand::SetFilter { filter } => {
                self.store.set_filter(filter);
                Vec::new()
            }
            ShellCommand::UpdateDraftText { text } => {
                self.thread.update_draft_text(text);
                Vec::new()
            }
            ShellCommand::StartRecording => {
                self.thread.start_recording();
                Vec::new()
            }
            ShellCommand::StopRecording => {
                self.thread.stop_recording();
                Vec::new()
            }
            ShellCommand::RecordingTick => {
                self.thread.tick_recording();
                Vec::new()
            }
            ShellCommand::ApplySuggestion { text } => {
                self.thread.apply_suggestion(text);
                vec![ShellEvent::SuggestionsUpdated {
                    suggestions: Vec::new(),
                }]
            }
            ShellCommand::Send => self.send(now),
            ShellCommand::MessageArrived { message } => self.message_arrived(message),
            ShellCommand::StatusAck {
                conversation_id,
                message_id,
                status,
            } => {
                self.thread
                    .apply_status_ack(&conversation_id, &message_id, status);
                Vec::new()
            }
        }
    }

    /// Read-only derived views for the presentation layer.
    pub fn snapshot(&self, now: DateTime<Utc>) -> ShellSnapshot {
        let active_id = self.store.active_id().map(str::to_owned);
        let conversations = self
            .store
            .list()
            .into_iter()
            .map(|conversation| ConversationView {
                is_active: active_id.as_deref() == Some(conversation.id.as_str()),
                conversation_id: conversation.id,
                display_name: conversation.participant.display_name,
                role_label: conversation.participant.role.label().to_owned(),
                online: conversation.participant.online,
                preview_text: conversation.last_preview.content,
                preview_timestamp: conversation.last_preview.timestamp,
                unread_count: conversation.unread_count,
            })
            .collect();

        let groups = active_id
            .as_deref()
            .map(|conversation_id| {
                group_by_date(self.thread.messages(conversation_id), now.date_naive())
                    .into_iter()
                    .map(|group| MessageGroupView {
                        date_label: group.date_label,
                        messages: group
                            .messages
                            .iter()
                            .map(|message| self.message_view(message))
                            .collect(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        ShellSnapshot {
            conversations,
            groups,
            draft: self.thread.draft().clone(),
            active_conversation_id: active_id,
            layout: self.view.layout(),
        }
    }

    fn activate(&mut self, conversation_id: &str) -> Vec<ShellEvent> {
        if !self.store.activate(conversation_id) {
            return Vec::new();
        }

        // Switching threads discards the previous draft and any in-flight
        // suggestion set before the new thread's chips are derived.
        self.thread.reset_composition();
        let suggestions = self.refresh_suggestions(conversation_id);

        let before = self.view.layout();
        self.view.on_conversation_selected();

        let mut events = vec![
            ShellEvent::ConversationActivated {
                conversation_id: conversation_id.to_owned(),
            },
            ShellEvent::SuggestionsUpdated { suggestions },
        ];
        events.extend(self.layout_change_events(before));
        events
    }

    fn send(&mut self, now: DateTime<Utc>) -> Vec<ShellEvent> {
        let Some(conversation_id) = self.store.active_id().map(str::to_owned) else {
            debug!("send ignored: no active conversation");
            return Vec::new();
        };
        let Some(receiver_id) = self
            .store
            .get(&conversation_id)
            .map(|conversation| conversation.participant.id.clone())
        else {
            debug!(%conversation_id, "send ignored: active conversation vanished");
            return Vec::new();
        };

        match self.thread.send(&conversation_id, &receiver_id, now) {
            Some(message) => {
                self.store.apply_message(&message, &self.current_user_id);
                vec![
                    ShellEvent::OutboundMessage { message },
                    ShellEvent::SuggestionsUpdated {
                        suggestions: Vec::new(),
                    },
                ]
            }
            None => Vec::new(),
        }
    }

    fn message_arrived(&mut self, message: Message) -> Vec<ShellEvent> {
        self.store.apply_message(&message, &self.current_user_id);

        let conversation_id = message.conversation_id.clone();
        let inbound = message.sender_id != self.current_user_id;
        self.thread.append_message(message);

        if inbound && self.store.active_id() == Some(conversation_id.as_str()) {
            let suggestions = self.refresh_suggestions(&conversation_id);
            return vec![ShellEvent::SuggestionsUpdated { suggestions }];
        }
        Vec::new()
    }

    /// Derive suggestion chips for a thread.
    ///
    /// Chips appear only when the thread's latest real message came from the
    /// remote participant; a thread ending in an own message gets none.
    fn refresh_suggestions(&mut self, conversation_id: &str) -> Vec<String> {
        let suggestions = match self
            .thread
            .messages(conversation_id)
            .iter()
            .rev()
            .find(|message| message.kind != MessageKind::Suggestion)
        {
            Some(last) if last.sender_id != self.current_user_id => self.strategy.suggest(last),
            _ => Vec::new(),
        };
        self.thread.set_suggestions(suggestions.clone());
        suggestions
    }

    fn layout_change_events(&self, before: PanelLayout) -> Vec<ShellEvent> {
        if self.view.layout() == before {
            Vec::new()
        } else {
            vec![ShellEvent::LayoutChanged {
                layout: self.view.layout(),
            }]
        }
    }

    fn message_view(&self, message: &Message) -> MessageView {
        MessageView {
            message_id: message.id.clone(),
            sender_id: message.sender_id.clone(),
            content: message.content.clone(),
            kind: message.kind,
            status: message.status,
            timestamp: message.timestamp,
            is_own: message.sender_id == self.current_user_id,
        }
    }
}
