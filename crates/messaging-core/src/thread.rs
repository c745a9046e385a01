use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::status::MessageStatus;
use crate::types::{Attachment, DraftComposition, Message, MessageKind};

/// Owns per-conversation message history and the composition state of the
/// active thread.
///
/// The controller never tracks which conversation is active; every read and
/// send is keyed by the caller-supplied ID so it can never operate on a
/// stale selection.
#[derive(Debug, Clone)]
pub struct ThreadController {
    current_user_id: String,
    timelines: HashMap<String, Vec<Message>>,
    draft: DraftComposition,
}

impl ThreadController {
    /// Create a controller for the given current user.
    pub fn new(current_user_id: impl Into<String>) -> Self {
        Self {
            current_user_id: current_user_id.into(),
            timelines: HashMap::new(),
            draft: DraftComposition::default(),
        }
    }

    /// Cache an externally supplied message history.
    pub fn load_messages(&mut self, conversation_id: impl Into<String>, messages: Vec<Message>) {
        let conversation_id = conversation_id.into();
        trace!(%conversation_id, message_count = messages.len(), "thread history cached");
        self.timelines.insert(conversation_id, messages);
    }

    /// Message history for a conversation; empty when nothing is cached.
    pub fn messages(&self, conversation_id: &str) -> &[Message] {
        self.timelines
            .get(conversation_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Current composition state.
    pub fn draft(&self) -> &DraftComposition {
        &self.draft
    }

    /// Replace the unsent draft text.
    pub fn update_draft_text(&mut self, text: impl Into<String>) {
        self.draft.text = text.into();
    }

    /// Begin voice capture, resetting the elapsed counter.
    pub fn start_recording(&mut self) {
        self.draft.recording.active = true;
        self.draft.recording.elapsed_seconds = 0;
    }

    /// End voice capture.
    pub fn stop_recording(&mut self) {
        self.draft.recording.active = false;
    }

    /// One-second heartbeat from the host ticker; counts only while active.
    pub fn tick_recording(&mut self) {
        if self.draft.recording.active {
            self.draft.recording.elapsed_seconds += 1;
        }
    }

    /// Stage an attachment for the next send.
    pub fn add_attachment_intent(&mut self, attachment: Attachment) {
        self.draft.pending_attachments.push(attachment);
    }

    /// Replace the suggestion chip set.
    pub fn set_suggestions(&mut self, suggestions: Vec<String>) {
        self.draft.suggestions = suggestions;
    }

    /// Copy a suggestion into the draft text and clear the chip set.
    ///
    /// Does not auto-send; the user still confirms.
    pub fn apply_suggestion(&mut self, text: impl Into<String>) {
        self.draft.text = text.into();
        self.draft.suggestions.clear();
    }

    /// Discard all composition state, including pending suggestions and any
    /// unsent recording. Called on conversation switch and teardown; drafts
    /// do not survive either.
    pub fn reset_composition(&mut self) {
        self.draft = DraftComposition::default();
    }

    /// Whether the draft currently holds anything sendable.
    pub fn has_send_payload(&self) -> bool {
        !self.draft.text.trim().is_empty()
            || self.draft.recording.active
            || !self.draft.pending_attachments.is_empty()
    }

    /// Construct and append an outgoing message from the current draft.
    ///
    /// Non-empty text wins over an active recording, which wins over staged
    /// attachments. With nothing to send this is a no-op returning `None` —
    /// an idle state, not a fault. On success the draft and any pending
    /// suggestions are cleared.
    pub fn send(
        &mut self,
        conversation_id: &str,
        receiver_id: &str,
        now: DateTime<Utc>,
    ) -> Option<Message> {
        if !self.has_send_payload() {
            debug!(%conversation_id, "send ignored: nothing to send");
            return None;
        }

        let (content, kind, attachments) = if !self.draft.text.trim().is_empty() {
            (self.draft.text.trim().to_owned(), MessageKind::Text, Vec::new())
        } else if self.draft.recording.active {
            let elapsed = self.draft.recording.elapsed_seconds;
            (
                format!("Voice message ({}:{:02})", elapsed / 60, elapsed % 60),
                MessageKind::Voice,
                Vec::new(),
            )
        } else {
            let attachments = std::mem::take(&mut self.draft.pending_attachments);
            let first = &attachments[0];
            let kind = if first.mime_type.starts_with("image/") {
                MessageKind::Image
            } else {
                MessageKind::File
            };
            (first.name.clone(), kind, attachments)
        };

        let message = Message {
            id: Uuid::new_v4().to_string(),
            conversation_id: conversation_id.to_owned(),
            sender_id: self.current_user_id.clone(),
            receiver_id: receiver_id.to_owned(),
            content,
            timestamp: now,
            status: MessageStatus::Sent,
            kind,
            attachments,
        };

        self.timelines
            .entry(conversation_id.to_owned())
            .or_default()
            .push(message.clone());
        self.reset_composition();
        debug!(%conversation_id, message_id = %message.id, "message appended to thread");
        Some(message)
    }

    /// Append an externally arrived message to its conversation history.
    pub fn append_message(&mut self, message: Message) {
        self.timelines
            .entry(message.conversation_id.clone())
            .or_default()
            .push(message);
    }

    /// Apply an external delivery acknowledgement to one message.
    ///
    /// Suggestion chips carry no delivery chain, and acknowledgements that
    /// would move a message backward are ignored. Returns `true` when the
    /// status actually advanced.
    pub fn apply_status_ack(
        &mut self,
        conversation_id: &str,
        message_id: &str,
        status: MessageStatus,
    ) -> bool {
        let Some(message) = self
            .timelines
            .get_mut(conversation_id)
            .and_then(|messages| messages.iter_mut().find(|message| message.id == message_id))
        else {
            debug!(%conversation_id, %message_id, "status ack for unknown message ignored");
            return false;
        };

        if message.kind == MessageKind::Suggestion {
            return false;
        }

        match message.status.advance(status) {
            Some(next) => {
                trace!(%message_id, ?next, "message status advanced");
                message.status = next;
                true
            }
            None => {
                debug!(%message_id, current = ?message.status, incoming = ?status, "stale status ack ignored");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ME: &str = "u-patient";
    const THEM: &str = "u-doctor";

    fn now() -> DateTime<Utc> {
        "2025-03-26T12:00:00Z"
            .parse::<DateTime<Utc>>()
            .expect("fixed now should parse")
    }

    fn inbound(id: &str, content: &str) -> Message {
        Message {
            id: id.to_owned(),
            conversation_id: "c-1".to_owned(),
            sender_id: THEM.to_owned(),
            receiver_id: ME.to_owned(),
            content: content.to_owned(),
            timestamp: now(),
            status: MessageStatus::Delivered,
            kind: MessageKind::Text,
            attachments: Vec::new(),
        }
    }

    #[test]
    fn sends_draft_text_and_clears_composition() {
        let mut thread = ThreadController::new(ME);
        thread.load_messages("c-1", vec![inbound("m-1", "hello")]);
        thread.update_draft_text("Feeling better today");
        thread.set_suggestions(vec!["Thanks!".to_owned()]);

        let sent = thread
            .send("c-1", THEM, now())
            .expect("text draft should send");

        assert_eq!(sent.content, "Feeling better today");
        assert_eq!(sent.kind, MessageKind::Text);
        assert_eq!(sent.status, MessageStatus::Sent);
        assert_eq!(sent.sender_id, ME);
        assert_eq!(thread.messages("c-1").len(), 2);
        assert!(thread.draft().text.is_empty());
        assert!(thread.draft().suggestions.is_empty());
    }

    #[test]
    fn send_with_empty_draft_is_a_no_op() {
        let mut thread = ThreadController::new(ME);
        thread.load_messages("c-1", vec![inbound("m-1", "hello")]);

        assert_eq!(thread.send("c-1", THEM, now()), None);
        assert_eq!(thread.messages("c-1").len(), 1);
    }

    #[test]
    fn text_wins_over_active_recording() {
        let mut thread = ThreadController::new(ME);
        thread.start_recording();
        thread.tick_recording();
        thread.update_draft_text("typed instead");

        let sent = thread.send("c-1", THEM, now()).expect("draft should send");
        assert_eq!(sent.kind, MessageKind::Text);
        assert_eq!(sent.content, "typed instead");
    }

    #[test]
    fn active_recording_sends_voice_note_with_elapsed_time() {
        let mut thread = ThreadController::new(ME);
        thread.start_recording();
        for _ in 0..65 {
            thread.tick_recording();
        }

        let sent = thread.send("c-1", THEM, now()).expect("voice should send");
        assert_eq!(sent.kind, MessageKind::Voice);
        assert_eq!(sent.content, "Voice message (1:05)");
        assert!(!thread.draft().recording.active);
        assert_eq!(thread.draft().recording.elapsed_seconds, 0);
    }

    #[test]
    fn staged_attachment_sends_image_message() {
        let mut thread = ThreadController::new(ME);
        thread.add_attachment_intent(Attachment {
            url: "blob://rash.png".to_owned(),
            mime_type: "image/png".to_owned(),
            name: "rash.png".to_owned(),
            size_bytes: Some(48_213),
        });

        let sent = thread
            .send("c-1", THEM, now())
            .expect("attachment should send");
        assert_eq!(sent.kind, MessageKind::Image);
        assert_eq!(sent.attachments.len(), 1);
        assert!(thread.draft().pending_attachments.is_empty());
    }

    #[test]
    fn ticker_counts_only_while_recording() {
        let mut thread = ThreadController::new(ME);
        thread.tick_recording();
        assert_eq!(thread.draft().recording.elapsed_seconds, 0);

        thread.start_recording();
        thread.tick_recording();
        thread.tick_recording();
        assert_eq!(thread.draft().recording.elapsed_seconds, 2);

        thread.stop_recording();
        thread.tick_recording();
        assert_eq!(thread.draft().recording.elapsed_seconds, 2);
    }

    #[test]
    fn status_ack_moves_forward_only() {
        let mut thread = ThreadController::new(ME);
        thread.update_draft_text("hi");
        let sent = thread.send("c-1", THEM, now()).expect("draft should send");

        assert!(thread.apply_status_ack("c-1", &sent.id, MessageStatus::Read));
        assert!(!thread.apply_status_ack("c-1", &sent.id, MessageStatus::Delivered));
        assert_eq!(
            thread.messages("c-1")[0].status,
            MessageStatus::Read
        );
    }

    #[test]
    fn status_ack_for_unknown_message_is_ignored() {
        let mut thread = ThreadController::new(ME);
        assert!(!thread.apply_status_ack("c-1", "m-404", MessageStatus::Read));
    }

    #[test]
    fn applying_suggestion_fills_draft_without_sending() {
        let mut thread = ThreadController::new(ME);
        thread.load_messages("c-1", vec![inbound("m-1", "hello")]);
        thread.set_suggestions(vec!["Thank you for the update.".to_owned()]);

        thread.apply_suggestion("Thank you for the update.");

        assert_eq!(thread.draft().text, "Thank you for the update.");
        assert!(thread.draft().suggestions.is_empty());
        assert_eq!(thread.messages("c-1").len(), 1);
    }

    #[test]
    fn reset_composition_discards_draft_recording_and_chips() {
        let mut thread = ThreadController::new(ME);
        thread.update_draft_text("half-typed");
        thread.start_recording();
        thread.set_suggestions(vec!["chip".to_owned()]);

        thread.reset_composition();

        assert_eq!(thread.draft(), &DraftComposition::default());
    }
}
