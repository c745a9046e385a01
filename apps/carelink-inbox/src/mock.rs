//! In-memory fixture data standing in for the real conversation backend.

use chrono::{DateTime, Duration, Utc};
use messaging_core::{
    Attachment, Conversation, DataSource, Message, MessageKind, MessagePreview, MessageStatus,
    Participant, ParticipantRole,
};

/// Fixture-backed [`DataSource`] with a small telehealth inbox.
#[derive(Debug, Clone)]
pub struct MockDataSource {
    current_user_id: String,
    base: DateTime<Utc>,
}

impl MockDataSource {
    /// Build fixtures anchored to the given instant.
    pub fn new(current_user_id: impl Into<String>, base: DateTime<Utc>) -> Self {
        Self {
            current_user_id: current_user_id.into(),
            base,
        }
    }

    fn participant(
        id: &str,
        name: &str,
        role: ParticipantRole,
        online: bool,
        last_active_label: Option<&str>,
    ) -> Participant {
        Participant {
            id: id.to_owned(),
            display_name: name.to_owned(),
            avatar_ref: Some(format!("avatars/{id}.png")),
            role,
            online,
            last_active_label: last_active_label.map(str::to_owned),
        }
    }

    fn message(
        &self,
        id: &str,
        conversation_id: &str,
        sender_id: &str,
        content: &str,
        minutes_ago: i64,
        status: MessageStatus,
        kind: MessageKind,
        attachments: Vec<Attachment>,
    ) -> Message {
        let receiver_id = if sender_id == self.current_user_id {
            format!("u-{}", conversation_id.trim_start_matches("c-"))
        } else {
            self.current_user_id.clone()
        };
        Message {
            id: id.to_owned(),
            conversation_id: conversation_id.to_owned(),
            sender_id: sender_id.to_owned(),
            receiver_id,
            content: content.to_owned(),
            timestamp: self.base - Duration::minutes(minutes_ago),
            status,
            kind,
            attachments,
        }
    }
}

impl DataSource for MockDataSource {
    fn conversations(&self) -> Vec<Conversation> {
        vec![
            Conversation {
                id: "c-chen".to_owned(),
                participant: Self::participant(
                    "u-chen",
                    "Dr. Sarah Chen",
                    ParticipantRole::Doctor,
                    true,
                    None,
                ),
                last_preview: MessagePreview {
                    content: "The photo looks much better than last week".to_owned(),
                    timestamp: self.base - Duration::minutes(12),
                    sender_id: "u-chen".to_owned(),
                    status: MessageStatus::Delivered,
                },
                unread_count: 2,
            },
            Conversation {
                id: "c-patel".to_owned(),
                participant: Self::participant(
                    "u-patel",
                    "Priya Patel",
                    ParticipantRole::Nurse,
                    false,
                    Some("Active 2h ago"),
                ),
                last_preview: MessagePreview {
                    content: "Your next dose is due at 8pm".to_owned(),
                    timestamp: self.base - Duration::hours(3),
                    sender_id: "u-patel".to_owned(),
                    status: MessageStatus::Delivered,
                },
                unread_count: 1,
            },
            Conversation {
                id: "c-webb".to_owned(),
                participant: Self::participant(
                    "u-webb",
                    "Dr. Marcus Webb",
                    ParticipantRole::Doctor,
                    false,
                    Some("Active yesterday"),
                ),
                last_preview: MessagePreview {
                    content: "Voice message (0:42)".to_owned(),
                    timestamp: self.base - Duration::days(1) - Duration::hours(2),
                    sender_id: self.current_user_id.clone(),
                    status: MessageStatus::Read,
                },
                unread_count: 0,
            },
        ]
    }

    fn messages(&self, conversation_id: &str) -> Vec<Message> {
        let me = self.current_user_id.as_str();
        match conversation_id {
            "c-chen" => vec![
                self.message(
                    "m-chen-1",
                    "c-chen",
                    me,
                    "Here is how the incision looks today",
                    60 * 26,
                    MessageStatus::Read,
                    MessageKind::Text,
                    Vec::new(),
                ),
                self.message(
                    "m-chen-2",
                    "c-chen",
                    me,
                    "incision.jpg",
                    60 * 26 - 1,
                    MessageStatus::Read,
                    MessageKind::Image,
                    vec![Attachment {
                        url: "blob://incision.jpg".to_owned(),
                        mime_type: "image/jpeg".to_owned(),
                        name: "incision.jpg".to_owned(),
                        size_bytes: Some(182_044),
                    }],
                ),
                self.message(
                    "m-chen-3",
                    "c-chen",
                    "u-chen",
                    "The photo looks much better than last week",
                    12,
                    MessageStatus::Delivered,
                    MessageKind::Text,
                    Vec::new(),
                ),
            ],
            "c-patel" => vec![
                self.message(
                    "m-patel-1",
                    "c-patel",
                    me,
                    "Should I take the medication with food?",
                    60 * 5,
                    MessageStatus::Read,
                    MessageKind::Text,
                    Vec::new(),
                ),
                self.message(
                    "m-patel-2",
                    "c-patel",
                    "u-patel",
                    "Your next dose is due at 8pm",
                    60 * 3,
                    MessageStatus::Delivered,
                    MessageKind::Text,
                    Vec::new(),
                ),
            ],
            "c-webb" => vec![
                self.message(
                    "m-webb-1",
                    "c-webb",
                    "u-webb",
                    "How are the new symptoms developing?",
                    60 * 27,
                    MessageStatus::Read,
                    MessageKind::Text,
                    Vec::new(),
                ),
                self.message(
                    "m-webb-2",
                    "c-webb",
                    me,
                    "Voice message (0:42)",
                    60 * 26,
                    MessageStatus::Read,
                    MessageKind::Voice,
                    Vec::new(),
                ),
            ],
            _ => Vec::new(),
        }
    }
}

const FEED_SENDERS: &[(&str, &str)] = &[
    ("c-chen", "u-chen"),
    ("c-patel", "u-patel"),
    ("c-webb", "u-webb"),
];

const FEED_BODIES: &[&str] = &[
    "Could you send a photo of how it looks now?",
    "Any pain since this morning?",
    "Remember to log your medication today.",
    "Your results came back, all clear.",
];

/// Fabricate one inbound message for the simulated activity feed.
///
/// Rotates deterministically through conversations and bodies so repeated
/// ticks exercise different suggestion routes.
pub fn feed_message(tick: u64, now: DateTime<Utc>) -> Message {
    let (conversation_id, sender_id) = FEED_SENDERS[(tick as usize) % FEED_SENDERS.len()];
    let body = FEED_BODIES[(tick as usize) % FEED_BODIES.len()];
    Message {
        id: format!("m-feed-{tick}"),
        conversation_id: conversation_id.to_owned(),
        sender_id: sender_id.to_owned(),
        receiver_id: "u-self".to_owned(),
        content: body.to_owned(),
        timestamp: now,
        status: MessageStatus::Delivered,
        kind: MessageKind::Text,
        attachments: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> MockDataSource {
        MockDataSource::new(
            "u-self",
            "2025-03-26T12:00:00Z"
                .parse()
                .expect("fixed base should parse"),
        )
    }

    #[test]
    fn conversation_ids_are_unique() {
        let conversations = source().conversations();
        let mut ids: Vec<String> = conversations.into_iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn histories_are_time_ordered_per_conversation() {
        let source = source();
        for conversation in source.conversations() {
            let messages = source.messages(&conversation.id);
            assert!(!messages.is_empty());
            for pair in messages.windows(2) {
                assert!(
                    pair[0].timestamp <= pair[1].timestamp,
                    "history of {} must be non-decreasing",
                    conversation.id
                );
            }
        }
    }

    #[test]
    fn image_and_file_messages_carry_attachments() {
        let source = source();
        for conversation in source.conversations() {
            for message in source.messages(&conversation.id) {
                if matches!(message.kind, MessageKind::Image | MessageKind::File) {
                    assert!(
                        !message.attachments.is_empty(),
                        "message {} must carry attachments",
                        message.id
                    );
                }
            }
        }
    }

    #[test]
    fn feed_rotates_conversations_and_bodies() {
        let now = "2025-03-26T12:00:00Z".parse().expect("now should parse");
        let first = feed_message(0, now);
        let second = feed_message(1, now);
        assert_ne!(first.conversation_id, second.conversation_id);
        assert_ne!(first.content, second.content);
    }
}
