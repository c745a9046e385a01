use crate::types::{Message, MessageKind};

/// Upper bound on reply candidates surfaced at once.
pub const MAX_SUGGESTIONS: usize = 3;

/// Strategy seam for deriving reply candidates from the latest inbound
/// message.
///
/// The default implementation is a deterministic keyword table; a real
/// recommender can be substituted here without touching the thread
/// controller or shell.
pub trait SuggestionStrategy: Send + Sync {
    /// Derive up to [`MAX_SUGGESTIONS`] candidate reply strings.
    ///
    /// Implementations must never fail: malformed or empty input yields an
    /// empty set, which simply hides the suggestion chips.
    fn suggest(&self, last_inbound: &Message) -> Vec<String>;
}

/// Canned reply sets routed by a fixed keyword table.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordSuggestions;

const PHOTO_KEYWORDS: &[&str] = &["photo", "picture", "image", "pic"];
const SYMPTOM_KEYWORDS: &[&str] = &[
    "pain", "symptom", "fever", "headache", "dizzy", "nausea", "cough",
];
const MEDICATION_KEYWORDS: &[&str] = &["medication", "prescription", "dose", "pill", "refill"];

const PHOTO_REPLIES: &[&str] = &[
    "Thanks, the photo came through clearly.",
    "Could you retake it in better lighting?",
    "I'll review the photo and follow up shortly.",
];
const SYMPTOM_REPLIES: &[&str] = &[
    "How long have you been feeling this way?",
    "On a scale of 1 to 10, how severe is it?",
    "Let's schedule a follow-up to look into this.",
];
const MEDICATION_REPLIES: &[&str] = &[
    "Please continue the current dosage for now.",
    "I'll send the refill to your pharmacy today.",
    "Have you noticed any side effects?",
];
const GENERIC_REPLIES: &[&str] = &[
    "Thank you for the update.",
    "Noted, I'll get back to you shortly.",
    "Could you tell me a bit more?",
];

impl SuggestionStrategy for KeywordSuggestions {
    fn suggest(&self, last_inbound: &Message) -> Vec<String> {
        if last_inbound.kind != MessageKind::Text {
            return Vec::new();
        }
        let content = last_inbound.content.trim().to_lowercase();
        if content.is_empty() {
            return Vec::new();
        }

        let replies = if contains_any(&content, PHOTO_KEYWORDS) {
            PHOTO_REPLIES
        } else if contains_any(&content, SYMPTOM_KEYWORDS) {
            SYMPTOM_REPLIES
        } else if contains_any(&content, MEDICATION_KEYWORDS) {
            MEDICATION_REPLIES
        } else {
            GENERIC_REPLIES
        };

        replies
            .iter()
            .take(MAX_SUGGESTIONS)
            .map(|reply| (*reply).to_owned())
            .collect()
    }
}

fn contains_any(content: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| content.contains(keyword))
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::status::MessageStatus;

    fn inbound(content: &str, kind: MessageKind) -> Message {
        Message {
            id: "m-1".to_owned(),
            conversation_id: "c-1".to_owned(),
            sender_id: "u-doctor".to_owned(),
            receiver_id: "u-patient".to_owned(),
            content: content.to_owned(),
            timestamp: "2025-03-26T08:00:00Z"
                .parse::<DateTime<Utc>>()
                .expect("test timestamp should parse"),
            status: MessageStatus::Delivered,
            kind,
            attachments: Vec::new(),
        }
    }

    #[test]
    fn routes_photo_keyword_to_photo_replies() {
        let chips =
            KeywordSuggestions.suggest(&inbound("I sent a photo of the rash", MessageKind::Text));
        assert!(!chips.is_empty());
        assert!(chips.len() <= MAX_SUGGESTIONS);
        assert!(chips[0].contains("photo"));
    }

    #[test]
    fn routes_symptom_keyword_case_insensitively() {
        let chips = KeywordSuggestions.suggest(&inbound(
            "The HEADACHE is worse this morning",
            MessageKind::Text,
        ));
        assert_eq!(chips[0], "How long have you been feeling this way?");
    }

    #[test]
    fn routes_medication_keyword_to_medication_replies() {
        let chips =
            KeywordSuggestions.suggest(&inbound("Do I need a refill soon?", MessageKind::Text));
        assert_eq!(chips[1], "I'll send the refill to your pharmacy today.");
    }

    #[test]
    fn falls_back_to_generic_replies_without_keyword_match() {
        let chips = KeywordSuggestions.suggest(&inbound("See you Thursday", MessageKind::Text));
        assert_eq!(chips.len(), 3);
        assert_eq!(chips[0], "Thank you for the update.");
    }

    #[test]
    fn returns_nothing_for_blank_or_non_text_input() {
        assert!(
            KeywordSuggestions
                .suggest(&inbound("   ", MessageKind::Text))
                .is_empty()
        );
        assert!(
            KeywordSuggestions
                .suggest(&inbound("voice note", MessageKind::Voice))
                .is_empty()
        );
    }
}
