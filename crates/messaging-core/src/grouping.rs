use chrono::{Datelike, Days, NaiveDate};

use crate::types::Message;

/// One calendar-date bucket produced by [`group_by_date`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGroup {
    /// `"Today"`, `"Yesterday"`, or a long-form weekday/month/day label.
    pub date_label: String,
    /// Messages on that date, in input order.
    pub messages: Vec<Message>,
}

/// Group an already-time-ordered message sequence into date buckets.
///
/// A new bucket starts whenever the calendar date differs from the previous
/// message's calendar date. Single linear pass, pure function: identical
/// input always yields identical grouping.
pub fn group_by_date(messages: &[Message], today: NaiveDate) -> Vec<DateGroup> {
    let mut groups: Vec<DateGroup> = Vec::new();
    let mut current_date: Option<NaiveDate> = None;

    for message in messages {
        let date = message.timestamp.date_naive();
        if current_date != Some(date) {
            groups.push(DateGroup {
                date_label: date_label(date, today),
                messages: Vec::new(),
            });
            current_date = Some(date);
        }
        if let Some(group) = groups.last_mut() {
            group.messages.push(message.clone());
        }
    }

    groups
}

fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_owned();
    }
    if today.checked_sub_days(Days::new(1)) == Some(date) {
        return "Yesterday".to_owned();
    }
    format!("{}, {} {}", weekday_name(date), month_name(date), date.day())
}

fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday",
    }
}

fn month_name(date: NaiveDate) -> &'static str {
    match date.month() {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::status::MessageStatus;
    use crate::types::MessageKind;

    fn message(id: &str, timestamp: &str) -> Message {
        Message {
            id: id.to_owned(),
            conversation_id: "c-1".to_owned(),
            sender_id: "u-doctor".to_owned(),
            receiver_id: "u-patient".to_owned(),
            content: format!("body of {id}"),
            timestamp: timestamp
                .parse::<DateTime<Utc>>()
                .expect("test timestamp should parse"),
            status: MessageStatus::Read,
            kind: MessageKind::Text,
            attachments: Vec::new(),
        }
    }

    fn today() -> NaiveDate {
        "2025-03-26T12:00:00Z"
            .parse::<DateTime<Utc>>()
            .expect("fixed now should parse")
            .date_naive()
    }

    #[test]
    fn returns_no_buckets_for_empty_input() {
        assert_eq!(group_by_date(&[], today()), Vec::new());
    }

    #[test]
    fn returns_single_bucket_for_single_message() {
        let groups = group_by_date(&[message("m-1", "2025-03-26T08:00:00Z")], today());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].date_label, "Today");
        assert_eq!(groups[0].messages.len(), 1);
    }

    #[test]
    fn splits_today_and_yesterday_into_two_buckets() {
        let groups = group_by_date(
            &[
                message("m-old", "2025-03-25T08:00:00Z"),
                message("m-new", "2025-03-26T08:00:00Z"),
            ],
            today(),
        );

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date_label, "Yesterday");
        assert_eq!(groups[0].messages[0].id, "m-old");
        assert_eq!(groups[1].date_label, "Today");
        assert_eq!(groups[1].messages[0].id, "m-new");
    }

    #[test]
    fn labels_older_dates_with_long_form() {
        let groups = group_by_date(&[message("m-1", "2025-03-21T10:00:00Z")], today());
        assert_eq!(groups[0].date_label, "Friday, March 21");
    }

    #[test]
    fn keeps_same_date_messages_in_one_bucket() {
        let groups = group_by_date(
            &[
                message("m-1", "2025-03-26T08:00:00Z"),
                message("m-2", "2025-03-26T09:30:00Z"),
                message("m-3", "2025-03-26T11:45:00Z"),
            ],
            today(),
        );

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].messages.len(), 3);
    }

    #[test]
    fn regrouping_flattened_buckets_is_idempotent() {
        let messages = vec![
            message("m-1", "2025-03-20T08:00:00Z"),
            message("m-2", "2025-03-20T09:00:00Z"),
            message("m-3", "2025-03-25T10:00:00Z"),
            message("m-4", "2025-03-26T07:00:00Z"),
        ];

        let first = group_by_date(&messages, today());
        let flattened: Vec<Message> = first
            .iter()
            .flat_map(|group| group.messages.iter().cloned())
            .collect();
        let second = group_by_date(&flattened, today());

        assert_eq!(first, second);
    }
}
