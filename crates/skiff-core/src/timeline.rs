//! Pure timeline reconciliation.
//!
//! [`merge_timeline`] combines an authoritative snapshot with the still
//! in-flight outbox into the list the view should display. It is synchronous
//! and allocation-only so both the client services and the tests can call it
//! without a runtime.

use std::collections::HashSet;

use crate::message::{Message, MessageId};

/// Merges an authoritative snapshot with the current outbox.
///
/// Snapshot entries are deduplicated by id (first occurrence wins). Outbox
/// entries are overlaid afterwards: an in-flight message is never evicted by
/// a concurrent snapshot, and never duplicated if the snapshot already
/// carries its confirmed form. The result is stably sorted by ascending date,
/// so merging the same snapshot twice yields an identical list.
pub fn merge_timeline(snapshot: Vec<Message>, outbox: Vec<Message>) -> Vec<Message> {
    let mut seen: HashSet<MessageId> = HashSet::with_capacity(snapshot.len() + outbox.len());
    let mut merged: Vec<Message> = Vec::with_capacity(snapshot.len() + outbox.len());

    for message in snapshot.into_iter().chain(outbox) {
        if seen.insert(message.id) {
            merged.push(message);
        }
    }

    merged.sort_by_key(|message| message.date);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserId;
    use crate::id::LocalIdGenerator;
    use crate::message::MessageStatus;
    use time::OffsetDateTime;

    fn confirmed(id: u64, unix: i64) -> Message {
        Message {
            id: MessageId::Remote(id),
            text: format!("message {id}"),
            date: OffsetDateTime::from_unix_timestamp(unix).unwrap(),
            user_id: UserId::from("ada"),
            from_current_user: false,
            status: MessageStatus::Confirmed,
        }
    }

    fn pending(generator: &LocalIdGenerator, unix: i64) -> Message {
        let mut message = Message::pending(generator.next(), "in flight", UserId::from("me"));
        message.date = OffsetDateTime::from_unix_timestamp(unix).unwrap();
        message
    }

    #[test]
    fn orders_by_ascending_date() {
        let merged = merge_timeline(
            vec![confirmed(2, 200), confirmed(1, 100), confirmed(3, 300)],
            Vec::new(),
        );
        let ids: Vec<_> = merged.iter().map(|m| m.id).collect();
        assert_eq!(
            ids,
            vec![
                MessageId::Remote(1),
                MessageId::Remote(2),
                MessageId::Remote(3)
            ]
        );
        for pair in merged.windows(2) {
            assert!(pair[0].date <= pair[1].date);
        }
    }

    #[test]
    fn deduplicates_by_id() {
        let merged = merge_timeline(
            vec![confirmed(1, 100), confirmed(1, 100), confirmed(2, 200)],
            Vec::new(),
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merge_is_idempotent() {
        let snapshot = vec![confirmed(1, 100), confirmed(2, 200)];
        let once = merge_timeline(snapshot.clone(), Vec::new());
        let twice = merge_timeline(once.clone(), Vec::new());
        assert_eq!(once, twice);
    }

    #[test]
    fn outbox_entries_survive_the_merge() {
        let generator = LocalIdGenerator::new(5);
        let in_flight = pending(&generator, 400);
        let merged = merge_timeline(
            vec![confirmed(1, 100), confirmed(2, 200)],
            vec![in_flight.clone()],
        );
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.last().unwrap().id, in_flight.id);
    }

    #[test]
    fn outbox_entry_already_confirmed_is_not_duplicated() {
        // A snapshot that already carries the confirmed form of an outbox
        // entry (same remote id) wins; the overlay must not re-add it.
        let snapshot = vec![confirmed(7, 700)];
        let mut stale = confirmed(7, 700);
        stale.status = MessageStatus::Pending;
        let merged = merge_timeline(snapshot, vec![stale]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].status, MessageStatus::Confirmed);
    }

    #[test]
    fn empty_snapshot_keeps_outbox() {
        let generator = LocalIdGenerator::new(11);
        let in_flight = pending(&generator, 50);
        let merged = merge_timeline(Vec::new(), vec![in_flight.clone()]);
        assert_eq!(merged, vec![in_flight]);
    }
}
