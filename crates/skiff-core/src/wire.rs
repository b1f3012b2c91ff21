//! Wire payloads exchanged with the remote message store.
//!
//! Dates travel as epoch milliseconds and ids as server-assigned integers;
//! the conversion into the richer [`Message`] model happens here so the rest
//! of the client never touches raw payloads.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

use crate::UserId;
use crate::message::{Message, MessageId, MessageStatus};

/// One message as the server represents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub id: u64,
    pub text: String,
    /// Epoch milliseconds, UTC.
    pub date: i64,
    /// Author id.
    pub user: UserId,
}

/// Body of a timeline snapshot fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub messages: Vec<WireMessage>,
}

/// Errors raised while lifting a wire payload into the message model.
#[derive(Debug, Error)]
pub enum WireMessageError {
    #[error("timestamp {0} out of representable range")]
    TimestampOutOfRange(i64),
}

impl WireMessage {
    /// Lifts the payload into a confirmed [`Message`], deriving authorship
    /// from the session's user id.
    pub fn into_message(self, current_user: &UserId) -> Result<Message, WireMessageError> {
        let from_current_user = &self.user == current_user;
        Ok(Message {
            id: MessageId::Remote(self.id),
            text: self.text,
            date: date_from_millis(self.date)?,
            user_id: self.user,
            from_current_user,
            status: MessageStatus::Confirmed,
        })
    }
}

/// Converts epoch milliseconds into an [`OffsetDateTime`].
pub fn date_from_millis(millis: i64) -> Result<OffsetDateTime, WireMessageError> {
    OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000)
        .map_err(|_| WireMessageError::TimestampOutOfRange(millis))
}

/// Converts an [`OffsetDateTime`] back into epoch milliseconds.
pub fn date_to_millis(date: OffsetDateTime) -> i64 {
    (date.unix_timestamp_nanos() / 1_000_000) as i64
}
