use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::UserId;
use crate::id::LocalId;

/// Identifier of a message in the timeline.
///
/// A message starts life under a client-minted [`LocalId`] and is promoted to
/// the server-assigned id on confirmation. A local id is never reused after
/// promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageId {
    Remote(u64),
    Local(LocalId),
}

impl MessageId {
    pub fn is_local(&self) -> bool {
        matches!(self, MessageId::Local(_))
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageId::Remote(id) => write!(f, "{id}"),
            MessageId::Local(id) => write!(f, "{id}"),
        }
    }
}

impl From<LocalId> for MessageId {
    fn from(value: LocalId) -> Self {
        MessageId::Local(value)
    }
}

/// Delivery state of a message as seen by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageStatus {
    /// In the outbox, submission not yet resolved.
    Pending,
    /// Acknowledged by the server and part of the authoritative timeline.
    Confirmed,
    /// Submission failed; kept only as a visual marker, never resubmitted.
    Failed,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub date: OffsetDateTime,
    pub user_id: UserId,
    pub from_current_user: bool,
    pub status: MessageStatus,
}

impl Message {
    /// Builds the optimistic pending message created at submission time.
    pub fn pending(id: LocalId, text: impl Into<String>, user_id: UserId) -> Self {
        Self {
            id: MessageId::Local(id),
            text: text.into(),
            date: OffsetDateTime::now_utc(),
            user_id,
            from_current_user: true,
            status: MessageStatus::Pending,
        }
    }
}

/// Promotion payload emitted when the server confirms a submission: the
/// authoritative id and timestamp that replace the optimistic entry's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReceipt {
    pub id: MessageId,
    pub date: OffsetDateTime,
}
