//! Core primitives shared by the `skiff` chat client.
//!
//! This crate intentionally keeps dependencies light so that the client app,
//! the CLI binary, and any test harnesses consume a single source of truth
//! for the message model, identifier scheme, wire payloads, and the pure
//! timeline-merge algorithm.

pub mod id;
pub mod message;
pub mod timeline;
pub mod wire;

pub use id::{LocalId, LocalIdGenerator};
pub use message::{Message, MessageId, MessageReceipt, MessageStatus};
pub use timeline::merge_timeline;
pub use wire::{SnapshotResponse, WireMessage, WireMessageError};

/// Identifier for a chat user.
///
/// Today this is a thin wrapper over `String`, but wiring it through a
/// newtype keeps type-safety at call sites and makes future migrations
/// (e.g. numeric IDs) easier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct UserId(pub String);

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        UserId(value.to_owned())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        UserId(value)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
