//! Local persistence boundary: the confirmed timeline plus the outbox of
//! not-yet-confirmed messages.
//!
//! Everything behind [`MessageStore`] must be durable across a restart; the
//! submit path awaits `add_to_outbox` before the optimistic render precisely
//! so a reload during an in-flight send still finds the pending message.

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use skiff_core::message::{Message, MessageId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache document corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Async store for the cached timeline and the outbox.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Adds a pending message to the outbox.
    async fn add_to_outbox(&self, message: Message) -> Result<(), StoreError>;

    /// Removes an outbox entry once its submission resolved, success or not.
    async fn remove_from_outbox(&self, id: &MessageId) -> Result<(), StoreError>;

    /// Current outbox contents, oldest first.
    async fn outbox(&self) -> Result<Vec<Message>, StoreError>;

    /// Last known confirmed timeline.
    async fn cached_timeline(&self) -> Result<Vec<Message>, StoreError>;

    /// Replaces the cached timeline with a fresh authoritative snapshot.
    async fn replace_timeline(&self, messages: Vec<Message>) -> Result<(), StoreError>;

    /// Appends one confirmed message to the cached timeline.
    async fn add_confirmed(&self, message: Message) -> Result<(), StoreError>;
}
