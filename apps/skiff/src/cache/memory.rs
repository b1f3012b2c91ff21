use async_trait::async_trait;
use skiff_core::message::{Message, MessageId};
use tokio::sync::RwLock;

use super::{MessageStore, StoreError};

/// Non-durable store backed by process memory. Used by tests and by the
/// `--ephemeral` CLI mode; mutations are serialized behind one lock so the
/// submit and load paths never interleave a read-modify-write.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<State>,
}

#[derive(Default)]
struct State {
    timeline: Vec<Message>,
    outbox: Vec<Message>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn add_to_outbox(&self, message: Message) -> Result<(), StoreError> {
        self.inner.write().await.outbox.push(message);
        Ok(())
    }

    async fn remove_from_outbox(&self, id: &MessageId) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .outbox
            .retain(|message| message.id != *id);
        Ok(())
    }

    async fn outbox(&self) -> Result<Vec<Message>, StoreError> {
        Ok(self.inner.read().await.outbox.clone())
    }

    async fn cached_timeline(&self) -> Result<Vec<Message>, StoreError> {
        Ok(self.inner.read().await.timeline.clone())
    }

    async fn replace_timeline(&self, messages: Vec<Message>) -> Result<(), StoreError> {
        self.inner.write().await.timeline = messages;
        Ok(())
    }

    async fn add_confirmed(&self, message: Message) -> Result<(), StoreError> {
        self.inner.write().await.timeline.push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skiff_core::UserId;
    use skiff_core::id::LocalIdGenerator;

    #[tokio::test]
    async fn outbox_add_then_remove() {
        let store = MemoryStore::new();
        let generator = LocalIdGenerator::new(1);
        let message = Message::pending(generator.next(), "hi", UserId::from("me"));
        let id = message.id;

        store.add_to_outbox(message).await.unwrap();
        assert_eq!(store.outbox().await.unwrap().len(), 1);

        store.remove_from_outbox(&id).await.unwrap();
        assert!(store.outbox().await.unwrap().is_empty());
    }
}
