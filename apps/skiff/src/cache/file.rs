use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use skiff_core::message::{Message, MessageId};
use tokio::fs;
use tokio::sync::Mutex;

use super::{MessageStore, StoreError};

/// On-disk document holding both halves of the local cache.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheDocument {
    timeline: Vec<Message>,
    outbox: Vec<Message>,
}

/// Durable store persisting the cache as one JSON document.
///
/// Every mutation rewrites the document through a temp file + rename so a
/// crash mid-write never leaves a truncated cache behind. The in-memory copy
/// and the flush are held under one lock, which is the transactional boundary
/// the multi-threaded runtime needs around outbox add/remove.
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<CacheDocument>,
}

impl JsonFileStore {
    /// Opens (or creates) the store at `path`, loading any previous session's
    /// timeline and outbox.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let state = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => CacheDocument::default(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self, state: &CacheDocument) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl MessageStore for JsonFileStore {
    async fn add_to_outbox(&self, message: Message) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.outbox.push(message);
        self.flush(&state).await
    }

    async fn remove_from_outbox(&self, id: &MessageId) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.outbox.retain(|message| message.id != *id);
        self.flush(&state).await
    }

    async fn outbox(&self) -> Result<Vec<Message>, StoreError> {
        Ok(self.state.lock().await.outbox.clone())
    }

    async fn cached_timeline(&self) -> Result<Vec<Message>, StoreError> {
        Ok(self.state.lock().await.timeline.clone())
    }

    async fn replace_timeline(&self, messages: Vec<Message>) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.timeline = messages;
        self.flush(&state).await
    }

    async fn add_confirmed(&self, message: Message) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.timeline.push(message);
        self.flush(&state).await
    }
}
