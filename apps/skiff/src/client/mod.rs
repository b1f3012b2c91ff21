//! The chat client proper: outbox reconciliation and timeline loading over
//! injected collaborators.

pub mod outbox;
pub mod timeline;

use std::sync::Arc;

use skiff_core::id::LocalIdGenerator;
use skiff_core::message::{Message, MessageId, MessageReceipt};

use crate::cache::MessageStore;
use crate::remote::ChatBackend;
use crate::session::SessionContext;

/// Render-command sink. The core never draws anything itself; it emits these
/// commands and a view collaborator turns them into pixels (or stdout lines).
pub trait MessageSink: Send + Sync {
    /// Renders one new message (the optimistic path).
    fn add_message(&self, message: &Message);

    /// Renders the cached history on startup.
    fn add_messages(&self, messages: &[Message]);

    /// Re-renders the timeline after a snapshot merge.
    fn merge_messages(&self, messages: &[Message]);

    /// Replaces the optimistic entry with its confirmed id and date.
    fn mark_sent(&self, local_id: &MessageId, receipt: &MessageReceipt);

    /// Flags the optimistic entry as failed.
    fn mark_failed(&self, local_id: &MessageId);

    /// Surfaces a non-blocking warning to the user.
    fn warn(&self, text: &str);
}

/// Terminal state of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server acknowledged the message; the receipt carries its
    /// authoritative id and date.
    Confirmed(MessageReceipt),
    /// The submission failed; the id names the optimistic entry that was
    /// marked failed. Never retried automatically.
    Failed(MessageId),
}

/// Chat client composed from injected collaborators.
pub struct ChatClient {
    session: SessionContext,
    store: Arc<dyn MessageStore>,
    backend: Arc<dyn ChatBackend>,
    sink: Arc<dyn MessageSink>,
    ids: LocalIdGenerator,
}

impl ChatClient {
    pub fn new(
        session: SessionContext,
        store: Arc<dyn MessageStore>,
        backend: Arc<dyn ChatBackend>,
        sink: Arc<dyn MessageSink>,
    ) -> Self {
        Self {
            session,
            store,
            backend,
            sink,
            ids: LocalIdGenerator::new(rand::random()),
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }
}
