//! Timeline loading: cached history first, authoritative snapshot when it
//! arrives, in-flight outbox entries overlaid on top.

use std::sync::Arc;

use skiff_core::message::Message;
use skiff_core::timeline::merge_timeline;
use skiff_core::wire::WireMessage;

use super::ChatClient;

impl ChatClient {
    /// Loads the timeline.
    ///
    /// The remote fetch starts first so the cached render never delays it;
    /// cached history is drawn as soon as the store answers. When the
    /// snapshot lands it replaces the cached timeline wholesale, and the
    /// merged view (snapshot plus whatever is still in the outbox) is
    /// re-rendered. A fetch failure leaves the cached view standing and
    /// surfaces a non-blocking warning.
    pub async fn load_timeline(&self) {
        let backend = Arc::clone(&self.backend);
        let fetch = tokio::spawn(async move { backend.fetch_snapshot().await });

        // Cache and network are independent failure domains: a broken cache
        // read must not stop the snapshot from rendering.
        match self.store.cached_timeline().await {
            Ok(cached) => self.sink.add_messages(&cached),
            Err(err) => {
                tracing::warn!(target: "skiff::timeline", error = %err, "cached timeline unreadable");
                self.sink.warn("Stored history couldn't be read.");
            }
        }

        let wire = match fetch.await {
            Ok(Ok(messages)) => messages,
            Ok(Err(err)) => {
                tracing::warn!(target: "skiff::timeline", error = %err, "snapshot fetch failed");
                self.sink
                    .warn("Couldn't refresh messages from the server; showing stored history.");
                return;
            }
            Err(err) => {
                tracing::warn!(target: "skiff::timeline", error = %err, "snapshot task aborted");
                self.sink
                    .warn("Couldn't refresh messages from the server; showing stored history.");
                return;
            }
        };

        let snapshot = match self.lift_snapshot(wire) {
            Ok(snapshot) => snapshot,
            Err(text) => {
                self.sink.warn(&text);
                return;
            }
        };

        // The snapshot is authoritative: it replaces the cached timeline
        // before the merged view is rendered. A write failure only costs
        // durability, not the render.
        if let Err(err) = self.store.replace_timeline(snapshot.clone()).await {
            tracing::warn!(target: "skiff::timeline", error = %err, "failed to persist snapshot");
        }

        let outbox = match self.store.outbox().await {
            Ok(outbox) => outbox,
            Err(err) => {
                tracing::warn!(target: "skiff::timeline", error = %err, "outbox unreadable during merge");
                Vec::new()
            }
        };

        let merged = merge_timeline(snapshot, outbox);
        tracing::debug!(
            target: "skiff::timeline",
            messages = merged.len(),
            "timeline merged"
        );
        self.sink.merge_messages(&merged);
    }

    fn lift_snapshot(&self, wire: Vec<WireMessage>) -> Result<Vec<Message>, String> {
        wire.into_iter()
            .map(|message| {
                message
                    .into_message(self.session.user_id())
                    .map_err(|err| {
                        tracing::warn!(target: "skiff::timeline", error = %err, "snapshot entry rejected");
                        "Server sent an unreadable timeline; showing stored history.".to_string()
                    })
            })
            .collect()
    }
}
