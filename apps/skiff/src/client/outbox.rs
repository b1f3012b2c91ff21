//! Outbox reconciliation: one outgoing message's journey from user intent to
//! its confirmed or failed terminal state.

use skiff_core::message::{Message, MessageId, MessageReceipt};

use super::{ChatClient, SubmitOutcome};

impl ChatClient {
    /// Submits one composed message.
    ///
    /// Ordering is a contract: the pending entry is persisted into the outbox
    /// first (so a restart mid-send still finds it), the optimistic render is
    /// emitted second, and only then is the network awaited. The user sees
    /// their message immediately regardless of network latency.
    ///
    /// Whatever the network says, the outbox entry is removed once the
    /// response arrives; there is no automatic retry.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let local_id = self.ids.next();
        let message = Message::pending(local_id, text, self.session.user_id().clone());
        let message_id = MessageId::Local(local_id);

        if let Err(err) = self.store.add_to_outbox(message.clone()).await {
            // Optimistic feedback wins over durability: render anyway, but
            // tell the user this message would not survive a restart.
            tracing::warn!(
                target: "skiff::outbox",
                %message_id,
                error = %err,
                "failed to persist pending message"
            );
            self.sink
                .warn("Couldn't save this message locally; it won't survive a restart.");
        }

        self.sink.add_message(&message);

        let result = self.backend.send_message(text).await;

        if let Err(err) = self.store.remove_from_outbox(&message_id).await {
            tracing::warn!(
                target: "skiff::outbox",
                %message_id,
                error = %err,
                "failed to clear outbox entry"
            );
        }

        let wire = match result {
            Ok(wire) => wire,
            Err(err) => {
                tracing::warn!(
                    target: "skiff::outbox",
                    %message_id,
                    error = %err,
                    "message submission failed"
                );
                self.sink.mark_failed(&message_id);
                return SubmitOutcome::Failed(message_id);
            }
        };

        let confirmed = match wire.into_message(self.session.user_id()) {
            Ok(confirmed) => confirmed,
            Err(err) => {
                tracing::warn!(
                    target: "skiff::outbox",
                    %message_id,
                    error = %err,
                    "server response could not be parsed"
                );
                self.sink.mark_failed(&message_id);
                return SubmitOutcome::Failed(message_id);
            }
        };

        let receipt = MessageReceipt {
            id: confirmed.id,
            date: confirmed.date,
        };

        if let Err(err) = self.store.add_confirmed(confirmed).await {
            tracing::warn!(
                target: "skiff::outbox",
                %message_id,
                error = %err,
                "failed to cache confirmed message"
            );
        }

        tracing::debug!(
            target: "skiff::outbox",
            %message_id,
            confirmed_id = %receipt.id,
            "message confirmed"
        );
        self.sink.mark_sent(&message_id, &receipt);
        SubmitOutcome::Confirmed(receipt)
    }
}
