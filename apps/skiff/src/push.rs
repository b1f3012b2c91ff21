//! Push-subscription registration.
//!
//! The synchronization core never sees push plumbing; this adapter normalizes
//! the endpoint and fires the registration at the backend. Failures are
//! logged once and never surfaced per-operation.

use std::sync::Arc;

use crate::remote::ChatBackend;

/// Collapses the two legacy subscription representations into one endpoint
/// string. Older platforms reported a separate `subscription_id` that the
/// server expects appended to the endpoint path.
pub fn normalized_endpoint(endpoint: &str, legacy_subscription_id: Option<&str>) -> String {
    match legacy_subscription_id {
        Some(id) if !endpoint.contains(id) => format!("{endpoint}/{id}"),
        _ => endpoint.to_string(),
    }
}

/// Registers the push endpoint, fire-and-forget.
pub async fn register(backend: Arc<dyn ChatBackend>, endpoint: &str) {
    match backend.register_push(endpoint).await {
        Ok(()) => {
            tracing::debug!(target: "skiff::push", endpoint, "push endpoint registered");
        }
        Err(err) => {
            tracing::warn!(target: "skiff::push", error = %err, "push registration failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_a_missing_legacy_id() {
        assert_eq!(
            normalized_endpoint("https://push.example/reg/abc", Some("sub-1")),
            "https://push.example/reg/abc/sub-1"
        );
    }

    #[test]
    fn leaves_an_already_embedded_id_alone() {
        assert_eq!(
            normalized_endpoint("https://push.example/reg/sub-1", Some("sub-1")),
            "https://push.example/reg/sub-1"
        );
    }

    #[test]
    fn passes_modern_endpoints_through() {
        assert_eq!(
            normalized_endpoint("https://push.example/reg/abc", None),
            "https://push.example/reg/abc"
        );
    }
}
