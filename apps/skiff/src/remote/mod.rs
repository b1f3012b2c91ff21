//! Network boundary to the authoritative message store.

pub mod http;

pub use http::ReqwestChatBackend;

use async_trait::async_trait;
use reqwest::StatusCode;
use skiff_core::wire::WireMessage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid backend configuration: {0}")]
    InvalidConfig(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected http status {0}")]
    HttpStatus(StatusCode),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Remote operations the client depends on. Injected as a trait object so
/// tests can substitute a scripted backend.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Fetches the authoritative timeline snapshot.
    async fn fetch_snapshot(&self) -> Result<Vec<WireMessage>, BackendError>;

    /// Submits one message; a success response carries the canonical
    /// server-side representation.
    async fn send_message(&self, text: &str) -> Result<WireMessage, BackendError>;

    /// Registers a normalized push endpoint. Fire-and-forget from the
    /// caller's point of view.
    async fn register_push(&self, endpoint: &str) -> Result<(), BackendError>;
}
