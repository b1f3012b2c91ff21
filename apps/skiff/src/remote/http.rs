use std::time::Duration;

use async_trait::async_trait;
use skiff_core::wire::{SnapshotResponse, WireMessage};
use url::Url;

use super::{BackendError, ChatBackend};

/// HTTP implementation of [`ChatBackend`].
///
/// Talks to the classic endpoints: `GET messages.json` for snapshots,
/// `POST send` with a `message` form field, and `POST subscribe` with an
/// `endpoint` form field. Session credentials ride along as a bearer token
/// when configured.
pub struct ReqwestChatBackend {
    base_url: Url,
    bearer_token: Option<String>,
    client: reqwest::Client,
}

impl ReqwestChatBackend {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, BackendError> {
        let raw = base_url.as_ref().trim();
        if raw.is_empty() {
            return Err(BackendError::InvalidConfig(
                "server base url cannot be empty".into(),
            ));
        }
        let base_url = Url::parse(raw)
            .map_err(|err| BackendError::InvalidConfig(format!("invalid server url: {err}")))?;
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(3))
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            base_url,
            bearer_token: None,
            client,
        })
    }

    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|err| BackendError::InvalidConfig(format!("invalid endpoint {path}: {err}")))
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[async_trait]
impl ChatBackend for ReqwestChatBackend {
    async fn fetch_snapshot(&self) -> Result<Vec<WireMessage>, BackendError> {
        let response = self
            .authorize(self.client.get(self.endpoint("messages.json")?))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BackendError::HttpStatus(response.status()));
        }
        let snapshot = response
            .json::<SnapshotResponse>()
            .await
            .map_err(|err| BackendError::InvalidResponse(err.to_string()))?;
        Ok(snapshot.messages)
    }

    async fn send_message(&self, text: &str) -> Result<WireMessage, BackendError> {
        let response = self
            .authorize(self.client.post(self.endpoint("send")?))
            .form(&[("message", text)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BackendError::HttpStatus(response.status()));
        }
        response
            .json::<WireMessage>()
            .await
            .map_err(|err| BackendError::InvalidResponse(err.to_string()))
    }

    async fn register_push(&self, endpoint: &str) -> Result<(), BackendError> {
        let response = self
            .authorize(self.client.post(self.endpoint("subscribe")?))
            .form(&[("endpoint", endpoint)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BackendError::HttpStatus(response.status()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_base_url() {
        assert!(matches!(
            ReqwestChatBackend::new("  "),
            Err(BackendError::InvalidConfig(_))
        ));
    }

    #[test]
    fn joins_endpoints_against_the_base() {
        let backend = ReqwestChatBackend::new("http://localhost:3000/chat/").unwrap();
        assert_eq!(
            backend.endpoint("messages.json").unwrap().as_str(),
            "http://localhost:3000/chat/messages.json"
        );
        assert_eq!(
            backend.endpoint("send").unwrap().as_str(),
            "http://localhost:3000/chat/send"
        );
    }
}
