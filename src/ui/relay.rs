// src/ui/relay.rs
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::message::{ChatMessage, ChatRequest};

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("relay unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("relay returned status {0}")]
    Status(u16),

    #[error("relay sent an unreadable body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Client side of `POST /api/chat`.
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// `Ok(None)` means the relay answered but carried no usable `result`.
    async fn send(&self, messages: Vec<ChatMessage>) -> Result<Option<String>, RelayError>;
}

#[derive(Debug, Clone)]
pub struct HttpRelayClient {
    client: Client,
    endpoint: String,
}

impl HttpRelayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/api/chat", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn send(&self, messages: Vec<ChatMessage>) -> Result<Option<String>, RelayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest { messages })
            .send()
            .await
            .map_err(RelayError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Status(status.as_u16()));
        }

        let body: Value = response.json().await.map_err(RelayError::Decode)?;
        Ok(body
            .get("result")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string))
    }
}
