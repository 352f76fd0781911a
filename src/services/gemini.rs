// src/services/gemini.rs
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::message::ChatMessage;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("request to generation API failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("generation API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode generation API response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// One role-tagged turn in the shape the generation API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: String,
    pub parts: Vec<Part>,
}

impl From<&ChatMessage> for Turn {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.clone(),
            parts: vec![Part {
                text: msg.content.clone(),
            }],
        }
    }
}

pub fn to_turns(messages: &[ChatMessage]) -> Vec<Turn> {
    messages.iter().map(Turn::from).collect()
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: &'a [Turn],
}

/// A backend that turns a conversation into a raw, loosely-shaped reply.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, turns: &[Turn]) -> Result<Value, GenerateError>;
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, turns: &[Turn]) -> Result<Value, GenerateError> {
        debug!(model = %self.model, turns = turns.len(), "calling generateContent");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest { contents: turns })
            .send()
            .await
            .map_err(GenerateError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            return Err(GenerateError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<Value>().await.map_err(GenerateError::Decode)
    }
}
