// src/ui/controller.rs
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::warn;

use super::relay::RelayClient;
use super::view::{Author, ChatView, MessageHandle};
use crate::message::ChatMessage;

pub const THINKING: &str = "Thinking...";
pub const NO_RESPONSE: &str = "No response";
pub const FAILURE: &str = "Error: could not reach the server.";

/// A submission whose placeholder is on screen and whose reply is outstanding.
#[derive(Debug)]
pub struct PendingReply {
    pub handle: MessageHandle,
    pub messages: Vec<ChatMessage>,
}

pub struct ChatController<V, R> {
    view: Arc<Mutex<V>>,
    relay: Arc<R>,
}

impl<V, R> Clone for ChatController<V, R> {
    fn clone(&self) -> Self {
        Self {
            view: Arc::clone(&self.view),
            relay: Arc::clone(&self.relay),
        }
    }
}

impl<V: ChatView, R: RelayClient> ChatController<V, R> {
    pub fn new(view: V, relay: R) -> Self {
        Self {
            view: Arc::new(Mutex::new(view)),
            relay: Arc::new(relay),
        }
    }

    pub fn view(&self) -> &Arc<Mutex<V>> {
        &self.view
    }

    pub fn relay(&self) -> &Arc<R> {
        &self.relay
    }

    /// Renders the user's message and a placeholder, then clears the input.
    /// Blank input is ignored.
    pub async fn begin(&self, input: &str) -> Option<PendingReply> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        let mut view = self.view.lock().await;
        view.append_message(Author::User, text);
        view.scroll_to_latest();
        let handle = view.append_message(Author::Bot, THINKING);
        view.scroll_to_latest();
        view.clear_input();

        Some(PendingReply {
            handle,
            messages: vec![ChatMessage::user(text)],
        })
    }

    /// Waits for the relay and rewrites the placeholder with the outcome.
    pub async fn resolve(&self, pending: PendingReply) {
        let text = match self.relay.send(pending.messages).await {
            Ok(Some(result)) => result,
            Ok(None) => NO_RESPONSE.to_string(),
            Err(e) => {
                warn!(error = %e, "chat request failed");
                FAILURE.to_string()
            }
        };

        self.view.lock().await.update_message(pending.handle, &text);
    }

    pub async fn submit(&self, input: &str) {
        if let Some(pending) = self.begin(input).await {
            self.resolve(pending).await;
        }
    }
}
