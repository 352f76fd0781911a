use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

use crate::{
    error::AppError,
    message::{ChatMessage, ChatResponse},
    services::{extract::extract_text, gemini::to_turns},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(body) = payload?;
    let messages = parse_messages(&body)?;
    let turns = to_turns(&messages);

    info!(turns = turns.len(), "relaying chat");

    let raw = state.generator.generate(&turns).await.map_err(|e| {
        error!(error = %e, "generation call failed");
        AppError::from(e)
    })?;

    Ok(Json(ChatResponse {
        result: extract_text(&raw),
    }))
}

/// `messages` has to be a JSON array of `{role, content}` objects.
fn parse_messages(body: &Value) -> Result<Vec<ChatMessage>, AppError> {
    let Some(Value::Array(items)) = body.get("messages") else {
        return Err(AppError::BadRequest("messages must be an array".to_string()));
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            ChatMessage::deserialize(item)
                .map_err(|e| AppError::BadRequest(format!("messages[{i}] is invalid: {e}")))
        })
        .collect()
}
