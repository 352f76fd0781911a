//! Exercises the real HTTP clients against a stand-in generation API.

use gemini_relay::config::Config;
use gemini_relay::message::ChatMessage;
use gemini_relay::routes::create_router;
use gemini_relay::services::gemini::{GeminiClient, GenerateError, Generator, to_turns};
use gemini_relay::state::AppState;
use gemini_relay::ui::{
    Author, ChatController, HttpRelayClient, RelayClient, RelayError, Transcript,
};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug)]
struct Captured {
    path: String,
    api_key: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct Upstream {
    status: StatusCode,
    reply: Value,
    seen: Seen,
}

async fn upstream_handler(
    State(upstream): State<Upstream>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    upstream.seen.lock().unwrap().push(Captured {
        path: uri.path().to_string(),
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });
    (upstream.status, Json(upstream.reply.clone()))
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

type Seen = Arc<Mutex<Vec<Captured>>>;

async fn fake_gemini(status: StatusCode, reply: Value) -> (SocketAddr, Seen) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let upstream = Upstream {
        status,
        reply,
        seen: seen.clone(),
    };
    let app = Router::new().fallback(upstream_handler).with_state(upstream);
    (serve(app).await, seen)
}

fn config_for(addr: SocketAddr) -> Config {
    let base = format!("http://{addr}");
    Config::from_lookup(move |key| match key {
        "GEMINI_API_KEY" => Some("k-123".to_string()),
        "GEMINI_API_BASE" => Some(base.clone()),
        _ => None,
    })
    .unwrap()
}

#[tokio::test]
async fn test_gemini_client_posts_contents() {
    let reply = json!({ "candidates": [{ "content": { "parts": [{ "text": "pong" }] } }] });
    let (addr, seen) = fake_gemini(StatusCode::OK, reply.clone()).await;
    let client = GeminiClient::new(&config_for(addr));

    let raw = client
        .generate(&to_turns(&[ChatMessage::user("ping")]))
        .await
        .unwrap();
    assert_eq!(raw, reply);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].path,
        format!("/v1beta/models/{}:generateContent", client.model())
    );
    assert_eq!(seen[0].api_key.as_deref(), Some("k-123"));
    assert_eq!(
        seen[0].body,
        json!({ "contents": [{ "role": "user", "parts": [{ "text": "ping" }] }] })
    );
}

#[tokio::test]
async fn test_gemini_client_reports_error_status() {
    let (addr, _seen) = fake_gemini(
        StatusCode::FORBIDDEN,
        json!({ "error": { "message": "API key not valid" } }),
    )
    .await;
    let client = GeminiClient::new(&config_for(addr));

    let err = client
        .generate(&to_turns(&[ChatMessage::user("ping")]))
        .await
        .unwrap_err();
    match err {
        GenerateError::Status { status, body } => {
            assert_eq!(status, 403);
            assert!(body.contains("API key not valid"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_gemini_client_notes_truncated_error_body() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    // Announces a longer body than it sends, then hangs up.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let _ = socket
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 100\r\n\r\npartial")
            .await;
    });

    let client = GeminiClient::new(&config_for(addr));
    let err = client
        .generate(&to_turns(&[ChatMessage::user("ping")]))
        .await
        .unwrap_err();
    match err {
        GenerateError::Status { status, body } => {
            assert_eq!(status, 500);
            assert!(body.starts_with("<unreadable body:"), "got {body:?}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_end_to_end_chat_through_relay() {
    let (gemini_addr, _seen) = fake_gemini(
        StatusCode::OK,
        json!({ "candidates": [{ "content": { "parts": [{ "text": "Hello!" }] } }] }),
    )
    .await;
    let state = Arc::new(AppState::new(config_for(gemini_addr)));
    let relay_addr = serve(create_router("public").with_state(state)).await;

    let controller = ChatController::new(
        Transcript::new(),
        HttpRelayClient::new(&format!("http://{relay_addr}")),
    );
    controller.submit("Hi").await;

    let view = controller.view().lock().await;
    let texts: Vec<(Author, &str)> = view
        .bubbles()
        .iter()
        .map(|b| (b.author, b.text.as_str()))
        .collect();
    assert_eq!(texts, vec![(Author::User, "Hi"), (Author::Bot, "Hello!")]);
}

#[tokio::test]
async fn test_relay_client_maps_upstream_failure_to_status_error() {
    let (gemini_addr, _seen) =
        fake_gemini(StatusCode::TOO_MANY_REQUESTS, json!({ "error": "quota" })).await;
    let state = Arc::new(AppState::new(config_for(gemini_addr)));
    let relay_addr = serve(create_router("public").with_state(state)).await;

    let client = HttpRelayClient::new(&format!("http://{relay_addr}"));
    let err = client
        .send(vec![ChatMessage::user("Hi")])
        .await
        .unwrap_err();
    assert!(matches!(err, RelayError::Status(500)));
}

#[tokio::test]
async fn test_relay_client_reports_unreachable_server() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpRelayClient::new(&format!("http://{addr}"));
    let err = client
        .send(vec![ChatMessage::user("Hi")])
        .await
        .unwrap_err();
    assert!(matches!(err, RelayError::Transport(_)));
}
