//! Terminal chat client. Each line read from stdin is one submission.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use gemini_relay::ui::{Author, ChatController, ChatView, HttpRelayClient, MessageHandle};

/// Prints messages as they are appended. An update reprints the message.
#[derive(Default)]
struct ConsoleView {
    authors: Vec<Author>,
}

fn label(author: Author) -> &'static str {
    match author {
        Author::User => "you",
        Author::Bot => "bot",
    }
}

impl ChatView for ConsoleView {
    fn append_message(&mut self, author: Author, text: &str) -> MessageHandle {
        self.authors.push(author);
        println!("{}> {}", label(author), text);
        MessageHandle::new(self.authors.len() - 1)
    }

    fn update_message(&mut self, handle: MessageHandle, text: &str) {
        if let Some(author) = self.authors.get(handle.index()) {
            println!("{}> {}", label(*author), text);
        }
    }

    fn clear_input(&mut self) {}

    fn scroll_to_latest(&mut self) {}
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let relay_url =
        std::env::var("RELAY_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let controller = ChatController::new(ConsoleView::default(), HttpRelayClient::new(&relay_url));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        controller.submit(&line).await;
    }

    Ok(())
}
