// src/ui/view.rs

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Bot,
}

/// Opaque reference to a message that was appended to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHandle(usize);

impl MessageHandle {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Display surface for a chat. Messages are append-only, oldest first.
pub trait ChatView {
    fn append_message(&mut self, author: Author, text: &str) -> MessageHandle;

    /// Replaces the text of an existing message. Unknown handles are ignored.
    fn update_message(&mut self, handle: MessageHandle, text: &str);

    fn clear_input(&mut self);

    fn scroll_to_latest(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    pub author: Author,
    pub text: String,
}

/// In-memory view, used by tests and anything that wants to inspect the chat.
#[derive(Debug, Default)]
pub struct Transcript {
    bubbles: Vec<Bubble>,
    input_clears: usize,
    scrolled_to: Option<usize>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    /// How many times the input field was cleared.
    pub fn input_clears(&self) -> usize {
        self.input_clears
    }

    /// Index of the bubble the view was last scrolled to.
    pub fn scrolled_to(&self) -> Option<usize> {
        self.scrolled_to
    }
}

impl ChatView for Transcript {
    fn append_message(&mut self, author: Author, text: &str) -> MessageHandle {
        self.bubbles.push(Bubble {
            author,
            text: text.to_string(),
        });
        MessageHandle::new(self.bubbles.len() - 1)
    }

    fn update_message(&mut self, handle: MessageHandle, text: &str) {
        if let Some(bubble) = self.bubbles.get_mut(handle.index()) {
            bubble.text = text.to_string();
        }
    }

    fn clear_input(&mut self) {
        self.input_clears += 1;
    }

    fn scroll_to_latest(&mut self) {
        self.scrolled_to = self.bubbles.len().checked_sub(1);
    }
}
