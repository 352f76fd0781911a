//! Chat UI controller: renders a submission, shows a placeholder while the
//! relay answers, then rewrites the placeholder in place.

pub mod controller;
pub mod relay;
pub mod view;

pub use controller::{ChatController, FAILURE, NO_RESPONSE, PendingReply, THINKING};
pub use relay::{HttpRelayClient, RelayClient, RelayError};
pub use view::{Author, Bubble, ChatView, MessageHandle, Transcript};
