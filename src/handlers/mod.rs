/// Event handlers organized by feature
mod conversation;
mod message;

pub use conversation::{ConversationFlow, SessionKey};
pub use message::handle_message;
