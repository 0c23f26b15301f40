// Command modules
mod birthday;
mod chat;

// Re-export all commands
pub use birthday::{add, cancel, help, list, remove, start};
pub use chat::register_current_chat;
