#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use crate::domain::models::Author;
use crate::domain::models::BackendResponse;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

/// In-memory transcript for one authenticated chat loop. Rebuilt from
/// scratch after logout so no conversation state outlives a session.
pub struct AppState {
    pub messages: Vec<Message>,
    pub waiting_for_backend: bool,
}

impl AppState {
    pub fn new(display_name: &str) -> AppState {
        return AppState {
            messages: vec![Message::new(
                Author::Assistant,
                &format!("Hey there {display_name}! What can I do for you?"),
            )],
            waiting_for_backend: false,
        };
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn add_error(&mut self, text: &str) {
        self.messages
            .push(Message::new_with_type(Author::Assistant, MessageType::Error, text));
    }

    pub fn handle_backend_response(&mut self, res: BackendResponse) {
        self.messages.push(Message::new(Author::Assistant, &res.text));
        self.waiting_for_backend = false;
    }

    /// The transcript as sent to completion backends: user and assistant
    /// turns only, greeting and error bubbles excluded.
    pub fn transcript(&self) -> Vec<Message> {
        return self
            .messages
            .iter()
            .skip(1)
            .filter(|msg| return msg.message_type() == MessageType::Normal)
            .cloned()
            .collect();
    }
}
