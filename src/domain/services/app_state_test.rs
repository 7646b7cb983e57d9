use super::AppState;
use crate::domain::models::Author;
use crate::domain::models::BackendResponse;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

#[test]
fn it_greets_on_new() {
    let app_state = AppState::new("Ann");
    assert_eq!(app_state.messages.len(), 1);
    assert_eq!(app_state.messages[0].author, Author::Assistant);
    assert!(app_state.messages[0].text.contains("Ann"));
    assert!(!app_state.waiting_for_backend);
}

#[test]
fn it_handles_backend_responses() {
    let mut app_state = AppState::new("Ann");
    app_state.add_message(Message::new(Author::User, "Hello"));
    app_state.waiting_for_backend = true;

    app_state.handle_backend_response(BackendResponse {
        text: "Hi!".to_string(),
    });

    assert!(!app_state.waiting_for_backend);
    let last = app_state.messages.last().unwrap();
    assert_eq!(last.author, Author::Assistant);
    assert_eq!(last.text, "Hi!");
}

#[test]
fn it_excludes_greeting_and_errors_from_the_transcript() {
    let mut app_state = AppState::new("Ann");
    app_state.add_message(Message::new(Author::User, "Hello"));
    app_state.add_error("Backend is unreachable");
    app_state.add_message(Message::new(Author::Assistant, "Hi!"));

    let transcript = app_state.transcript();
    assert_eq!(transcript.len(), 2);
    assert!(transcript
        .iter()
        .all(|msg| return msg.message_type() == MessageType::Normal));
}
