use anyhow::Result;

use super::AppState;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::PayloadChoice;
use crate::domain::models::PayloadDelta;
use crate::domain::models::StreamPayload;

fn payload(id: &str, content: &str, finish_reason: Option<&str>) -> StreamPayload {
    return StreamPayload {
        id: id.to_string(),
        object: "chat.completion.chunk".to_string(),
        created: 1700000000,
        model: "gpt-4".to_string(),
        choices: vec![PayloadChoice {
            index: 0,
            delta: PayloadDelta {
                content: Some(content.to_string()),
                role: None,
            },
            finish_reason: finish_reason.map(|e| return e.to_string()),
        }],
    };
}

#[test]
fn it_runs_a_full_turn() -> Result<()> {
    let mut app_state = AppState::new();

    app_state.add_message(Message::new(Author::Human, "hi"))?;
    app_state.waiting_for_channel = true;

    assert_eq!(app_state.store.len(), 1);
    assert_eq!(app_state.store.messages()[0].text, "hi");
    assert_eq!(app_state.chat_request().messages.len(), 1);

    app_state.handle_stream_payload(payload("r1", "He", None));

    assert_eq!(app_state.store.len(), 2);
    assert_eq!(app_state.store.messages()[1].id, "r1");
    assert_eq!(app_state.store.messages()[1].author, Author::Generated);
    assert!(app_state.waiting_for_channel);

    app_state.handle_stream_payload(payload("r1", "llo", Some("stop")));

    assert_eq!(app_state.store.len(), 2);
    assert_eq!(app_state.store.messages()[1].text, "Hello");
    assert!(!app_state.waiting_for_channel);
    assert!(app_state.reconciler.is_closed("r1"));

    // A stray fragment after close changes nothing.
    app_state.handle_stream_payload(payload("r1", " world", None));

    assert_eq!(app_state.store.len(), 2);
    assert_eq!(app_state.store.messages()[1].text, "Hello");

    return Ok(());
}

#[test]
fn it_includes_generated_turns_in_the_next_request() -> Result<()> {
    let mut app_state = AppState::new();

    app_state.add_message(Message::new(Author::Human, "hi"))?;
    app_state.handle_stream_payload(payload("r1", "Hello", Some("stop")));
    app_state.add_message(Message::new(Author::Human, "more?"))?;

    let request = app_state.chat_request();

    assert_eq!(request.messages.len(), 3);
    assert_eq!(request.messages[1].role, Author::Generated);
    assert_eq!(request.messages[1].content, "Hello");
    assert_eq!(request.messages[2].content, "more?");

    return Ok(());
}

#[test]
fn it_leaves_the_store_alone_on_malformed_payloads() -> Result<()> {
    let mut app_state = AppState::new();
    app_state.add_message(Message::new(Author::Human, "hi"))?;

    app_state.handle_stream_payload(payload("", "x", None));

    assert_eq!(app_state.store.len(), 1);

    return Ok(());
}

#[test]
fn it_clears_the_waiting_flag_on_channel_errors() {
    let mut app_state = AppState::new();
    app_state.waiting_for_channel = true;

    app_state.handle_channel_error("boom".to_string());

    assert!(!app_state.waiting_for_channel);
    assert_eq!(app_state.last_error, Some("boom".to_string()));
}

#[test]
fn it_partitions_panes_by_author() -> Result<()> {
    let mut app_state = AppState::new();
    app_state.set_rect(ratatui::prelude::Rect::new(0, 0, 40, 20));

    app_state.add_message(Message::new(Author::Human, "hi"))?;
    app_state.handle_stream_payload(payload("r1", "Hello", Some("stop")));

    assert!(!app_state.human_pane.is_empty());
    assert!(!app_state.generated_pane.is_empty());

    return Ok(());
}
