use anyhow::Result;

use super::Author;
use super::ChannelName;
use super::ChatRequest;
use super::Message;

#[test]
fn it_parses_channel_names() -> Result<()> {
    assert_eq!(ChannelName::parse("websocket")?, ChannelName::Websocket);
    assert_eq!(ChannelName::parse("sse")?, ChannelName::Sse);
    assert!(ChannelName::parse("carrier-pigeon").is_err());

    return Ok(());
}

#[test]
fn it_builds_a_request_from_history() {
    let history = vec![
        Message::new(Author::Human, "hi"),
        Message::with_id("chatcmpl-1", Author::Generated, "Hello"),
        Message::new(Author::Human, "how are you?"),
    ];

    let request = ChatRequest::from_history(&history);

    assert_eq!(request.messages.len(), 3);
    assert_eq!(request.messages[0].role, Author::Human);
    assert_eq!(request.messages[1].role, Author::Generated);
    assert_eq!(request.messages[1].content, "Hello");
}

#[test]
fn it_serializes_roles_in_wire_format() -> Result<()> {
    let request = ChatRequest::from_history(&[Message::new(Author::Human, "hi")]);
    let serialized = serde_json::to_string(&request)?;

    // Local ids and timestamps never leave the process.
    insta::assert_snapshot!(serialized, @r#"{"messages":[{"role":"human","content":"hi"}]}"#);

    return Ok(());
}
