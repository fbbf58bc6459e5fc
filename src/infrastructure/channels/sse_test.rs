use anyhow::bail;
use anyhow::Result;
use test_utils::sse_body;
use tokio::sync::mpsc;

use super::Sse;
use crate::domain::models::Author;
use crate::domain::models::Channel;
use crate::domain::models::ChatRequest;
use crate::domain::models::ConnectionStatus;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::StreamPayload;

impl Sse {
    fn with_url(url: String) -> Sse {
        return Sse {
            url,
            timeout: "1000".to_string(),
        };
    }
}

fn to_payload(event: Option<Event>) -> Result<StreamPayload> {
    let payload = match event.unwrap() {
        Event::ChannelFragment(payload) => payload,
        _ => bail!("Wrong type from recv"),
    };

    return Ok(payload);
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/").with_status(200).create();

    let channel = Sse::with_url(server.url());
    let res = channel.health_check().await;

    assert!(res.is_ok());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/").with_status(500).create();

    let channel = Sse::with_url(server.url());
    let res = channel.health_check().await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_streams_fragments() -> Result<()> {
    let body = sse_body("chatcmpl-1", &["He", "llo"]);

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/chat/stream")
        .with_status(200)
        .with_body(body)
        .create();

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let request = ChatRequest::from_history(&[Message::new(Author::Human, "hi")]);

    let channel = Sse::with_url(server.url());
    channel.stream_request(request, &tx).await?;
    mock.assert();

    match rx.recv().await.unwrap() {
        Event::ConnectionChanged(status) => assert_eq!(status, ConnectionStatus::Connected),
        _ => bail!("Wrong type from recv"),
    }

    let first = to_payload(rx.recv().await)?;
    let second = to_payload(rx.recv().await)?;
    let last = to_payload(rx.recv().await)?;

    assert_eq!(first.fragment()?.delta, "He");
    assert!(!first.fragment()?.is_final);
    assert_eq!(second.fragment()?.delta, "llo");
    assert_eq!(last.fragment()?.delta, "");
    assert!(last.fragment()?.is_final);

    return Ok(());
}

#[tokio::test]
async fn it_reports_a_disconnect_when_the_stream_ends_early() -> Result<()> {
    let body = format!("data: {}", test_utils::stream_payload("chatcmpl-1", "He", None));

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/chat/stream")
        .with_status(200)
        .with_body(body)
        .create();

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let request = ChatRequest::from_history(&[Message::new(Author::Human, "hi")]);

    let channel = Sse::with_url(server.url());
    channel.stream_request(request, &tx).await?;
    mock.assert();

    // Connected, one fragment, then the drop notice.
    rx.recv().await.unwrap();
    to_payload(rx.recv().await)?;
    match rx.recv().await.unwrap() {
        Event::ConnectionChanged(status) => assert_eq!(status, ConnectionStatus::Disconnected),
        _ => bail!("Wrong type from recv"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_error_statuses() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/chat/stream")
        .with_status(500)
        .create();

    let (tx, _rx) = mpsc::unbounded_channel::<Event>();
    let request = ChatRequest::from_history(&[Message::new(Author::Human, "hi")]);

    let channel = Sse::with_url(server.url());
    let res = channel.stream_request(request, &tx).await;

    assert!(res.is_err());
    mock.assert();
}
