#[cfg(test)]
#[path = "websocket_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use futures::SinkExt;
use futures::StreamExt;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Channel;
use crate::domain::models::ChannelName;
use crate::domain::models::ChatRequest;
use crate::domain::models::ConnectionStatus;
use crate::domain::models::Event;
use crate::domain::models::StreamPayload;

/// Every frame on the socket is one envelope. Inbound `chat_stream` envelopes
/// wrap the stream payload as a JSON-encoded string.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Envelope {
    event: String,
    data: serde_json::Value,
}

pub struct Websocket {
    url: String,
}

impl Default for Websocket {
    fn default() -> Websocket {
        return Websocket {
            url: Config::get(ConfigKey::WebsocketURL),
        };
    }
}

#[async_trait]
impl Channel for Websocket {
    fn name(&self) -> ChannelName {
        return ChannelName::Websocket;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Websocket URL is not defined");
        }

        let connect_res = connect_async(self.url.as_str()).await;
        if connect_res.is_err() {
            tracing::error!(error = ?connect_res.unwrap_err(), "Websocket backend is not reachable");
            bail!("Websocket backend is not reachable");
        }

        let (mut stream, _) = connect_res.unwrap();
        stream.close(None).await?;

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn stream_request<'a>(
        &self,
        request: ChatRequest,
        tx: &'a mpsc::UnboundedSender<Event>,
    ) -> Result<()> {
        let (stream, _) = connect_async(self.url.as_str()).await?;
        tx.send(Event::ConnectionChanged(ConnectionStatus::Connected))?;

        let (mut write, mut read) = stream.split();

        let envelope = Envelope {
            event: "request_chat_stream".to_string(),
            data: serde_json::to_value(&request)?,
        };
        write
            .send(WsMessage::Text(serde_json::to_string(&envelope)?))
            .await?;

        let mut completed = false;
        while let Some(frame) = read.next().await {
            let text = match frame? {
                WsMessage::Text(text) => text,
                WsMessage::Close(_) => break,
                _ => continue,
            };

            let envelope: Envelope = match serde_json::from_str(&text) {
                Ok(envelope) => envelope,
                Err(err) => {
                    tracing::error!(error = %err, "failed to parse channel envelope");
                    continue;
                }
            };

            if envelope.event != "chat_stream" {
                tracing::debug!(event = envelope.event, "skipping unrelated channel event");
                continue;
            }

            let raw = match envelope.data.as_str() {
                Some(raw) => raw,
                None => {
                    tracing::error!("chat_stream envelope does not wrap a string payload");
                    continue;
                }
            };

            let payload: StreamPayload = match serde_json::from_str(raw) {
                Ok(payload) => payload,
                Err(err) => {
                    tracing::error!(error = %err, "failed to parse stream payload");
                    continue;
                }
            };
            tracing::debug!(body = ?payload, "stream payload");

            let done = payload.is_terminal();
            tx.send(Event::ChannelFragment(payload))?;
            if done {
                completed = true;
                break;
            }
        }

        if !completed {
            // The socket dropped mid-stream. The partial response stays as-is.
            tx.send(Event::ConnectionChanged(ConnectionStatus::Disconnected))?;
        }

        return Ok(());
    }
}
