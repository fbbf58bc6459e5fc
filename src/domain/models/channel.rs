#[cfg(test)]
#[path = "channel_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;

use super::Author;
use super::Event;
use super::Message;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, strum::EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ChannelName {
    Websocket,
    Sse,
}

impl ChannelName {
    pub fn parse(text: &str) -> Result<ChannelName> {
        for name in ChannelName::iter() {
            if name.to_string() == text {
                return Ok(name);
            }
        }

        bail!(format!("{text} is not a valid transport"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnMessage {
    pub role: Author,
    pub content: String,
}

/// The outbound request payload: the full turn history including the latest
/// human turn, so the backend stays stateless about prior turns.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<TurnMessage>,
}

impl ChatRequest {
    pub fn from_history(messages: &[Message]) -> ChatRequest {
        let turns = messages
            .iter()
            .map(|message| {
                return TurnMessage {
                    role: message.author,
                    content: message.text.to_string(),
                };
            })
            .collect();

        return ChatRequest { messages: turns };
    }
}

#[async_trait]
pub trait Channel {
    fn name(&self) -> ChannelName;

    /// Used at startup to verify the backend is reachable over this transport.
    async fn health_check(&self) -> Result<()>;

    /// Emits the outbound request, then forwards every inbound fragment to the
    /// UI through the channel until the terminal fragment arrives. Transport
    /// up/down transitions are surfaced as `Event::ConnectionChanged`.
    ///
    /// Exactly one request is in flight at a time; the worker owning this call
    /// is aborted before a new one starts.
    async fn stream_request<'a>(
        &self,
        request: ChatRequest,
        tx: &'a mpsc::UnboundedSender<Event>,
    ) -> Result<()>;
}

pub type ChannelBox = Box<dyn Channel + Send + Sync>;
