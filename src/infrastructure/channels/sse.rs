#[cfg(test)]
#[path = "sse_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Channel;
use crate::domain::models::ChannelName;
use crate::domain::models::ChatRequest;
use crate::domain::models::ConnectionStatus;
use crate::domain::models::Event;
use crate::domain::models::StreamPayload;

fn convert_err(err: reqwest::Error) -> std::io::Error {
    let err_msg = err.to_string();
    return std::io::Error::new(std::io::ErrorKind::Interrupted, err_msg);
}

/// Fallback transport: a one-directional server-push stream over HTTP. The
/// triggering request travels as the POST body, the fragments come back as
/// `data:`-prefixed lines on the response.
pub struct Sse {
    url: String,
    timeout: String,
}

impl Default for Sse {
    fn default() -> Sse {
        return Sse {
            url: Config::get(ConfigKey::SseURL),
            timeout: Config::get(ConfigKey::ConnectTimeoutMillis),
        };
    }
}

#[async_trait]
impl Channel for Sse {
    fn name(&self) -> ChannelName {
        return ChannelName::Sse;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("SSE URL is not defined");
        }

        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "SSE backend is not reachable");
            bail!("SSE backend is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "SSE health check failed");
            bail!("SSE health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn stream_request<'a>(
        &self,
        request: ChatRequest,
        tx: &'a mpsc::UnboundedSender<Event>,
    ) -> Result<()> {
        let res = reqwest::Client::new()
            .post(format!("{url}/chat/stream", url = self.url))
            .json(&request)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make stream request over SSE"
            );
            bail!("Failed to make stream request over SSE");
        }

        tx.send(Event::ConnectionChanged(ConnectionStatus::Connected))?;

        let stream = res.bytes_stream().map_err(convert_err);
        let mut lines_reader = StreamReader::new(stream).lines();

        let mut completed = false;
        while let Ok(line) = lines_reader.next_line().await {
            if line.is_none() {
                break;
            }

            let mut cleaned_line = line.unwrap().trim().to_string();
            if cleaned_line.starts_with("data:") {
                cleaned_line = cleaned_line.split_off(5).trim().to_string();
            }
            if cleaned_line.is_empty() {
                continue;
            }

            let payload: StreamPayload = match serde_json::from_str(&cleaned_line) {
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
            tx.send(Event::ConnectionChanged(ConnectionStatus::Disconnected))?;
        }

        return Ok(());
    }
}
