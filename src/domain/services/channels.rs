use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::ChannelName;
use crate::domain::models::ConnectionStatus;
use crate::domain::models::Event;
use crate::infrastructure::channels::ChannelManager;

fn worker_error(err: anyhow::Error, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    tracing::error!(error = ?err, "channel worker failed");
    tx.send(Event::ConnectionChanged(ConnectionStatus::Disconnected))?;
    tx.send(Event::ChannelError(format!(
        "The channel failed with the following error: {err}"
    )))?;

    return Ok(());
}

/// Owns the channel side of the session: receives request/abort actions from
/// the UI and runs at most one streaming worker at a time. Worker failures are
/// contained here and surfaced as events, never as panics in the render path.
pub struct ChannelService {}

impl ChannelService {
    pub async fn start(
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let channel = ChannelManager::get(ChannelName::parse(&Config::get(ConfigKey::Transport))?)?;
        if let Err(err) = channel.health_check().await {
            tracing::warn!(error = ?err, "channel health check failed");
            tx.send(Event::ConnectionChanged(ConnectionStatus::Disconnected))?;
        } else {
            tx.send(Event::ConnectionChanged(ConnectionStatus::Connected))?;
        }

        // Lazy default.
        let mut worker: JoinHandle<Result<()>> = tokio::spawn(async {
            return Ok(());
        });

        loop {
            let event = rx.recv().await;
            if event.is_none() {
                // The UI dropped its sender, the session is over. Stop the
                // worker so nothing mutates a discarded store.
                worker.abort();
                break;
            }

            let worker_tx = tx.clone();
            match event.unwrap() {
                Action::ChannelAbort() => {
                    worker.abort();
                }
                Action::ChannelRequest(request) => {
                    worker = tokio::spawn(async move {
                        let channel = ChannelManager::get(ChannelName::parse(&Config::get(
                            ConfigKey::Transport,
                        ))?)?;

                        if let Err(err) = channel.stream_request(request, &worker_tx).await {
                            worker_error(err, &worker_tx)?;
                        }

                        return Ok(());
                    });
                }
            }
        }

        return Ok(());
    }
}
