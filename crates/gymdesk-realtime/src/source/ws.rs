//! Reconnecting WebSocket push source.

use std::time::Duration;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use gymdesk_core::config::realtime::RealtimeConfig;
use gymdesk_core::events::ScheduleEvent;
use gymdesk_core::result::AppResult;
use gymdesk_core::traits::push::{PushFrame, PushSource};

/// WebSocket implementation of [`PushSource`].
///
/// Maintains a persistent subscription with exponential-backoff
/// reconnection. Every successful (re)connection yields a
/// [`PushFrame::Reconnected`], so the consumer performs the unconditional
/// refresh that covers events missed while disconnected.
#[derive(Debug, Clone)]
pub struct WsPushSource {
    /// Transport settings.
    config: RealtimeConfig,
}

impl WsPushSource {
    /// Create a source from configuration.
    pub fn new(config: RealtimeConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl PushSource for WsPushSource {
    async fn subscribe(&self) -> AppResult<mpsc::Receiver<PushFrame>> {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size.max(1));
        tokio::spawn(connection_loop(self.config.clone(), tx));
        Ok(rx)
    }
}

/// Connect, pump frames, and reconnect until the consumer goes away.
async fn connection_loop(config: RealtimeConfig, tx: mpsc::Sender<PushFrame>) {
    let initial = Duration::from_millis(config.reconnect_initial_ms.max(1));
    let max = Duration::from_millis(config.reconnect_max_ms.max(1));
    let mut backoff = initial;

    loop {
        match connect_async(config.url.as_str()).await {
            Ok((stream, _)) => {
                info!(url = %config.url, "Push stream connected");
                backoff = initial;
                if tx.send(PushFrame::Reconnected).await.is_err() {
                    return;
                }

                let (mut write, mut read) = stream.split();
                while let Some(message) = read.next().await {
                    match message {
                        Ok(Message::Text(text)) => {
                            match serde_json::from_str::<ScheduleEvent>(text.as_str()) {
                                Ok(event) => {
                                    if tx.send(PushFrame::Event(event)).await.is_err() {
                                        return;
                                    }
                                }
                                Err(error) => {
                                    warn!(%error, "Ignoring unrecognized push frame");
                                }
                            }
                        }
                        Ok(Message::Ping(payload)) => {
                            let _ = write.send(Message::Pong(payload)).await;
                        }
                        Ok(Message::Close(_)) => {
                            debug!("Push stream closed by server");
                            break;
                        }
                        Ok(_) => {}
                        Err(error) => {
                            warn!(%error, "Push stream read failed");
                            break;
                        }
                    }
                }
            }
            Err(error) => {
                warn!(%error, url = %config.url, "Push stream connect failed");
            }
        }

        if tx.is_closed() {
            return;
        }
        sleep(backoff).await;
        backoff = (backoff * 2).min(max);
    }
}
