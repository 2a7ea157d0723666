// AIS stream listener - WebSocket subscribe loop feeding a hand-off channel

use crate::infrastructure::config::AisSettings;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// One decoded AIS stream message. The payload stays schemaless; this
/// subsystem only hands messages off, it does not interpret them.
#[derive(Debug, Clone, Deserialize)]
pub struct AisEnvelope {
    #[serde(rename = "MessageType")]
    pub message_type: String,
    #[serde(rename = "Message", default)]
    pub message: serde_json::Value,
}

enum SessionEnd {
    Shutdown,
    Disconnected,
}

/// Connect, subscribe, and forward messages until shut down. Disconnects and
/// connect failures reconnect with exponential backoff; the backoff resets
/// after each successful session. The listener shares no state with the poll
/// pipeline - the channel is the only hand-off.
pub async fn run(
    settings: AisSettings,
    tx: mpsc::Sender<AisEnvelope>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut backoff = INITIAL_BACKOFF;

    loop {
        match stream_session(&settings, &tx, &mut shutdown).await {
            Ok(SessionEnd::Shutdown) => break,
            Ok(SessionEnd::Disconnected) => {
                backoff = INITIAL_BACKOFF;
                tracing::warn!("AIS stream disconnected, reconnecting in {backoff:?}");
            }
            Err(e) => {
                tracing::warn!(error = %e, "AIS stream session failed, reconnecting in {backoff:?}");
            }
        }

        tokio::select! {
            _ = shutdown.changed() => break,
            _ = tokio::time::sleep(backoff) => {}
        }
        backoff = next_backoff(backoff);
    }

    tracing::info!("AIS stream listener stopped");
}

async fn stream_session(
    settings: &AisSettings,
    tx: &mpsc::Sender<AisEnvelope>,
    shutdown: &mut watch::Receiver<bool>,
) -> anyhow::Result<SessionEnd> {
    let (mut ws, _) = connect_async(settings.endpoint.as_str()).await?;
    ws.send(Message::Text(subscribe_payload(settings).to_string().into()))
        .await?;
    tracing::info!(endpoint = %settings.endpoint, "AIS stream subscribed");

    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                let _ = ws.close(None).await;
                return Ok(SessionEnd::Shutdown);
            }
            msg = ws.next() => {
                match msg {
                    Some(Ok(Message::Text(txt))) => {
                        match serde_json::from_str::<AisEnvelope>(txt.as_str()) {
                            Ok(envelope) => {
                                tracing::debug!(message_type = %envelope.message_type, "AIS message received");
                                if tx.send(envelope).await.is_err() {
                                    // Consumer is gone; nothing left to feed.
                                    return Ok(SessionEnd::Shutdown);
                                }
                            }
                            Err(e) => tracing::debug!(error = %e, "dropping undecodable AIS message"),
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => return Ok(SessionEnd::Disconnected),
                    Some(Ok(_)) => {} // ping/pong/binary, nothing to forward
                    Some(Err(e)) => return Err(e.into()),
                }
            }
        }
    }
}

fn next_backoff(current: Duration) -> Duration {
    (current * 2).min(MAX_BACKOFF)
}

fn subscribe_payload(settings: &AisSettings) -> serde_json::Value {
    json!({
        "ApiKey": settings.api_key,
        "BoundingBoxes": [settings.bounding_box],
        "FilterMessageTypes": ["PositionReport"],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> AisSettings {
        AisSettings {
            endpoint: "wss://stream.aisstream.io/v0/stream".to_string(),
            api_key: "test-key".to_string(),
            bounding_box: vec![[-125.0, 47.0], [-122.0, 50.0]],
        }
    }

    #[test]
    fn test_subscribe_payload_shape() {
        let payload = subscribe_payload(&settings());
        assert_eq!(payload["ApiKey"], "test-key");
        assert_eq!(payload["FilterMessageTypes"][0], "PositionReport");
        // One box, as lon/lat corner pairs
        assert_eq!(payload["BoundingBoxes"][0][0][0], -125.0);
        assert_eq!(payload["BoundingBoxes"][0][1][1], 50.0);
    }

    #[test]
    fn test_backoff_doubles_up_to_the_cap() {
        let mut backoff = INITIAL_BACKOFF;
        backoff = next_backoff(backoff);
        assert_eq!(backoff, Duration::from_secs(2));
        for _ in 0..10 {
            backoff = next_backoff(backoff);
        }
        assert_eq!(backoff, MAX_BACKOFF);
    }

    #[tokio::test]
    async fn test_listener_stops_on_shutdown_signal() {
        // Nothing listens on the discard port, so every session fails and the
        // loop lives in its backoff select, where the signal must reach it.
        let mut settings = settings();
        settings.endpoint = "ws://127.0.0.1:9/".to_string();
        let (tx, _rx) = mpsc::channel(8);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let listener = tokio::spawn(run(settings, tx, shutdown_rx));
        shutdown_tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(5), listener)
            .await
            .expect("listener should stop promptly after the shutdown signal")
            .unwrap();
    }

    #[test]
    fn test_envelope_decoding() {
        let raw = r#"{
            "MessageType": "PositionReport",
            "MetaData": { "MMSI": 316001234 },
            "Message": { "PositionReport": { "Latitude": 49.1, "Longitude": -123.2 } }
        }"#;
        let envelope: AisEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.message_type, "PositionReport");
        assert_eq!(
            envelope.message["PositionReport"]["Latitude"],
            serde_json::json!(49.1)
        );
    }
}
