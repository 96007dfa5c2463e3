//! Persistent chat socket supervision.
//!
//! One connection is opened per session. Everything that happens on it is
//! reported as a [`SocketEvent`] on the channel given to [`ChatSocket::connect`];
//! the returned [`SocketHandle`] is the only way to write to it. A dropped
//! connection is never re-established here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use carenova_types::{AnalysisRequest, ProtocolError, ServerMessage};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;

use crate::error::{ClientError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum SocketEvent {
    Opened,
    Message(ServerMessage),
    /// A frame with a `type` this client does not handle.
    Unrecognized { kind: String },
    /// A frame that could not be decoded at all.
    Malformed(String),
    Error(String),
    Closed,
}

#[derive(Debug)]
enum Outbound {
    Text(String),
    Close,
}

/// Write side of the chat socket.
#[derive(Clone, Debug)]
pub struct SocketHandle {
    outbound: mpsc::UnboundedSender<Outbound>,
    connected: Arc<AtomicBool>,
}

impl SocketHandle {
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Serialize the request and queue it as a text frame.
    pub fn send(&self, request: &AnalysisRequest) -> Result<()> {
        if !self.is_connected() {
            return Err(ClientError::NotConnected);
        }

        let payload = serde_json::to_string(request)?;
        self.outbound
            .send(Outbound::Text(payload))
            .map_err(|_| ClientError::NotConnected)
    }

    /// Close the connection if it is open. Safe to call more than once.
    pub fn close(&self) {
        if self.outbound.send(Outbound::Close).is_err() {
            tracing::debug!("chat socket already closed");
        }
    }
}

pub struct ChatSocket;

impl ChatSocket {
    /// Open the chat socket in a background task.
    ///
    /// Returns immediately; `SocketEvent::Opened` or `SocketEvent::Error`
    /// followed by `SocketEvent::Closed` reports the outcome.
    pub fn connect(url: String, events: mpsc::UnboundedSender<SocketEvent>) -> SocketHandle {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let connected = Arc::new(AtomicBool::new(false));

        let handle = SocketHandle {
            outbound: outbound_tx,
            connected: connected.clone(),
        };

        tokio::spawn(async move {
            if let Err(err) = run_connection(&url, outbound_rx, &connected, &events).await {
                tracing::error!(url = %url, error = %err, "chat socket failed");
                let _ = events.send(SocketEvent::Error(err.to_string()));
            }
            connected.store(false, Ordering::SeqCst);
            tracing::info!(url = %url, "chat socket closed");
            let _ = events.send(SocketEvent::Closed);
        });

        handle
    }
}

async fn run_connection(
    url: &str,
    mut outbound: mpsc::UnboundedReceiver<Outbound>,
    connected: &AtomicBool,
    events: &mpsc::UnboundedSender<SocketEvent>,
) -> Result<()> {
    tracing::info!(url = %url, "connecting chat socket");
    let (stream, _) = tokio_tungstenite::connect_async(url).await?;
    let (mut sink, mut inbound) = stream.split();

    connected.store(true, Ordering::SeqCst);
    let _ = events.send(SocketEvent::Opened);

    loop {
        tokio::select! {
            command = outbound.recv() => match command {
                Some(Outbound::Text(payload)) => {
                    tracing::debug!(bytes = payload.len(), "sending chat frame");
                    sink.send(WsMessage::Text(payload.into())).await?;
                }
                Some(Outbound::Close) | None => {
                    connected.store(false, Ordering::SeqCst);
                    if let Err(err) = sink.close().await {
                        tracing::debug!(error = %err, "error while closing chat socket");
                    }
                    return Ok(());
                }
            },
            frame = inbound.next() => match frame {
                Some(Ok(WsMessage::Text(text))) => {
                    let _ = events.send(decode_frame(text.as_str()));
                }
                Some(Ok(WsMessage::Close(_))) | None => return Ok(()),
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
            },
        }
    }
}

pub(crate) fn decode_frame(text: &str) -> SocketEvent {
    match ServerMessage::from_json(text) {
        Ok(message) => SocketEvent::Message(message),
        Err(ProtocolError::UnrecognizedType { kind }) => SocketEvent::Unrecognized { kind },
        Err(err) => SocketEvent::Malformed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_frame_variants() {
        assert_eq!(
            decode_frame(r#"{"type":"error","message":"boom"}"#),
            SocketEvent::Message(ServerMessage::Error {
                message: "boom".to_string()
            })
        );
        assert_eq!(
            decode_frame(r#"{"type":"heartbeat"}"#),
            SocketEvent::Unrecognized {
                kind: "heartbeat".to_string()
            }
        );
        assert!(matches!(decode_frame("{"), SocketEvent::Malformed(_)));
    }

    #[tokio::test]
    async fn test_send_without_connection_fails() {
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        // Nothing listens on port 9 locally.
        let handle = ChatSocket::connect("ws://127.0.0.1:9/ws/chat".to_string(), events_tx);

        let request = AnalysisRequest {
            session_id: "s".to_string(),
            initial_symptoms: "headache".to_string(),
            followup_answers: vec![],
        };
        assert!(matches!(
            handle.send(&request),
            Err(ClientError::NotConnected)
        ));

        assert!(matches!(events_rx.recv().await, Some(SocketEvent::Error(_))));
        assert_eq!(events_rx.recv().await, Some(SocketEvent::Closed));
        assert!(!handle.is_connected());
    }
}
