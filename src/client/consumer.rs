/**
 * Relay Consumer
 *
 * The client-side half of the relay: one persistent WebSocket connection,
 * envelope parsing and topic dispatch, and a reconnect loop that runs until
 * the consumer is shut down.
 *
 * # State Machine
 *
 * ```text
 * Disconnected --spawn/retry timer--> Connecting
 * Connecting   --handshake ok-------> Open
 * Connecting   --refused/timeout----> Disconnected (retry scheduled)
 * Open         --close/error--------> Disconnected (retry scheduled)
 * any state    --shutdown()---------> task ends, socket closed, timer dead
 * ```
 *
 * A malformed inbound frame is logged and skipped; the connection stays
 * Open. The retry loop never gives up on its own; there is no attempt cap.
 *
 * # Catch-up Contract
 *
 * The relay does not replay events missed while disconnected. The owner
 * should watch `state_changes()` and re-fetch full state through the REST
 * layer whenever the state returns to Open.
 */
use crate::client::config::ClientConfig;
use crate::client::dispatch::TopicHandlers;
use crate::shared::Envelope;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connection state visible to the consumer's owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No socket; a reconnect may be pending
    Disconnected,
    /// Handshake in progress
    Connecting,
    /// Receiving frames
    Open,
}

/// A running relay consumer
///
/// Owns the background connection task. Dropping the handle without
/// calling [`shutdown`](Self::shutdown) leaves the task running for the
/// life of the process, matching a page-lifetime connection; UI-scoped
/// owners must call `shutdown` on teardown.
pub struct RelayConsumer {
    task: JoinHandle<()>,
    shutdown_tx: watch::Sender<bool>,
    state_rx: watch::Receiver<ConnectionState>,
}

impl RelayConsumer {
    /// Start a consumer and connect immediately
    pub fn spawn(config: ClientConfig, handlers: TopicHandlers) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);

        let task = tokio::spawn(run(config, handlers, state_tx, shutdown_rx));

        Self {
            task,
            shutdown_tx,
            state_rx,
        }
    }

    /// Current connection state
    pub fn state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    /// Watch connection-state transitions
    ///
    /// The owner uses this for its catch-up fetch: every transition back
    /// to `Open` means events may have been missed.
    pub fn state_changes(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    /// Tear the consumer down
    ///
    /// Closes the active socket if there is one, cancels any pending
    /// reconnect timer, and waits for the background task to finish. No
    /// reconnect attempt happens after this returns.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.task.await;
    }
}

/// The connection loop: connect, drive, reconnect, forever
async fn run(
    config: ClientConfig,
    handlers: TopicHandlers,
    state_tx: watch::Sender<ConnectionState>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut attempt: u32 = 0;
    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        let _ = state_tx.send(ConnectionState::Connecting);
        let connect = tokio::time::timeout(config.connect_timeout, connect_async(&config.url));

        let outcome = tokio::select! {
            _ = shutdown_rx.changed() => break,
            outcome = connect => outcome,
        };

        match outcome {
            Ok(Ok((ws, _response))) => {
                tracing::info!("[Consumer] Connected to {}", config.url);
                let _ = state_tx.send(ConnectionState::Open);
                attempt = 0;

                let shutdown = drive_connection(ws, &handlers, &mut shutdown_rx).await;
                if shutdown {
                    break;
                }
                tracing::info!("[Consumer] Connection lost");
            }
            Ok(Err(e)) => {
                tracing::warn!("[Consumer] Connection to {} failed: {}", config.url, e);
            }
            Err(_) => {
                tracing::warn!(
                    "[Consumer] Connection to {} timed out after {:?}",
                    config.url,
                    config.connect_timeout
                );
            }
        }

        let _ = state_tx.send(ConnectionState::Disconnected);
        attempt = attempt.saturating_add(1);
        let delay = config.retry.delay(attempt);
        tracing::info!("[Consumer] Reconnecting in {:?} (attempt {})", delay, attempt);

        tokio::select! {
            _ = shutdown_rx.changed() => break,
            _ = tokio::time::sleep(delay) => {}
        }
    }

    let _ = state_tx.send(ConnectionState::Disconnected);
    tracing::debug!("[Consumer] Shut down");
}

/// Pump one open connection; returns true when shutdown was requested
async fn drive_connection(
    ws: WsStream,
    handlers: &TopicHandlers,
    shutdown_rx: &mut watch::Receiver<bool>,
) -> bool {
    let (mut sink, mut stream) = ws.split();

    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => {
                let _ = sink.send(Message::Close(None)).await;
                return true;
            }
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<Envelope>(text.as_str()) {
                        Ok(envelope) => handlers.dispatch(envelope),
                        Err(e) => {
                            // Malformed frame: skip it, stay connected.
                            tracing::warn!("[Consumer] Ignoring malformed frame: {}", e);
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | None => return false,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("[Consumer] Socket error: {}", e);
                    return false;
                }
            }
        }
    }
}
