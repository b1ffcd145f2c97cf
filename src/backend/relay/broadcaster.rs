/**
 * Event Broadcasting
 *
 * The broadcaster fans one change event out to every connected client. It
 * wraps a `tokio::sync::broadcast` channel: each WebSocket connection task
 * subscribes once and forwards frames to its own socket, so a failed or
 * slow socket never affects delivery to the others.
 *
 * # Delivery Semantics
 *
 * - The envelope is serialized exactly once per event; every socket
 *   receives an identical frame.
 * - Delivery is best-effort: no confirmation, no retry, no queueing for
 *   sockets that are still mid-handshake. A socket that subscribes after
 *   the send simply misses that event.
 * - Per-topic order is preserved end to end: events are broadcast in the
 *   order `broadcast` is called, and the channel delivers them to each
 *   receiver in that order.
 */
use crate::shared::{ChangeEvent, Envelope, SharedError, Topic};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Default capacity of the broadcast channel
///
/// Receivers that fall more than this many frames behind skip ahead
/// (`RecvError::Lagged`) rather than stalling the rest of the fan-out.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

/// One serialized frame ready to fan out
///
/// The JSON text is shared, not copied, between connection tasks.
#[derive(Debug, Clone)]
pub struct RelayFrame {
    /// Topic the frame belongs to, kept for logging and tests
    pub topic: Topic,
    /// The serialized envelope
    pub text: Arc<str>,
}

/// Fans change events out to all connected relay clients
///
/// Cloneable; the clone shares the underlying channel. One instance is
/// created at startup and handed to both the subscription manager (sender
/// side) and the WebSocket handler (receiver side).
#[derive(Clone)]
pub struct Broadcaster {
    tx: broadcast::Sender<RelayFrame>,
}

impl Broadcaster {
    /// Create a broadcaster with the default channel capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a broadcaster with an explicit channel capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe for frames; one receiver per client connection
    pub fn subscribe(&self) -> broadcast::Receiver<RelayFrame> {
        self.tx.subscribe()
    }

    /// Number of currently subscribed connections
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Broadcast one event to all subscribed connections
    ///
    /// Serializes the envelope once and hands the frame to every receiver.
    /// Returns the number of receivers the frame was queued for; zero when
    /// no clients are connected, which is not an error.
    pub fn broadcast(&self, event: ChangeEvent) -> Result<usize, SharedError> {
        let topic = event.topic;
        let envelope = Envelope::from(event);
        let text: Arc<str> = serde_json::to_string(&envelope)
            .map_err(SharedError::from)?
            .into();

        match self.tx.send(RelayFrame { topic, text }) {
            Ok(receiver_count) => {
                tracing::debug!(
                    "[Relay] Broadcast {} event to {} connection(s)",
                    topic,
                    receiver_count
                );
                Ok(receiver_count)
            }
            Err(_) => {
                // No subscribers, that's okay
                tracing::debug!("[Relay] No connections to receive {} event", topic);
                Ok(0)
            }
        }
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_broadcast_no_subscribers() {
        let broadcaster = Broadcaster::new();
        let event = ChangeEvent::new(Topic::Message, json!({"text": "hi"}));
        assert_eq!(broadcaster.broadcast(event).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_subscribers() {
        let broadcaster = Broadcaster::new();
        let mut rx1 = broadcaster.subscribe();
        let mut rx2 = broadcaster.subscribe();
        let mut rx3 = broadcaster.subscribe();

        let event = ChangeEvent::new(Topic::Message, json!({"id": "m1"}));
        assert_eq!(broadcaster.broadcast(event).unwrap(), 3);

        for rx in [&mut rx1, &mut rx2, &mut rx3] {
            let frame = rx.recv().await.unwrap();
            assert_eq!(frame.topic, Topic::Message);
            let envelope: Envelope = serde_json::from_str(&frame.text).unwrap();
            assert_eq!(envelope.payload["id"], "m1");
        }
    }

    #[tokio::test]
    async fn test_frames_are_identical_across_subscribers() {
        let broadcaster = Broadcaster::new();
        let mut rx1 = broadcaster.subscribe();
        let mut rx2 = broadcaster.subscribe();

        broadcaster
            .broadcast(ChangeEvent::new(Topic::Poll, json!({"question": "?"})))
            .unwrap();

        let frame1 = rx1.recv().await.unwrap();
        let frame2 = rx2.recv().await.unwrap();
        assert_eq!(frame1.text, frame2.text);
        // Same allocation, serialized exactly once.
        assert!(Arc::ptr_eq(&frame1.text, &frame2.text));
    }

    #[tokio::test]
    async fn test_dropped_receiver_does_not_block_others() {
        let broadcaster = Broadcaster::new();
        let rx_dead = broadcaster.subscribe();
        let mut rx_live = broadcaster.subscribe();
        drop(rx_dead);

        broadcaster
            .broadcast(ChangeEvent::new(Topic::Wellness, json!({"person": "Kia"})))
            .unwrap();

        let frame = rx_live.recv().await.unwrap();
        assert_eq!(frame.topic, Topic::Wellness);
    }

    #[tokio::test]
    async fn test_per_topic_order_preserved() {
        let broadcaster = Broadcaster::new();
        let mut rx = broadcaster.subscribe();

        broadcaster
            .broadcast(ChangeEvent::new(Topic::Message, json!({"seq": 1})))
            .unwrap();
        broadcaster
            .broadcast(ChangeEvent::new(Topic::Message, json!({"seq": 2})))
            .unwrap();

        let first: Envelope = serde_json::from_str(&rx.recv().await.unwrap().text).unwrap();
        let second: Envelope = serde_json::from_str(&rx.recv().await.unwrap().text).unwrap();
        assert_eq!(first.payload["seq"], 1);
        assert_eq!(second.payload["seq"], 2);
    }
}
