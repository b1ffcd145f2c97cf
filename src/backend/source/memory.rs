/**
 * In-Process Change Source
 *
 * A `ChangeSource` that lives entirely in memory. Used by the test suite to
 * drive the relay without a database, and available for database-less
 * development runs where the REST layer is disabled anyway.
 *
 * `emit` fans a notification out to every live subscription for the topic;
 * `emit_error` injects a stream failure so resubscribe behavior can be
 * exercised.
 */
use crate::backend::source::{ChangeNotification, ChangeSource, ChangeStream, SourceError};
use crate::shared::Topic;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

type Subscribers = HashMap<Topic, Vec<mpsc::UnboundedSender<Result<ChangeNotification, SourceError>>>>;

/// Change source backed by in-process channels
#[derive(Clone, Default)]
pub struct MemoryChangeSource {
    subscribers: Arc<Mutex<Subscribers>>,
}

impl MemoryChangeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit an insert notification carrying the given record
    pub fn emit(&self, topic: Topic, new_record: serde_json::Value) {
        let notification = ChangeNotification {
            event_kind: "INSERT".to_string(),
            schema: "public".to_string(),
            table: topic.table().to_string(),
            new_record,
            old_record: None,
        };
        self.send(topic, Ok(notification));
    }

    /// Inject a stream failure for every live subscription on the topic
    ///
    /// The subscription manager treats this exactly like a dropped database
    /// connection: it discards the stream and resubscribes with backoff.
    pub fn emit_error(&self, topic: Topic, message: impl Into<String>) {
        self.send(topic, Err(SourceError::lost(message)));
    }

    /// Number of live subscriptions for a topic
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.subscribers
            .lock()
            .unwrap()
            .get(&topic)
            .map(|senders| senders.iter().filter(|tx| !tx.is_closed()).count())
            .unwrap_or(0)
    }

    fn send(&self, topic: Topic, item: Result<ChangeNotification, SourceError>) {
        let mut subscribers = self.subscribers.lock().unwrap();
        let Some(senders) = subscribers.get_mut(&topic) else {
            return;
        };
        // Drop senders whose stream side has gone away.
        senders.retain(|tx| !tx.is_closed());
        for tx in senders.iter() {
            let copy = match &item {
                Ok(notification) => Ok(notification.clone()),
                Err(e) => Err(SourceError::lost(e.to_string())),
            };
            let _ = tx.send(copy);
        }
    }
}

impl ChangeSource for MemoryChangeSource {
    async fn subscribe(&self, topic: Topic) -> Result<ChangeStream, SourceError> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .unwrap()
            .entry(topic)
            .or_default()
            .push(tx);
        Ok(Box::pin(UnboundedReceiverStream::new(rx)))
    }
}
