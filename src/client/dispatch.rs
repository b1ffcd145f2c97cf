/**
 * Topic Dispatch
 *
 * Routes parsed envelopes to per-topic handler callbacks, the consumer's
 * equivalent of the web client's reducer switch. Payload shape is not
 * validated here: handlers receive the record exactly as the relay sent
 * it and own any further decoding.
 */
use crate::shared::{Envelope, Topic};
use std::collections::HashMap;

type Handler = Box<dyn Fn(serde_json::Value) + Send + Sync>;

/// Per-topic handler registry
///
/// Built once, handed to the consumer at spawn time:
///
/// ```rust
/// use tripsync::client::TopicHandlers;
/// use tripsync::shared::Topic;
///
/// let handlers = TopicHandlers::new()
///     .on(Topic::Message, |payload| {
///         println!("new message: {}", payload);
///     })
///     .on(Topic::Poll, |payload| {
///         println!("poll update: {}", payload);
///     });
/// ```
#[derive(Default)]
pub struct TopicHandlers {
    handlers: HashMap<Topic, Handler>,
}

impl TopicHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for one topic, replacing any previous one
    pub fn on(
        mut self,
        topic: Topic,
        handler: impl Fn(serde_json::Value) + Send + Sync + 'static,
    ) -> Self {
        self.handlers.insert(topic, Box::new(handler));
        self
    }

    /// Dispatch one envelope to its topic's handler
    ///
    /// Envelopes for topics with no registered handler are dropped
    /// silently; subscribing to a subset of topics is normal.
    pub fn dispatch(&self, envelope: Envelope) {
        match self.handlers.get(&envelope.topic) {
            Some(handler) => handler(envelope.payload),
            None => {
                tracing::debug!("[Consumer] No handler for topic {}", envelope.topic);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_dispatch_routes_by_topic() {
        let message_calls = Arc::new(AtomicUsize::new(0));
        let wellness_calls = Arc::new(AtomicUsize::new(0));

        let m = Arc::clone(&message_calls);
        let w = Arc::clone(&wellness_calls);
        let handlers = TopicHandlers::new()
            .on(Topic::Message, move |_| {
                m.fetch_add(1, Ordering::SeqCst);
            })
            .on(Topic::Wellness, move |_| {
                w.fetch_add(1, Ordering::SeqCst);
            });

        handlers.dispatch(Envelope::new(Topic::Message, json!({"id": "m1"})));
        handlers.dispatch(Envelope::new(Topic::Message, json!({"id": "m2"})));
        handlers.dispatch(Envelope::new(Topic::Wellness, json!({"person": "Kia"})));

        assert_eq!(message_calls.load(Ordering::SeqCst), 2);
        assert_eq!(wellness_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unhandled_topic_is_dropped() {
        let handlers = TopicHandlers::new();
        // No handler registered; must not panic.
        handlers.dispatch(Envelope::new(Topic::Poll, json!({"question": "?"})));
    }

    #[test]
    fn test_handler_receives_payload() {
        let seen = Arc::new(std::sync::Mutex::new(None));
        let sink = Arc::clone(&seen);
        let handlers = TopicHandlers::new().on(Topic::Message, move |payload| {
            *sink.lock().unwrap() = Some(payload);
        });

        handlers.dispatch(Envelope::new(
            Topic::Message,
            json!({"id": "m1", "sender": "Kia", "text": "hi"}),
        ));

        let payload = seen.lock().unwrap().take().unwrap();
        assert_eq!(payload["sender"], "Kia");
        assert_eq!(payload["text"], "hi");
    }
}
