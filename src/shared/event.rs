/**
 * Relay Event Types
 *
 * This module defines the event types that flow through the real-time relay:
 * the in-process `ChangeEvent` handed from the subscription layer to the
 * broadcaster, and the wire-level `Envelope` sent to connected clients.
 *
 * Events always carry the full new state of the record that changed. There
 * are no diff or delta semantics: a client that receives an event can apply
 * it without any prior state for that record.
 */
use crate::shared::topic::Topic;
use serde::{Deserialize, Serialize};

/// One notification that a record on a topic was created or updated
///
/// Constructed transiently by the subscription layer when the change source
/// notifies, handed to the broadcaster, and discarded after the broadcast.
/// Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// The stream this event belongs to
    pub topic: Topic,
    /// The full new record, as stored
    pub payload: serde_json::Value,
}

impl ChangeEvent {
    /// Create a new change event carrying a full record
    pub fn new(topic: Topic, payload: serde_json::Value) -> Self {
        Self { topic, payload }
    }
}

/// The wire form of a [`ChangeEvent`]
///
/// Serialized once per broadcast and sent identically to every open socket
/// as a single JSON text frame:
///
/// ```json
/// { "type": "message", "payload": { "id": "...", "sender": "...", ... } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope {
    /// The topic, serialized as the `type` field
    #[serde(rename = "type")]
    pub topic: Topic,
    /// The full record object
    pub payload: serde_json::Value,
}

impl From<ChangeEvent> for Envelope {
    fn from(event: ChangeEvent) -> Self {
        Self {
            topic: event.topic,
            payload: event.payload,
        }
    }
}

impl Envelope {
    /// Create an envelope directly from a topic and payload
    pub fn new(topic: Topic, payload: serde_json::Value) -> Self {
        Self { topic, payload }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_wire_shape() {
        let envelope = Envelope::new(Topic::Message, json!({"id": "m1", "text": "hi"}));
        let wire = serde_json::to_value(&envelope).unwrap();
        assert_eq!(wire["type"], "message");
        assert_eq!(wire["payload"]["id"], "m1");
    }

    #[test]
    fn test_envelope_round_trip() {
        let envelope = Envelope::new(Topic::Wellness, json!({"person": "Kia", "hydration": 55}));
        let text = serde_json::to_string(&envelope).unwrap();
        let parsed: Envelope = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, envelope);
    }

    #[test]
    fn test_envelope_from_change_event() {
        let event = ChangeEvent::new(Topic::Poll, json!({"question": "Club or show?"}));
        let envelope = Envelope::from(event.clone());
        assert_eq!(envelope.topic, event.topic);
        assert_eq!(envelope.payload, event.payload);
    }

    #[test]
    fn test_envelope_rejects_unknown_type() {
        let result: Result<Envelope, _> =
            serde_json::from_str(r#"{"type":"profile","payload":{}}"#);
        assert!(result.is_err());
    }
}
