/**
 * Relay Topics
 *
 * This module defines the fixed set of logical event streams the relay
 * carries. Every change event belongs to exactly one topic; topics are flat,
 * never nested or hierarchical.
 *
 * Each topic maps 1:1 to a database table in the managed store. The relay
 * uses the table name on an incoming change notification to recover the
 * topic, and the topic's snake_case name as the `type` field of the wire
 * envelope.
 */
use serde::{Deserialize, Serialize};

/// A named logical event stream carried by the relay
///
/// The set is fixed: chat messages, wellness metrics, polls, and itinerary
/// items. On the wire the topic appears as the envelope's `type` field in
/// snake_case (`"message"`, `"wellness"`, `"poll"`, `"itinerary"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// Chat message created or updated
    Message,
    /// Wellness metrics row upserted
    Wellness,
    /// Poll created or votes changed
    Poll,
    /// Itinerary item created or updated
    Itinerary,
}

impl Topic {
    /// All topics the relay subscribes to, in a fixed order
    pub const ALL: [Topic; 4] = [
        Topic::Message,
        Topic::Wellness,
        Topic::Poll,
        Topic::Itinerary,
    ];

    /// The wire name of this topic (the envelope `type` field)
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Message => "message",
            Topic::Wellness => "wellness",
            Topic::Poll => "poll",
            Topic::Itinerary => "itinerary",
        }
    }

    /// The database table that backs this topic
    pub fn table(&self) -> &'static str {
        match self {
            Topic::Message => "messages",
            Topic::Wellness => "wellness_metrics",
            Topic::Poll => "polls",
            Topic::Itinerary => "itinerary",
        }
    }

    /// Recover the topic from a change notification's table name
    ///
    /// Returns `None` for tables the relay does not carry, which callers
    /// treat as "ignore the notification".
    pub fn from_table(table: &str) -> Option<Topic> {
        match table {
            "messages" => Some(Topic::Message),
            "wellness_metrics" => Some(Topic::Wellness),
            "polls" => Some(Topic::Poll),
            "itinerary" => Some(Topic::Itinerary),
            _ => None,
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_wire_names() {
        assert_eq!(Topic::Message.as_str(), "message");
        assert_eq!(Topic::Wellness.as_str(), "wellness");
        assert_eq!(Topic::Poll.as_str(), "poll");
        assert_eq!(Topic::Itinerary.as_str(), "itinerary");
    }

    #[test]
    fn test_topic_table_round_trip() {
        for topic in Topic::ALL {
            assert_eq!(Topic::from_table(topic.table()), Some(topic));
        }
    }

    #[test]
    fn test_from_table_unknown() {
        assert_eq!(Topic::from_table("profiles"), None);
        assert_eq!(Topic::from_table(""), None);
    }

    #[test]
    fn test_topic_serialization() {
        let json = serde_json::to_string(&Topic::Wellness).unwrap();
        assert_eq!(json, "\"wellness\"");
        let parsed: Topic = serde_json::from_str("\"message\"").unwrap();
        assert_eq!(parsed, Topic::Message);
    }
}
