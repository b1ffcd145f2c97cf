/**
 * Trip Record Types
 *
 * This module defines the row types for the four record kinds the
 * application stores: chat messages, wellness metrics, itinerary items, and
 * polls. They are shared between the REST handlers (which read and write
 * them) and clients of the relay (which receive them as event payloads).
 *
 * Field names match the database columns; JSON serialization uses the same
 * snake_case names, so a row fetched over REST and a record delivered in a
 * relay envelope have identical shape.
 */
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chat message, optionally carrying a location, voice memo, or photo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: String,
    pub text: String,
    pub is_location: bool,
    pub location: Option<String>,
    pub is_voice_memo: bool,
    pub voice_memo_url: Option<String>,
    pub is_photo: bool,
    pub photo_url: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// One person's wellness metrics, upserted as a whole row
///
/// Hydration is a 0-100 percentage; sleep is in hours. The hangover risk is
/// computed client-side and stored with the rest of the row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct WellnessMetrics {
    pub person: String,
    pub hydration: i32,
    pub sleep: f64,
    pub alcohol_units: i32,
    pub hangover_risk: f64,
    pub updated_at: DateTime<Utc>,
}

/// A single itinerary entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct ItineraryItem {
    pub id: Uuid,
    pub date: NaiveDate,
    pub activity: String,
    pub location: String,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

/// A group poll
///
/// `votes` maps a person's name to the index of the option they chose.
/// Stored as JSONB so a vote is a single-column update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Poll {
    pub id: Uuid,
    pub question: String,
    pub options: Vec<String>,
    pub creator: String,
    pub votes: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_message_serialization() {
        let message = ChatMessage {
            id: Uuid::new_v4(),
            sender: "Kia".to_string(),
            text: "hi".to_string(),
            is_location: false,
            location: None,
            is_voice_memo: false,
            voice_memo_url: None,
            is_photo: false,
            photo_url: None,
            timestamp: Utc::now(),
        };
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["sender"], "Kia");
        assert_eq!(value["is_location"], false);
        let parsed: ChatMessage = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, message);
    }

    #[test]
    fn test_poll_votes_shape() {
        let poll = Poll {
            id: Uuid::new_v4(),
            question: "Pool or brunch?".to_string(),
            options: vec!["Pool".to_string(), "Brunch".to_string()],
            creator: "Dana".to_string(),
            votes: json!({"Dana": 0}),
            is_active: true,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&poll).unwrap();
        assert_eq!(value["votes"]["Dana"], 0);
        assert_eq!(value["options"][1], "Brunch");
    }

    #[test]
    fn test_wellness_metrics_round_trip() {
        let row = WellnessMetrics {
            person: "Sam".to_string(),
            hydration: 55,
            sleep: 6.5,
            alcohol_units: 3,
            hangover_risk: 27.5,
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&row).unwrap();
        let parsed: WellnessMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, row);
    }
}
