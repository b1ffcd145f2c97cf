//! Change Source
//!
//! The change source is the relay's upstream: a durable data store that
//! emits one notification per committed write, carrying the table name and
//! the full new row. The relay treats it as a black box behind the
//! [`ChangeSource`] trait ("give me a stream of (topic, new-record)
//! events"), so the broadcast path never depends on a concrete store.
//!
//! Two implementations are provided:
//!
//! - **`postgres`** - PostgreSQL `LISTEN`/`NOTIFY` via `sqlx::PgListener`,
//!   fed by the row triggers in `migrations/`
//! - **`memory`** - an in-process source for tests and database-less runs

use crate::shared::Topic;
use futures_util::stream::BoxStream;
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

/// PostgreSQL LISTEN/NOTIFY change source
pub mod postgres;

/// In-process change source
pub mod memory;

pub use memory::MemoryChangeSource;
pub use postgres::PgChangeSource;

/// One raw notification from the change source
///
/// Mirrors the payload shape the store publishes: the kind of write, the
/// schema and table it landed in, and the full new row. The relay only uses
/// `table` (mapped to a [`Topic`]) and `new_record`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangeNotification {
    /// The kind of write: `INSERT` or `UPDATE`
    pub event_kind: String,
    /// Schema the table lives in
    pub schema: String,
    /// Table name, mapped to a topic by the subscription layer
    pub table: String,
    /// The full new row
    pub new_record: serde_json::Value,
    /// The previous row, present on updates only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_record: Option<serde_json::Value>,
}

/// Errors from establishing or consuming a change subscription
#[derive(Debug, Error)]
pub enum SourceError {
    /// Database connection or protocol error
    #[error("Change source database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A notification payload could not be decoded
    #[error("Change notification decode error: {message}")]
    Decode {
        /// Human-readable error message
        message: String,
    },

    /// The change stream was lost and must be re-established
    #[error("Change stream lost: {message}")]
    Lost {
        /// Human-readable error message
        message: String,
    },
}

impl SourceError {
    /// Create a new decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a new stream-lost error
    pub fn lost(message: impl Into<String>) -> Self {
        Self::Lost {
            message: message.into(),
        }
    }
}

/// A live stream of change notifications for one topic
///
/// An `Err` item means the stream is no longer usable; the subscription
/// manager drops it and resubscribes with backoff.
pub type ChangeStream = BoxStream<'static, Result<ChangeNotification, SourceError>>;

/// A store that can hand out per-topic change streams
///
/// Implementations must be cheap to subscribe against repeatedly: the
/// subscription manager calls `subscribe` again every time a stream is lost.
pub trait ChangeSource: Send + Sync + 'static {
    /// Open a durable subscription for one topic
    fn subscribe(
        &self,
        topic: Topic,
    ) -> impl Future<Output = Result<ChangeStream, SourceError>> + Send;
}
