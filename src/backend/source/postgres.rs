/**
 * PostgreSQL Change Source
 *
 * Implements `ChangeSource` on top of PostgreSQL `LISTEN`/`NOTIFY`. The row
 * triggers installed by `migrations/0001_init.sql` publish the full new row
 * as JSON on one notification channel per table (`tripsync_<table>`); this
 * module listens on the channel for a topic's table and decodes each
 * payload into a `ChangeNotification`.
 *
 * # Failure Semantics
 *
 * `PgListener` re-establishes its connection internally after transient
 * drops. A hard failure surfaces as an `Err` item on the stream, at which
 * point the subscription manager discards the stream and calls `subscribe`
 * again with backoff. Notifications emitted while the listener was down are
 * lost; the relay makes no replay guarantee, and clients re-fetch full
 * state after a gap.
 */
use crate::backend::source::{ChangeNotification, ChangeSource, ChangeStream, SourceError};
use crate::shared::Topic;
use futures_util::stream;
use sqlx::postgres::PgListener;
use sqlx::PgPool;

/// Notification channel name for a topic's table
fn channel_name(topic: Topic) -> String {
    format!("tripsync_{}", topic.table())
}

/// Change source backed by PostgreSQL LISTEN/NOTIFY
#[derive(Clone)]
pub struct PgChangeSource {
    pool: PgPool,
}

impl PgChangeSource {
    /// Create a change source sharing the given connection pool
    ///
    /// Each `subscribe` call checks a dedicated connection out of the pool
    /// for its listener, so topic streams do not contend with the CRUD
    /// handlers for connections.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ChangeSource for PgChangeSource {
    async fn subscribe(&self, topic: Topic) -> Result<ChangeStream, SourceError> {
        let mut listener = PgListener::connect_with(&self.pool).await?;
        let channel = channel_name(topic);
        listener.listen(&channel).await?;

        tracing::info!("[Source] Listening on channel {}", channel);

        let stream = stream::unfold(listener, move |mut listener| async move {
            // Loop past malformed payloads; only a connection-level failure
            // ends the stream.
            loop {
                match listener.recv().await {
                    Ok(notification) => {
                        match serde_json::from_str::<ChangeNotification>(notification.payload()) {
                            Ok(change) => return Some((Ok(change), listener)),
                            Err(e) => {
                                tracing::warn!(
                                    "[Source] Discarding undecodable notification on {}: {}",
                                    notification.channel(),
                                    e
                                );
                                continue;
                            }
                        }
                    }
                    Err(e) => return Some((Err(SourceError::Database(e)), listener)),
                }
            }
        });

        Ok(Box::pin(stream))
    }
}
