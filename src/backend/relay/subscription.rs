/**
 * Subscription Manager
 *
 * Bridges the change source to the broadcast path. At startup the manager
 * opens one durable subscription per topic in the fixed topic set; each
 * subscription runs on its own task, so topics never block each other and
 * per-topic event order is preserved through the broadcaster.
 *
 * # Failure Semantics
 *
 * A lost or unestablishable subscription is retried with capped exponential
 * backoff and logged at error level each time. This matters: a silently
 * dead subscription means total, undetectable loss of real-time updates
 * for every connected client. Events committed while a subscription is
 * down are not replayed; clients re-fetch full state to catch up.
 *
 * # Lifecycle
 *
 * `start` consumes the manager and returns a `SubscriptionHandle`; dropping
 * or `stop`ping the handle aborts the topic tasks. The server holds the
 * handle for the life of the process.
 */
use crate::backend::relay::broadcaster::Broadcaster;
use crate::backend::source::{ChangeSource, SourceError};
use crate::shared::{ChangeEvent, Topic};
use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Base delay before the first resubscribe attempt
const BACKOFF_BASE: Duration = Duration::from_secs(1);

/// Ceiling for the resubscribe delay
const BACKOFF_MAX: Duration = Duration::from_secs(60);

/// Capped exponential backoff delay for a resubscribe attempt
///
/// Doubles from `base` per attempt up to `max`, plus up to 10% jitter so a
/// fleet of topic tasks does not hammer a recovering store in lockstep.
fn backoff_delay(base: Duration, max: Duration, attempt: u32) -> Duration {
    let exp = base.saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)));
    let capped = exp.min(max);
    let jitter_ceiling = (capped.as_millis() as u64) / 10;
    if jitter_ceiling == 0 {
        return capped;
    }
    capped + Duration::from_millis(rand::random::<u64>() % jitter_ceiling)
}

/// Wires per-topic change subscriptions into the broadcaster
pub struct SubscriptionManager<S> {
    source: Arc<S>,
    broadcaster: Broadcaster,
    topics: Vec<Topic>,
    backoff_base: Duration,
    backoff_max: Duration,
}

/// Handle to the running topic tasks
///
/// Aborting is the only teardown: subscriptions hold no server-side state
/// that needs a graceful close.
pub struct SubscriptionHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl SubscriptionHandle {
    /// Stop all topic subscriptions
    pub fn stop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<S: ChangeSource> SubscriptionManager<S> {
    /// Create a manager over the full fixed topic set
    pub fn new(source: S, broadcaster: Broadcaster) -> Self {
        Self::with_topics(source, broadcaster, Topic::ALL.to_vec())
    }

    /// Create a manager over an explicit topic list
    pub fn with_topics(source: S, broadcaster: Broadcaster, topics: Vec<Topic>) -> Self {
        Self {
            source: Arc::new(source),
            broadcaster,
            topics,
            backoff_base: BACKOFF_BASE,
            backoff_max: BACKOFF_MAX,
        }
    }

    /// Override the resubscribe backoff window (used by tests)
    pub fn with_backoff(mut self, base: Duration, max: Duration) -> Self {
        self.backoff_base = base;
        self.backoff_max = max;
        self
    }

    /// Open all topic subscriptions and return the running handle
    pub fn start(self) -> SubscriptionHandle {
        let tasks = self
            .topics
            .iter()
            .map(|&topic| {
                let source = Arc::clone(&self.source);
                let broadcaster = self.broadcaster.clone();
                let (base, max) = (self.backoff_base, self.backoff_max);
                tokio::spawn(async move {
                    run_topic(source, broadcaster, topic, base, max).await;
                })
            })
            .collect();

        tracing::info!(
            "[Relay] Subscription manager started for {} topic(s)",
            self.topics.len()
        );
        SubscriptionHandle { tasks }
    }
}

/// Drive one topic subscription forever, resubscribing on failure
async fn run_topic<S: ChangeSource>(
    source: Arc<S>,
    broadcaster: Broadcaster,
    topic: Topic,
    backoff_base: Duration,
    backoff_max: Duration,
) {
    let mut attempt: u32 = 0;
    loop {
        match source.subscribe(topic).await {
            Ok(mut stream) => {
                tracing::info!("[Relay] Subscribed to topic {}", topic);
                attempt = 0;
                let mut failed = false;
                while let Some(item) = stream.next().await {
                    match item {
                        Ok(notification) => {
                            forward(&broadcaster, topic, notification.new_record);
                        }
                        Err(e) => {
                            tracing::error!(
                                "[Relay] Change stream for {} failed: {}; resubscribing",
                                topic,
                                e
                            );
                            failed = true;
                            break;
                        }
                    }
                }
                if !failed {
                    // A stream that ends without an error is equally dead.
                    tracing::error!("[Relay] Change stream for {} ended; resubscribing", topic);
                }
            }
            Err(e) => {
                log_subscribe_failure(topic, &e);
            }
        }

        attempt = attempt.saturating_add(1);
        let delay = backoff_delay(backoff_base, backoff_max, attempt);
        tracing::warn!(
            "[Relay] Retrying {} subscription in {:?} (attempt {})",
            topic,
            delay,
            attempt
        );
        tokio::time::sleep(delay).await;
    }
}

/// Build the change event and hand it to the broadcaster
///
/// A broadcast failure here can only be an envelope serialization error;
/// it is logged and the subscription keeps running.
fn forward(broadcaster: &Broadcaster, topic: Topic, new_record: serde_json::Value) {
    let event = ChangeEvent::new(topic, new_record);
    if let Err(e) = broadcaster.broadcast(event) {
        tracing::error!("[Relay] Failed to broadcast {} event: {}", topic, e);
    }
}

fn log_subscribe_failure(topic: Topic, error: &SourceError) {
    tracing::error!(
        "[Relay] Failed to subscribe to {}: {}; real-time updates for this topic are down",
        topic,
        error
    );
}
