/**
 * Relay Consumer Configuration
 *
 * Configuration for the client-side relay consumer: the relay URL, the
 * reconnect policy, and the connection timeout.
 *
 * # Reconnect Policy
 *
 * The retry policy is part of the consumer's public contract. The default
 * is a fixed 5-second delay between attempts, retrying forever. Deployments
 * with many concurrent clients should switch to capped exponential backoff
 * with jitter so a recovering server is not hit by every client at once.
 */
use std::time::Duration;

/// Delay between reconnect attempts under the default policy
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Default timeout for one connection attempt
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Reconnect scheduling policy
#[derive(Debug, Clone)]
pub enum RetryPolicy {
    /// Fixed interval between attempts, forever
    FixedDelay(Duration),
    /// Exponential backoff with jitter, capped at `max`
    ExponentialBackoff {
        /// Delay before the first retry
        base: Duration,
        /// Ceiling for the delay
        max: Duration,
        /// Jitter factor in `0.0..=1.0`, applied on top of the delay
        jitter: f64,
    },
}

impl RetryPolicy {
    /// Delay before the given attempt (1-based)
    pub fn delay(&self, attempt: u32) -> Duration {
        match self {
            RetryPolicy::FixedDelay(interval) => *interval,
            RetryPolicy::ExponentialBackoff { base, max, jitter } => {
                let exp = base.saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)));
                let capped = exp.min(*max);
                let jitter_ceiling =
                    ((capped.as_millis() as f64) * jitter.clamp(0.0, 1.0)) as u64;
                if jitter_ceiling == 0 {
                    return capped;
                }
                capped + Duration::from_millis(rand::random::<u64>() % jitter_ceiling)
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::FixedDelay(DEFAULT_RETRY_DELAY)
    }
}

/// Relay consumer configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Relay endpoint, e.g. `ws://localhost:3001/ws`
    pub url: String,
    /// Reconnect policy
    pub retry: RetryPolicy,
    /// Timeout for one connection attempt
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Configuration for the relay at `url` with default policy
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            retry: RetryPolicy::default(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Override the reconnect policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Override the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_delay_is_constant() {
        let policy = RetryPolicy::FixedDelay(Duration::from_secs(5));
        assert_eq!(policy.delay(1), Duration::from_secs(5));
        assert_eq!(policy.delay(100), Duration::from_secs(5));
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let policy = RetryPolicy::ExponentialBackoff {
            base: Duration::from_millis(100),
            max: Duration::from_secs(4),
            jitter: 0.0,
        };
        assert_eq!(policy.delay(1), Duration::from_millis(100));
        assert_eq!(policy.delay(2), Duration::from_millis(200));
        assert_eq!(policy.delay(4), Duration::from_millis(800));
        assert_eq!(policy.delay(30), Duration::from_secs(4));
    }

    #[test]
    fn test_backoff_jitter_stays_bounded() {
        let policy = RetryPolicy::ExponentialBackoff {
            base: Duration::from_millis(100),
            max: Duration::from_millis(100),
            jitter: 0.5,
        };
        for attempt in 1..20 {
            let delay = policy.delay(attempt);
            assert!(delay >= Duration::from_millis(100));
            assert!(delay < Duration::from_millis(151));
        }
    }

    #[test]
    fn test_default_policy_is_fixed_five_seconds() {
        match RetryPolicy::default() {
            RetryPolicy::FixedDelay(interval) => {
                assert_eq!(interval, Duration::from_secs(5));
            }
            _ => panic!("Expected FixedDelay default"),
        }
    }
}
