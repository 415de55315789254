//! In-memory sliding window rate limiter
//!
//! Each key keeps the timestamps of its admitted requests. A request at `now`
//! counts the timestamps in the trailing window `(now - window, now]` and is
//! admitted only while that count is below the limit. Rejected requests are
//! not recorded, so a client hammering a closed window does not extend it.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

use cl_shared::RateLimitConfig;

use crate::clock::{Clock, SystemClock};
use crate::errors::CredentialError;
use crate::services::token::Sweep;

/// Outcome of an admitted request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    /// Requests still admissible in the current window after this one
    pub remaining: u32,
    /// Configured limit per window
    pub limit: u32,
}

/// Per-key sliding window limiter
///
/// A single lock guards all keys. For very large keyspaces a sharded map
/// would reduce contention; at the expected key counts one lock is enough.
pub struct SlidingWindowLimiter {
    limit: u32,
    window: Duration,
    enabled: bool,
    requests: Mutex<HashMap<String, VecDeque<DateTime<Utc>>>>,
    clock: Arc<dyn Clock>,
}

impl SlidingWindowLimiter {
    /// Create a limiter admitting `limit` requests per `window` per key
    pub fn new(limit: u32, window: Duration) -> Self {
        Self::with_clock(limit, window, Arc::new(SystemClock))
    }

    pub fn with_clock(limit: u32, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            limit,
            window,
            enabled: true,
            requests: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Build from configuration; a disabled configuration admits everything
    pub fn from_config(config: &RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        let window = Duration::seconds(config.window_seconds.min(i64::MAX as u64 / 1000) as i64);
        Self {
            enabled: config.enabled,
            ..Self::with_clock(config.limit, window, clock)
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Admit and record the request iff fewer than `limit` requests were
    /// admitted for `key` within the trailing window
    pub async fn allow(&self, key: &str) -> bool {
        self.check(key).await.is_ok()
    }

    /// Same admission as [`allow`](Self::allow), reporting the remaining
    /// budget on success and the time until a slot frees up on denial
    pub async fn check(&self, key: &str) -> Result<RateLimitStatus, CredentialError> {
        if !self.enabled {
            return Ok(RateLimitStatus {
                remaining: self.limit,
                limit: self.limit,
            });
        }

        let now = self.clock.now();
        let cutoff = self.cutoff(now);

        let mut requests = self.requests.lock().await;
        let timestamps = requests.entry(key.to_string()).or_default();
        while timestamps.front().is_some_and(|t| *t <= cutoff) {
            timestamps.pop_front();
        }

        let count = timestamps.len();
        if count < self.limit as usize {
            timestamps.push_back(now);
            return Ok(RateLimitStatus {
                remaining: self.limit - count as u32 - 1,
                limit: self.limit,
            });
        }

        // Oldest in-window request leaves the window at `oldest + window`.
        let retry_after_seconds = match timestamps.front() {
            Some(oldest) => {
                let leaves_at = oldest
                    .checked_add_signed(self.window)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC);
                let millis = leaves_at
                    .signed_duration_since(now)
                    .num_milliseconds()
                    .max(0) as u64;
                millis.div_ceil(1000).max(1)
            }
            None => (self.window.num_seconds().max(1)) as u64,
        };
        if timestamps.is_empty() {
            requests.remove(key);
        }

        warn!(key = %key, retry_after_seconds, "Rate limit exceeded");
        Err(CredentialError::RateLimited {
            retry_after_seconds,
        })
    }

    /// Drop keys whose every timestamp has left the window. Returns the
    /// number of keys dropped.
    pub async fn purge_idle(&self) -> usize {
        let cutoff = self.cutoff(self.clock.now());

        let mut requests = self.requests.lock().await;
        let before = requests.len();
        requests.retain(|_, timestamps| {
            timestamps.retain(|t| *t > cutoff);
            !timestamps.is_empty()
        });
        before - requests.len()
    }

    /// Forget all history for `key`
    pub async fn reset(&self, key: &str) {
        self.requests.lock().await.remove(key);
    }

    /// Number of keys currently holding state
    pub async fn tracked_keys(&self) -> usize {
        self.requests.lock().await.len()
    }

    // Windows reaching past the representable range keep every timestamp.
    fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.window).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

#[async_trait]
impl Sweep for SlidingWindowLimiter {
    fn name(&self) -> &str {
        "rate_limiter"
    }

    async fn sweep(&self) -> usize {
        self.purge_idle().await
    }
}
