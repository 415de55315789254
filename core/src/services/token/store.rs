//! Generic in-memory store mapping opaque tokens to expiring records
//!
//! One instance exists per credential kind. Each instance guards its map with
//! its own lock; nothing is shared between instances. Expired records are
//! treated as absent on every read path and physically removed either lazily
//! (on the next access) or by the periodic sweep.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::domain::entities::{
    EmailVerification, PasswordReset, RefreshGrant, Session, TokenPayload,
};

use super::cleanup::Sweep;
use super::generator::redact;

/// Store of login sessions
pub type SessionStore = ExpiringTokenStore<Session>;

/// Store of refresh token grants
pub type RefreshTokenStore = ExpiringTokenStore<RefreshGrant>;

/// Store of password reset grants
pub type PasswordResetTokenStore = ExpiringTokenStore<PasswordReset>;

/// Store of email verification grants
pub type EmailVerificationTokenStore = ExpiringTokenStore<EmailVerification>;

#[derive(Debug, Clone)]
struct StoredRecord<T> {
    payload: T,
    expires_at: DateTime<Utc>,
}

impl<T> StoredRecord<T> {
    /// A record is live strictly before its expiry instant
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Concurrency-safe token -> payload map with absolute expiry
///
/// Every operation reads the clock exactly once. `put`, `consume`, `revoke`
/// and purges take the exclusive lock; `get` and `list_by_subject` take the
/// shared lock and therefore always observe whole records.
pub struct ExpiringTokenStore<T: TokenPayload> {
    name: &'static str,
    records: RwLock<HashMap<String, StoredRecord<T>>>,
    clock: Arc<dyn Clock>,
}

impl<T: TokenPayload> ExpiringTokenStore<T> {
    /// Create an empty store using the system clock
    pub fn new(name: &'static str) -> Self {
        Self::with_clock(name, Arc::new(SystemClock))
    }

    /// Create an empty store reading time from `clock`
    pub fn with_clock(name: &'static str, clock: Arc<dyn Clock>) -> Self {
        Self {
            name,
            records: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Name used in logs and sweep reports
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Insert or overwrite the record for `token`, expiring `ttl` from now
    pub async fn put(&self, token: impl Into<String>, payload: T, ttl: Duration) {
        self.put_at(token, payload, self.clock.now(), ttl).await;
    }

    /// Like [`put`](Self::put), with expiry measured from `issued_at`
    pub async fn put_at(
        &self,
        token: impl Into<String>,
        payload: T,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut records = self.records.write().await;
        records.insert(token.into(), StoredRecord { payload, expires_at });
    }

    /// Non-consuming lookup
    ///
    /// Returns `None` for unknown and expired tokens. An expired record found
    /// here is removed before returning.
    pub async fn get(&self, token: &str) -> Option<T> {
        let now = self.clock.now();

        {
            let records = self.records.read().await;
            match records.get(token) {
                None => return None,
                Some(record) if record.is_live(now) => return Some(record.payload.clone()),
                Some(_) => {}
            }
        }

        // Re-check under the write lock: the token may have been re-put since.
        let mut records = self.records.write().await;
        if records.get(token).is_some_and(|record| !record.is_live(now)) {
            records.remove(token);
            debug!(store = self.name, token = %redact(token), "reaped expired record on read");
        }
        None
    }

    /// Look up and remove in one critical section
    ///
    /// Of any number of concurrent callers presenting the same live token,
    /// exactly one receives the payload.
    pub async fn consume(&self, token: &str) -> Option<T> {
        let now = self.clock.now();

        let mut records = self.records.write().await;
        let record = records.remove(token)?;
        if record.is_live(now) {
            Some(record.payload)
        } else {
            debug!(store = self.name, token = %redact(token), "reaped expired record on consume");
            None
        }
    }

    /// Remove the record if present. Idempotent; the return value only says
    /// whether something was removed.
    pub async fn revoke(&self, token: &str) -> bool {
        let mut records = self.records.write().await;
        records.remove(token).is_some()
    }

    /// All live records bound to `subject_id`, in no particular order
    pub async fn list_by_subject(&self, subject_id: &str) -> Vec<T> {
        let now = self.clock.now();

        let records = self.records.read().await;
        records
            .values()
            .filter(|record| record.is_live(now) && record.payload.subject_id() == subject_id)
            .map(|record| record.payload.clone())
            .collect()
    }

    /// Remove every record (live or expired) bound to `subject_id`.
    /// Returns the number of live records revoked.
    pub async fn revoke_by_subject(&self, subject_id: &str) -> usize {
        let now = self.clock.now();
        let mut revoked = 0;

        let mut records = self.records.write().await;
        records.retain(|_, record| {
            if record.payload.subject_id() != subject_id {
                return true;
            }
            if record.is_live(now) {
                revoked += 1;
            }
            false
        });
        revoked
    }

    /// Physically remove every expired record. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();

        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| record.is_live(now));
        before - records.len()
    }

    /// Number of physically held records, including expired ones that have
    /// not been reaped yet
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl<T: TokenPayload> Sweep for ExpiringTokenStore<T> {
    fn name(&self) -> &str {
        self.name
    }

    async fn sweep(&self) -> usize {
        self.purge_expired().await
    }
}
