//! Payloads stored behind opaque tokens.
//!
//! Each payload names the subject (account) it is bound to. Expiry is kept by
//! the store, not by the payload, so a payload is valid exactly as long as
//! the store still returns it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Common view over every payload kind, used by the generic token store to
/// answer per-subject queries
pub trait TokenPayload: Clone + Send + Sync + 'static {
    /// The account this payload authorizes
    fn subject_id(&self) -> &str;
}

/// Network origin of a request, captured when a session is created
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub ip_address: String,
    pub user_agent: String,
}

impl ClientInfo {
    pub fn new(ip_address: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            ip_address: ip_address.into(),
            user_agent: user_agent.into(),
        }
    }
}

/// Login session, validated repeatedly until logout or expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Account the session belongs to
    pub subject_id: String,

    /// Client address at session creation
    pub ip_address: String,

    /// Client user agent at session creation
    pub user_agent: String,

    /// When the session was created
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(subject_id: impl Into<String>, client: &ClientInfo, created_at: DateTime<Utc>) -> Self {
        Self {
            subject_id: subject_id.into(),
            ip_address: client.ip_address.clone(),
            user_agent: client.user_agent.clone(),
            created_at,
        }
    }
}

impl TokenPayload for Session {
    fn subject_id(&self) -> &str {
        &self.subject_id
    }
}

/// Refresh token grant; consumed and reissued on every rotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshGrant {
    pub subject_id: String,
}

impl RefreshGrant {
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
        }
    }
}

impl TokenPayload for RefreshGrant {
    fn subject_id(&self) -> &str {
        &self.subject_id
    }
}

/// Single-use password reset grant bound to an account and its email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordReset {
    pub subject_id: String,
    pub email: String,
}

impl PasswordReset {
    pub fn new(subject_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            email: email.into(),
        }
    }
}

impl TokenPayload for PasswordReset {
    fn subject_id(&self) -> &str {
        &self.subject_id
    }
}

/// Single-use email verification grant bound to an account and the email
/// address being verified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailVerification {
    pub subject_id: String,
    pub email: String,
}

impl EmailVerification {
    pub fn new(subject_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            email: email.into(),
        }
    }
}

impl TokenPayload for EmailVerification {
    fn subject_id(&self) -> &str {
        &self.subject_id
    }
}
