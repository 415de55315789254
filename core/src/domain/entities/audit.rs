//! Audit event entity for recording credential lifecycle events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Credential lifecycle event kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEventType {
    Login,
    TokenRefreshed,
    TokenRefreshRejected,
    Logout,
    SessionsRevoked,
    PasswordResetRequested,
    PasswordResetCompleted,
    PasswordResetRejected,
    EmailVerificationIssued,
    EmailVerified,
    EmailVerificationRejected,
}

impl AuditEventType {
    /// Convert to string representation for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "LOGIN",
            Self::TokenRefreshed => "TOKEN_REFRESHED",
            Self::TokenRefreshRejected => "TOKEN_REFRESH_REJECTED",
            Self::Logout => "LOGOUT",
            Self::SessionsRevoked => "SESSIONS_REVOKED",
            Self::PasswordResetRequested => "PASSWORD_RESET_REQUESTED",
            Self::PasswordResetCompleted => "PASSWORD_RESET_COMPLETED",
            Self::PasswordResetRejected => "PASSWORD_RESET_REJECTED",
            Self::EmailVerificationIssued => "EMAIL_VERIFICATION_ISSUED",
            Self::EmailVerified => "EMAIL_VERIFIED",
            Self::EmailVerificationRejected => "EMAIL_VERIFICATION_REJECTED",
        }
    }
}

impl std::fmt::Display for AuditEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single audit record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEvent {
    pub id: Uuid,

    pub event_type: AuditEventType,

    /// Account involved, when known
    pub subject_id: Option<String>,

    /// Client address, when known
    pub ip_address: Option<String>,

    pub success: bool,

    pub occurred_at: DateTime<Utc>,

    /// Free-form context (never contains token values)
    pub details: JsonValue,
}

impl AuditEvent {
    pub fn new(event_type: AuditEventType, success: bool, occurred_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            subject_id: None,
            ip_address: None,
            success,
            occurred_at,
            details: JsonValue::Null,
        }
    }

    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_id = Some(subject_id.into());
        self
    }

    pub fn with_ip(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }

    pub fn with_details(mut self, details: JsonValue) -> Self {
        self.details = details;
        self
    }
}
