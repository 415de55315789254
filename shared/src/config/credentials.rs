//! Credential lifetime configuration

use serde::{Deserialize, Serialize};

/// Lifetimes and collaborator bounds for the credential lifecycle
///
/// All durations are expressed in whole seconds (milliseconds for the
/// directory timeout) so that they map cleanly onto TOML and environment
/// variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CredentialConfig {
    /// Lifetime of a session record
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: u64,

    /// Lifetime of a refresh token
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_seconds: u64,

    /// Lifetime of a password reset token
    #[serde(default = "default_password_reset_ttl")]
    pub password_reset_ttl_seconds: u64,

    /// Lifetime of an email verification token
    #[serde(default = "default_email_verification_ttl")]
    pub email_verification_ttl_seconds: u64,

    /// `expires_in` value advertised to clients for the access token.
    /// This is an external contract and is intentionally independent of
    /// `session_ttl_seconds`.
    #[serde(default = "default_advertised_expires_in")]
    pub advertised_expires_in: i64,

    /// Upper bound for a single account directory call
    #[serde(default = "default_directory_timeout_ms")]
    pub directory_timeout_ms: u64,

    /// Revoke every session and refresh token of the account after a
    /// completed password reset
    #[serde(default)]
    pub revoke_sessions_on_password_reset: bool,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            session_ttl_seconds: default_session_ttl(),
            refresh_ttl_seconds: default_refresh_ttl(),
            password_reset_ttl_seconds: default_password_reset_ttl(),
            email_verification_ttl_seconds: default_email_verification_ttl(),
            advertised_expires_in: default_advertised_expires_in(),
            directory_timeout_ms: default_directory_timeout_ms(),
            revoke_sessions_on_password_reset: false,
        }
    }
}

fn default_session_ttl() -> u64 {
    24 * 60 * 60 // 24 hours
}

fn default_refresh_ttl() -> u64 {
    7 * 24 * 60 * 60 // 7 days
}

fn default_password_reset_ttl() -> u64 {
    60 * 60 // 1 hour
}

fn default_email_verification_ttl() -> u64 {
    24 * 60 * 60 // 24 hours
}

fn default_advertised_expires_in() -> i64 {
    3600
}

fn default_directory_timeout_ms() -> u64 {
    5000
}
